use dioxus::prelude::*;

/// Modal notice for the most recently selected pin. Clicking the backdrop or
/// the button dismisses it.
#[component]
pub fn PinNotice(selected: Signal<Option<String>>) -> Element {
    let Some(name) = selected.read().clone() else {
        return rsx! {};
    };

    rsx! {
        div {
            class: "pin-notice-backdrop",
            onclick: move |_| selected.set(None),

            div {
                class: "pin-notice",
                onclick: move |evt: Event<MouseData>| evt.stop_propagation(),

                h2 { "{name}" }
                p { "Pin \"{name}\" selected." }
                button {
                    onclick: move |_| selected.set(None),
                    "OK"
                }
            }
        }
    }
}
