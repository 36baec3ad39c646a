use dioxus::logger::tracing;
use dioxus::prelude::*;

use crate::api;
use crate::components::map_canvas::MapCanvas;
use crate::components::pin_notice::PinNotice;

#[component]
pub fn MapPage() -> Element {
    let config_resource = use_resource(|| api::fetch_config());
    let mut selected_pin = use_signal(|| None::<String>);

    let body = match &*config_resource.read() {
        None => rsx! { p { class: "status", "Loading map…" } },
        Some(Err(e)) => {
            tracing::error!(error = %e, "Could not load widget config");
            rsx! { p { class: "status error", "Map unavailable: {e}" } }
        }
        Some(Ok(config)) => rsx! {
            MapCanvas {
                config: config.clone(),
                on_pin_select: move |name: String| {
                    tracing::info!(pin = %name, "Pin clicked");
                    selected_pin.set(Some(name));
                },
            }
        },
    };

    rsx! {
        div { class: "app",
            h1 { "Pin Map" }
            {body}
            PinNotice { selected: selected_pin }
        }
    }
}
