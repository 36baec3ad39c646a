use dioxus::html::input_data::MouseButton;
use dioxus::logger::tracing;
use dioxus::prelude::*;
use pinmap_shared::gesture::PointerKind;
use pinmap_shared::pins::asset_path;
use pinmap_shared::render::{AssetSet, FrameOutcome};
use pinmap_shared::{MapWidget, WidgetConfig};
use web_sys::HtmlImageElement;

use crate::canvas::{self, CanvasSurface};
use crate::coords;

const CANVAS_ID: &str = "pin-map-canvas";
const FRAME_ID: &str = "pin-map-frame";

/// Size the canvas from the configured sizing and the frame's current width.
fn measure_canvas(widget: &mut Signal<MapWidget>) {
    let available = coords::element_width(FRAME_ID).unwrap_or(0.0);
    let size = coords::canvas_px(widget.read().config().canvas.resolve(available));
    if widget.read().canvas_size() != size {
        widget.write().set_canvas_size(size);
    }
}

fn draw(widget: &MapWidget, assets: &AssetSet<HtmlImageElement>) {
    let Some(mut surface) = CanvasSurface::find(CANVAS_ID) else {
        return;
    };
    match widget.render(&mut surface, assets) {
        FrameOutcome::Deferred => tracing::trace!("Frame deferred until map image loads"),
        FrameOutcome::MapUnavailable(reason) => {
            tracing::error!(error = %reason, "Map image unavailable")
        }
        FrameOutcome::Drawn {
            pins_drawn,
            pins_pending,
            pins_failed,
        } => {
            if pins_failed > 0 {
                tracing::warn!(pins_failed, "Some pin images could not be drawn");
            }
            tracing::trace!(pins_drawn, pins_pending, "Frame drawn");
        }
    }
}

/// Release the gesture and report a tapped pin.
fn finish_gesture(widget: &mut Signal<MapWidget>, on_pin_select: &EventHandler<String>) {
    let hit = widget.write().pointer_up().map(|p| p.name.clone());
    if let Some(name) = hit {
        on_pin_select.call(name);
    }
}

#[component]
pub fn MapCanvas(config: WidgetConfig, on_pin_select: EventHandler<String>) -> Element {
    let mut widget = use_signal(|| MapWidget::new(config.clone(), 0.0));
    let mut assets = use_signal(|| {
        AssetSet::<HtmlImageElement>::pending(config.pins.iter().map(|p| p.name.as_str()))
    });

    // Kick off every image load once; each one updates its slot when it settles
    use_hook(|| {
        let map_url = asset_path(&config.map.name);
        spawn(async move {
            let slot = canvas::load_slot(&map_url).await;
            assets.write().set_map(slot);
        });
        for pin in &config.pins {
            let name = pin.name.clone();
            let url = pin.asset_path();
            spawn(async move {
                let slot = canvas::load_slot(&url).await;
                assets.write().set_pin(&name, slot);
            });
        }
    });

    // Only offset and size affect the frame; gesture bookkeeping does not
    let view = use_memo(move || {
        let w = widget.read();
        (w.offset(), w.canvas_size())
    });

    // Redraw whenever the view or an asset changes
    use_effect(move || {
        let _ = view();
        let a = assets.read();
        draw(&widget.peek(), &a);
    });

    let map_failure = (*assets.read()).map().failure().map(str::to_string);
    if let Some(reason) = map_failure {
        return rsx! { p { class: "status error", "Map unavailable: {reason}" } };
    }

    let size = widget.read().canvas_size();
    let class = if widget.read().is_panning() {
        "map-canvas dragging"
    } else {
        "map-canvas"
    };

    rsx! {
        div {
            id: FRAME_ID,
            class: "map-frame",
            onmounted: move |_| measure_canvas(&mut widget),
            onresize: move |_| measure_canvas(&mut widget),

            canvas {
                id: CANVAS_ID,
                class: "{class}",
                width: "{size}",
                height: "{size}",

                onmousedown: move |evt: Event<MouseData>| {
                    if evt.trigger_button() != Some(MouseButton::Primary) {
                        return;
                    }
                    evt.prevent_default();
                    let client = evt.client_coordinates();
                    if let Some(pos) = coords::client_to_element(client.x, client.y, CANVAS_ID) {
                        widget.write().pointer_down(pos, PointerKind::Mouse);
                    }
                },

                onmousemove: move |evt: Event<MouseData>| {
                    if !widget.read().is_panning() {
                        return;
                    }
                    let client = evt.client_coordinates();
                    if let Some(pos) = coords::client_to_element(client.x, client.y, CANVAS_ID) {
                        widget.write().pointer_move(pos);
                    }
                },

                onmouseup: move |_| finish_gesture(&mut widget, &on_pin_select),

                onmouseleave: move |_| {
                    if widget.read().is_panning() {
                        widget.write().pointer_cancel();
                    }
                },

                // --- Touch event handlers (single finger only) ---

                ontouchstart: move |evt: Event<TouchData>| {
                    evt.prevent_default();
                    let touches = evt.data().touches();
                    if touches.len() != 1 {
                        widget.write().pointer_cancel();
                        return;
                    }
                    let t = touches[0].client_coordinates();
                    if let Some(pos) = coords::client_to_element(t.x, t.y, CANVAS_ID) {
                        widget.write().pointer_down(pos, PointerKind::Touch);
                    }
                },

                ontouchmove: move |evt: Event<TouchData>| {
                    evt.prevent_default();
                    let touches = evt.data().touches();
                    if touches.len() != 1 || !widget.read().is_panning() {
                        return;
                    }
                    let t = touches[0].client_coordinates();
                    if let Some(pos) = coords::client_to_element(t.x, t.y, CANVAS_ID) {
                        widget.write().pointer_move(pos);
                    }
                },

                ontouchend: move |evt: Event<TouchData>| {
                    evt.prevent_default();
                    if evt.data().touches().is_empty() {
                        finish_gesture(&mut widget, &on_pin_select);
                    }
                },

                ontouchcancel: move |_| widget.write().pointer_cancel(),
            }
        }
    }
}
