use dioxus::logger::tracing;
use pinmap_shared::geometry::Rect;
use pinmap_shared::render::{AssetSlot, Surface};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

/// A `<canvas>` 2D context as a widget drawing surface.
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
    size: f64,
}

impl CanvasSurface {
    /// Look up a canvas element by id. `None` until it is mounted.
    pub fn find(canvas_id: &str) -> Option<Self> {
        let document = web_sys::window()?.document()?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id(canvas_id)?
            .dyn_into()
            .ok()?;
        let ctx: CanvasRenderingContext2d = canvas.get_context("2d").ok()??.dyn_into().ok()?;
        Some(CanvasSurface {
            ctx,
            size: f64::from(canvas.width()),
        })
    }
}

fn log_draw_error(result: Result<(), JsValue>) {
    if let Err(e) = result {
        tracing::warn!("drawImage failed: {:?}", e);
    }
}

impl Surface for CanvasSurface {
    type Image = HtmlImageElement;

    fn clear(&mut self) {
        self.ctx.clear_rect(0.0, 0.0, self.size, self.size);
    }

    fn draw_region(&mut self, image: &HtmlImageElement, src: Rect, dst: Rect) {
        log_draw_error(
            self.ctx
                .draw_image_with_html_image_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
                    image, src.x, src.y, src.width, src.height, dst.x, dst.y, dst.width, dst.height,
                ),
        );
    }

    fn draw_image(&mut self, image: &HtmlImageElement, dst: Rect) {
        log_draw_error(self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
            image, dst.x, dst.y, dst.width, dst.height,
        ));
    }
}

/// Load an image and wait until it can be drawn.
pub async fn load_image(url: &str) -> Result<HtmlImageElement, String> {
    let img = HtmlImageElement::new().map_err(|e| format!("{:?}", e))?;
    img.set_src(url);
    JsFuture::from(img.decode())
        .await
        .map_err(|e| format!("Failed to load {}: {:?}", url, e))?;
    Ok(img)
}

/// Load an image into an asset slot, logging failures.
pub async fn load_slot(url: &str) -> AssetSlot<HtmlImageElement> {
    match load_image(url).await {
        Ok(img) => {
            tracing::debug!(url, "Image ready");
            AssetSlot::Ready(img)
        }
        Err(e) => {
            tracing::warn!(url, error = %e, "Image failed");
            AssetSlot::Failed(e)
        }
    }
}
