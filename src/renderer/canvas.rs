//! Canvas 2D surface

use std::collections::HashMap;

use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use super::{DrawCommand, Frame, Sprite, Surface};
use crate::consts::{VIEW_HEIGHT, VIEW_WIDTH};

/// Draws frames onto a `<canvas>` with the 2D context
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
    images: HashMap<Sprite, HtmlImageElement>,
    /// Inversion currently applied to the page
    page_inverted: bool,
}

impl CanvasSurface {
    /// Size the canvas and start loading every sprite
    pub fn new(canvas: &HtmlCanvasElement) -> Option<Self> {
        use wasm_bindgen::JsCast;

        canvas.set_width(VIEW_WIDTH as u32);
        canvas.set_height(VIEW_HEIGHT as u32);

        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;

        let images = Sprite::all()
            .into_iter()
            .filter_map(|sprite| {
                let img = HtmlImageElement::new().ok()?;
                img.set_src(sprite.path());
                Some((sprite, img))
            })
            .collect::<HashMap<_, _>>();
        log::info!("Loading {} sprites", images.len());

        Some(Self {
            ctx,
            images,
            page_inverted: false,
        })
    }

    fn set_page_inverted(&mut self, inverted: bool) {
        if inverted == self.page_inverted {
            return;
        }
        self.page_inverted = inverted;
        let body = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.body());
        if let Some(body) = body {
            let filter = if inverted { "invert(1)" } else { "none" };
            let _ = body.style().set_property("filter", filter);
        }
    }
}

impl Surface for CanvasSurface {
    fn present(&mut self, frame: &Frame) {
        let ctx = &self.ctx;
        ctx.clear_rect(0.0, 0.0, VIEW_WIDTH as f64, VIEW_HEIGHT as f64);

        for command in &frame.commands {
            match command {
                DrawCommand::Sprite { sprite, rect } => {
                    // Skip images that have not finished loading
                    let Some(img) = self.images.get(sprite).filter(|img| img.complete()) else {
                        continue;
                    };
                    let _ = ctx.draw_image_with_html_image_element_and_dw_and_dh(
                        img,
                        rect.pos.x as f64,
                        rect.pos.y as f64,
                        rect.size.x as f64,
                        rect.size.y as f64,
                    );
                }
                DrawCommand::StrokeRect { rect, color } => {
                    ctx.set_stroke_style_str(color);
                    ctx.stroke_rect(
                        rect.pos.x as f64,
                        rect.pos.y as f64,
                        rect.size.x as f64,
                        rect.size.y as f64,
                    );
                }
                DrawCommand::Text {
                    text,
                    pos,
                    font,
                    align,
                } => {
                    ctx.set_fill_style_str("black");
                    ctx.set_font(font);
                    ctx.set_text_align(align.as_str());
                    let _ = ctx.fill_text(text, pos.x as f64, pos.y as f64);
                }
            }
        }

        self.set_page_inverted(frame.inverted);
    }
}
