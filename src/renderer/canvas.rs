//! Canvas 2D painter
//!
//! Executes a draw list on an `HtmlCanvasElement`. Sprites whose image is
//! missing or broken are filled with their placeholder color instead.

use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use super::draw_list::{DrawCmd, Sprite, TEXT_COLOR};
use crate::sim::Rect;

/// Image paths, relative to the page
pub const PLAYER_IMAGE: &str = "assets/mario.png";
pub const PIPE_IMAGE: &str = "assets/pipe.png";

/// Start loading an image; load failures are logged and otherwise ignored
fn load_image(src: &'static str) -> Option<HtmlImageElement> {
    let img = HtmlImageElement::new().ok()?;
    let on_error = Closure::<dyn FnMut()>::new(move || {
        log::warn!("Failed to load {}, using placeholder", src);
    });
    img.set_onerror(Some(on_error.as_ref().unchecked_ref()));
    on_error.forget();
    img.set_src(src);
    Some(img)
}

/// Loaded, decoded and non-empty
fn image_ready(img: &HtmlImageElement) -> bool {
    img.complete() && img.natural_width() != 0
}

pub struct CanvasPainter {
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
    player_img: Option<HtmlImageElement>,
    pipe_img: Option<HtmlImageElement>,
}

impl CanvasPainter {
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;

        Ok(Self {
            ctx,
            width: canvas.width() as f64,
            height: canvas.height() as f64,
            player_img: load_image(PLAYER_IMAGE),
            pipe_img: load_image(PIPE_IMAGE),
        })
    }

    fn image_for(&self, sprite: Sprite) -> Option<&HtmlImageElement> {
        let img = match sprite {
            Sprite::Player => self.player_img.as_ref(),
            Sprite::Pipe => self.pipe_img.as_ref(),
        };
        img.filter(|img| image_ready(img))
    }

    pub fn paint(&self, cmds: &[DrawCmd]) -> Result<(), JsValue> {
        for cmd in cmds {
            match cmd {
                DrawCmd::Clear { color } => {
                    self.ctx.set_fill_style_str(color);
                    self.ctx.fill_rect(0.0, 0.0, self.width, self.height);
                }
                DrawCmd::Sprite {
                    sprite,
                    rect,
                    flip_vertical,
                } => self.paint_sprite(*sprite, rect, *flip_vertical)?,
                DrawCmd::Text {
                    text,
                    pos,
                    size_px,
                    bold,
                } => {
                    let weight = if *bold { "bold " } else { "" };
                    self.ctx.set_font(&format!("{}{}px Arial", weight, size_px));
                    self.ctx.set_fill_style_str(TEXT_COLOR);
                    self.ctx.fill_text(text, pos.x as f64, pos.y as f64)?;
                }
            }
        }
        Ok(())
    }

    fn paint_sprite(&self, sprite: Sprite, rect: &Rect, flip: bool) -> Result<(), JsValue> {
        let (x, y) = (rect.left() as f64, rect.top() as f64);
        let (w, h) = (rect.size.x as f64, rect.size.y as f64);
        if w <= 0.0 || h <= 0.0 {
            return Ok(());
        }

        let Some(img) = self.image_for(sprite) else {
            self.ctx.set_fill_style_str(sprite.placeholder_color());
            self.ctx.fill_rect(x, y, w, h);
            return Ok(());
        };

        if flip {
            // Rotate half a turn about the bottom-centre of the rect
            self.ctx.save();
            self.ctx.translate(x + w / 2.0, y + h)?;
            self.ctx.rotate(std::f64::consts::PI)?;
            let result =
                self.ctx
                    .draw_image_with_html_image_element_and_dw_and_dh(img, -w / 2.0, 0.0, w, h);
            self.ctx.restore();
            result
        } else {
            self.ctx
                .draw_image_with_html_image_element_and_dw_and_dh(img, x, y, w, h)
        }
    }
}
