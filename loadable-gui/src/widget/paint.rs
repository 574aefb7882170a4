use std::f64::consts::PI;

use druid::{
    kurbo::{BezPath, Circle},
    piet::{ImageFormat, InterpolationMode},
    widget::prelude::*,
    Color, ImageBuf, Point, Rect, Vec2,
};
use loadable_core::{
    bitmap::Image,
    config::ContentMode,
    view::{ContentSlot, Indicator, VIDEO_OVERLAY_SIZE},
};

use crate::ui::theme;

pub struct Spinner {
    t: f64,
}

impl Spinner {
    pub fn new() -> Self {
        Self { t: 0.0 }
    }

    pub fn advance(&mut self, interval: u64) {
        self.t += (interval as f64) * 1e-9;
        if self.t >= 1.0 {
            self.t = 0.0;
        }
    }

    pub fn paint(&self, ctx: &mut PaintCtx, indicator: &Indicator, env: &Env) {
        let center = ctx.size().to_rect().center();
        let radius = indicator.style.diameter() / 2.0;
        let dot_radius = radius / 4.0;
        let c0 = env.get(theme::SPINNER_DIM);
        let c1 = env.get(theme::SPINNER_LIT);
        let active = 7 - (1 + (6.0 * self.t).floor() as i32);
        for i in 1..=6 {
            let step = f64::from(i);
            let angle = Vec2::from_angle((step / 6.0) * -2.0 * PI);
            let dot = Circle::new(center + angle * (radius - dot_radius), dot_radius);
            if i == active && indicator.animating {
                ctx.fill(dot, &c1);
            } else {
                ctx.fill(dot, &c0);
            }
        }
    }
}

/// Paints the content slot, keeping the converted bitmap around between
/// frames.
pub struct ContentPainter {
    cached: Option<(Image, ImageBuf)>,
}

impl ContentPainter {
    pub fn new() -> Self {
        Self { cached: None }
    }

    fn buffer_for(&mut self, image: &Image) -> &ImageBuf {
        let fresh = matches!(&self.cached, Some((source, _)) if source.ptr_eq(image));
        if !fresh {
            self.cached = None;
        }
        let (_, buffer) = self.cached.get_or_insert_with(|| {
            let buffer = ImageBuf::from_raw(
                image.pixels().to_vec(),
                ImageFormat::RgbaSeparate,
                image.width() as usize,
                image.height() as usize,
            );
            (image.clone(), buffer)
        });
        buffer
    }

    pub fn paint(&mut self, ctx: &mut PaintCtx, content: &ContentSlot, env: &Env) {
        let bounds = ctx.size().to_rect();
        let clip = bounds.to_rounded_rect(content.corner_radius);
        if !content.visible {
            ctx.fill(clip, &env.get(theme::PLACEHOLDER));
            return;
        }
        let Some(image) = &content.image else {
            return;
        };
        let buffer = self.buffer_for(image);
        let dest = content_rect(buffer.size(), bounds, content.mode);
        let piet_image = buffer.to_image(ctx.render_ctx);
        ctx.with_save(|ctx| {
            ctx.clip(clip);
            ctx.draw_image(&piet_image, dest, InterpolationMode::Bilinear);
        });
    }
}

/// Where an image of `image` size lands inside `bounds`.
pub fn content_rect(image: Size, bounds: Rect, mode: ContentMode) -> Rect {
    if image.width <= 0.0 || image.height <= 0.0 {
        return bounds;
    }
    let sx = bounds.width() / image.width;
    let sy = bounds.height() / image.height;
    let scale = match mode {
        ContentMode::AspectFit => sx.min(sy),
        ContentMode::AspectFill => sx.max(sy),
    };
    let size = image * scale;
    Rect::from_center_size(bounds.center(), size)
}

pub fn paint_play_button(ctx: &mut PaintCtx, origin: Point, env: &Env) {
    let rect = Rect::from_origin_size(origin, (VIDEO_OVERLAY_SIZE, VIDEO_OVERLAY_SIZE));
    let center = rect.center();
    let radius = VIDEO_OVERLAY_SIZE / 2.0;
    let color = env.get(theme::PLAY_BUTTON);

    ctx.fill(Circle::new(center, radius), &Color::BLACK.with_alpha(0.35));
    ctx.stroke(Circle::new(center, radius - 1.5), &color, 3.0);

    let mut path = BezPath::new();
    path.move_to(center + Vec2::new(-radius * 0.3, -radius * 0.45));
    path.line_to(center + Vec2::new(radius * 0.5, 0.0));
    path.line_to(center + Vec2::new(-radius * 0.3, radius * 0.45));
    path.close_path();
    ctx.fill(path, &color);
}

/// Whether the spinner should keep requesting animation frames.
pub fn is_spinning(indicator: &Indicator) -> bool {
    indicator.visible && indicator.animating
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_letterboxes_wide_image() {
        let bounds = Rect::new(0.0, 0.0, 100.0, 100.0);
        let rect = content_rect(Size::new(200.0, 100.0), bounds, ContentMode::AspectFit);

        assert_eq!(rect, Rect::new(0.0, 25.0, 100.0, 75.0));
    }

    #[test]
    fn fill_covers_bounds() {
        let bounds = Rect::new(0.0, 0.0, 100.0, 100.0);
        let rect = content_rect(Size::new(200.0, 100.0), bounds, ContentMode::AspectFill);

        assert_eq!(rect, Rect::new(-50.0, 0.0, 150.0, 100.0));
    }
}
