use image::{Rgba, RgbaImage};
use loadable_core::{bitmap::Image, error::Error};

/// Stand-in for fetched artwork: a gradient whose colors follow from the
/// identifier, so recycled tiles visibly change.
pub fn render(identifier: i64, size: u32, dimmed: bool) -> Result<Image, Error> {
    let hue = (identifier.unsigned_abs() % 360) as f64;
    let from = hsv_to_rgb(hue, 0.55, if dimmed { 0.45 } else { 0.95 });
    let to = hsv_to_rgb((hue + 60.0) % 360.0, 0.75, if dimmed { 0.25 } else { 0.65 });
    let span = f64::from(size.max(1) * 2);
    let buffer = RgbaImage::from_fn(size, size, |x, y| {
        let t = f64::from(x + y) / span;
        Rgba([
            lerp(from[0], to[0], t),
            lerp(from[1], to[1], t),
            lerp(from[2], to[2], t),
            255,
        ])
    });
    Image::new(buffer)
}

fn lerp(a: u8, b: u8, t: f64) -> u8 {
    (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u8
}

fn hsv_to_rgb(h: f64, s: f64, v: f64) -> [u8; 3] {
    let c = v * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = v - c;
    let (r, g, b) = match (h / 60.0) as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    [r, g, b].map(|channel| ((channel + m) * 255.0).round() as u8)
}
