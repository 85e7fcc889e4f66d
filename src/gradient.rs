use image::{ImageBuffer, Rgb, Rgba, RgbaImage};

/// Build a 135° diagonal gradient from `from` (top-left) towards `to` (bottom-right).
///
/// Every pixel gets `from + (to - from) * t` with `t = (x + y) / (width + height)`,
/// truncated to an integer. Alpha is always fully opaque.
pub fn build_gradient(width: u32, height: u32, from: Rgb<u8>, to: Rgb<u8>) -> RgbaImage {
    let span = (width + height) as f64;

    ImageBuffer::from_fn(width, height, |x, y| {
        let ratio = (x + y) as f64 / span;
        Rgba([
            lerp_channel(from[0], to[0], ratio),
            lerp_channel(from[1], to[1], ratio),
            lerp_channel(from[2], to[2], ratio),
            255,
        ])
    })
}

fn lerp_channel(from: u8, to: u8, ratio: f64) -> u8 {
    let from = from as f64;
    (from + (to as f64 - from) * ratio) as u8
}
