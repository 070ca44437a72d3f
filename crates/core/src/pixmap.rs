//! Raster images on top of `tiny_skia::Pixmap`.
//!
//! Pixmaps store premultiplied RGBA8. Everything the field reads back out of them goes
//! through [`texel`] and [`sample`], which hand out straight-alpha [`Rgba`].

use tiny_skia::{Color, IntSize, PremultipliedColorU8};

use crate::types::Rgba;

pub use tiny_skia::Pixmap;

/// Texture filtering used when a pixmap is sampled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Sampling {
    /// Pick the texel under the sample point (glyph surface, atlas cells).
    #[default]
    Nearest,
    /// Interpolate the four surrounding texels (picture surface, images).
    Bilinear,
}

/// Build from tightly packed straight-alpha RGBA8 bytes.
///
/// Returns `None` for a zero size or a length mismatch.
pub fn from_rgba8(width: u32, height: u32, bytes: &[u8]) -> Option<Pixmap> {
    let size = IntSize::from_wh(width, height)?;
    if bytes.len() != (width as usize) * (height as usize) * 4 {
        return None;
    }
    let mut data = bytes.to_vec();
    for px in data.chunks_exact_mut(4) {
        let a = px[3] as u16;
        for c in &mut px[..3] {
            *c = ((*c as u16 * a + 127) / 255) as u8;
        }
    }
    Pixmap::from_vec(data, size)
}

/// A pixmap filled with one color.
pub fn filled(width: u32, height: u32, color: Rgba) -> Option<Pixmap> {
    let mut pixmap = Pixmap::new(width, height)?;
    pixmap.fill(skia_color(color));
    Some(pixmap)
}

/// Clamp into a `tiny_skia::Color`. Non-finite channels become transparent.
pub fn skia_color(c: Rgba) -> Color {
    let k = |v: f32| v.clamp(0.0, 1.0);
    Color::from_rgba(k(c.r), k(c.g), k(c.b), k(c.a)).unwrap_or(Color::TRANSPARENT)
}

#[inline]
fn straight(p: PremultipliedColorU8) -> Rgba {
    let c = p.demultiply();
    Rgba::new(
        c.red() as f32 / 255.0,
        c.green() as f32 / 255.0,
        c.blue() as f32 / 255.0,
        c.alpha() as f32 / 255.0,
    )
}

/// Straight-alpha texel, `None` outside the pixmap.
pub fn texel(pixmap: &Pixmap, x: i32, y: i32) -> Option<Rgba> {
    if x < 0 || y < 0 {
        return None;
    }
    pixmap.pixel(x as u32, y as u32).map(straight)
}

#[inline]
fn texel_clamped(pixmap: &Pixmap, x: i32, y: i32) -> Rgba {
    let x = x.clamp(0, pixmap.width() as i32 - 1) as usize;
    let y = y.clamp(0, pixmap.height() as i32 - 1) as usize;
    straight(pixmap.pixels()[y * pixmap.width() as usize + x])
}

/// Sample at normalized coordinates (`u`, `v` in [0, 1], texel centers at
/// `(i + 0.5) / size`). Coordinates outside clamp to the edge.
pub fn sample(pixmap: &Pixmap, u: f32, v: f32, sampling: Sampling) -> Rgba {
    let fx = u * pixmap.width() as f32;
    let fy = v * pixmap.height() as f32;
    match sampling {
        Sampling::Nearest => texel_clamped(pixmap, fx.floor() as i32, fy.floor() as i32),
        Sampling::Bilinear => {
            let sx = fx - 0.5;
            let sy = fy - 0.5;
            let x0 = sx.floor();
            let y0 = sy.floor();
            let tx = sx - x0;
            let ty = sy - y0;
            let (x0, y0) = (x0 as i32, y0 as i32);

            let c00 = texel_clamped(pixmap, x0, y0);
            let c10 = texel_clamped(pixmap, x0 + 1, y0);
            let c01 = texel_clamped(pixmap, x0, y0 + 1);
            let c11 = texel_clamped(pixmap, x0 + 1, y0 + 1);

            let lerp = |a: Rgba, b: Rgba, t: f32| {
                Rgba::new(
                    a.r + (b.r - a.r) * t,
                    a.g + (b.g - a.g) * t,
                    a.b + (b.b - a.b) * t,
                    a.a + (b.a - a.a) * t,
                )
            };
            lerp(lerp(c00, c10, tx), lerp(c01, c11, tx), ty)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_mismatched_byte_length() {
        assert!(from_rgba8(2, 2, &[0; 15]).is_none());
        assert!(from_rgba8(2, 2, &[0; 16]).is_some());
        assert!(from_rgba8(0, 2, &[]).is_none());
    }

    #[test]
    fn straight_alpha_survives_premultiplication() {
        let pm = from_rgba8(1, 1, &[255, 0, 0, 128]).unwrap();
        let p = texel(&pm, 0, 0).unwrap();
        assert_eq!(p.r, 1.0);
        assert!((p.a - 128.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn out_of_bounds_texel_is_none() {
        let pm = filled(2, 2, Rgba::new(1.0, 0.0, 0.0, 1.0)).unwrap();
        assert_eq!(texel(&pm, -1, 0), None);
        assert_eq!(texel(&pm, 2, 0), None);
        assert!(texel(&pm, 1, 1).is_some());
    }

    #[test]
    fn nearest_sampling_picks_texel_under_uv() {
        let pm = from_rgba8(2, 1, &[0, 0, 0, 255, 255, 0, 0, 255]).unwrap();
        assert_eq!(sample(&pm, 0.25, 0.5, Sampling::Nearest).r, 0.0);
        assert_eq!(sample(&pm, 0.75, 0.5, Sampling::Nearest).r, 1.0);
    }

    #[test]
    fn bilinear_sampling_interpolates_between_centers() {
        let pm = from_rgba8(2, 1, &[0, 0, 0, 255, 255, 0, 0, 255]).unwrap();
        let mid = sample(&pm, 0.5, 0.5, Sampling::Bilinear);
        assert!((mid.r - 0.5).abs() < 1e-6);
    }

    #[test]
    fn nan_color_becomes_transparent() {
        assert_eq!(skia_color(Rgba::new(f32::NAN, 0.0, 0.0, 1.0)), Color::TRANSPARENT);
    }
}
