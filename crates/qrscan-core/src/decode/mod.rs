/// Decoding -- the QR decoder capability and the one-shot image pipeline.
///
/// The decoder itself is a black box behind [`QrDecoder`]. The default
/// implementation wraps `rqrr`; tests substitute scripted decoders.
pub mod pipeline;
pub mod rqrr_decoder;

pub use pipeline::{decode_image, rasterize, try_decode_image};
pub use rqrr_decoder::RqrrDecoder;

use image::GrayImage;

/// Result of a single decode attempt over one pixel grid.
///
/// A miss is an ordinary, frequent outcome and is kept apart from real
/// errors so callers never have to inspect message strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeOutcome {
    /// A symbol was found and decoded.
    Found(String),
    /// No symbol in this grid.
    Miss,
    /// A symbol was located but could not be decoded.
    Error(String),
}

/// One-shot QR decoding over an 8-bit greyscale grid.
pub trait QrDecoder: Send + Sync {
    fn decode(&self, image: &GrayImage) -> DecodeOutcome;
}

/// Crop the centred square region of interest from `image`.
///
/// The edge is clamped to the smaller image dimension, so frames smaller
/// than the configured region are decoded whole.
pub fn center_region(image: &GrayImage, edge: u32) -> GrayImage {
    let (w, h) = image.dimensions();
    let edge = edge.min(w).min(h);
    if edge == w && edge == h {
        return image.clone();
    }
    let x = (w - edge) / 2;
    let y = (h - edge) / 2;
    image::imageops::crop_imm(image, x, y, edge, edge).to_image()
}

/// Render `text` as a QR symbol, `scale` pixels per module with a
/// four-module quiet zone.
#[cfg(test)]
pub(crate) fn render_qr(text: &str, scale: u32) -> GrayImage {
    let code = qrcode::QrCode::new(text.as_bytes()).unwrap();
    let modules = code.width() as u32;
    let colors = code.to_colors();
    let quiet = 4;
    let edge = (modules + 2 * quiet) * scale;
    GrayImage::from_fn(edge, edge, |x, y| {
        let (mx, my) = (x / scale, y / scale);
        let inside = (quiet..quiet + modules).contains(&mx) && (quiet..quiet + modules).contains(&my);
        if inside && colors[((my - quiet) * modules + (mx - quiet)) as usize] == qrcode::Color::Dark {
            image::Luma([0])
        } else {
            image::Luma([255])
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    #[test]
    fn test_center_region_crops() {
        let mut img = GrayImage::new(100, 60);
        img.put_pixel(50, 30, Luma([255]));
        let roi = center_region(&img, 20);
        assert_eq!(roi.dimensions(), (20, 20));
        // (50, 30) maps to (50 - 40, 30 - 20).
        assert_eq!(roi.get_pixel(10, 10).0, [255]);
    }

    #[test]
    fn test_center_region_clamps() {
        let img = GrayImage::new(40, 30);
        assert_eq!(center_region(&img, 250).dimensions(), (30, 30));
        let square = GrayImage::new(30, 30);
        assert_eq!(center_region(&square, 250).dimensions(), (30, 30));
    }
}
