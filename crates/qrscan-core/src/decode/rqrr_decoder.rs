/// `rqrr`-backed implementation of [`QrDecoder`].
use super::{DecodeOutcome, QrDecoder};
use image::GrayImage;
use tracing::debug;

/// Decodes with `rqrr`. Stateless and cheap to share.
#[derive(Debug, Default, Clone, Copy)]
pub struct RqrrDecoder;

impl RqrrDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl QrDecoder for RqrrDecoder {
    fn decode(&self, image: &GrayImage) -> DecodeOutcome {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return DecodeOutcome::Miss;
        }

        let mut prepared = rqrr::PreparedImage::prepare_from_greyscale(
            width as usize,
            height as usize,
            |x, y| image.get_pixel(x as u32, y as u32)[0],
        );

        let grids = prepared.detect_grids();
        if grids.is_empty() {
            return DecodeOutcome::Miss;
        }

        // The first grid that decodes wins; otherwise report the last error.
        let mut last_error = None;
        for grid in &grids {
            match grid.decode() {
                Ok((meta, content)) => {
                    debug!(
                        "QR decoded: {} bytes, version {:?}, ECC {}",
                        content.len(),
                        meta.version,
                        meta.ecc_level
                    );
                    return DecodeOutcome::Found(content);
                }
                Err(e) => last_error = Some(format!("{e:?}")),
            }
        }

        match last_error {
            Some(e) => DecodeOutcome::Error(e),
            None => DecodeOutcome::Miss,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    #[test]
    fn test_blank_image_is_miss() {
        let img = GrayImage::from_pixel(64, 64, Luma([255]));
        assert_eq!(RqrrDecoder::new().decode(&img), DecodeOutcome::Miss);
    }

    #[test]
    fn test_real_symbol_is_found() {
        let img = crate::decode::render_qr("https://example.com/q?x=1", 4);
        assert_eq!(
            RqrrDecoder::new().decode(&img),
            DecodeOutcome::Found("https://example.com/q?x=1".into())
        );
    }

    #[test]
    fn test_empty_image_is_miss() {
        let img = GrayImage::new(0, 0);
        assert_eq!(RqrrDecoder::new().decode(&img), DecodeOutcome::Miss);
    }
}
