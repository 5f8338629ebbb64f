/// Image decode pipeline -- rasterize an encoded image and run one decode
/// pass over the full grid at native resolution.
use super::{DecodeOutcome, QrDecoder};
use crate::error::DecodeError;
use crate::model::ScanResult;
use image::GrayImage;
use tracing::{debug, info};

/// Rasterize encoded image bytes (PNG, JPEG, ...) into an 8-bit luma grid.
pub fn rasterize(bytes: &[u8]) -> Result<GrayImage, DecodeError> {
    let img = image::load_from_memory(bytes).map_err(|e| DecodeError::Unreadable(e.to_string()))?;
    Ok(img.to_luma8())
}

/// Decode `bytes`, keeping the failure reason.
pub fn try_decode_image(bytes: &[u8], decoder: &dyn QrDecoder) -> Result<String, DecodeError> {
    let grid = rasterize(bytes)?;
    debug!("Rasterized image: {}x{}", grid.width(), grid.height());
    match decoder.decode(&grid) {
        DecodeOutcome::Found(text) => Ok(text),
        DecodeOutcome::Miss => Err(DecodeError::NotFound),
        DecodeOutcome::Error(e) => Err(DecodeError::Decoder(e)),
    }
}

/// Decode `bytes` into a [`ScanResult`]. Never retries.
pub fn decode_image(bytes: &[u8], decoder: &dyn QrDecoder) -> ScanResult {
    match try_decode_image(bytes, decoder) {
        Ok(text) => ScanResult::success(text),
        Err(e) => {
            info!("Image decode failed: {}", e);
            ScanResult::failure()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::RqrrDecoder;
    use image::{ImageFormat, Luma};
    use std::io::Cursor;

    struct Always(DecodeOutcome);

    impl QrDecoder for Always {
        fn decode(&self, _image: &GrayImage) -> DecodeOutcome {
            self.0.clone()
        }
    }

    fn png_bytes(w: u32, h: u32) -> Vec<u8> {
        let img = GrayImage::from_pixel(w, h, Luma([200]));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn test_corrupt_bytes_are_unreadable() {
        let err = try_decode_image(b"definitely not an image", &RqrrDecoder).unwrap_err();
        assert!(matches!(err, DecodeError::Unreadable(_)));
        assert_eq!(decode_image(b"garbage", &RqrrDecoder), ScanResult::failure());
    }

    #[test]
    fn test_non_qr_image_is_not_found() {
        let bytes = png_bytes(80, 60);
        assert_eq!(try_decode_image(&bytes, &RqrrDecoder), Err(DecodeError::NotFound));
    }

    #[test]
    fn test_full_resolution_grid_reaches_decoder() {
        struct SizeCheck;
        impl QrDecoder for SizeCheck {
            fn decode(&self, image: &GrayImage) -> DecodeOutcome {
                DecodeOutcome::Found(format!("{}x{}", image.width(), image.height()))
            }
        }
        let result = decode_image(&png_bytes(640, 480), &SizeCheck);
        assert_eq!(result.text(), Some("640x480"));
        assert!(result.is_success);
    }

    #[test]
    fn test_encoded_symbol_round_trips_to_url_result() {
        let mut out = Cursor::new(Vec::new());
        crate::decode::render_qr("https://example.com/q?x=1", 4)
            .write_to(&mut out, ImageFormat::Png)
            .unwrap();
        let result = decode_image(&out.into_inner(), &RqrrDecoder);
        assert!(result.is_success);
        assert_eq!(result.text(), Some("https://example.com/q?x=1"));
        assert_eq!(result.kind, crate::model::ResultKind::Url);
    }

    #[test]
    fn test_decoder_error_is_failure() {
        let bytes = png_bytes(10, 10);
        let decoder = Always(DecodeOutcome::Error("bad ecc".into()));
        assert_eq!(
            try_decode_image(&bytes, &decoder),
            Err(DecodeError::Decoder("bad ecc".into()))
        );
        let result = decode_image(&bytes, &decoder);
        assert!(!result.is_success);
        assert!(result.is_none());
    }
}
