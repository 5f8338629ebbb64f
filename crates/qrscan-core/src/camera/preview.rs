/// Downsampled preview frames for the live camera view.
use image::RgbImage;

/// Longest edge of a preview frame in pixels.
pub const PREVIEW_MAX_EDGE: u32 = 480;

/// A small RGB copy of the latest captured frame.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewFrame {
    pub width: u32,
    pub height: u32,
    /// Packed RGB8, `width * height * 3` bytes.
    pub rgb: Vec<u8>,
    /// Edge of the decode region of interest as a fraction of
    /// (width, height), for drawing the scan guide.
    pub roi_fraction: (f32, f32),
}

impl PreviewFrame {
    /// Build a preview of `frame`, scaled so its longest edge is at most
    /// `max_edge`, annotated with the region of interest.
    pub fn from_frame(frame: &RgbImage, max_edge: u32, roi_edge: u32) -> Self {
        let (w, h) = frame.dimensions();
        let roi = roi_edge.min(w).min(h) as f32;
        let roi_fraction = if w == 0 || h == 0 {
            (0.0, 0.0)
        } else {
            (roi / w as f32, roi / h as f32)
        };

        let longest = w.max(h);
        let scaled = if longest > max_edge && max_edge > 0 {
            let nw = ((w as u64 * max_edge as u64) / longest as u64).max(1) as u32;
            let nh = ((h as u64 * max_edge as u64) / longest as u64).max(1) as u32;
            image::imageops::thumbnail(frame, nw, nh)
        } else {
            frame.clone()
        };

        Self {
            width: scaled.width(),
            height: scaled.height(),
            rgb: scaled.into_raw(),
            roi_fraction,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_downscales_longest_edge() {
        let frame = RgbImage::new(1280, 720);
        let p = PreviewFrame::from_frame(&frame, 480, 250);
        assert_eq!((p.width, p.height), (480, 270));
        assert_eq!(p.rgb.len(), 480 * 270 * 3);
        assert!((p.roi_fraction.0 - 250.0 / 1280.0).abs() < 1e-6);
    }

    #[test]
    fn test_small_frame_kept() {
        let frame = RgbImage::new(200, 100);
        let p = PreviewFrame::from_frame(&frame, 480, 250);
        assert_eq!((p.width, p.height), (200, 100));
        assert_eq!(p.roi_fraction, (0.5, 1.0));
    }
}
