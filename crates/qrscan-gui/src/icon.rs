//! QrScan application icon generator.
//!
//! Produces a procedural icon: a rounded tile holding three QR finder
//! patterns and a scan line across the middle. The icon is rendered at an
//! arbitrary resolution as RGBA pixel data suitable for use as a window
//! icon.

/// Generate a QrScan icon as egui `IconData`.
pub fn generate_icon(size: u32) -> egui::IconData {
    let rgba = render_icon(size);
    egui::IconData {
        rgba,
        width: size,
        height: size,
    }
}

/// Render the icon into an RGBA pixel buffer (top-to-bottom row order).
pub fn render_icon(size: u32) -> Vec<u8> {
    let s = size as f32;
    let mut pixels = vec![0u8; (size * size * 4) as usize];

    // ── Layout ──────────────────────────────────────────────────
    let margin = s * 0.06;
    let corner = s * 0.18;
    let finder = s * 0.30;
    let inset = s * 0.14;
    let finders = [
        (inset, inset),
        (s - inset - finder, inset),
        (inset, s - inset - finder),
    ];
    let scan_y = s * 0.62;
    let scan_half = s * 0.025;

    const TILE: [u8; 3] = [0xf5, 0xf5, 0xf7];
    const INK: [u8; 3] = [0x1e, 0x1e, 0x2e];
    const SCAN: [u8; 3] = [0xa6, 0xe3, 0xa1];

    for y in 0..size {
        for x in 0..size {
            let px = x as f32 + 0.5;
            let py = y as f32 + 0.5;

            // 1. Rounded tile. ───────────────────────────────────
            let tile_d = rounded_rect_dist(px, py, margin, margin, s - margin, s - margin, corner);
            let mut ca = smooth_edge(tile_d, 0.0);
            if ca <= 0.0 {
                continue;
            }
            let mut col = TILE;

            // 2. Finder patterns: 7-3-1 rings. ────────────────────
            for &(fx, fy) in &finders {
                let cell = finder / 7.0;
                let lx = (px - fx) / cell;
                let ly = (py - fy) / cell;
                if (0.0..7.0).contains(&lx) && (0.0..7.0).contains(&ly) {
                    let ring = lx.min(ly).min(7.0 - lx).min(7.0 - ly);
                    if ring < 1.0 || ring >= 2.0 {
                        col = INK;
                    }
                }
            }

            // 3. Data dots in the free quadrant. ──────────────────
            let dx = (px - s * 0.56) / (s * 0.06);
            let dy = (py - s * 0.56) / (s * 0.06);
            if dx >= 0.0 && dy >= 0.0 && dx < 5.0 && dy < 5.0 && ((dx as u32 + 2 * dy as u32) % 3 == 0) {
                col = INK;
            }

            // 4. Scan line. ───────────────────────────────────────
            let line = smooth_edge((py - scan_y).abs(), scan_half);
            if line > 0.0 && px > margin + corner * 0.3 && px < s - margin - corner * 0.3 {
                col = [
                    lerp_c(col[0], SCAN[0], line),
                    lerp_c(col[1], SCAN[1], line),
                    lerp_c(col[2], SCAN[2], line),
                ];
                ca = ca.max(line);
            }

            let idx = ((y * size + x) * 4) as usize;
            pixels[idx] = col[0];
            pixels[idx + 1] = col[1];
            pixels[idx + 2] = col[2];
            pixels[idx + 3] = (ca * 255.0).clamp(0.0, 255.0) as u8;
        }
    }

    pixels
}

// ── Helpers ─────────────────────────────────────────────────────

/// Smooth anti-aliased edge (1 → 0 as `dist` crosses `edge`).
fn smooth_edge(dist: f32, edge: f32) -> f32 {
    let d = dist - edge;
    if d < -1.0 {
        1.0
    } else if d > 1.0 {
        0.0
    } else {
        0.5 - d * 0.5
    }
}

/// Signed distance from a point to a rounded rectangle (negative inside).
fn rounded_rect_dist(px: f32, py: f32, x0: f32, y0: f32, x1: f32, y1: f32, r: f32) -> f32 {
    let cx = (x0 + x1) * 0.5;
    let cy = (y0 + y1) * 0.5;
    let hx = (x1 - x0) * 0.5 - r;
    let hy = (y1 - y0) * 0.5 - r;
    let qx = (px - cx).abs() - hx;
    let qy = (py - cy).abs() - hy;
    let outside = (qx.max(0.0).powi(2) + qy.max(0.0).powi(2)).sqrt();
    outside + qx.max(qy).min(0.0) - r
}

/// Linear interpolation for a single colour channel.
fn lerp_c(a: u8, b: u8, t: f32) -> u8 {
    (a as f32 * (1.0 - t) + b as f32 * t).clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_matches_size() {
        let icon = generate_icon(32);
        assert_eq!(icon.rgba.len(), 32 * 32 * 4);
    }

    #[test]
    fn corners_transparent_centre_opaque() {
        let size = 64;
        let rgba = render_icon(size);
        assert_eq!(rgba[3], 0, "top-left corner outside the rounded tile");
        let mid = ((size / 2 * size + size / 2) * 4) as usize;
        assert_eq!(rgba[mid + 3], 255);
    }
}
