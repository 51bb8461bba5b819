//! Pure calculation functions for image dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

/// Calculate the downscale needed to fit an image within a maximum width.
///
/// Returns `None` when the image is already narrow enough. Otherwise returns
/// `(max_width, height)` with the height scaled to preserve the aspect ratio,
/// rounded to the nearest pixel and never below 1.
///
/// # Examples
/// ```
/// # use asset_optimizer::imaging::calculate_width_cap;
/// assert_eq!(calculate_width_cap((2400, 1600), 1920), Some((1920, 1280)));
/// assert_eq!(calculate_width_cap((1920, 1080), 1920), None);
/// ```
pub fn calculate_width_cap(original: (u32, u32), max_width: u32) -> Option<(u32, u32)> {
    let (orig_w, orig_h) = original;
    if orig_w <= max_width {
        return None;
    }

    let ratio = max_width as f64 / orig_w as f64;
    let height = ((orig_h as f64 * ratio).round() as u32).max(1);
    Some((max_width, height))
}

/// Round a byte count to whole kilobytes (1 KB = 1024 bytes), half away from zero.
pub fn round_kb(bytes: u64) -> u64 {
    (bytes as f64 / 1024.0).round() as u64
}
