//! Zoom scale arithmetic
//!
//! Pure scale math for the preview renderer: clamped zoom steps, the
//! fit-to-width computation and the zoom percentage label. Kept free of
//! session state so the invariants are testable in isolation.

/// Smallest zoom factor a manual zoom operation can reach (30%).
pub const MIN_SCALE: f32 = 0.3;

/// Largest zoom factor a manual zoom operation can reach (300%).
pub const MAX_SCALE: f32 = 3.0;

/// Multiplicative step applied per zoom operation.
pub const ZOOM_STEP: f32 = 1.2;

/// Horizontal padding subtracted from the container width before fitting.
pub const FIT_WIDTH_PADDING: f32 = 40.0;

/// Scale a fresh session starts at.
pub const DEFAULT_SCALE: f32 = 1.0;

/// How the render scale is chosen for a render pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScaleMode {
    /// Use the given zoom factor as-is (no clamping at load time)
    Explicit(f32),
    /// Derive the scale from the container width and the first page's
    /// intrinsic width
    FitWidth,
}

/// One zoom-in step, saturating at [`MAX_SCALE`].
pub fn zoom_in(scale: f32) -> f32 {
    (scale * ZOOM_STEP).min(MAX_SCALE)
}

/// One zoom-out step, saturating at [`MIN_SCALE`].
pub fn zoom_out(scale: f32) -> f32 {
    (scale / ZOOM_STEP).max(MIN_SCALE)
}

/// Compute the fit-to-width scale for a page `intrinsic_width` points wide
/// inside a container `container_width` units wide.
///
/// Degenerate inputs (zero-width page, container narrower than the fixed
/// padding) fall back to [`DEFAULT_SCALE`]. The result is not clamped to the
/// zoom band; the clamp is a zoom-operation invariant only.
pub fn fit_width_scale(container_width: f32, intrinsic_width: f32) -> f32 {
    if intrinsic_width <= 0.0 {
        return DEFAULT_SCALE;
    }

    let scale = (container_width - FIT_WIDTH_PADDING) / intrinsic_width;
    if scale.is_finite() && scale > 0.0 {
        scale
    } else {
        DEFAULT_SCALE
    }
}

/// Zoom percentage label shown by the host, e.g. `"67%"` for scale 0.6667.
pub fn zoom_label(scale: f32) -> String {
    format!("{}%", (scale * 100.0).round() as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zoom_in_steps_and_saturates() {
        assert!((zoom_in(1.0) - 1.2).abs() < 1e-6);

        let mut scale = 1.0;
        for _ in 0..32 {
            scale = zoom_in(scale);
            assert!(scale <= MAX_SCALE);
        }
        assert_eq!(scale, MAX_SCALE);
    }

    #[test]
    fn test_zoom_out_steps_and_saturates() {
        assert!((zoom_out(1.2) - 1.0).abs() < 1e-6);

        let mut scale = 1.0;
        for _ in 0..32 {
            scale = zoom_out(scale);
            assert!(scale >= MIN_SCALE);
        }
        assert_eq!(scale, MIN_SCALE);
    }

    #[test]
    fn test_zoom_round_trip_within_rounding_step() {
        for scale in [0.5_f32, 0.8, 1.0, 1.6, 2.4] {
            let round_trip = zoom_out(zoom_in(scale));
            assert!((round_trip - scale).abs() < 1e-5, "scale {scale} drifted to {round_trip}");
        }

        // At the ceiling the pair is not an inverse: 3.0 / 1.2 = 2.5.
        assert!((zoom_out(zoom_in(2.9)) - 2.5).abs() < 1e-5);
    }

    #[test]
    fn test_fit_width_scale_subtracts_padding() {
        let scale = fit_width_scale(440.0, 600.0);
        assert!((scale - 400.0 / 600.0).abs() < 1e-5);
    }

    #[test]
    fn test_fit_width_scale_degenerate_inputs_fall_back() {
        assert_eq!(fit_width_scale(440.0, 0.0), DEFAULT_SCALE);
        assert_eq!(fit_width_scale(440.0, -10.0), DEFAULT_SCALE);
        // Container narrower than the fixed padding would give a negative scale.
        assert_eq!(fit_width_scale(30.0, 600.0), DEFAULT_SCALE);
    }

    #[test]
    fn test_fit_width_scale_may_leave_zoom_band() {
        // Wide container, narrow page: fit-to-width is allowed past MAX_SCALE.
        let scale = fit_width_scale(4000.0, 100.0);
        assert!(scale > MAX_SCALE);
    }

    #[test]
    fn test_zoom_label_rounds_to_whole_percent() {
        assert_eq!(zoom_label(1.0), "100%");
        assert_eq!(zoom_label(400.0 / 600.0), "67%");
        assert_eq!(zoom_label(0.3), "30%");
        assert_eq!(zoom_label(3.0), "300%");
    }
}
