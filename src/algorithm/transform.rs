use crate::models::zoom::{Bounds, TransformDescriptor, TransformOptions, ZoomState};

/// Scales this close to 1.0 project to the identity state.
const UNIT_SCALE_EPSILON: f64 = 1e-3;
/// At or below this scale the transform is the explicit identity.
const IDENTITY_SCALE_LIMIT: f64 = 1.001;

/// Recovers `{scale, center}` from crop bounds.
///
/// Bounds are square by construction, so the x-width is the scale and the
/// focus is the fixed point `-top_left / (scale - 1)`.
pub fn to_zoom_state(bounds: Bounds) -> ZoomState {
    let scale = bounds.width();
    if !scale.is_finite() || scale - 1.0 < UNIT_SCALE_EPSILON {
        return ZoomState::IDENTITY;
    }

    let spread = scale - 1.0;
    ZoomState {
        scale,
        center_x: finite_or_center(-bounds.top_left.x / spread),
        center_y: finite_or_center(-bounds.top_left.y / spread),
    }
}

fn finite_or_center(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.5
    }
}

/// Builds the render transform that keeps `state`'s center anchored under the zoom.
pub fn build_transform(state: &ZoomState, options: &TransformOptions) -> TransformDescriptor {
    let scale = state.scale;
    if !scale.is_finite() || scale <= IDENTITY_SCALE_LIMIT {
        return TransformDescriptor::IDENTITY;
    }

    let half_visible = 0.5 / scale;
    let center_x = clamp_center(state.center_x, half_visible, options, options.frame_width);
    let center_y = clamp_center(state.center_y, half_visible, options, options.frame_height);
    let shift = 100.0 * (scale - 1.0) / scale;

    TransformDescriptor {
        scale_factor: scale,
        translate_percent_x: (0.5 - center_x) * shift,
        translate_percent_y: (0.5 - center_y) * shift,
        origin_x_percent: center_x * 100.0,
        origin_y_percent: center_y * 100.0,
    }
}

fn clamp_center(
    center: f64,
    half_visible: f64,
    options: &TransformOptions,
    frame_dimension: f64,
) -> f64 {
    let center = if center.is_finite() { center } else { 0.5 };
    let padded = options.edge_padding_px.is_some_and(|padding| padding > 0.0);
    if !padded {
        // The zoomed view must never show anything outside the recording.
        return center.clamp(half_visible, 1.0 - half_visible);
    }

    match options.corner_radius_px.filter(|radius| *radius > 0.0) {
        Some(radius) => {
            let margin = if frame_dimension > 0.0 {
                half_visible.min(radius / frame_dimension)
            } else {
                half_visible
            };
            center.clamp(margin, 1.0 - margin)
        }
        None => center.clamp(0.0, 1.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::bounds::DEFAULT_BOUNDS;
    use crate::models::zoom::NormalizedPoint;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn state(scale: f64, center_x: f64, center_y: f64) -> ZoomState {
        ZoomState {
            scale,
            center_x,
            center_y,
        }
    }

    fn unpadded() -> TransformOptions {
        TransformOptions {
            edge_padding_px: None,
            corner_radius_px: None,
            frame_width: 1920.0,
            frame_height: 1080.0,
        }
    }

    #[test]
    fn default_bounds_project_to_identity() {
        assert_eq!(to_zoom_state(DEFAULT_BOUNDS), ZoomState::IDENTITY);
    }

    #[test]
    fn near_unit_width_short_circuits() {
        let bounds = Bounds {
            top_left: NormalizedPoint::new(-0.0002, -0.0002),
            bottom_right: NormalizedPoint::new(1.0003, 1.0003),
        };
        assert_eq!(to_zoom_state(bounds), ZoomState::IDENTITY);
    }

    #[test]
    fn recovers_focus_from_bounds() {
        // scale 2 around (0.2, 0.7): top_left = -(focus * (scale - 1))
        let bounds = Bounds {
            top_left: NormalizedPoint::new(-0.2, -0.7),
            bottom_right: NormalizedPoint::new(1.8, 1.3),
        };
        let state = to_zoom_state(bounds);
        assert!(approx_eq(state.scale, 2.0));
        assert!(approx_eq(state.center_x, 0.2));
        assert!(approx_eq(state.center_y, 0.7));
    }

    #[test]
    fn unzoomed_state_is_explicit_identity() {
        let transform = build_transform(&ZoomState::IDENTITY, &unpadded());
        assert_eq!(transform, TransformDescriptor::IDENTITY);

        let barely = build_transform(&state(1.0005, 0.1, 0.9), &unpadded());
        assert_eq!(barely.scale_factor, 1.0);
        assert_eq!(barely.translate_percent_x, 0.0);
    }

    #[test]
    fn unpadded_frame_clamps_to_visible_half_extent() {
        let transform = build_transform(&state(4.0, 0.05, 0.05), &unpadded());
        assert!(approx_eq(transform.origin_x_percent, 12.5));
        assert!(approx_eq(transform.origin_y_percent, 12.5));
        assert!(approx_eq(transform.scale_factor, 4.0));
        // (0.5 - 0.125) * 100 * 3 / 4
        assert!(approx_eq(transform.translate_percent_x, 28.125));
    }

    #[test]
    fn centered_zoom_has_no_translation() {
        let transform = build_transform(&state(2.0, 0.5, 0.5), &unpadded());
        assert!(approx_eq(transform.translate_percent_x, 0.0));
        assert!(approx_eq(transform.translate_percent_y, 0.0));
        assert!(approx_eq(transform.origin_x_percent, 50.0));
    }

    #[test]
    fn rounded_padding_keeps_corner_margin() {
        let options = TransformOptions {
            edge_padding_px: Some(40.0),
            corner_radius_px: Some(54.0),
            frame_width: 1080.0,
            frame_height: 1080.0,
        };
        // radius / frame = 0.05 < half_visible = 0.125
        let transform = build_transform(&state(4.0, 0.0, 1.0), &options);
        assert!(approx_eq(transform.origin_x_percent, 5.0));
        assert!(approx_eq(transform.origin_y_percent, 95.0));
    }

    #[test]
    fn square_padding_allows_full_range() {
        let options = TransformOptions {
            edge_padding_px: Some(40.0),
            corner_radius_px: None,
            frame_width: 1920.0,
            frame_height: 1080.0,
        };
        let transform = build_transform(&state(4.0, 0.0, 0.02), &options);
        assert!(approx_eq(transform.origin_x_percent, 0.0));
        assert!(approx_eq(transform.origin_y_percent, 2.0));
        assert!(approx_eq(transform.translate_percent_x, 37.5));
    }

    #[test]
    fn zero_padding_counts_as_unpadded() {
        let options = TransformOptions {
            edge_padding_px: Some(0.0),
            ..unpadded()
        };
        let transform = build_transform(&state(2.0, 0.0, 0.5), &options);
        assert!(approx_eq(transform.origin_x_percent, 25.0));
    }
}
