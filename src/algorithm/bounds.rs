use crate::models::zoom::{Bounds, FocusMode, NormalizedPoint, ZoomRegion};

/// Un-zoomed crop window.
pub const DEFAULT_BOUNDS: Bounds = Bounds {
    top_left: NormalizedPoint { x: 0.0, y: 0.0 },
    bottom_right: NormalizedPoint { x: 1.0, y: 1.0 },
};

impl Bounds {
    /// Componentwise linear blend of both corners; `t = 0` is `self`, `t = 1` is `other`.
    pub fn lerp(self, other: Bounds, t: f64) -> Bounds {
        Bounds {
            top_left: lerp_point(self.top_left, other.top_left, t),
            bottom_right: lerp_point(self.bottom_right, other.bottom_right, t),
        }
    }

    pub fn width(self) -> f64 {
        self.bottom_right.x - self.top_left.x
    }
}

fn lerp_point(from: NormalizedPoint, to: NormalizedPoint, t: f64) -> NormalizedPoint {
    NormalizedPoint {
        x: from.x * (1.0 - t) + to.x * t,
        y: from.y * (1.0 - t) + to.y * t,
    }
}

/// Focus used for a region: the live pointer in follow mode, the authored target otherwise.
pub fn resolve_focus(focus: FocusMode, pointer: Option<NormalizedPoint>) -> NormalizedPoint {
    let point = match (focus, pointer) {
        (FocusMode::FollowPointer { .. }, Some(pointer)) => pointer,
        (FocusMode::FollowPointer { .. }, None) | (FocusMode::Fixed { .. }, _) => focus.target(),
    };
    point.sanitized()
}

/// Crop bounds of `region`, constructed so the focus point maps onto itself
/// under the implied scale + translate.
pub fn bounds_from_region(region: &ZoomRegion, pointer: Option<NormalizedPoint>) -> Bounds {
    let scale = region.effective_scale();
    let focus = resolve_focus(region.focus, pointer);

    let delta_x = focus.x * scale - focus.x;
    let delta_y = focus.y * scale - focus.y;

    Bounds {
        top_left: NormalizedPoint {
            x: -delta_x,
            y: -delta_y,
        },
        bottom_right: NormalizedPoint {
            x: scale - delta_x,
            y: scale - delta_y,
        },
    }
}
