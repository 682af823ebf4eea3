//! Zoom timeline interpolation.
//!
//! Given the sorted zoom regions and a playback timestamp, produces the camera
//! state for that frame. Transitions between the un-zoomed frame and a region
//! (or between two regions) are eased over a fixed duration:
//!
//!   - after a region ends, the camera eases back out to the full frame;
//!   - entering a region eases in from whatever the camera was showing:
//!     the full frame, the previous region (abutting regions), or the
//!     in-flight zoom-out of the previous region (short gaps);
//!   - when a region nested inside another ends, the camera eases from the
//!     nested region back to the enclosing one.
//!
//! Everything here is a pure function of its inputs.

use crate::algorithm::bounds::{bounds_from_region, DEFAULT_BOUNDS};
use crate::algorithm::easing::{evaluate, CubicBezier, EASE_IN, EASE_OUT};
use crate::algorithm::segments::locate;
use crate::algorithm::transform::to_zoom_state;
use crate::models::zoom::{Bounds, NormalizedPoint, ZoomRegion, ZoomState};

/// Scale above which a frame counts as zoomed.
pub const ZOOM_ACTIVE_THRESHOLD: f64 = 1.001;

#[derive(Debug, Clone)]
pub struct ZoomEngineConfig {
    /// Length of every zoom-in and zoom-out ease. Gaps shorter than this
    /// resume from the in-flight zoom-out.
    pub transition_duration_ms: f64,
    /// Regions closer than this are treated as abutting.
    pub abut_tolerance_ms: f64,
    /// Maximum nesting of resume lookups before giving up on the frame.
    pub max_resume_depth: usize,
    pub ease_in: CubicBezier,
    pub ease_out: CubicBezier,
}

impl Default for ZoomEngineConfig {
    fn default() -> Self {
        Self {
            transition_duration_ms: 1_000.0,
            abut_tolerance_ms: 10.0,
            max_resume_depth: 4,
            ease_in: EASE_IN,
            ease_out: EASE_OUT,
        }
    }
}

/// Blended crop bounds plus how far the camera is into its zoom (0 = full frame).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InterpolatedZoom {
    pub progress: f64,
    pub bounds: Bounds,
}

impl InterpolatedZoom {
    const UNZOOMED: InterpolatedZoom = InterpolatedZoom {
        progress: 0.0,
        bounds: DEFAULT_BOUNDS,
    };
}

/// Pointer position for one interpolation call, fetched at most once.
pub struct PointerFocus<F> {
    ts_ms: f64,
    provider: Option<F>,
    resolved: Option<NormalizedPoint>,
}

impl<F: FnOnce(f64) -> NormalizedPoint> PointerFocus<F> {
    pub fn new(ts_ms: f64, provider: F) -> Self {
        Self {
            ts_ms,
            provider: Some(provider),
            resolved: None,
        }
    }

    fn get(&mut self) -> Option<NormalizedPoint> {
        if self.resolved.is_none() {
            if let Some(provider) = self.provider.take() {
                self.resolved = Some(provider(self.ts_ms));
            }
        }
        self.resolved
    }
}

impl PointerFocus<fn(f64) -> NormalizedPoint> {
    /// No pointer data: follow-mode regions use their authored target.
    pub fn none() -> Self {
        Self {
            ts_ms: 0.0,
            provider: None,
            resolved: None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ZoomEngine {
    config: ZoomEngineConfig,
}

impl ZoomEngine {
    pub fn new(config: ZoomEngineConfig) -> Self {
        Self { config }
    }

    pub fn compute_zoom_state(&self, regions: &[ZoomRegion], timestamp_ms: f64) -> ZoomState {
        let zoom = self.interpolate(regions, timestamp_ms, &mut PointerFocus::none());
        to_zoom_state(zoom.bounds)
    }

    pub fn compute_zoom_state_with_focus<F>(
        &self,
        regions: &[ZoomRegion],
        timestamp_ms: f64,
        focus_provider: F,
    ) -> ZoomState
    where
        F: FnOnce(f64) -> NormalizedPoint,
    {
        let mut pointer = PointerFocus::new(timestamp_ms, focus_provider);
        let zoom = self.interpolate(regions, timestamp_ms, &mut pointer);
        to_zoom_state(zoom.bounds)
    }

    pub fn is_zoom_active(&self, regions: &[ZoomRegion], timestamp_ms: f64) -> bool {
        self.compute_zoom_state(regions, timestamp_ms).scale > ZOOM_ACTIVE_THRESHOLD
    }

    /// Eased bounds at `timestamp_ms`. `regions` must be sorted ascending by start.
    pub fn interpolate<F>(
        &self,
        regions: &[ZoomRegion],
        timestamp_ms: f64,
        pointer: &mut PointerFocus<F>,
    ) -> InterpolatedZoom
    where
        F: FnOnce(f64) -> NormalizedPoint,
    {
        if regions.is_empty() || !timestamp_ms.is_finite() {
            return InterpolatedZoom::UNZOOMED;
        }
        self.interpolate_at_depth(regions, timestamp_ms, pointer, 0)
    }

    fn interpolate_at_depth<F>(
        &self,
        regions: &[ZoomRegion],
        ts_ms: f64,
        pointer: &mut PointerFocus<F>,
        depth: usize,
    ) -> InterpolatedZoom
    where
        F: FnOnce(f64) -> NormalizedPoint,
    {
        let context = locate(regions, ts_ms);

        if let (true, Some(previous), Some(active)) =
            (context.reentry, context.previous, context.active)
        {
            if depth >= self.config.max_resume_depth {
                log::debug!(
                    "interpolate: resume depth {} exceeded re-entering region id={}",
                    depth,
                    active.id
                );
                return InterpolatedZoom::UNZOOMED;
            }
            // Camera state the nested region left off at.
            let left_ts = previous.end_ms as f64;
            let left = self.interpolate_at_depth(regions, left_ts, pointer, depth + 1);
            let raw = self.transition_progress(ts_ms - left_ts);
            let back = evaluate(&self.config.ease_in, raw);
            let to = self.region_bounds(active, pointer);
            return InterpolatedZoom {
                progress: left.progress * (1.0 - back) + back,
                bounds: left.bounds.lerp(to, back),
            };
        }

        match (context.previous, context.active) {
            (Some(previous), None) => {
                let raw = self.transition_progress(ts_ms - previous.end_ms as f64);
                let zoom_out = evaluate(&self.config.ease_out, raw);
                let from = self.region_bounds(previous, pointer);
                InterpolatedZoom {
                    progress: 1.0 - zoom_out,
                    bounds: from.lerp(DEFAULT_BOUNDS, zoom_out),
                }
            }
            (None, Some(active)) => {
                let zoom_in = self.zoom_in_progress(active, ts_ms);
                let to = self.region_bounds(active, pointer);
                InterpolatedZoom {
                    progress: zoom_in,
                    bounds: DEFAULT_BOUNDS.lerp(to, zoom_in),
                }
            }
            (Some(previous), Some(active)) => {
                let zoom_in = self.zoom_in_progress(active, ts_ms);
                let gap_ms = active.start_ms as f64 - previous.end_ms as f64;

                if gap_ms.abs() < self.config.abut_tolerance_ms {
                    let from = self.region_bounds(previous, pointer);
                    let to = self.region_bounds(active, pointer);
                    return InterpolatedZoom {
                        progress: 1.0,
                        bounds: from.lerp(to, zoom_in),
                    };
                }

                if gap_ms < self.config.transition_duration_ms {
                    // The zoom-out of `previous` was still running when `active` began.
                    if depth >= self.config.max_resume_depth {
                        log::debug!(
                            "interpolate: resume depth {} exceeded at region id={}",
                            depth,
                            active.id
                        );
                        return InterpolatedZoom::UNZOOMED;
                    }
                    let resume_ts = active.start_ms as f64;
                    let resume = self.interpolate_at_depth(regions, resume_ts, pointer, depth + 1);
                    let to = self.region_bounds(active, pointer);
                    return InterpolatedZoom {
                        progress: resume.progress * (1.0 - zoom_in) + zoom_in,
                        bounds: resume.bounds.lerp(to, zoom_in),
                    };
                }

                let to = self.region_bounds(active, pointer);
                InterpolatedZoom {
                    progress: zoom_in,
                    bounds: DEFAULT_BOUNDS.lerp(to, zoom_in),
                }
            }
            (None, None) => InterpolatedZoom::UNZOOMED,
        }
    }

    fn zoom_in_progress(&self, active: &ZoomRegion, ts_ms: f64) -> f64 {
        let raw = self.transition_progress(ts_ms - active.start_ms as f64);
        evaluate(&self.config.ease_in, raw)
    }

    fn transition_progress(&self, elapsed_ms: f64) -> f64 {
        let duration = self.config.transition_duration_ms;
        if duration <= 0.0 || !duration.is_finite() {
            return if elapsed_ms > 0.0 { 1.0 } else { 0.0 };
        }
        (elapsed_ms / duration).clamp(0.0, 1.0)
    }

    fn region_bounds<F>(&self, region: &ZoomRegion, pointer: &mut PointerFocus<F>) -> Bounds
    where
        F: FnOnce(f64) -> NormalizedPoint,
    {
        let live = if region.focus.follows_pointer() {
            pointer.get()
        } else {
            None
        };
        bounds_from_region(region, live)
    }
}

/// Camera state at `timestamp_ms` with the default engine configuration.
pub fn compute_zoom_state(regions: &[ZoomRegion], timestamp_ms: f64) -> ZoomState {
    ZoomEngine::default().compute_zoom_state(regions, timestamp_ms)
}

/// Like [`compute_zoom_state`], with live pointer focus for follow-mode regions.
pub fn compute_zoom_state_with_focus<F>(
    regions: &[ZoomRegion],
    timestamp_ms: f64,
    focus_provider: F,
) -> ZoomState
where
    F: FnOnce(f64) -> NormalizedPoint,
{
    ZoomEngine::default().compute_zoom_state_with_focus(regions, timestamp_ms, focus_provider)
}

pub fn is_zoom_active(regions: &[ZoomRegion], timestamp_ms: f64) -> bool {
    ZoomEngine::default().is_zoom_active(regions, timestamp_ms)
}
