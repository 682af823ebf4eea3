//! Offline per-frame sampling of a project's zoom timeline.

use serde::Serialize;

use crate::algorithm::cursor_track::CursorTrack;
use crate::algorithm::transform::build_transform;
use crate::algorithm::zoom_engine::ZoomEngine;
use crate::models::project::Project;
use crate::models::zoom::{TransformDescriptor, ZoomState};

/// Highest sampling rate; higher requests are clamped to it.
pub const MAX_FPS: f64 = 1_000.0;

/// Camera of one output frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameSample {
    pub frame: u64,
    pub timestamp_ms: f64,
    pub state: ZoomState,
    pub transform: TransformDescriptor,
}

/// Samples every frame of `project` at `fps`, from 0 through the end of the recording.
///
/// `fps` is clamped to `[1, MAX_FPS]`; a non-finite rate samples once per second.
/// Follow-pointer regions track `track` when given, their authored target otherwise.
pub fn sample_frames(
    engine: &ZoomEngine,
    project: &Project,
    fps: f64,
    track: Option<&CursorTrack>,
) -> Vec<FrameSample> {
    let safe_fps = if fps.is_finite() {
        fps.clamp(1.0, MAX_FPS)
    } else {
        1.0
    };
    let regions = project.timeline.sorted_regions();
    let options = project.transform_options();
    let frame_count = (project.duration_ms as f64 * safe_fps / 1000.0).ceil() as u64;

    let mut samples = Vec::with_capacity(frame_count as usize + 1);
    for frame in 0..=frame_count {
        let timestamp_ms = frame as f64 * 1000.0 / safe_fps;
        let state = match track {
            Some(track) => engine.compute_zoom_state_with_focus(&regions, timestamp_ms, |ts| {
                track.point_at(ts)
            }),
            None => engine.compute_zoom_state(&regions, timestamp_ms),
        };
        samples.push(FrameSample {
            frame,
            timestamp_ms,
            state,
            transform: build_transform(&state, &options),
        });
    }

    log::debug!(
        "sample_frames: project={} fps={} frames={}",
        project.id,
        safe_fps,
        samples.len()
    );
    samples
}
