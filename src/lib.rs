pub mod algorithm;
pub mod commands;
pub mod models;

use std::io::{BufWriter, Write};

use thiserror::Error;

use algorithm::cursor_track::CursorTrack;
use algorithm::zoom_engine::ZoomEngine;
use commands::preview::{sample_frames, MAX_FPS};
use commands::project::{load_events, load_project, resolve_project_file, ProjectError};

pub use algorithm::easing::{evaluate, CubicBezier, EASE_IN, EASE_OUT};
pub use algorithm::transform::{build_transform, to_zoom_state};
pub use algorithm::zoom_engine::{
    compute_zoom_state, compute_zoom_state_with_focus, is_zoom_active, ZoomEngineConfig,
};
pub use models::zoom::{
    Bounds, FocusMode, NormalizedPoint, TransformDescriptor, TransformOptions, ZoomRegion,
    ZoomState,
};

const DEFAULT_FPS: f64 = 30.0;

#[derive(Debug, Error)]
pub enum RunError {
    #[error("usage: zoom-timeline <project.json|project-dir> [fps]")]
    Usage,
    #[error("invalid fps: {0}")]
    InvalidFps(String),
    #[error(transparent)]
    Project(#[from] ProjectError),
    #[error("failed to encode frame sample: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("failed to write frame samples: {0}")]
    Output(#[from] std::io::Error),
}

pub fn run() {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if let Err(err) = run_with_args(&args) {
        log::error!("run: {err}");
        std::process::exit(1);
    }
}

/// Samples a project and writes one JSON frame sample per line to stdout.
pub fn run_with_args(args: &[String]) -> Result<(), RunError> {
    let project_arg = args.first().ok_or(RunError::Usage)?;
    let fps = match args.get(1) {
        Some(raw) => parse_fps(raw)?,
        None => DEFAULT_FPS,
    };

    let project_file = resolve_project_file(project_arg)?;
    let project = load_project(&project_file)?;
    let track = load_events(&project_file, &project)?.map(|events| {
        CursorTrack::from_events(&events.events, project.video_width, project.video_height)
    });

    let samples = sample_frames(&ZoomEngine::default(), &project, fps, track.as_ref());

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for sample in &samples {
        serde_json::to_writer(&mut out, sample)?;
        out.write_all(b"\n")?;
    }
    out.flush()?;
    Ok(())
}

fn parse_fps(raw: &str) -> Result<f64, RunError> {
    match raw.trim().parse::<f64>() {
        Ok(fps) if fps.is_finite() && fps > 0.0 && fps <= MAX_FPS => Ok(fps),
        _ => Err(RunError::InvalidFps(raw.to_string())),
    }
}
