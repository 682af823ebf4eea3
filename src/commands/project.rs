//! Загрузка project.json и журнала событий указателя.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::models::events::{EventsFile, SCHEMA_VERSION as EVENTS_SCHEMA_VERSION};
use crate::models::project::{Project, SCHEMA_VERSION};

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("project path is empty")]
    EmptyPath,
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("unsupported {kind} schemaVersion: expected {expected}, got {found}")]
    UnsupportedSchema {
        kind: &'static str,
        expected: u32,
        found: u32,
    },
    #[error("project file has no parent directory: {}", .0.display())]
    NoParent(PathBuf),
}

/// Поддерживает как путь к файлу `project.json`, так и путь к директории проекта.
pub fn resolve_project_file(path: &str) -> Result<PathBuf, ProjectError> {
    let trimmed = path.trim();
    if trimmed.is_empty() {
        return Err(ProjectError::EmptyPath);
    }

    let input = PathBuf::from(trimmed);
    if input
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
    {
        Ok(input)
    } else {
        Ok(input.join("project.json"))
    }
}

pub fn parse_project(raw: &str, path: &Path) -> Result<Project, ProjectError> {
    let project: Project = serde_json::from_str(raw).map_err(|source| ProjectError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    if project.schema_version != SCHEMA_VERSION {
        return Err(ProjectError::UnsupportedSchema {
            kind: "project",
            expected: SCHEMA_VERSION,
            found: project.schema_version,
        });
    }

    Ok(project)
}

pub fn load_project(path: &Path) -> Result<Project, ProjectError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ProjectError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let project = parse_project(&raw, path)?;
    log::info!(
        "load_project: path={} regions={}",
        path.display(),
        project.timeline.zoom_regions.len()
    );
    Ok(project)
}

/// Загружает events.json, если проект ссылается на него.
pub fn load_events(
    project_file: &Path,
    project: &Project,
) -> Result<Option<EventsFile>, ProjectError> {
    let Some(events_path) = project
        .events_path
        .as_deref()
        .map(str::trim)
        .filter(|path| !path.is_empty())
    else {
        return Ok(None);
    };

    let candidate = PathBuf::from(events_path);
    let path = if candidate.is_absolute() {
        candidate
    } else {
        let project_dir = project_file
            .parent()
            .ok_or_else(|| ProjectError::NoParent(project_file.to_path_buf()))?;
        project_dir.join(candidate)
    };

    let raw = std::fs::read_to_string(&path).map_err(|source| ProjectError::Read {
        path: path.clone(),
        source,
    })?;
    let events: EventsFile = serde_json::from_str(&raw).map_err(|source| ProjectError::Parse {
        path: path.clone(),
        source,
    })?;

    if events.schema_version != EVENTS_SCHEMA_VERSION {
        return Err(ProjectError::UnsupportedSchema {
            kind: "events",
            expected: EVENTS_SCHEMA_VERSION,
            found: events.schema_version,
        });
    }

    log::info!(
        "load_events: path={} events={}",
        path.display(),
        events.events.len()
    );
    Ok(Some(events))
}
