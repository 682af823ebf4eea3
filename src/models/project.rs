//! Схема проекта (project.json).
//! schemaVersion: 1

use serde::{Deserialize, Serialize};

use crate::models::zoom::{TransformOptions, ZoomRegion};

pub const SCHEMA_VERSION: u32 = 1;

/// Таймлайн проекта.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Timeline {
    #[serde(default)]
    pub zoom_regions: Vec<ZoomRegion>,
}

impl Timeline {
    /// Регионы для воспроизведения: только валидные, по возрастанию начала.
    pub fn sorted_regions(&self) -> Vec<ZoomRegion> {
        let mut regions = self
            .zoom_regions
            .iter()
            .filter(|region| match region.validate() {
                Ok(()) => true,
                Err(err) => {
                    log::warn!("sorted_regions: dropping zoom region: {err}");
                    false
                }
            })
            .cloned()
            .collect::<Vec<_>>();
        regions.sort_by_key(|region| region.start_ms);
        regions
    }
}

/// Оформление краёв кадра в превью.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct FrameSettings {
    /// Отступ вокруг записи (px). `None` — кадр занимает весь холст.
    #[serde(default)]
    pub edge_padding_px: Option<f64>,
    /// Радиус скругления углов кадра с отступом (px).
    #[serde(default)]
    pub corner_radius_px: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSettings {
    #[serde(default)]
    pub frame: FrameSettings,
}

/// Корневой объект project.json.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub schema_version: u32,
    pub id: String,
    pub name: String,
    /// Длительность записи (мс).
    pub duration_ms: u64,
    pub video_width: u32,
    pub video_height: u32,
    /// Путь к файлу событий относительно папки проекта.
    #[serde(default)]
    pub events_path: Option<String>,
    #[serde(default)]
    pub timeline: Timeline,
    #[serde(default)]
    pub settings: ProjectSettings,
}

impl Project {
    pub fn transform_options(&self) -> TransformOptions {
        TransformOptions {
            edge_padding_px: self.settings.frame.edge_padding_px,
            corner_radius_px: self.settings.frame.corner_radius_px,
            frame_width: self.video_width as f64,
            frame_height: self.video_height as f64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::zoom::FocusMode;

    fn region(id: &str, start_ms: u64, end_ms: u64, scale: f64) -> ZoomRegion {
        ZoomRegion {
            id: id.to_string(),
            start_ms,
            end_ms,
            scale,
            focus: FocusMode::default(),
        }
    }

    #[test]
    fn sorted_regions_orders_and_drops_invalid() {
        let timeline = Timeline {
            zoom_regions: vec![
                region("late", 5_000, 6_000, 2.0),
                region("broken", 3_000, 2_000, 2.0),
                region("early", 1_000, 2_000, 1.5),
                region("shrunk", 7_000, 8_000, 0.5),
            ],
        };

        let ids: Vec<String> = timeline
            .sorted_regions()
            .into_iter()
            .map(|region| region.id)
            .collect();
        assert_eq!(ids, vec!["early".to_string(), "late".to_string()]);
    }

    #[test]
    fn project_defaults_missing_sections() {
        let raw = r#"{
            "schemaVersion": 1,
            "id": "p1",
            "name": "Demo",
            "durationMs": 4000,
            "videoWidth": 1920,
            "videoHeight": 1080
        }"#;
        let project: Project = serde_json::from_str(raw).expect("project json");

        assert!(project.timeline.zoom_regions.is_empty());
        assert!(project.events_path.is_none());
        let options = project.transform_options();
        assert_eq!(options.frame_width, 1920.0);
        assert!(options.edge_padding_px.is_none());
    }
}
