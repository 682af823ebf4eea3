//! Типы значений таймлайна зума.
//!
//! Все значения неизменяемы в пределах одного вызова интерполяции. Регионы
//! создаются редактором таймлайна, движок их не изменяет.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Точка в нормализованных координатах кадра (0.0–1.0).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedPoint {
    pub x: f64,
    pub y: f64,
}

impl NormalizedPoint {
    pub const CENTER: NormalizedPoint = NormalizedPoint { x: 0.5, y: 0.5 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Ограничивает обе оси `[0, 1]`; нечисловые компоненты заменяются центром.
    pub fn sanitized(self) -> Self {
        Self {
            x: sanitize_unit(self.x),
            y: sanitize_unit(self.y),
        }
    }
}

fn sanitize_unit(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.5
    }
}

/// Куда регион направляет камеру.
///
/// У `FollowPointer` тоже есть цель: она используется, когда для кадра
/// нет живой позиции указателя.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "focusMode", rename_all = "camelCase")]
pub enum FocusMode {
    Fixed {
        #[serde(rename = "targetX")]
        target_x: f64,
        #[serde(rename = "targetY")]
        target_y: f64,
    },
    FollowPointer {
        #[serde(rename = "targetX")]
        target_x: f64,
        #[serde(rename = "targetY")]
        target_y: f64,
    },
}

impl FocusMode {
    pub fn target(self) -> NormalizedPoint {
        match self {
            FocusMode::Fixed { target_x, target_y }
            | FocusMode::FollowPointer { target_x, target_y } => {
                NormalizedPoint::new(target_x, target_y)
            }
        }
    }

    pub fn follows_pointer(self) -> bool {
        matches!(self, FocusMode::FollowPointer { .. })
    }
}

impl Default for FocusMode {
    fn default() -> Self {
        FocusMode::Fixed {
            target_x: 0.5,
            target_y: 0.5,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum RegionError {
    #[error("zoom region has an empty id")]
    MissingId,
    #[error("zoom region {id} ends before it starts ({start_ms}..{end_ms})")]
    EmptyInterval { id: String, start_ms: u64, end_ms: u64 },
    #[error("zoom region {id} has a non-finite scale")]
    NonFiniteScale { id: String },
    #[error("zoom region {id} has scale {scale} below 1.0")]
    ScaleBelowOne { id: String, scale: f64 },
}

/// Один зум-регион на таймлайне.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoomRegion {
    pub id: String,
    /// Начало региона (мс от начала записи).
    pub start_ms: u64,
    /// Конец региона (мс). Этот момент принадлежит региону, начало — нет.
    pub end_ms: u64,
    /// 1.0 = без зума, 2.0 = 2x.
    pub scale: f64,
    #[serde(flatten)]
    pub focus: FocusMode,
}

impl ZoomRegion {
    pub fn new(start_ms: u64, end_ms: u64, scale: f64, focus: FocusMode) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            start_ms,
            end_ms,
            scale,
            focus,
        }
    }

    pub fn is_well_formed(&self) -> bool {
        self.end_ms > self.start_ms
    }

    /// Открыт слева, закрыт справа: `start < ts <= end`.
    pub fn contains(&self, ts_ms: f64) -> bool {
        ts_ms > self.start_ms as f64 && ts_ms <= self.end_ms as f64
    }

    /// Масштаб, ограниченный областью приближения.
    pub fn effective_scale(&self) -> f64 {
        if self.scale.is_finite() {
            self.scale.max(1.0)
        } else {
            1.0
        }
    }

    pub fn validate(&self) -> Result<(), RegionError> {
        if self.id.trim().is_empty() {
            return Err(RegionError::MissingId);
        }
        if !self.is_well_formed() {
            return Err(RegionError::EmptyInterval {
                id: self.id.clone(),
                start_ms: self.start_ms,
                end_ms: self.end_ms,
            });
        }
        if !self.scale.is_finite() {
            return Err(RegionError::NonFiniteScale {
                id: self.id.clone(),
            });
        }
        if self.scale < 1.0 {
            return Err(RegionError::ScaleBelowOne {
                id: self.id.clone(),
                scale: self.scale,
            });
        }
        Ok(())
    }
}

/// Виртуальное окно кадрирования в нормализованных координатах. Ширина задаёт масштаб.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bounds {
    pub top_left: NormalizedPoint,
    pub bottom_right: NormalizedPoint,
}

/// Масштаб камеры и центр фокуса, вычисленные из [`Bounds`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoomState {
    pub scale: f64,
    pub center_x: f64,
    pub center_y: f64,
}

impl ZoomState {
    pub const IDENTITY: ZoomState = ZoomState {
        scale: 1.0,
        center_x: 0.5,
        center_y: 0.5,
    };
}

impl Default for ZoomState {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Готовое к рендеру 2D-преобразование для превью и экспорта.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformDescriptor {
    pub scale_factor: f64,
    pub translate_percent_x: f64,
    pub translate_percent_y: f64,
    pub origin_x_percent: f64,
    pub origin_y_percent: f64,
}

impl TransformDescriptor {
    pub const IDENTITY: TransformDescriptor = TransformDescriptor {
        scale_factor: 1.0,
        translate_percent_x: 0.0,
        translate_percent_y: 0.0,
        origin_x_percent: 50.0,
        origin_y_percent: 50.0,
    };
}

/// Геометрия кадра и политика краёв для [`crate::algorithm::transform::build_transform`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformOptions {
    #[serde(default)]
    pub edge_padding_px: Option<f64>,
    #[serde(default)]
    pub corner_radius_px: Option<f64>,
    pub frame_width: f64,
    pub frame_height: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_json_uses_flat_focus_fields() {
        let raw = r#"{
            "id": "z1",
            "startMs": 1000,
            "endMs": 3000,
            "scale": 2.0,
            "focusMode": "followPointer",
            "targetX": 0.25,
            "targetY": 0.75
        }"#;
        let region: ZoomRegion = serde_json::from_str(raw).expect("region json");

        assert_eq!(region.start_ms, 1_000);
        assert!(region.focus.follows_pointer());
        assert_eq!(region.focus.target(), NormalizedPoint::new(0.25, 0.75));

        let value = serde_json::to_value(&region).expect("serialize");
        assert_eq!(value["focusMode"], "followPointer");
        assert_eq!(value["targetX"], 0.25);
    }

    #[test]
    fn contains_owns_end_but_not_start() {
        let region = ZoomRegion::new(1_000, 2_000, 2.0, FocusMode::default());
        assert!(!region.contains(1_000.0));
        assert!(region.contains(1_000.5));
        assert!(region.contains(2_000.0));
        assert!(!region.contains(2_000.5));
    }

    #[test]
    fn validate_reports_malformed_regions() {
        let mut region = ZoomRegion::new(2_000, 2_000, 2.0, FocusMode::default());
        assert!(matches!(
            region.validate(),
            Err(RegionError::EmptyInterval { .. })
        ));

        region.end_ms = 3_000;
        region.scale = 0.5;
        assert!(matches!(
            region.validate(),
            Err(RegionError::ScaleBelowOne { .. })
        ));

        region.scale = f64::NAN;
        assert!(matches!(
            region.validate(),
            Err(RegionError::NonFiniteScale { .. })
        ));
        assert_eq!(region.effective_scale(), 1.0);

        region.scale = 1.5;
        assert!(region.validate().is_ok());
    }

    #[test]
    fn new_regions_get_unique_ids() {
        let a = ZoomRegion::new(0, 10, 1.5, FocusMode::default());
        let b = ZoomRegion::new(0, 10, 1.5, FocusMode::default());
        assert!(!a.id.is_empty());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn sanitized_point_clamps_and_recovers_nan() {
        let point = NormalizedPoint::new(f64::NAN, 1.7).sanitized();
        assert_eq!(point, NormalizedPoint::new(0.5, 1.0));
    }
}
