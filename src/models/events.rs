//! Схема журнала событий указателя (events.json).
//! schemaVersion: 1

use serde::{Deserialize, Serialize};

pub const SCHEMA_VERSION: u32 = 1;

/// Кнопка мыши.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Событие ввода. Для фокуса зума важна только позиция указателя;
/// остальные типы событий принимаются и игнорируются.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum InputEvent {
    /// Движение мыши.
    Move {
        /// Миллисекунды от начала записи.
        ts: u64,
        x: f64,
        y: f64,
    },
    /// Нажатие кнопки мыши.
    Click {
        ts: u64,
        x: f64,
        y: f64,
        button: MouseButton,
    },
    #[serde(other)]
    Other,
}

impl InputEvent {
    /// Позиция указателя в экранных пикселях, если событие её содержит.
    pub fn pointer(&self) -> Option<(u64, f64, f64)> {
        match self {
            InputEvent::Move { ts, x, y } | InputEvent::Click { ts, x, y, .. } => {
                Some((*ts, *x, *y))
            }
            InputEvent::Other => None,
        }
    }
}

/// Корневой контейнер файла events.json.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventsFile {
    pub schema_version: u32,
    pub events: Vec<InputEvent>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_event_kinds_are_ignored() {
        let raw = r#"{
            "schemaVersion": 1,
            "events": [
                {"type": "move", "ts": 10, "x": 100.0, "y": 50.0},
                {"type": "keyDown", "ts": 12, "keyCode": "KeyA"},
                {"type": "click", "ts": 20, "x": 110.0, "y": 60.0, "button": "left"}
            ]
        }"#;
        let file: EventsFile = serde_json::from_str(raw).expect("events json");

        let pointers: Vec<_> = file.events.iter().filter_map(InputEvent::pointer).collect();
        assert_eq!(pointers, vec![(10, 100.0, 50.0), (20, 110.0, 60.0)]);
        assert!(matches!(file.events[1], InputEvent::Other));
    }
}
