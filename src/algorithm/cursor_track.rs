use crate::models::events::InputEvent;
use crate::models::zoom::NormalizedPoint;

#[derive(Debug, Clone, Copy, PartialEq)]
struct TrackSample {
    ts: u64,
    x: f64,
    y: f64,
}

/// Recorded pointer path in normalized frame coordinates.
///
/// Serves as the focus provider for follow-pointer zoom regions.
#[derive(Debug, Clone, Default)]
pub struct CursorTrack {
    samples: Vec<TrackSample>,
}

impl CursorTrack {
    pub fn from_events(events: &[InputEvent], frame_width: u32, frame_height: u32) -> Self {
        let width = (frame_width as f64).max(1.0);
        let height = (frame_height as f64).max(1.0);

        let mut samples = events
            .iter()
            .filter_map(InputEvent::pointer)
            .filter(|(_, x, y)| x.is_finite() && y.is_finite())
            .map(|(ts, x, y)| TrackSample {
                ts,
                x: (x / width).clamp(0.0, 1.0),
                y: (y / height).clamp(0.0, 1.0),
            })
            .collect::<Vec<_>>();
        // Stable sort: among equal timestamps the last recorded event wins below.
        samples.sort_by_key(|sample| sample.ts);

        let mut deduped: Vec<TrackSample> = Vec::with_capacity(samples.len());
        for sample in samples {
            if let Some(last) = deduped.last_mut() {
                if last.ts == sample.ts {
                    *last = sample;
                    continue;
                }
            }
            deduped.push(sample);
        }

        Self { samples: deduped }
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Pointer position at `ts_ms`, linearly interpolated. Outside the recorded
    /// range the nearest sample is held; an empty track reports the frame center.
    pub fn point_at(&self, ts_ms: f64) -> NormalizedPoint {
        let (first, last) = match (self.samples.first(), self.samples.last()) {
            (Some(first), Some(last)) => (*first, *last),
            _ => return NormalizedPoint::CENTER,
        };
        if ts_ms.is_nan() || ts_ms <= first.ts as f64 {
            return NormalizedPoint::new(first.x, first.y);
        }
        if ts_ms >= last.ts as f64 {
            return NormalizedPoint::new(last.x, last.y);
        }

        // First sample strictly after `ts_ms`; bounded to 1..len by the checks above.
        let next_index = self
            .samples
            .partition_point(|sample| sample.ts as f64 <= ts_ms);
        let next = self.samples[next_index];
        let prev = self.samples[next_index - 1];

        let span = next.ts.saturating_sub(prev.ts);
        if span == 0 {
            return NormalizedPoint::new(prev.x, prev.y);
        }
        let t = (ts_ms - prev.ts as f64) / span as f64;
        NormalizedPoint::new(
            prev.x + (next.x - prev.x) * t,
            prev.y + (next.y - prev.y) * t,
        )
    }
}
