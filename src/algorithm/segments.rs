use crate::models::zoom::ZoomRegion;

/// Regions around one playback instant.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SegmentContext<'a> {
    /// Region owning the instant (`start < ts <= end`).
    pub active: Option<&'a ZoomRegion>,
    /// With an active region: the region the camera is coming from. Usually the
    /// well-formed region right before it; when a region nested inside `active`
    /// has already ended, that nested region.
    /// Without one: the region that ended most recently.
    pub previous: Option<&'a ZoomRegion>,
    /// `active` is being returned to after `previous`, which started inside it.
    pub reentry: bool,
}

/// Finds the active and preceding region for `ts_ms`.
///
/// `regions` must be sorted ascending by start. Malformed regions (`end <= start`)
/// are treated as absent. On overlap the latest-starting region wins.
pub fn locate(regions: &[ZoomRegion], ts_ms: f64) -> SegmentContext<'_> {
    let active_index = regions
        .iter()
        .rposition(|region| region.is_well_formed() && region.contains(ts_ms));

    if let Some(index) = active_index {
        // Later-starting regions that no longer contain `ts` but have ended
        // were nested in (or overlapping) the active one.
        let nested = latest_ended(&regions[index + 1..], ts_ms);
        if nested.is_some() {
            return SegmentContext {
                active: Some(&regions[index]),
                previous: nested,
                reentry: true,
            };
        }

        let previous = regions[..index]
            .iter()
            .rev()
            .find(|region| region.is_well_formed());
        return SegmentContext {
            active: Some(&regions[index]),
            previous,
            reentry: false,
        };
    }

    SegmentContext {
        active: None,
        previous: latest_ended(regions, ts_ms),
        reentry: false,
    }
}

/// Well-formed region with the latest end at or before `ts_ms`; ties go to the later one.
fn latest_ended(regions: &[ZoomRegion], ts_ms: f64) -> Option<&ZoomRegion> {
    regions
        .iter()
        .filter(|region| {
            if !region.is_well_formed() {
                log::debug!("locate: skipping malformed zoom region id={}", region.id);
                return false;
            }
            region.end_ms as f64 <= ts_ms
        })
        .max_by_key(|region| region.end_ms)
}
