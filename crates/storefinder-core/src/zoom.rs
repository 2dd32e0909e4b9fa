//! Map zoom heuristics.
//!
//! Converts a map zoom level into a search radius, and a change of zoom
//! level into a result-limit adjustment. Higher zoom = closer view =
//! smaller radius.

/// Radius returned when no bracket in [`RADIUS_TABLE`] applies.
pub const DEFAULT_RADIUS_KM: f64 = 8.0;

/// Zoom level the map opens at.
pub const INITIAL_ZOOM: f64 = 13.0;

/// Result-limit step applied per zoom transition.
pub const LIMIT_STEP: i32 = 10;

/// `(zoom, radius_km)`, ordered by descending zoom.
const RADIUS_TABLE: &[(f64, f64)] = &[
    (18.0, 0.5),
    (17.0, 1.0),
    (16.0, 2.0),
    (15.0, 3.0),
    (14.0, 5.0),
    (13.0, 8.0),
    (12.0, 12.0),
    (11.0, 18.0),
    (10.0, 25.0),
    (9.0, 35.0),
    (8.0, 50.0),
    (7.0, 75.0),
    (6.0, 100.0),
];

/// Search radius in kilometres for a map zoom level.
///
/// Tabulated zooms return their table value exactly. Zooms between two
/// table rows are interpolated linearly and rounded to the nearest whole
/// kilometre. Zooms above the table return the smallest radius, zooms
/// below it the largest.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn radius_for(zoom: f64) -> f64 {
    if let Some(&(_, radius)) = RADIUS_TABLE.iter().find(|(z, _)| *z == zoom) {
        return radius;
    }

    let (max_zoom, min_radius) = RADIUS_TABLE[0];
    let (min_zoom, max_radius) = RADIUS_TABLE[RADIUS_TABLE.len() - 1];
    if zoom > max_zoom {
        return min_radius;
    }
    if zoom < min_zoom {
        return max_radius;
    }

    for pair in RADIUS_TABLE.windows(2) {
        let (upper_zoom, upper_radius) = pair[0];
        let (lower_zoom, lower_radius) = pair[1];
        if zoom < upper_zoom && zoom > lower_zoom {
            let ratio = (upper_zoom - zoom) / (upper_zoom - lower_zoom);
            return (upper_radius + ratio * (lower_radius - upper_radius)).round();
        }
    }

    // NaN ends up here.
    DEFAULT_RADIUS_KM
}

/// Signed limit adjustment for a zoom transition.
///
/// Zooming out shows more results over the larger area, zooming in fewer.
#[must_use]
pub fn limit_delta(previous: f64, current: f64) -> i32 {
    if current < previous {
        LIMIT_STEP
    } else if current > previous {
        -LIMIT_STEP
    } else {
        0
    }
}

/// Remembers the last zoom level seen so each zoom-end event can be turned
/// into a radius and a limit delta.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomTracker {
    previous: f64,
}

impl Default for ZoomTracker {
    fn default() -> Self {
        Self::new(INITIAL_ZOOM)
    }
}

impl ZoomTracker {
    #[must_use]
    pub fn new(initial_zoom: f64) -> Self {
        Self {
            previous: initial_zoom,
        }
    }

    #[must_use]
    pub fn previous(&self) -> f64 {
        self.previous
    }

    /// Record `zoom` and return `(radius_km, limit_delta)` for it.
    pub fn observe(&mut self, zoom: f64) -> (f64, i32) {
        let delta = limit_delta(self.previous, zoom);
        self.previous = zoom;
        (radius_for(zoom), delta)
    }
}
