//! Last touch point captured by the UI before a call was placed.

use incall_types::Point;

/// Remembers where the user last touched, to anchor the outgoing-call reveal.
///
/// The origin `(0, 0)` means "never set", matching hosts that report an
/// untouched screen that way.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TouchPointTracker {
    point: Option<Point>,
}

impl TouchPointTracker {
    pub fn record(&mut self, point: Point) {
        self.point = Some(point);
    }

    pub fn clear(&mut self) {
        self.point = None;
    }

    #[must_use]
    pub fn valid_point(&self) -> Option<Point> {
        self.point.filter(|p| p.x != 0 || p.y != 0)
    }
}
