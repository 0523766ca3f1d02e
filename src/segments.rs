use std::{cmp::Ordering, fmt};

use crate::{
    error::ValidationError,
    events::{Event, Point},
    scalar::{cmp_scalar, Scalar},
};

/// Stable identity of an input segment: its index in input order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SegmentId(pub usize);

impl fmt::Display for SegmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Height at which a segment crosses the sweep line.
///
/// A vertical segment has no single height at its own x; it is
/// treated as infinitely high, so it sorts above every finite height.
#[derive(Debug, Clone, PartialEq, PartialOrd)]
pub enum LineY<T: Scalar> {
    Finite(T),
    Vertical,
}

impl<T: Scalar> LineY<T> {
    /// Total ordering; finite heights are always comparable.
    #[inline]
    pub(crate) fn total_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (LineY::Finite(a), LineY::Finite(b)) => cmp_scalar(a, b),
            (LineY::Finite(_), LineY::Vertical) => Ordering::Less,
            (LineY::Vertical, LineY::Finite(_)) => Ordering::Greater,
            (LineY::Vertical, LineY::Vertical) => Ordering::Equal,
        }
    }

    pub fn finite(&self) -> Option<&T> {
        match self {
            LineY::Finite(y) => Some(y),
            LineY::Vertical => None,
        }
    }
}

impl<T: Scalar> fmt::Display for LineY<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineY::Finite(y) => write!(f, "{}", y),
            LineY::Vertical => write!(f, "inf"),
        }
    }
}

/// A line segment with ordered end points.
///
/// The end points are immutable once constructed, and `begin` is
/// always the lexicographically smaller one. The `line_y` sort key
/// is transient: it is rewritten by the sweep status every time the
/// sweep line moves.
#[derive(Debug, Clone)]
pub struct Segment<T: Scalar> {
    begin: Point<T>,
    end: Point<T>,
    line_y: LineY<T>,
}

impl<T: Scalar> Segment<T> {
    /// Create a segment, swapping the end points if needed.
    pub fn new(a: Point<T>, b: Point<T>) -> Result<Self, ValidationError> {
        let (begin, end) = match a.cmp(&b) {
            Ordering::Less => (a, b),
            Ordering::Greater => (b, a),
            Ordering::Equal => return Err(ValidationError::ZeroLength),
        };
        let line_y = LineY::Finite(begin.y().clone());
        let segment = Segment { begin, end, line_y };

        // Heights along the segment are computed from its extent, which
        // must not overflow.
        let (dx, dy) = segment.delta();
        if !dx.is_finite() || !dy.is_finite() {
            return Err(ValidationError::NonFinite);
        }
        Ok(segment)
    }

    /// Create a segment from `x1 y1 x2 y2`.
    pub fn from_coords(x1: T, y1: T, x2: T, y2: T) -> Result<Self, ValidationError> {
        Segment::new(Point::new(x1, y1)?, Point::new(x2, y2)?)
    }

    #[inline]
    pub fn begin(&self) -> &Point<T> {
        &self.begin
    }

    #[inline]
    pub fn end(&self) -> &Point<T> {
        &self.end
    }

    /// The sort key computed at the last sweep position.
    #[inline]
    pub fn line_y(&self) -> &LineY<T> {
        &self.line_y
    }

    #[inline]
    pub(crate) fn set_line_y(&mut self, line_y: LineY<T>) {
        self.line_y = line_y;
    }

    #[inline]
    pub fn is_vertical(&self) -> bool {
        self.begin.x() == self.end.x()
    }

    /// `end - begin` as `(dx, dy)`; `dx >= 0` by construction.
    pub(crate) fn delta(&self) -> (T, T) {
        (
            self.end.x().clone() - self.begin.x().clone(),
            self.end.y().clone() - self.begin.y().clone(),
        )
    }

    /// Height of the supporting line at `x`.
    ///
    /// Vertical segments are only ever queried at their own x and
    /// report [`LineY::Vertical`].
    pub fn y_at(&self, x: &T) -> LineY<T> {
        if self.is_vertical() {
            return LineY::Vertical;
        }
        if x == self.begin.x() {
            return LineY::Finite(self.begin.y().clone());
        }
        if x == self.end.x() {
            return LineY::Finite(self.end.y().clone());
        }
        let (dx, dy) = self.delta();
        let t = x.clone() - self.begin.x().clone();
        LineY::Finite(self.begin.y().clone() + dy * (t / dx))
    }

    /// Compare directions: the steeper (counter-clockwise) segment is
    /// greater, a vertical segment is the steepest.
    pub(crate) fn cmp_slope(&self, other: &Self) -> Ordering {
        match (self.is_vertical(), other.is_vertical()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => {
                // dy1/dx1 <=> dy2/dx2 with both dx positive.
                let (dx1, dy1) = self.delta();
                let (dx2, dy2) = other.delta();
                cmp_scalar(&(dy1 * dx2), &(dy2 * dx1))
            }
        }
    }

    /// Whether `p` lies in the closed bounding box of the segment.
    pub fn bbox_contains(&self, p: &Point<T>) -> bool {
        let (y_lo, y_hi) = if self.begin.y() <= self.end.y() {
            (self.begin.y(), self.end.y())
        } else {
            (self.end.y(), self.begin.y())
        };
        self.begin.x() <= p.x() && p.x() <= self.end.x() && y_lo <= p.y() && p.y() <= y_hi
    }

    /// The event for the begin point of this segment.
    pub fn begin_event(&self, id: SegmentId) -> Event<T> {
        Event::begin(self.begin.clone(), id)
    }

    /// The event for the end point of this segment.
    pub fn end_event(&self, id: SegmentId) -> Event<T> {
        Event::end(self.end.clone(), id)
    }

    /// Get events for both the end-points of this segment.
    pub(crate) fn events(&self, id: SegmentId) -> [Event<T>; 2] {
        [self.begin_event(id), self.end_event(id)]
    }
}

/// Geometric equality; the transient sort key is ignored.
impl<T: Scalar> PartialEq for Segment<T> {
    fn eq(&self, other: &Self) -> bool {
        self.begin == other.begin && self.end == other.end
    }
}

impl<T: Scalar> fmt::Display for Segment<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Segment {} -> {}", self.begin, self.end)
    }
}

/// Convert from a float [`Line`](geo::Line), exactly.
impl<T: Scalar> TryFrom<geo::Line<f64>> for Segment<T> {
    type Error = ValidationError;

    fn try_from(line: geo::Line<f64>) -> Result<Self, Self::Error> {
        let coord = |v: f64| T::from_f64(v).ok_or(ValidationError::NonFinite);
        Segment::from_coords(
            coord(line.start.x)?,
            coord(line.start.y)?,
            coord(line.end.x)?,
            coord(line.end.y)?,
        )
    }
}
