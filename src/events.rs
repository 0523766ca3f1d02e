use std::{cmp::Ordering, fmt};

use crate::{
    error::ValidationError,
    scalar::{cmp_scalar, Scalar},
    segments::SegmentId,
};

/// A point in the plane with lexicographic ordering.
///
/// The ordering is by `x` and then by `y`. Implements `Ord` and `Eq`
/// even though the scalar may only be `PartialOrd`: construction
/// checks that both coordinates are finite, so any two points can be
/// consistently ordered.
#[derive(Debug, Clone, PartialEq)]
pub struct Point<T: Scalar> {
    x: T,
    y: T,
}

impl<T: Scalar> Point<T> {
    /// Create a point while checking the components are finite.
    pub fn new(x: T, y: T) -> Result<Self, ValidationError> {
        if x.is_finite() && y.is_finite() {
            Ok(Point { x, y })
        } else {
            Err(ValidationError::NonFinite)
        }
    }

    #[inline]
    pub fn x(&self) -> &T {
        &self.x
    }

    #[inline]
    pub fn y(&self) -> &T {
        &self.y
    }
}

impl<T: Scalar> TryFrom<(T, T)> for Point<T> {
    type Error = ValidationError;

    fn try_from((x, y): (T, T)) -> Result<Self, Self::Error> {
        Point::new(x, y)
    }
}

/// Implement lexicographic ordering by `x` and then by `y`
/// coordinate.
impl<T: Scalar> PartialOrd for Point<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: Scalar> Ord for Point<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        cmp_scalar(&self.x, &other.x).then_with(|| cmp_scalar(&self.y, &other.y))
    }
}

/// We derive `Eq` manually to not require `T: Eq`.
impl<T: Scalar> Eq for Point<T> {}

impl<T: Scalar> fmt::Display for Point<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}|{}>", self.x, self.y)
    }
}

/// Event type to associate with event.
///
/// The ordering of the variants is important for the algorithm: at a
/// shared point, every segment starting there is inserted before the
/// crossings at that point are handled, and segments ending there are
/// removed last.
#[derive(Debug, PartialOrd, Ord, PartialEq, Eq, Clone, Copy, Hash)]
pub enum EventKind {
    Begin,
    Cross,
    End,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EventKind::Begin => "B",
            EventKind::Cross => "C",
            EventKind::End => "E",
        })
    }
}

/// A sweep event.
///
/// `Begin` and `End` events refer to one segment (`first == second`).
/// A `Cross` event refers to two segments, stored in the order they
/// had in the sweep status when the crossing was detected (`first`
/// below `second`).
#[derive(Debug, Clone)]
pub struct Event<T: Scalar> {
    point: Point<T>,
    kind: EventKind,
    first: SegmentId,
    second: SegmentId,
}

impl<T: Scalar> Event<T> {
    pub fn begin(point: Point<T>, segment: SegmentId) -> Self {
        Event {
            point,
            kind: EventKind::Begin,
            first: segment,
            second: segment,
        }
    }

    pub fn end(point: Point<T>, segment: SegmentId) -> Self {
        Event {
            point,
            kind: EventKind::End,
            first: segment,
            second: segment,
        }
    }

    pub fn cross(point: Point<T>, lower: SegmentId, upper: SegmentId) -> Self {
        debug_assert_ne!(lower, upper, "a segment can't cross itself");
        Event {
            point,
            kind: EventKind::Cross,
            first: lower,
            second: upper,
        }
    }

    #[inline]
    pub fn point(&self) -> &Point<T> {
        &self.point
    }

    #[inline]
    pub fn kind(&self) -> EventKind {
        self.kind
    }

    /// The segment of a `Begin`/`End` event, or the lower segment of a
    /// `Cross` event.
    #[inline]
    pub fn segment(&self) -> SegmentId {
        self.first
    }

    /// Both segments of a `Cross` event, in detection order.
    pub fn segments(&self) -> Option<(SegmentId, SegmentId)> {
        (self.kind == EventKind::Cross).then(|| (self.first, self.second))
    }

    /// The stored segment ids; both the same for `Begin` and `End`.
    #[inline]
    pub(crate) fn ids(&self) -> (SegmentId, SegmentId) {
        (self.first, self.second)
    }

    /// The segment ids, smallest first. This is the identity used to
    /// compare and de-duplicate events.
    #[inline]
    pub fn pair(&self) -> (SegmentId, SegmentId) {
        if self.first <= self.second {
            (self.first, self.second)
        } else {
            (self.second, self.first)
        }
    }
}

/// Equality for usage in ordered collections: same point, same kind
/// and the same (unordered) segments.
impl<T: Scalar> PartialEq for Event<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T: Scalar> Eq for Event<T> {}

impl<T: Scalar> PartialOrd for Event<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Ordering by point, then kind, then segment ids.
impl<T: Scalar> Ord for Event<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.point
            .cmp(&other.point)
            .then_with(|| self.kind.cmp(&other.kind))
            .then_with(|| self.pair().cmp(&other.pair()))
    }
}

impl<T: Scalar> fmt::Display for Event<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EV {} {}", self.point, self.kind)
    }
}

#[cfg(test)]
mod tests {
    use num::BigRational;

    use super::*;

    fn pt(x: f64, y: f64) -> Point<f64> {
        Point::new(x, y).unwrap()
    }

    #[test]
    fn test_point_ordering() {
        let p1 = pt(0., 0.);
        let p2 = pt(1., 0.);
        let p3 = pt(1., 1.);
        let p4 = pt(1., 1.);

        assert!(p1 < p2);
        assert!(p1 < p3);
        assert!(p2 < p3);
        assert!(p3 <= p4);
        assert_eq!(p3, p4);
    }

    #[test]
    fn test_point_rejects_non_finite() {
        assert_eq!(Point::new(f64::NAN, 0.), Err(ValidationError::NonFinite));
        assert_eq!(
            Point::try_from((0., f64::INFINITY)),
            Err(ValidationError::NonFinite)
        );
    }

    #[test]
    fn test_event_ordering() {
        let s = |i| SegmentId(i);
        let p = pt(1., 1.);
        let mut events = vec![
            Event::end(p.clone(), s(0)),
            Event::cross(p.clone(), s(3), s(1)),
            Event::begin(pt(1., 2.), s(4)),
            Event::begin(p.clone(), s(2)),
            Event::begin(pt(0., 5.), s(5)),
        ];
        events.sort();

        let order: Vec<_> = events.iter().map(|e| (e.kind(), e.segment())).collect();
        assert_eq!(
            order,
            vec![
                (EventKind::Begin, s(5)),
                (EventKind::Begin, s(2)),
                (EventKind::Cross, s(3)),
                (EventKind::End, s(0)),
                (EventKind::Begin, s(4)),
            ]
        );
    }

    #[test]
    fn test_cross_equality_ignores_pair_order() {
        let p = pt(2., 3.);
        let a = Event::cross(p.clone(), SegmentId(1), SegmentId(7));
        let b = Event::cross(p.clone(), SegmentId(7), SegmentId(1));
        let c = Event::cross(p, SegmentId(1), SegmentId(8));
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.segments(), Some((SegmentId(1), SegmentId(7))));
        assert_eq!(b.segments(), Some((SegmentId(7), SegmentId(1))));
    }

    #[test]
    fn test_display() {
        let half = BigRational::new(1.into(), 2.into());
        let p = Point::new(half, BigRational::from_integer(3.into())).unwrap();
        assert_eq!(p.to_string(), "<1/2|3>");
        assert_eq!(Event::begin(p, SegmentId(0)).to_string(), "EV <1/2|3> B");
    }
}
