//! Determinant based segment intersection.

use log::trace;

use crate::{
    events::{Event, Point},
    scalar::Scalar,
    segments::{Segment, SegmentId},
};

/// Coefficients `(A, B, C)` of the supporting line `A·x + B·y = C`.
pub fn line_coeffs<T: Scalar>(segment: &Segment<T>) -> (T, T, T) {
    let (b, e) = (segment.begin(), segment.end());
    let a = b.y().clone() - e.y().clone();
    let bb = e.x().clone() - b.x().clone();
    let c = e.x().clone() * b.y().clone() - b.x().clone() * e.y().clone();
    (a, bb, c)
}

/// Intersection point of two segments, if they have a single one.
///
/// Solves the two line equations with Cramer's rule. Parallel and
/// coincident lines (`D = 0`) yield `None`, so overlapping collinear
/// segments are never reported. The solution is accepted only if it
/// lies in the closed bounding boxes of both segments.
pub fn intersection_point<T: Scalar>(s1: &Segment<T>, s2: &Segment<T>) -> Option<Point<T>> {
    let (a1, b1, c1) = line_coeffs(s1);
    let (a2, b2, c2) = line_coeffs(s2);

    let d = a1.clone() * b2.clone() - b1.clone() * a2.clone();
    if d.is_zero() {
        trace!("parallel lines, no intersection: {} and {}", s1, s2);
        return None;
    }
    let dx = c1.clone() * b2 - b1 * c2.clone();
    let dy = a1 * c2 - c1 * a2;

    let point = Point::new(dx / d.clone(), dy / d).ok()?;
    (s1.bbox_contains(&point) && s2.bbox_contains(&point)).then(|| point)
}

/// Test two segments for intersection and build the `Cross` event.
///
/// The event lists `lower` first: callers pass the segments in their
/// sweep status order.
pub fn intersect<T: Scalar>(
    lower: (SegmentId, &Segment<T>),
    upper: (SegmentId, &Segment<T>),
) -> Option<Event<T>> {
    intersection_point(lower.1, upper.1).map(|point| Event::cross(point, lower.0, upper.0))
}
