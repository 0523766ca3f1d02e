use std::iter::FromIterator;

use crate::{
    error::SweepError,
    events::{Event, Point},
    observer::NoObserver,
    scalar::Scalar,
    segments::{Segment, SegmentId},
};

mod sweep;
pub use sweep::{Sweep, SweepState};

/// A reported intersection, resolved against the input segments.
#[derive(Debug, Clone, Copy)]
pub struct Crossing<'a, T: Scalar> {
    /// The intersection point.
    pub point: &'a Point<T>,

    /// The two intersecting segments, lower one (at detection) first.
    pub segments: [(SegmentId, &'a Segment<T>); 2],
}

impl<'a, T: Scalar> Crossing<'a, T> {
    /// Resolve a `Cross` event; `None` for other events or unknown ids.
    pub fn from_event(event: &'a Event<T>, sweep: &'a Sweep<T>) -> Option<Self> {
        let (a, b) = event.segments()?;
        Some(Crossing {
            point: event.point(),
            segments: [(a, sweep.segment(a)?), (b, sweep.segment(b)?)],
        })
    }

    pub fn ids(&self) -> (SegmentId, SegmentId) {
        (self.segments[0].0, self.segments[1].0)
    }
}

impl<T: Scalar> Sweep<T> {
    /// The crossings handled so far, resolved against the segments.
    pub fn crossing_views(&self) -> impl Iterator<Item = Crossing<'_, T>> {
        self.crossings()
            .iter()
            .filter_map(move |event| Crossing::from_event(event, self))
    }
}

/// Compute all crossings of `segments`, in processing order.
///
/// This is a convenience wrapper around [`Sweep`].
pub fn find_crossings<T: Scalar, I>(segments: I) -> Result<Vec<Event<T>>, SweepError>
where
    I: IntoIterator<Item = Segment<T>>,
{
    let mut sweep = Sweep::new(segments);
    Ok(sweep.run()?.to_vec())
}

/// Iterator that yields all crossings.
///
/// Advances the sweep lazily, one `Cross` event at a time. Construct
/// it by `collect`-ing an iterator of [`Segment`]s.
///
/// The implementation uses the [Bentley-Ottman] algorithm; this is
/// faster than a brute-force search for intersections across all
/// pairs of input segments if the number of intersections is small
/// compared to n^2.
///
/// [Bentley-Ottman]: //en.wikipedia.org/wiki/Bentley%E2%80%93Ottmann_algorithm
pub struct CrossingsIter<T: Scalar> {
    sweep: Sweep<T>,
    failed: bool,
}

impl<T: Scalar> CrossingsIter<T> {
    /// The underlying sweep, e.g. to look up segments.
    pub fn sweep(&self) -> &Sweep<T> {
        &self.sweep
    }
}

impl<T: Scalar> FromIterator<Segment<T>> for CrossingsIter<T> {
    fn from_iter<I: IntoIterator<Item = Segment<T>>>(iter: I) -> Self {
        CrossingsIter {
            sweep: Sweep::new(iter),
            failed: false,
        }
    }
}

impl<T: Scalar> Iterator for CrossingsIter<T> {
    type Item = Result<Event<T>, SweepError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        loop {
            match self.sweep.step(&mut NoObserver) {
                Ok(Some(event)) if event.segments().is_some() => return Some(Ok(event)),
                Ok(Some(_)) => continue,
                Ok(None) => return None,
                Err(err) => {
                    // The sweep status can't be trusted after an error.
                    self.failed = true;
                    return Some(Err(err));
                }
            }
        }
    }
}
