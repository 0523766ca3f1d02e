//! Step notifications for visualisation and debugging.

use slab::Slab;

use crate::{
    events::Event,
    scalar::Scalar,
    segments::{Segment, SegmentId},
};

/// Read-only view of the sweep right after an event was handled.
pub struct SweepStep<'a, T: Scalar> {
    pub(crate) sweep_x: &'a T,
    pub(crate) status: &'a [SegmentId],
    pub(crate) event: &'a Event<T>,
    pub(crate) segments: &'a Slab<Segment<T>>,
}

impl<'a, T: Scalar> SweepStep<'a, T> {
    /// Position of the sweep line.
    #[inline]
    pub fn sweep_x(&self) -> &'a T {
        self.sweep_x
    }

    /// Active segment ids, ordered by height (bottom first).
    #[inline]
    pub fn status(&self) -> &'a [SegmentId] {
        self.status
    }

    /// The event just handled.
    #[inline]
    pub fn event(&self) -> &'a Event<T> {
        self.event
    }

    pub fn segment(&self, id: SegmentId) -> Option<&'a Segment<T>> {
        self.segments.get(id.0)
    }

    /// Active segments, ordered by height (bottom first).
    pub fn status_segments(&self) -> impl Iterator<Item = (SegmentId, &'a Segment<T>)> + 'a {
        let (status, segments) = (self.status, self.segments);
        status.iter().map(move |id| (*id, &segments[id.0]))
    }
}

/// Receives a [`SweepStep`] after each processed event.
///
/// Observers can't mutate the sweep. Closures taking a `&SweepStep`
/// implement this trait.
pub trait SweepObserver<T: Scalar> {
    fn on_step(&mut self, step: &SweepStep<'_, T>);
}

/// Observer that ignores every step.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoObserver;

impl<T: Scalar> SweepObserver<T> for NoObserver {
    #[inline]
    fn on_step(&mut self, _step: &SweepStep<'_, T>) {}
}

impl<T: Scalar, F> SweepObserver<T> for F
where
    F: FnMut(&SweepStep<'_, T>),
{
    #[inline]
    fn on_step(&mut self, step: &SweepStep<'_, T>) {
        self(step)
    }
}

/// An owned copy of one [`SweepStep`].
#[derive(Debug, Clone, PartialEq)]
pub struct TraceStep<T: Scalar> {
    pub sweep_x: T,
    pub event: Event<T>,
    pub status: Vec<SegmentId>,
}

/// Observer recording every step of the sweep.
#[derive(Debug, Clone)]
pub struct TraceRecorder<T: Scalar> {
    pub steps: Vec<TraceStep<T>>,
}

impl<T: Scalar> Default for TraceRecorder<T> {
    fn default() -> Self {
        TraceRecorder { steps: Vec::new() }
    }
}

impl<T: Scalar> SweepObserver<T> for TraceRecorder<T> {
    fn on_step(&mut self, step: &SweepStep<'_, T>) {
        self.steps.push(TraceStep {
            sweep_x: step.sweep_x().clone(),
            event: step.event().clone(),
            status: step.status().to_vec(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{crossings::Sweep, events::EventKind};

    fn lines(coords: &[[f64; 4]]) -> Vec<Segment<f64>> {
        coords
            .iter()
            .map(|c| Segment::from_coords(c[0], c[1], c[2], c[3]).unwrap())
            .collect()
    }

    #[test]
    fn closure_sees_every_step() {
        let mut sweep = Sweep::new(lines(&[[0., 0., 2., 2.], [0., 2., 2., 0.]]));
        let mut seen = vec![];
        sweep
            .run_with(&mut |step: &SweepStep<'_, f64>| {
                let below: Vec<_> = step.status_segments().map(|(id, _)| id).collect();
                assert_eq!(below, step.status());
                seen.push((step.event().kind(), *step.sweep_x(), step.status().len()));
            })
            .unwrap();
        assert_eq!(
            seen,
            vec![
                (EventKind::Begin, 0., 1),
                (EventKind::Begin, 0., 2),
                (EventKind::Cross, 1., 2),
                (EventKind::End, 2., 1),
                (EventKind::End, 2., 0),
            ]
        );
    }

    #[test]
    fn recorder_copies_steps() {
        let mut sweep = Sweep::new(lines(&[[0., 0., 1., 0.]]));
        let mut trace = TraceRecorder::default();
        sweep.run_with(&mut trace).unwrap();
        assert_eq!(trace.steps.len(), 2);
        assert_eq!(trace.steps[0].status, vec![SegmentId(0)]);
        assert!(trace.steps[1].status.is_empty());
        assert_eq!(trace.steps[1].sweep_x, 1.);
    }
}
