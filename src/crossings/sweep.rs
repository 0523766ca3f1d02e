use std::collections::BTreeSet;

use itertools::Itertools;
use log::{debug, trace};
use slab::Slab;
use smallvec::SmallVec;

use crate::{
    active::SweepStatus,
    error::SweepError,
    events::{Event, EventKind},
    intersect::intersect,
    observer::{NoObserver, SweepObserver, SweepStep},
    queue::EventQueue,
    scalar::Scalar,
    segments::{Segment, SegmentId},
};

/// Life-cycle of a [`Sweep`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepState {
    /// Built, no event processed yet.
    Idle,
    /// Some events processed, queue not yet exhausted.
    Running,
    /// Queue exhausted; all crossings are known.
    Done,
}

/// Sweep algorithm for detecting all crossings.
///
/// This is the data-structure that implements the [Bentley-Ottman]
/// sweep. Maintains the queue of pending events, and the currently
/// active segments ordered by their height on the sweep line.
/// [`CrossingsIter`](crate::CrossingsIter) and
/// [`find_crossings`](crate::find_crossings) are the simpler entry
/// points.
///
/// [Bentley-Ottman]: //en.wikipedia.org/wiki/Bentley%E2%80%93Ottmann_algorithm
pub struct Sweep<T: Scalar> {
    segments: Slab<Segment<T>>,
    events: EventQueue<T>,
    active_segments: SweepStatus<T>,
    state: SweepState,
    crossings: Vec<Event<T>>,
    reported: BTreeSet<(SegmentId, SegmentId)>,
}

impl<T: Scalar> Sweep<T> {
    /// Create a sweep over the given segments. Segment ids are the
    /// positions in `iter`.
    pub fn new<I: IntoIterator<Item = Segment<T>>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let size = {
            let (min_size, max_size) = iter.size_hint();
            max_size.unwrap_or(min_size)
        };

        let mut sweep = Sweep {
            segments: Slab::with_capacity(size),
            events: EventQueue::with_capacity(2 * size),
            active_segments: Default::default(),
            state: SweepState::Idle,
            crossings: Vec::new(),
            reported: BTreeSet::new(),
        };
        for segment in iter {
            sweep.create_segment(segment);
        }
        sweep
    }

    /// Store a segment, and add its events into the queue.
    fn create_segment(&mut self, segment: Segment<T>) -> SegmentId {
        let entry = self.segments.vacant_entry();
        let id = SegmentId(entry.key());
        self.events.extend(segment.events(id));
        entry.insert(segment);
        id
    }

    #[inline]
    pub fn state(&self) -> SweepState {
        self.state
    }

    pub fn segment(&self, id: SegmentId) -> Option<&Segment<T>> {
        self.segments.get(id.0)
    }

    pub fn segments(&self) -> impl Iterator<Item = (SegmentId, &Segment<T>)> {
        self.segments.iter().map(|(key, s)| (SegmentId(key), s))
    }

    /// Position of the sweep line, once the first event was processed.
    #[inline]
    pub fn sweep_x(&self) -> Option<&T> {
        self.active_segments.sweep_x()
    }

    /// Active segment ids, ordered by height.
    #[inline]
    pub fn status(&self) -> &[SegmentId] {
        self.active_segments.snapshot()
    }

    /// The next event to be processed.
    #[inline]
    pub fn peek_event(&self) -> Option<&Event<T>> {
        self.events.peek_min()
    }

    /// The `Cross` events handled so far, in processing order.
    #[inline]
    pub fn crossings(&self) -> &[Event<T>] {
        &self.crossings
    }

    /// Process the next event.
    ///
    /// Returns the handled event, or `None` once the queue is empty.
    pub fn step<O: SweepObserver<T>>(
        &mut self,
        observer: &mut O,
    ) -> Result<Option<Event<T>>, SweepError> {
        if self.events.is_empty() {
            if self.state != SweepState::Done {
                debug!("sweep done: {} crossings", self.crossings.len());
            }
            self.state = SweepState::Done;
            return Ok(None);
        }
        self.state = SweepState::Running;

        let event = self.events.pop_min()?;
        self.handle_event(&event)?;

        observer.on_step(&SweepStep {
            sweep_x: event.point().x(),
            status: self.active_segments.snapshot(),
            event: &event,
            segments: &self.segments,
        });
        Ok(Some(event))
    }

    /// Run the sweep to completion, and return all crossings.
    pub fn run(&mut self) -> Result<&[Event<T>], SweepError> {
        self.run_with(&mut NoObserver)
    }

    /// Run the sweep to completion, notifying `observer` after each
    /// event.
    pub fn run_with<O: SweepObserver<T>>(
        &mut self,
        observer: &mut O,
    ) -> Result<&[Event<T>], SweepError> {
        while self.step(observer)?.is_some() {}
        Ok(&self.crossings)
    }

    /// Handle one event.
    fn handle_event(&mut self, event: &Event<T>) -> Result<(), SweepError> {
        trace!("handling event: {}", event);
        let x = event.point().x();
        self.active_segments.resort(x, &mut self.segments);

        match event.kind() {
            EventKind::Begin => {
                let id = event.segment();
                self.active_segments.insert(id, &mut self.segments)?;

                let mut candidates: SmallVec<[SegmentId; 8]> = SmallVec::new();
                candidates.extend(self.active_segments.right_neighbors_tied(id, &self.segments)?);
                candidates.extend(self.active_segments.left_neighbors_tied(id, &self.segments)?);

                // A vertical segment sits above everything at its own x,
                // so its neighbors are found by height instead.
                let segment = &self.segments[id.0];
                if segment.is_vertical() {
                    candidates.extend_from_slice(self.active_segments.members_in_range(
                        segment.begin().y(),
                        segment.end().y(),
                        &self.segments,
                    ));
                } else {
                    candidates.extend_from_slice(self.active_segments.verticals(&self.segments));
                }

                for other in candidates {
                    if other != id {
                        self.check_pair(id, other)?;
                    }
                }
            }
            EventKind::End => {
                let id = event.segment();
                let above = self.active_segments.right_neighbors_tied(id, &self.segments)?;
                let below = self.active_segments.left_neighbors_tied(id, &self.segments)?;
                self.active_segments.remove(id, &self.segments)?;

                // Segments on either side may become adjacent.
                for (lower, upper) in below.iter().cartesian_product(above.iter()) {
                    self.check_pair(*lower, *upper)?;
                }
            }
            EventKind::Cross => self.handle_crossing(event)?,
        }

        debug_assert!(
            self.active_segments.validate(&self.segments),
            "sweep status out of order after {}",
            event
        );
        Ok(())
    }

    /// Record a crossing, and reorder the pair past it.
    fn handle_crossing(&mut self, event: &Event<T>) -> Result<(), SweepError> {
        let (lower, upper) = event.ids();
        debug!("crossing at {}: {} and {}", event.point(), lower, upper);
        self.crossings.push(event.clone());
        self.reported.insert(event.pair());

        // With floats, a crossing may round past an end point of the
        // pair; there is nothing left to reorder then.
        let status = &self.active_segments;
        if !status.contains(lower, &self.segments) || !status.contains(upper, &self.segments) {
            trace!("{} and {} are no longer both active", lower, upper);
            return Ok(());
        }

        // Both pass through the crossing point, whatever their computed
        // heights round to.
        let (x, y) = (event.point().x(), event.point().y());
        self.active_segments.pin(lower, y.clone(), &self.segments);
        self.active_segments.pin(upper, y.clone(), &self.segments);

        // A vertical segment stays on top; otherwise the pair trades
        // places, and each meets a new outer neighbor.
        let vertical = self.segments[lower.0].is_vertical() || self.segments[upper.0].is_vertical();
        if !vertical {
            self.active_segments.resort_before(x, &mut self.segments);
            self.active_segments.swap_positions(lower, upper, &self.segments)?;
            let (low, high) = self.by_position(lower, upper)?;
            for other in self.active_segments.left_neighbors_tied(low, &self.segments)? {
                self.check_pair(other, low)?;
            }
            for other in self.active_segments.right_neighbors_tied(high, &self.segments)? {
                self.check_pair(high, other)?;
            }
        }

        // More segments through the same point: check them pairwise,
        // and against the segments just outside.
        let anchor = if self.segments[lower.0].is_vertical() {
            upper
        } else {
            lower
        };
        let block: SmallVec<[SegmentId; 8]> = self
            .active_segments
            .tied_block(anchor, &self.segments)?
            .into();
        if block.len() > 2 {
            let (bottom, top) = (block[0], block[block.len() - 1]);
            let status = &self.active_segments;
            let mut outside = status.left_neighbors_tied(bottom, &self.segments)?;
            outside.extend(status.right_neighbors_tied(top, &self.segments)?);
            for (a, b) in block.iter().tuple_combinations() {
                self.check_pair(*a, *b)?;
            }
            for (a, b) in block.iter().cartesian_product(outside.iter()) {
                self.check_pair(*a, *b)?;
            }
        }

        self.active_segments.resort(x, &mut self.segments);
        Ok(())
    }

    /// Order two active segments bottom to top.
    fn by_position(
        &self,
        a: SegmentId,
        b: SegmentId,
    ) -> Result<(SegmentId, SegmentId), SweepError> {
        let pa = self.active_segments.position(a, &self.segments)?;
        let pb = self.active_segments.position(b, &self.segments)?;
        Ok(if pa <= pb { (a, b) } else { (b, a) })
    }

    /// Test two active segments, and queue their crossing if it is new.
    fn check_pair(&mut self, a: SegmentId, b: SegmentId) -> Result<(), SweepError> {
        if a == b {
            return Ok(());
        }
        let key = if a < b { (a, b) } else { (b, a) };
        if self.reported.contains(&key) {
            return Ok(());
        }

        let (lower, upper) = self.by_position(a, b)?;
        if let Some(event) = intersect(
            (lower, &self.segments[lower.0]),
            (upper, &self.segments[upper.0]),
        ) {
            if self.events.insert_if_absent(event.clone()) {
                trace!("queued {} for {} and {}", event, lower, upper);
            }
        }
        Ok(())
    }
}
