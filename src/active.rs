use std::{cmp::Ordering, ops::Range};

use slab::Slab;
use smallvec::SmallVec;

use crate::{
    error::SweepError,
    scalar::Scalar,
    segments::{LineY, Segment, SegmentId},
};

/// Runs of segments returned by neighbor queries. Usually one or two
/// segments, more only where several segments meet at a point.
pub type Run = SmallVec<[SegmentId; 4]>;

/// Which side of the sweep line breaks ties between equal heights.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    /// Order just to the left of the sweep line.
    Before,
    /// Order just to the right of the sweep line.
    After,
}

/// Ordering of two active segments as per algorithm.
///
/// Primarily by the height on the sweep line (`line_y`). Segments at
/// the same height are ordered by slope, i.e. by their order just to
/// one side of the sweep line, and finally by id so that the order is
/// total.
fn cmp_active<T: Scalar>(
    storage: &Slab<Segment<T>>,
    a: SegmentId,
    b: SegmentId,
    side: Side,
) -> Ordering {
    let (sa, sb) = (&storage[a.0], &storage[b.0]);
    let by_slope = match side {
        Side::Before => sb.cmp_slope(sa),
        Side::After => sa.cmp_slope(sb),
    };
    sa.line_y()
        .total_cmp(sb.line_y())
        .then(by_slope)
        .then_with(|| a.cmp(&b))
}

/// The sweep status: segments crossing the sweep line, bottom to top.
///
/// This is an array of segment ids into the segment storage, sorted
/// with binary search insertion. Every query is relative to the sweep
/// position set by the last [`resort`](Self::resort); the caller must
/// resort whenever the sweep line moves.
///
/// Heights fixed with [`pin`](Self::pin) override the computed ones
/// until the sweep line leaves the current x.
#[derive(Debug, Clone)]
pub struct SweepStatus<T: Scalar> {
    sweep_x: Option<T>,
    active: Vec<SegmentId>,
    pinned: Vec<(SegmentId, T)>,
}

impl<T: Scalar> Default for SweepStatus<T> {
    fn default() -> Self {
        SweepStatus {
            sweep_x: None,
            active: Vec::new(),
            pinned: Vec::new(),
        }
    }
}

impl<T: Scalar> SweepStatus<T> {
    #[inline]
    pub fn sweep_x(&self) -> Option<&T> {
        self.sweep_x.as_ref()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.active.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// The active segments, bottom to top.
    #[inline]
    pub fn snapshot(&self) -> &[SegmentId] {
        &self.active
    }

    /// Recompute `line_y` of every active segment at `x`, and restore
    /// the order just to the right of `x`.
    pub fn resort(&mut self, x: &T, storage: &mut Slab<Segment<T>>) {
        self.sort_at(x, storage, Side::After);
    }

    /// Like [`resort`](Self::resort), but segments at equal heights take
    /// their order just to the left of `x`.
    pub fn resort_before(&mut self, x: &T, storage: &mut Slab<Segment<T>>) {
        self.sort_at(x, storage, Side::Before);
    }

    fn sort_at(&mut self, x: &T, storage: &mut Slab<Segment<T>>, side: Side) {
        if self.sweep_x.as_ref() != Some(x) {
            self.pinned.clear();
        }
        for id in &self.active {
            let segment = &mut storage[id.0];
            let line_y = match self.pinned.iter().find(|(pinned, _)| pinned == id) {
                Some((_, y)) => LineY::Finite(y.clone()),
                None => segment.y_at(x),
            };
            segment.set_line_y(line_y);
        }
        let storage = &*storage;
        self.active.sort_by(|a, b| cmp_active(storage, *a, *b, side));
        self.sweep_x = Some(x.clone());
    }

    /// Fix the height of `id` at the current sweep x.
    ///
    /// Takes effect at the next resort, and is dropped once the sweep
    /// line moves to another x. Vertical segments keep their height.
    pub fn pin(&mut self, id: SegmentId, y: T, storage: &Slab<Segment<T>>) {
        if storage.get(id.0).map_or(true, |s| s.is_vertical()) {
            return;
        }
        self.pinned.retain(|(other, _)| *other != id);
        self.pinned.push((id, y));
    }

    /// Positions of all members at height `line_y`.
    fn tied_range(&self, line_y: &LineY<T>, storage: &Slab<Segment<T>>) -> Range<usize> {
        let start = self
            .active
            .partition_point(|id| storage[id.0].line_y().total_cmp(line_y) == Ordering::Less);
        let end = start
            + self.active[start..].partition_point(|id| {
                storage[id.0].line_y().total_cmp(line_y) != Ordering::Greater
            });
        start..end
    }

    /// Position of `id`, found by ordered search on its `line_y`.
    ///
    /// Inside a run of equal heights the segment is looked up by id,
    /// so this stays valid after [`swap_positions`](Self::swap_positions).
    pub fn position(&self, id: SegmentId, storage: &Slab<Segment<T>>) -> Result<usize, SweepError> {
        let segment = storage.get(id.0).ok_or(SweepError::NotFound { segment: id })?;
        let range = self.tied_range(segment.line_y(), storage);
        self.active[range.clone()]
            .iter()
            .position(|other| *other == id)
            .map(|offset| range.start + offset)
            .ok_or(SweepError::NotFound { segment: id })
    }

    pub fn contains(&self, id: SegmentId, storage: &Slab<Segment<T>>) -> bool {
        self.position(id, storage).is_ok()
    }

    /// Insert a segment into its sorted position at the current sweep x.
    pub fn insert(
        &mut self,
        id: SegmentId,
        storage: &mut Slab<Segment<T>>,
    ) -> Result<usize, SweepError> {
        if let Some(x) = &self.sweep_x {
            let segment = storage.get_mut(id.0).ok_or(SweepError::NotFound { segment: id })?;
            let line_y = segment.y_at(x);
            segment.set_line_y(line_y);
        }
        let storage = &*storage;
        match self.active.binary_search_by(|other| cmp_active(storage, *other, id, Side::After)) {
            Ok(_) => Err(SweepError::AlreadyActive { segment: id }),
            Err(idx) => {
                self.active.insert(idx, id);
                Ok(idx)
            }
        }
    }

    pub fn remove(&mut self, id: SegmentId, storage: &Slab<Segment<T>>) -> Result<(), SweepError> {
        let idx = self.position(id, storage)?;
        self.active.remove(idx);
        Ok(())
    }

    pub fn left_neighbor(
        &self,
        id: SegmentId,
        storage: &Slab<Segment<T>>,
    ) -> Result<Option<SegmentId>, SweepError> {
        let idx = self.position(id, storage)?;
        Ok(idx.checked_sub(1).map(|i| self.active[i]))
    }

    pub fn right_neighbor(
        &self,
        id: SegmentId,
        storage: &Slab<Segment<T>>,
    ) -> Result<Option<SegmentId>, SweepError> {
        let idx = self.position(id, storage)?;
        Ok(self.active.get(idx + 1).copied())
    }

    /// The right (upper) neighbor and every member above it at the same
    /// height.
    pub fn right_neighbors_tied(
        &self,
        id: SegmentId,
        storage: &Slab<Segment<T>>,
    ) -> Result<Run, SweepError> {
        let idx = self.position(id, storage)?;
        let above = &self.active[idx + 1..];
        Ok(match above.first() {
            Some(first) => {
                let line_y = storage[first.0].line_y();
                above
                    .iter()
                    .take_while(|other| storage[other.0].line_y() == line_y)
                    .copied()
                    .collect()
            }
            None => Run::new(),
        })
    }

    /// The left (lower) neighbor and every member below it at the same
    /// height, nearest first.
    pub fn left_neighbors_tied(
        &self,
        id: SegmentId,
        storage: &Slab<Segment<T>>,
    ) -> Result<Run, SweepError> {
        let idx = self.position(id, storage)?;
        let below = &self.active[..idx];
        Ok(match below.last() {
            Some(first) => {
                let line_y = storage[first.0].line_y();
                below
                    .iter()
                    .rev()
                    .take_while(|other| storage[other.0].line_y() == line_y)
                    .copied()
                    .collect()
            }
            None => Run::new(),
        })
    }

    /// Every member at the same height as `id`, `id` included.
    pub fn tied_block(
        &self,
        id: SegmentId,
        storage: &Slab<Segment<T>>,
    ) -> Result<&[SegmentId], SweepError> {
        let segment = storage.get(id.0).ok_or(SweepError::NotFound { segment: id })?;
        let range = self.tied_range(segment.line_y(), storage);
        if !self.active[range.clone()].contains(&id) {
            return Err(SweepError::NotFound { segment: id });
        }
        Ok(&self.active[range])
    }

    /// Members with a finite height in `[lo, hi]`.
    pub fn members_in_range(&self, lo: &T, hi: &T, storage: &Slab<Segment<T>>) -> &[SegmentId] {
        let lo = LineY::Finite(lo.clone());
        let hi = LineY::Finite(hi.clone());
        let start = self
            .active
            .partition_point(|id| storage[id.0].line_y().total_cmp(&lo) == Ordering::Less);
        let end = self
            .active
            .partition_point(|id| storage[id.0].line_y().total_cmp(&hi) != Ordering::Greater);
        &self.active[start..end.max(start)]
    }

    /// The vertical members; they sort above everything else.
    pub fn verticals(&self, storage: &Slab<Segment<T>>) -> &[SegmentId] {
        let start = self
            .active
            .partition_point(|id| *storage[id.0].line_y() != LineY::Vertical);
        &self.active[start..]
    }

    /// Exchange the positions of two members.
    pub fn swap_positions(
        &mut self,
        a: SegmentId,
        b: SegmentId,
        storage: &Slab<Segment<T>>,
    ) -> Result<(), SweepError> {
        let i = self.position(a, storage)?;
        let j = self.position(b, storage)?;
        self.active.swap(i, j);
        Ok(())
    }

    /// Check the members are sorted; used by debug assertions.
    pub(crate) fn validate(&self, storage: &Slab<Segment<T>>) -> bool {
        self.active
            .windows(2)
            .all(|w| cmp_active(storage, w[0], w[1], Side::After) == Ordering::Less)
    }
}
