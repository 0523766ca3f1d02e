//! Reference implementation testing every pair of segments.

use itertools::Itertools;

use crate::{
    events::Event,
    intersect::intersect,
    scalar::Scalar,
    segments::{Segment, SegmentId},
};

/// All crossings of `segments`, found by testing every pair with the
/// same intersection test as the sweep. Segment ids are indices into
/// `segments`; the result is sorted in event order.
pub fn brute_force_crossings<T: Scalar>(segments: &[Segment<T>]) -> Vec<Event<T>> {
    let mut crossings: Vec<_> = segments
        .iter()
        .enumerate()
        .tuple_combinations()
        .filter_map(|((i, a), (j, b))| intersect((SegmentId(i), a), (SegmentId(j), b)))
        .collect();
    crossings.sort();
    crossings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_every_pair() {
        let coords = [[0., 0., 2., 2.], [0., 2., 2., 0.], [0., 1., 2., 1.], [5., 0., 5., 1.]];
        let segments: Vec<Segment<f64>> = coords
            .iter()
            .map(|c| Segment::from_coords(c[0], c[1], c[2], c[3]).unwrap())
            .collect();
        let crossings = brute_force_crossings(&segments);
        let pairs: Vec<_> = crossings.iter().map(|e| e.pair()).collect();
        assert_eq!(
            pairs,
            vec![
                (SegmentId(0), SegmentId(1)),
                (SegmentId(0), SegmentId(2)),
                (SegmentId(1), SegmentId(2)),
            ]
        );
    }
}
