#![allow(dead_code)]

use geo::{line_intersection::line_intersection, Line};
use num::BigRational;
use rstar::{RTree, RTreeObject};
use segment_crossings::{brute_force_crossings, CrossingsIter, Scalar, Segment};

struct GeomWithData<R: RTreeObject, T>(R, T);

impl<R: RTreeObject, T> RTreeObject for GeomWithData<R, T> {
    type Envelope = R::Envelope;

    fn envelope(&self) -> Self::Envelope {
        self.0.envelope()
    }
}

/// Convert lines into segments, dropping degenerate ones.
pub fn to_segments<T: Scalar>(lines: &[Line<f64>]) -> Vec<Segment<T>> {
    lines.iter().filter_map(|l| Segment::try_from(*l).ok()).collect()
}

pub fn grid_to_segments(coords: &[[i64; 4]]) -> Vec<Segment<BigRational>> {
    let r = |v: i64| BigRational::from_integer(v.into());
    coords
        .iter()
        .filter_map(|c| Segment::from_coords(r(c[0]), r(c[1]), r(c[2]), r(c[3])).ok())
        .collect()
}

pub fn count_bo<T: Scalar>(segments: &[Segment<T>]) -> usize {
    CrossingsIter::from_iter(segments.iter().cloned())
        .map(|crossing| crossing.expect("sweep failed"))
        .count()
}

pub fn count_pairs<T: Scalar>(segments: &[Segment<T>]) -> usize {
    brute_force_crossings(segments).len()
}

pub fn count_brute(lines: &[Line<f64>]) -> usize {
    let mut count = 0;
    let n = lines.len();
    for i in 0..n {
        let l1 = &lines[i];
        for j in i + 1..n {
            let l2 = &lines[j];
            if line_intersection(*l1, *l2).is_some() {
                count += 1;
            }
        }
    }
    count
}

pub fn count_rtree(lines: &[Line<f64>]) -> usize {
    let lines: Vec<_> = lines
        .iter()
        .enumerate()
        .map(|(i, l)| GeomWithData(*l, i))
        .collect();

    let tree = RTree::bulk_load(lines);
    tree.intersection_candidates_with_other_tree(&tree)
        .filter_map(|(l1, l2)| {
            if l1.1 >= l2.1 {
                None
            } else {
                line_intersection(l1.0, l2.0)
            }
        })
        .count()
}
