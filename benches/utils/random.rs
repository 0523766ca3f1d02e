#![allow(dead_code)]

use std::f64::consts::PI;

use geo::{rotate::RotatePoint, Coordinate, Line, Rect};

use rand::Rng;
use rand_distr::{Standard, Uniform};

#[inline]
pub fn uniform_point<R: Rng>(rng: &mut R, bounds: Rect<f64>) -> Coordinate<f64> {
    let coords: [f64; 2] = rng.sample(Standard);
    let dims = bounds.max() - bounds.min();
    Coordinate {
        x: bounds.min().x + dims.x * coords[0],
        y: bounds.min().y + dims.y * coords[1],
    }
}

#[inline]
pub fn uniform_line<R: Rng>(rng: &mut R, bounds: Rect<f64>) -> Line<f64> {
    Line::new(uniform_point(rng, bounds), uniform_point(rng, bounds))
}

#[inline]
pub fn uniform_line_with_length<R: Rng>(rng: &mut R, bounds: Rect<f64>, length: f64) -> Line<f64> {
    let start = uniform_point(rng, bounds);
    let line = Line::new(start, start + (length, 0.).into());
    let angle = rng.sample::<f64, _>(Standard) * 2. * PI;
    line.rotate_around_point(angle, start.into())
}

/// Segment `[x1, y1, x2, y2]` with integer end points in `0..=size`.
///
/// Small grids produce many degeneracies: shared end points, vertical
/// segments and several segments through one point.
pub fn grid_segment<R: Rng>(rng: &mut R, size: i64) -> [i64; 4] {
    let coord = Uniform::new_inclusive(0, size);
    loop {
        let c = [rng.sample(coord), rng.sample(coord), rng.sample(coord), rng.sample(coord)];
        if (c[0], c[1]) != (c[2], c[3]) {
            return c;
        }
    }
}

pub fn grid_segments<R: Rng>(rng: &mut R, count: usize, size: i64) -> Vec<[i64; 4]> {
    (0..count).map(|_| grid_segment(rng, size)).collect()
}
