//! Finds all crossings of a set of line segments in the plane.
//!
//! 1. [Usage](#usage)
//! 1. [Numbers](#numbers)
//! 1. [Degenerate input](#degenerate-input)
//!
//! This is an implementation of the [Bentley-Ottman] algorithm: a
//! vertical sweep line moves from left to right over the plane,
//! stopping at segment end points and at crossings. The segments
//! currently cut by the sweep line are kept ordered by height; only
//! segments adjacent in that order are tested against each other.
//! This is faster than testing all pairs (see
//! [`brute_force_crossings`]) if the number of crossings is small
//! compared to n^2.
//!
//! # Usage
//!
//! The simplest entry point is [`find_crossings`], which returns
//! every crossing as a [`Event`] of kind [`EventKind::Cross`].
//! [`CrossingsIter`] yields the same crossings lazily, and [`Sweep`]
//! allows stepping through individual events, optionally observed by
//! a [`SweepObserver`].
//!
//! ```rust
//! use num::BigRational;
//! use segment_crossings::{find_crossings, parse_segments, LoadOptions};
//!
//! let input = "1 2 4 1\n2 1 9 8\n";
//! let segments = parse_segments::<BigRational>(input, &LoadOptions::default())
//!     .and_then(|loaded| loaded.into_segments())
//!     .unwrap();
//! let crossings = find_crossings(segments).unwrap();
//! assert_eq!(crossings.len(), 1);
//! assert_eq!(crossings[0].point().to_string(), "<5/2|3/2>");
//! ```
//!
//! # Numbers
//!
//! All types are generic over a [`Scalar`]. With
//! [`BigRational`](num::BigRational) every comparison is exact, and
//! all crossings are found. `f64` is faster; a crossing fixes the order
//! of its pair at the computed point, but rounding near other events
//! may still cause a crossing to be missed or misplaced. Segments whose
//! extent overflows `f64` are rejected.
//!
//! # Degenerate input
//!
//! Vertical segments, several segments through one point and shared
//! end points are supported. Overlapping collinear segments have no
//! single crossing point and are not reported.
//!
//! [Bentley-Ottman]: //en.wikipedia.org/wiki/Bentley%E2%80%93Ottmann_algorithm
mod scalar;
pub use scalar::{NumericMode, Scalar};

mod error;
pub use error::{InputFormatError, SweepError, ValidationError};

mod events;
pub use events::{Event, EventKind, Point};

mod segments;
pub use segments::{LineY, Segment, SegmentId};

mod queue;
pub use queue::EventQueue;

mod active;
pub use active::{Run, SweepStatus};

pub mod intersect;
pub use intersect::{intersect, intersection_point};

pub mod observer;
pub use observer::{NoObserver, SweepObserver, SweepStep, TraceRecorder, TraceStep};

pub mod crossings;
pub use crossings::{find_crossings, Crossing, CrossingsIter, Sweep, SweepState};

pub mod input;
pub use input::{load_segments, parse_segments, read_segments, LoadOptions, Loaded};

mod brute_force;
pub use brute_force::brute_force_crossings;

#[cfg(test)]
#[path = "../benches/utils/random.rs"]
pub mod random;
