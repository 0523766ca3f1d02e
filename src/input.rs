//! Reading segment lists from text.
//!
//! The format is line oriented: each line holds the four coordinates
//! `x1 y1 x2 y2` of one segment, separated by whitespace. Blank lines
//! and lines starting with `#` are ignored.
//!
//! ```text
//! # two crossing segments
//! 1 2 4 1
//! 2 1 9 8
//! ```

use std::{io::BufRead, marker::PhantomData};

use log::warn;

use crate::{
    error::{InputFormatError, SweepError, ValidationError},
    scalar::Scalar,
    segments::Segment,
};

/// How the loader treats malformed lines.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Skip malformed lines with a warning instead of failing.
    pub skip_invalid: bool,
}

/// Segments read by [`load_segments`].
#[derive(Debug, Clone)]
pub struct Loaded<T: Scalar> {
    /// Segments read before loading stopped.
    pub segments: Vec<Segment<T>>,
    /// Lines rejected while `skip_invalid` was set.
    pub skipped: Vec<InputFormatError>,
    /// The line that stopped loading, if any.
    pub error: Option<InputFormatError>,
}

impl<T: Scalar> Loaded<T> {
    /// The segments, or the error that stopped loading.
    pub fn into_segments(self) -> Result<Vec<Segment<T>>, SweepError> {
        match self.error {
            Some(err) => Err(err.into()),
            None => Ok(self.segments),
        }
    }
}

/// Parse one line; `Ok(None)` for comments and blank lines.
pub fn parse_line<T: Scalar>(line: &str) -> Result<Option<Segment<T>>, ValidationError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let tokens: Vec<_> = line.split_whitespace().collect();
    let [x1, y1, x2, y2]: [&str; 4] = tokens
        .try_into()
        .map_err(|tokens: Vec<&str>| ValidationError::CoordinateCount {
            found: tokens.len(),
        })?;
    let coord = |token: &str| {
        T::parse_token(token).ok_or_else(|| ValidationError::NotANumber {
            token: token.to_string(),
        })
    };
    Segment::from_coords(coord(x1)?, coord(y1)?, coord(x2)?, coord(y2)?).map(Some)
}

/// Iterator over the segments of a reader, one item per non-comment
/// line. Errors name the line; reading continues after them.
pub struct SegmentReader<T: Scalar, R: BufRead> {
    lines: std::io::Lines<R>,
    line_no: usize,
    _scalar: PhantomData<T>,
}

/// Read segments lazily from `reader`.
pub fn read_segments<T: Scalar, R: BufRead>(reader: R) -> SegmentReader<T, R> {
    SegmentReader {
        lines: reader.lines(),
        line_no: 0,
        _scalar: PhantomData,
    }
}

impl<T: Scalar, R: BufRead> Iterator for SegmentReader<T, R> {
    type Item = Result<Segment<T>, SweepError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(err) => return Some(Err(err.into())),
            };
            self.line_no += 1;
            match parse_line(&line) {
                Ok(Some(segment)) => return Some(Ok(segment)),
                Ok(None) => continue,
                Err(reason) => {
                    return Some(Err(InputFormatError {
                        line: self.line_no,
                        reason,
                    }
                    .into()))
                }
            }
        }
    }
}

/// Read every segment from `reader`.
///
/// With [`LoadOptions::skip_invalid`] malformed lines are logged and
/// collected in [`Loaded::skipped`]. Otherwise the first one stops
/// loading and is kept in [`Loaded::error`], along with the segments
/// read before it. Only I/O failures are returned as `Err`.
pub fn load_segments<T: Scalar, R: BufRead>(
    reader: R,
    options: &LoadOptions,
) -> Result<Loaded<T>, SweepError> {
    let mut loaded = Loaded {
        segments: Vec::new(),
        skipped: Vec::new(),
        error: None,
    };
    for item in read_segments(reader) {
        match item {
            Ok(segment) => loaded.segments.push(segment),
            Err(SweepError::Input(err)) if options.skip_invalid => {
                warn!("skipping {}", err);
                loaded.skipped.push(err);
            }
            Err(SweepError::Input(err)) => {
                loaded.error = Some(err);
                break;
            }
            Err(err) => return Err(err),
        }
    }
    Ok(loaded)
}

/// Parse a segment list held in memory.
pub fn parse_segments<T: Scalar>(
    text: &str,
    options: &LoadOptions,
) -> Result<Loaded<T>, SweepError> {
    load_segments(text.as_bytes(), options)
}
