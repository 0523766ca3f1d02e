use std::{
    fs::File,
    io::{self, BufRead, BufReader, Write},
    path::{Path, PathBuf},
};

use anyhow::Context;
use clap::Parser;
use log::info;
use num::BigRational;

use segment_crossings::{
    load_segments, Crossing, LoadOptions, NumericMode, Scalar, Sweep, SweepError, SweepStep,
};

/// Report all crossings of the segments listed in a file.
///
/// Each input line holds `x1 y1 x2 y2`; `#` starts a comment.
#[derive(Parser)]
struct Cli {
    /// Segment list; `-` reads from stdin.
    #[arg(default_value = "-")]
    input: PathBuf,

    /// Number type: `exact` (rationals) or `float`.
    #[arg(long, default_value_t = NumericMode::Exact)]
    numeric: NumericMode,

    /// Skip malformed lines instead of failing.
    #[arg(long)]
    skip_invalid: bool,

    /// Print every sweep event with the status after it.
    #[arg(long)]
    trace: bool,
}

fn open(path: &Path) -> anyhow::Result<Box<dyn BufRead>> {
    if path.as_os_str() == "-" {
        return Ok(Box::new(BufReader::new(io::stdin())));
    }
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    Ok(Box::new(BufReader::new(file)))
}

/// Sweep the segments read from `input`, and write the crossings to
/// `out`. On a malformed line, the segments before it are still swept
/// and reported before the error is returned.
fn run<T: Scalar, R: BufRead, W: Write>(cli: &Cli, input: R, out: &mut W) -> anyhow::Result<()> {
    let options = LoadOptions {
        skip_invalid: cli.skip_invalid,
    };
    let mut loaded = load_segments::<T, _>(input, &options)?;
    if !loaded.skipped.is_empty() {
        info!("skipped {} malformed lines", loaded.skipped.len());
    }
    let error = loaded.error.take();
    info!(
        "loaded {} segments ({} numbers)",
        loaded.segments.len(),
        cli.numeric
    );

    let mut sweep = Sweep::new(loaded.segments);
    if cli.trace {
        let mut failed = None;
        let mut print_step = |step: &SweepStep<'_, T>| {
            let status: Vec<_> = step.status().iter().map(|id| id.to_string()).collect();
            if let Err(err) = writeln!(out, "{}  [{}]", step.event(), status.join(" ")) {
                failed.get_or_insert(err);
            }
        };
        sweep.run_with(&mut print_step)?;
        if let Some(err) = failed {
            return Err(err.into());
        }
    } else {
        sweep.run()?;
    }

    for crossing in sweep.crossing_views() {
        let Crossing { point, segments } = crossing;
        writeln!(out, "{} {} {}", point, segments[0].0, segments[1].0)?;
    }

    match error {
        Some(err) => Err(SweepError::from(err).into()),
        None => Ok(()),
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let input = open(&cli.input)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match cli.numeric {
        NumericMode::Exact => run::<BigRational, _, _>(&cli, input, &mut out),
        NumericMode::Float => run::<f64, _, _>(&cli, input, &mut out),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INPUT: &str = "0 0 2 2\n0 2 2 0\n1 2 3\n5 5 6 6\n";

    #[test]
    fn reports_crossings_before_a_bad_line() {
        let cli = Cli::parse_from(["crossings"]);
        let mut out = Vec::new();
        let err = run::<BigRational, _, _>(&cli, INPUT.as_bytes(), &mut out).unwrap_err();
        assert_eq!(String::from_utf8(out).unwrap(), "<1|1> #0 #1\n");
        assert_eq!(
            err.to_string(),
            "invalid input: line 3: expected 4 coordinates, found 3"
        );
    }

    #[test]
    fn skips_bad_lines_in_float_mode() {
        let cli = Cli::parse_from(["crossings", "--numeric", "float", "--skip-invalid"]);
        let mut out = Vec::new();
        run::<f64, _, _>(&cli, INPUT.as_bytes(), &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "<1|1> #0 #1\n");
    }
}
