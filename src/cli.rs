//! Command line front ends of the `treeinfo` and `treegrow` tools.
//!
//! Argument structs derive [clap::Parser]; the `run_*` functions hold the
//! tool logic so the binaries stay thin.

use crate::analysis::{ForestSummary, InfoConfig, LengthMode, compute_info};
use crate::growth::{DEFAULT_LENGTH_RATE, DEFAULT_WIDTH_RATE, GrowthConfig, GrowthOutcome, simulate};
use crate::io::{derive_output_path, read_forest_file, write_forest_file};
use crate::model::Forest;
use anyhow::{Context, bail};
use clap::Parser;
use std::io::Write;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is not set.
pub const DEFAULT_LOG_FILTER: &str = "treetools=info";

/// Accepted growth periods in years; negative values shrink.
pub const PERIOD_RANGE: RangeInclusive<f64> = -1000.0..=3.0;

/// Accepted branch length increase per year.
pub const LENGTH_RATE_RANGE: RangeInclusive<f64> = 0.0001..=1000.0;

/// Accepted branch diameter increase per year.
pub const WIDTH_RATE_RANGE: RangeInclusive<f64> = 0.001..=10.0;

/// Installs a `tracing` subscriber writing to stderr, filtered by `RUST_LOG`
/// or [DEFAULT_LOG_FILTER].
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    // A subscriber may already be installed (e.g. by a test harness)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

// =#========================================================================#=
// TREEINFO
// =#========================================================================#=
/// Bulk information for the trees, plus per-branch and per-tree information
/// saved out.
#[derive(Parser, Debug)]
#[command(
    name = "treeinfo",
    version,
    about = "Report tree information and save it out to an _info.txt file"
)]
pub struct InfoArgs {
    /// Forest file with segment structure
    pub forest: PathBuf,

    /// Compute exact branch lengths by always walking to the root
    #[arg(long)]
    pub exact_length: bool,
}

/// Loads the forest, prints its report to stdout and saves the annotated
/// forest next to the input.
///
/// # Returns
/// The path of the saved `_info.txt` file.
pub fn run_info(args: &InfoArgs) -> anyhow::Result<PathBuf> {
    let mut forest = load(&args.forest)?;

    let mode = if args.exact_length {
        LengthMode::Exact
    } else {
        LengthMode::Approximate
    };
    let config = InfoConfig::default().with_length_mode(mode);
    let summaries = compute_info(&mut forest, &config)
        .with_context(|| format!("cannot compute info for {}", args.forest.display()))?;

    let mut stdout = std::io::stdout().lock();
    ForestSummary::from_trees(&summaries).write_report(&mut stdout)?;
    stdout.flush()?;

    let output = derive_output_path(&args.forest, "_info");
    save(&output, &forest)?;
    Ok(output)
}

// =#========================================================================#=
// TREEGROW
// =#========================================================================#=
/// Grow or shrink a forest linearly over a period of years.
#[derive(Parser, Debug)]
#[command(
    name = "treegrow",
    version,
    about = "Grow (or shrink, for negative periods) a forest and save it to a _grown.txt file"
)]
pub struct GrowArgs {
    /// Forest file with segment structure
    pub forest: PathBuf,

    /// Period in years, between -1000 and 3
    #[arg(allow_negative_numbers = true, value_parser = parse_period)]
    pub period: f64,

    /// Unit of the period
    #[arg(value_parser = ["years"])]
    pub unit: String,

    /// Branch length increase per year, in metres
    #[arg(short = 'l', long = "length_rate", default_value_t = DEFAULT_LENGTH_RATE, value_parser = parse_length_rate)]
    pub length_rate: f64,

    /// Branch diameter increase per year, in metres
    #[arg(short = 'w', long = "width_rate", default_value_t = DEFAULT_WIDTH_RATE, value_parser = parse_width_rate)]
    pub width_rate: f64,
}

impl GrowArgs {
    /// Returns the growth configuration for these arguments.
    pub fn growth_config(&self) -> GrowthConfig {
        GrowthConfig::new(self.period)
            .with_length_rate(self.length_rate)
            .with_width_rate(self.width_rate)
    }
}

/// Loads the forest, grows it and saves the result next to the input.
///
/// # Returns
/// The path of the saved `_grown.txt` file, or `None` if no trees were left
/// to save. A warning is printed to stdout in that case.
pub fn run_grow(args: &GrowArgs) -> anyhow::Result<Option<PathBuf>> {
    let forest = load(&args.forest)?;

    let outcome = simulate(forest, &args.growth_config())
        .with_context(|| format!("cannot grow {}", args.forest.display()))?;
    let grown = match outcome {
        GrowthOutcome::Grown(grown) => grown,
        GrowthOutcome::Empty(stage) => {
            println!("Warning: no trees left after {}. No file saved.", stage);
            return Ok(None);
        }
    };

    let output = derive_output_path(&args.forest, "_grown");
    let mut stdout = std::io::stdout().lock();
    write_grow_report(&mut stdout, &grown, args.period, &output)?;
    stdout.flush()?;

    save(&output, &grown)?;
    Ok(Some(output))
}

// ============================================================================
// Helpers (private)
// ============================================================================
fn load(path: &Path) -> anyhow::Result<Forest> {
    let forest = read_forest_file(path).with_context(|| format!("cannot load forest {}", path.display()))?;
    if forest.has_trunk_only() {
        bail!(
            "{} holds trunks only; the tool requires a forest with branch structure",
            path.display()
        );
    }
    Ok(forest)
}

fn save(path: &Path, forest: &Forest) -> anyhow::Result<()> {
    write_forest_file(path, forest).with_context(|| format!("cannot save forest {}", path.display()))?;
    info!(path = %path.display(), "saved output");
    Ok(())
}

/// Writes the one-line summary of a grown forest.
fn write_grow_report<W: Write>(out: &mut W, forest: &Forest, period: f64, output: &Path) -> std::io::Result<()> {
    let num_segments: usize = forest.trees().iter().map(|tree| tree.num_segments()).sum();
    writeln!(
        out,
        "{} forest over {} years. Trees: {}, segments: {}. Saving to {}",
        if period > 0.0 { "Grew" } else { "Shrank" },
        period.abs(),
        forest.num_trees(),
        num_segments,
        output.display()
    )
}

fn parse_in_range(s: &str, range: &RangeInclusive<f64>) -> Result<f64, String> {
    let value: f64 = s.parse().map_err(|_| format!("'{}' is not a number", s))?;
    if !range.contains(&value) {
        return Err(format!(
            "{} is outside the accepted range {} to {}",
            value,
            range.start(),
            range.end()
        ));
    }
    Ok(value)
}

fn parse_period(s: &str) -> Result<f64, String> {
    parse_in_range(s, &PERIOD_RANGE)
}

fn parse_length_rate(s: &str) -> Result<f64, String> {
    parse_in_range(s, &LENGTH_RATE_RANGE)
}

fn parse_width_rate(s: &str) -> Result<f64, String> {
    parse_in_range(s, &WIDTH_RATE_RANGE)
}
