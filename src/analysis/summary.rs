//! Per-tree summary records and forest-wide statistics.
//!
//! Each analysed tree yields an immutable [TreeSummary]. Forest statistics
//! are a fold of those records into a [ForestSummary]; nothing else keeps
//! running totals.

use std::io::{self, Write};

/// Example wood density in tonnes per cubic metre, used for mass estimates.
pub const WOOD_DENSITY: f64 = 0.5;

// =#========================================================================#=
// TREE SUMMARY
// =#========================================================================#=
/// Tree-level values, as stored at a tree's root.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TreeSummary {
    /// Total wood volume
    pub volume: f64,
    /// Largest branch diameter (trunk diameter proxy)
    pub diameter: f64,
    /// Longest root-to-leaf distance
    pub height: f64,
    /// `diameter^0.75 / height`
    pub strength: f64,
    /// Weighted mean branch dominance; `None` without branch points
    pub dominance: Option<f64>,
    /// Weighted mean branch angle in degrees; `None` without branch points
    pub angle: Option<f64>,
    /// Number of branch points scored
    pub num_branch_points: usize,
}

// =#========================================================================#=
// STATISTIC
// =#========================================================================#=
/// Total, min and max of a series of values, with their count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Statistic {
    total: f64,
    min: f64,
    max: f64,
    count: usize,
}

impl Default for Statistic {
    fn default() -> Self {
        Statistic {
            total: 0.0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
            count: 0,
        }
    }
}

impl Statistic {
    /// Returns the statistic extended by `value`.
    pub fn with(self, value: f64) -> Self {
        Statistic {
            total: self.total + value,
            min: self.min.min(value),
            max: self.max.max(value),
            count: self.count + 1,
        }
    }

    /// Returns the statistic extended by `value` if present, else unchanged.
    pub fn with_opt(self, value: Option<f64>) -> Self {
        match value {
            Some(value) => self.with(value),
            None => self,
        }
    }

    /// Returns the sum of all values.
    pub fn total(&self) -> f64 {
        self.total
    }

    /// Returns the number of values.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Returns the smallest value, or `None` if empty.
    pub fn min(&self) -> Option<f64> {
        (self.count > 0).then_some(self.min)
    }

    /// Returns the largest value, or `None` if empty.
    pub fn max(&self) -> Option<f64> {
        (self.count > 0).then_some(self.max)
    }

    /// Returns the arithmetic mean, or `None` if empty.
    pub fn mean(&self) -> Option<f64> {
        (self.count > 0).then(|| self.total / self.count as f64)
    }
}

// =#========================================================================#=
// FOREST SUMMARY
// =#========================================================================#=
/// Forest-wide statistics over tree summaries.
///
/// Trees without branch points have no dominance or angle and are left out
/// of those two statistics; their count is therefore lower than
/// [`num_trees`](Self::num_trees) in that case.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ForestSummary {
    pub num_trees: usize,
    pub volume: Statistic,
    pub diameter: Statistic,
    pub height: Statistic,
    pub strength: Statistic,
    pub dominance: Statistic,
    pub angle: Statistic,
}

impl ForestSummary {
    /// Returns the summary extended by one tree.
    pub fn with(self, tree: &TreeSummary) -> Self {
        ForestSummary {
            num_trees: self.num_trees + 1,
            volume: self.volume.with(tree.volume),
            diameter: self.diameter.with(tree.diameter),
            height: self.height.with(tree.height),
            strength: self.strength.with(tree.strength),
            dominance: self.dominance.with_opt(tree.dominance),
            angle: self.angle.with_opt(tree.angle),
        }
    }

    /// Folds tree summaries into forest statistics.
    pub fn from_trees<'a, I: IntoIterator<Item = &'a TreeSummary>>(trees: I) -> Self {
        trees
            .into_iter()
            .fold(ForestSummary::default(), ForestSummary::with)
    }

    /// Writes the human-readable forest report.
    ///
    /// # Errors
    /// Returns an I/O error if writing fails.
    pub fn write_report<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "Information")?;
        writeln!(out)?;
        writeln!(out, "Number of trees: {}", self.num_trees)?;

        let v = &self.volume;
        writeln!(
            out,
            "Total volume of wood: {} m^3. Min/mean/max: {}, {}, {} m^3",
            v.total(),
            fmt_opt(v.min()),
            fmt_opt(v.mean()),
            fmt_opt(v.max())
        )?;
        let kg = 1000.0 * WOOD_DENSITY;
        writeln!(
            out,
            "Using example wood density of {WOOD_DENSITY} Tonnes/m^3: Total mass of wood: {} Tonnes. Min/mean/max: {}, {}, {} kg",
            WOOD_DENSITY * v.total(),
            fmt_opt(v.min().map(|x| kg * x)),
            fmt_opt(v.mean().map(|x| kg * x)),
            fmt_opt(v.max().map(|x| kg * x))
        )?;

        write_mean_line(out, "Mean trunk diameter", &self.diameter, " m")?;
        write_mean_line(out, "Mean tree height", &self.height, " m")?;
        write_mean_line(out, "Mean trunk strength (diam^0.75/length)", &self.strength, "")?;
        write_mean_line(out, "Mean branch dominance (0 to 1)", &self.dominance, "")?;
        write_mean_line(out, "Mean branch angle", &self.angle, " degrees")?;

        let undefined = self.num_trees - self.dominance.count();
        if undefined > 0 {
            writeln!(
                out,
                "{undefined} tree(s) without branch points excluded from dominance and angle"
            )?;
        }

        Ok(())
    }
}

fn write_mean_line<W: Write>(out: &mut W, label: &str, stat: &Statistic, unit: &str) -> io::Result<()> {
    writeln!(
        out,
        "{label}: {}{unit}. Min/max: {}, {}{unit}",
        fmt_opt(stat.mean()),
        fmt_opt(stat.min()),
        fmt_opt(stat.max())
    )
}

fn fmt_opt(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| v.to_string())
}
