//! Forest text file writer.

use crate::io::defs::{
    FILE_COMMENT, ForestKind, PARENT_COLUMN, POSITION_COLUMNS, SEGMENT_SEPARATOR,
};
use crate::model::{Forest, Segment, Tree, Trunk};
use std::io;
use std::io::{BufWriter, Write};

// =#========================================================================#=
// FOREST WRITER
// =#========================================================================#=
/// Buffered writer for [Forest]s in the text format read by
/// [ForestReader](crate::io::ForestReader).
///
/// # Format Structure
/// - One `#` comment line
/// - The format line: `x,y,z,radius`, `parent_id` for segment trees, then
///   the attribute names
/// - One line per tree, segments separated by `", "`
///
/// Numbers use the shortest representation that parses back to the same
/// `f64`, so writing and reading a forest is lossless.
///
/// # Example
/// ```
/// use treetools::io::ForestWriter;
/// use treetools::model::Forest;
///
/// let mut out = Vec::new();
/// ForestWriter::new(&mut out).write_forest(&Forest::new())?;
/// assert!(String::from_utf8_lossy(&out).contains("x,y,z,radius,parent_id"));
/// # Ok::<(), std::io::Error>(())
/// ```
pub struct ForestWriter<W: Write> {
    bw: BufWriter<W>,
}

// ============================================================================
// API (public)
// ============================================================================
impl<W: Write> ForestWriter<W> {
    /// Creates a new forest writer over the given sink.
    pub fn new(inner: W) -> ForestWriter<W> {
        ForestWriter {
            bw: BufWriter::new(inner),
        }
    }

    /// Writes a complete forest file and flushes it.
    ///
    /// A forest of trunk-only trees is written in the trunk format; an empty
    /// forest gets the segment format line without attributes.
    ///
    /// # Errors
    /// Returns an I/O error if writing fails, or an
    /// [InvalidInput](io::ErrorKind::InvalidInput) error if the forest mixes
    /// trunk-only and segment trees.
    pub fn write_forest(&mut self, forest: &Forest) -> io::Result<()> {
        let kind = forest_kind(forest)?;

        self.comment()?
            .format_line(kind, forest.attribute_names())?;
        for tree in forest.trees() {
            match tree.trunk() {
                Some(trunk) => self.trunk_line(trunk)?,
                None => self.tree_line(tree)?,
            };
        }
        self.bw.flush()
    }
}

// ============================================================================
// Line Writing (private)
// ============================================================================
impl<W: Write> ForestWriter<W> {
    /// Writes the comment line, returning itself for chaining.
    fn comment(&mut self) -> io::Result<&mut Self> {
        self.write_all(FILE_COMMENT)?.newline()
    }

    /// Writes the format line, returning itself for chaining.
    fn format_line(&mut self, kind: ForestKind, names: &[String]) -> io::Result<&mut Self> {
        self.write_all(POSITION_COLUMNS.join(",").as_bytes())?;
        if kind == ForestKind::Structure {
            self.comma()?.write_all(PARENT_COLUMN.as_bytes())?;
        }
        for name in names {
            self.comma()?.write_all(name.as_bytes())?;
        }
        self.newline()
    }

    /// Writes one segment tree as a line, returning itself for chaining.
    fn tree_line(&mut self, tree: &Tree) -> io::Result<&mut Self> {
        for (i, segment) in tree.segments().iter().enumerate() {
            if i > 0 {
                self.write_all(SEGMENT_SEPARATOR)?;
            }
            self.segment(segment)?;
        }
        self.newline()
    }

    /// Writes one trunk record as a line, returning itself for chaining.
    fn trunk_line(&mut self, trunk: &Trunk) -> io::Result<&mut Self> {
        let base = &trunk.base;
        self.number(base.x)?
            .comma()?
            .number(base.y)?
            .comma()?
            .number(base.z)?
            .comma()?
            .number(trunk.radius)?;
        for &value in &trunk.attributes {
            self.comma()?.number(value)?;
        }
        self.newline()
    }

    /// Writes the values of a segment, returning itself for chaining.
    fn segment(&mut self, segment: &Segment) -> io::Result<&mut Self> {
        let tip = &segment.tip;
        self.number(tip.x)?
            .comma()?
            .number(tip.y)?
            .comma()?
            .number(tip.z)?
            .comma()?
            .number(segment.radius)?
            .comma()?
            .write_all(segment.parent_id().to_string().as_bytes())?;
        for &value in &segment.attributes {
            self.comma()?.number(value)?;
        }
        Ok(self)
    }
}

// ============================================================================
// Little Helpers (private)
// ============================================================================
impl<W: Write> ForestWriter<W> {
    /// Appends a byte slice to the [BufWriter], returning itself for chaining.
    fn write_all(&mut self, buf: &[u8]) -> io::Result<&mut Self> {
        self.bw.write_all(buf)?;
        Ok(self)
    }

    /// Appends a number in shortest round-trip form, returning itself for chaining.
    fn number(&mut self, value: f64) -> io::Result<&mut Self> {
        write!(self.bw, "{}", value)?;
        Ok(self)
    }

    /// Appends a comma (","), returning itself for chaining.
    fn comma(&mut self) -> io::Result<&mut Self> {
        self.write_all(b",")
    }

    /// Appends a newline ("\n"), returning itself for chaining.
    fn newline(&mut self) -> io::Result<&mut Self> {
        self.write_all(b"\n")
    }
}

fn forest_kind(forest: &Forest) -> io::Result<ForestKind> {
    let num_trunks = forest.trees().iter().filter(|t| t.is_trunk_only()).count();
    match num_trunks {
        0 => Ok(ForestKind::Structure),
        n if n == forest.num_trees() => Ok(ForestKind::TrunkOnly),
        _ => Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "cannot write a forest mixing trunk-only and segment trees",
        )),
    }
}
