//! Forest text file reader.

use crate::io::byte_parser::ByteParser;
use crate::io::defs::{
    ForestKind, PARENT_COLUMN, POSITION_COLUMNS, ROOT_PARENT_ID, VALUE_DELIMITERS,
};
use crate::io::parsing_error::{ParsingError, ParsingErrorType};
use crate::model::{Forest, SegmentIndex, Tree, TreeBuilder, Trunk};
use nalgebra::Point3;
use std::path::Path;

// =#========================================================================#=
// FOREST READER
// =#========================================================================#=
/// Reader for forest text files.
///
/// # Format
/// ```text
/// # comment lines start with '#'
/// x,y,z,radius,parent_id,section_id
/// 0,0,0,0.1,-1,0, 0,0,1,0.08,0,0
/// 5,0,0,0.2,-1,1, 5,0,2,0.1,0,1, 5,1,3,0.05,1,1
/// ```
/// The first content line names the columns. With `parent_id` it describes
/// segment trees, and any further column is a per-segment attribute. Without
/// it, every tree line holds a single trunk record.
///
/// Blank and `#` lines are skipped anywhere in the file. Values may be
/// surrounded by blanks.
///
/// # Example
/// ```
/// use treetools::io::ForestReader;
///
/// let forest = ForestReader::from_str("x,y,z,radius,parent_id\n0,0,0,0.1,-1, 0,0,1,0.05,0\n")
///     .read_forest()?;
/// assert_eq!(forest.num_trees(), 1);
/// assert_eq!(forest.trees()[0].num_segments(), 2);
/// # Ok::<(), treetools::io::ParsingError>(())
/// ```
pub struct ForestReader {
    parser: ByteParser,
}

// ============================================================================
// API (public)
// ============================================================================
impl ForestReader {
    /// Creates a reader over the given parser.
    pub fn new(parser: ByteParser) -> Self {
        ForestReader { parser }
    }

    /// Creates a reader over an in-memory string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(input: &str) -> Self {
        Self::new(ByteParser::from_str(input))
    }

    /// Creates a reader over the contents of a file.
    ///
    /// # Errors
    /// Returns an I/O error if the file cannot be opened or read.
    pub fn from_file<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        Ok(Self::new(ByteParser::from_file(path)?))
    }

    /// Reads the whole input into a [Forest].
    ///
    /// # Errors
    /// Returns a [ParsingError] if the format line is missing or malformed,
    /// a value is not a number, a line has the wrong number of values, or
    /// parent ids do not form a valid tree.
    pub fn read_forest(mut self) -> Result<Forest, ParsingError> {
        let (kind, attribute_names) = self.parse_format_line()?;

        let mut forest = Forest::new();
        loop {
            self.parser.skip_empty_and_comment_lines();
            if self.parser.is_eof() {
                break;
            }
            let line = self.parser.line();
            let context = self.parser.get_context_as_string(usize::MAX);
            let values = self.parse_values()?;

            let tree = match kind {
                ForestKind::Structure => build_tree(&values, &attribute_names, line, &context)?,
                ForestKind::TrunkOnly => build_trunk(&values, &attribute_names, line, &context)?,
            };
            forest.push(tree);
        }

        Ok(forest)
    }
}

// ============================================================================
// Line parsing (private)
// ============================================================================
impl ForestReader {
    /// Parses the format line into the file kind and its attribute names.
    fn parse_format_line(&mut self) -> Result<(ForestKind, Vec<String>), ParsingError> {
        self.parser.skip_empty_and_comment_lines();
        if self.parser.is_eof() {
            return Err(ParsingError::missing_format_line(&self.parser));
        }

        let mut columns = Vec::new();
        loop {
            let column = self.parser.parse_token(VALUE_DELIMITERS);
            if column.is_empty() {
                return Err(ParsingError::invalid_format_line(
                    &self.parser,
                    "empty column name".to_string(),
                ));
            }
            columns.push(column);
            if !self.parser.consume_if(b',') {
                break;
            }
        }
        self.finish_line()?;

        let leading = columns.iter().take(POSITION_COLUMNS.len()).map(String::as_str);
        if !leading.eq(POSITION_COLUMNS) {
            return Err(ParsingError::invalid_format_line(
                &self.parser,
                format!("expected line to start with '{}'", POSITION_COLUMNS.join(",")),
            ));
        }

        let mut rest = columns.split_off(POSITION_COLUMNS.len());
        let kind = if rest.first().map(String::as_str) == Some(PARENT_COLUMN) {
            rest.remove(0);
            ForestKind::Structure
        } else {
            ForestKind::TrunkOnly
        };

        for (i, name) in rest.iter().enumerate() {
            if rest[..i].contains(name) || POSITION_COLUMNS.contains(&name.as_str()) || name == PARENT_COLUMN {
                return Err(ParsingError::invalid_format_line(
                    &self.parser,
                    format!("duplicate column '{}'", name),
                ));
            }
        }

        Ok((kind, rest))
    }

    /// Parses the comma separated numbers of the current line.
    fn parse_values(&mut self) -> Result<Vec<f64>, ParsingError> {
        let mut values = Vec::new();
        loop {
            let token = self.parser.parse_token(VALUE_DELIMITERS);
            let value = token
                .parse::<f64>()
                .map_err(|_| ParsingError::invalid_number(&self.parser, token))?;
            values.push(value);
            if !self.parser.consume_if(b',') {
                break;
            }
        }
        self.finish_line()?;

        Ok(values)
    }

    /// Consumes the line break ending the current line.
    fn finish_line(&mut self) -> Result<(), ParsingError> {
        self.parser.skip_blanks();
        self.parser.consume_if(b'\r');
        if self.parser.consume_if(b'\n') || self.parser.is_eof() {
            Ok(())
        } else {
            let found = self.parser.get_context_as_string(1);
            Err(ParsingError::invalid_number(&self.parser, found))
        }
    }
}

// ============================================================================
// Tree construction (private)
// ============================================================================
/// Builds a segment tree from one line of values.
fn build_tree(values: &[f64], names: &[String], line: usize, context: &str) -> Result<Tree, ParsingError> {
    let structure_error = |msg: String| {
        ParsingError::at_line(ParsingErrorType::InvalidTreeStructure(msg), line, context.to_string())
    };

    let stride = ForestKind::Structure.stride() + names.len();
    check_value_count(values.len(), stride, line, context)?;

    let mut builder = TreeBuilder::with_capacity(names.to_vec(), values.len() / stride);
    for (index, record) in values.chunks_exact(stride).enumerate() {
        let tip = Point3::new(record[0], record[1], record[2]);
        let radius = record[3];
        let parent_id = record[4];
        let attributes = record[ForestKind::Structure.stride()..].to_vec();

        if parent_id.fract() != 0.0 {
            return Err(structure_error(format!("segment {} has non-integer parent id {}", index, parent_id)));
        }
        let result = if index == 0 {
            if parent_id as i64 != ROOT_PARENT_ID {
                return Err(structure_error(format!(
                    "first segment must have parent id {}, found {}",
                    ROOT_PARENT_ID, parent_id
                )));
            }
            builder.add_root(tip, radius, attributes)
        } else {
            if parent_id < 0.0 || parent_id >= index as f64 {
                return Err(structure_error(format!(
                    "segment {} has parent id {}, expected an earlier segment",
                    index, parent_id
                )));
            }
            builder.add_segment(tip, radius, parent_id as SegmentIndex, attributes)
        };
        result.map_err(|err| structure_error(err.to_string()))?;
    }

    builder.finish().map_err(|err| structure_error(err.to_string()))
}

/// Builds a trunk-only tree from one line of values.
fn build_trunk(values: &[f64], names: &[String], line: usize, context: &str) -> Result<Tree, ParsingError> {
    let stride = ForestKind::TrunkOnly.stride() + names.len();
    if values.len() != stride {
        return Err(ParsingError::at_line(
            ParsingErrorType::InvalidValueCount(format!(
                "trunk line holds {} values, expected {}",
                values.len(),
                stride
            )),
            line,
            context.to_string(),
        ));
    }

    let trunk = Trunk {
        base: Point3::new(values[0], values[1], values[2]),
        radius: values[3],
        attributes: values[ForestKind::TrunkOnly.stride()..].to_vec(),
    };
    Ok(Tree::from_trunk(trunk, names.to_vec()))
}

fn check_value_count(count: usize, stride: usize, line: usize, context: &str) -> Result<(), ParsingError> {
    if count == 0 || count % stride != 0 {
        return Err(ParsingError::at_line(
            ParsingErrorType::InvalidValueCount(format!(
                "{} values is not a multiple of {} per segment",
                count, stride
            )),
            line,
            context.to_string(),
        ));
    }
    Ok(())
}
