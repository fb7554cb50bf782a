/// Leading column names every format line starts with.
pub(crate) const POSITION_COLUMNS: [&str; 4] = ["x", "y", "z", "radius"];

/// Column name marking a structure (segment) file.
pub(crate) const PARENT_COLUMN: &str = "parent_id";

/// Parent id written for the root segment.
pub(crate) const ROOT_PARENT_ID: i64 = -1;

/// Values per segment before any attributes: x, y, z, radius, parent_id.
pub(crate) const SEGMENT_STRIDE: usize = 5;

/// Values per trunk before any attributes: x, y, z, radius.
pub(crate) const TRUNK_STRIDE: usize = 4;

/// Delimiters within a tree line.
pub(crate) const VALUE_DELIMITERS: &[u8] = b",\n";

/// Separator written between segments of a tree line.
pub(crate) const SEGMENT_SEPARATOR: &[u8] = b", ";

/// Comment line written at the top of every forest file.
pub(crate) const FILE_COMMENT: &[u8] = b"# Forest file: format line, then one tree per line with comma separated values";

/// Kind of records stored in a forest file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForestKind {
    /// Segment trees with parent links.
    Structure,
    /// One trunk record per tree, without branch structure.
    TrunkOnly,
}

impl ForestKind {
    /// Number of fixed values per record, before attributes.
    pub(crate) fn stride(self) -> usize {
        match self {
            ForestKind::Structure => SEGMENT_STRIDE,
            ForestKind::TrunkOnly => TRUNK_STRIDE,
        }
    }
}
