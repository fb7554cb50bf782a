use std::path::{Path, PathBuf};

/// Derives an output file path next to `input`: `<dir>/<stem><suffix>.txt`.
///
/// # Example
/// ```
/// use std::path::Path;
/// use treetools::io::derive_output_path;
///
/// let out = derive_output_path(Path::new("data/forest.txt"), "_info");
/// assert_eq!(out, Path::new("data/forest_info.txt"));
/// ```
pub fn derive_output_path(input: &Path, suffix: &str) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    let file_name = format!("{}{}.txt", stem, suffix);

    match input.parent() {
        Some(dir) => dir.join(file_name),
        None => PathBuf::from(file_name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_file_name() {
        assert_eq!(derive_output_path(Path::new("forest.txt"), "_grown"), PathBuf::from("forest_grown.txt"));
    }

    #[test]
    fn test_only_last_extension_replaced() {
        assert_eq!(
            derive_output_path(Path::new("/tmp/a.b.txt"), "_info"),
            PathBuf::from("/tmp/a.b_info.txt")
        );
    }
}
