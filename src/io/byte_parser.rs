//! Low-level byte-by-byte parser for line-oriented ASCII text.
//!
//! This module provides [ByteParser] for the forest text format: peeking,
//! consuming, skipping blanks and `#` comment lines, and reading
//! comma-separated tokens, while tracking line and column for error
//! reporting.

use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Comment lines start with this byte.
pub(crate) const COMMENT_START: u8 = b'#';

// =#========================================================================#=
// BYTE PARSER
// =#========================================================================#=
/// A byte-by-byte parser over an in-memory buffer.
///
/// # Features
/// - Peek and consume single bytes
/// - Skip blanks (spaces and tabs) within a line
/// - Skip empty and `#` comment lines
/// - Read tokens up to a delimiter
/// - Line/column tracking and context extraction for error reporting
///
/// # Example
/// ```
/// use treetools::io::byte_parser::ByteParser;
///
/// let mut parser = ByteParser::from_str("# comment\n  x, y\n");
/// parser.skip_empty_and_comment_lines();
/// assert_eq!(parser.line(), 2);
/// assert_eq!(parser.parse_token(b",\n"), "x");
/// ```
pub struct ByteParser {
    /// The owned byte data being parsed
    input: Vec<u8>,
    /// Current position in the input
    pos: usize,
    /// Current line, 1-based
    line: usize,
    /// Position at which the current line starts
    line_start: usize,
}

impl ByteParser {
    /// Creates a new `ByteParser` owning the given bytes.
    pub fn from_vec(input: Vec<u8>) -> Self {
        Self {
            input,
            pos: 0,
            line: 1,
            line_start: 0,
        }
    }

    /// Creates a new `ByteParser` from a string by copying it.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(input: &str) -> Self {
        Self::from_vec(input.as_bytes().to_vec())
    }

    /// Creates a new `ByteParser` by reading a whole file into memory.
    ///
    /// # Errors
    /// Returns an I/O error if the file cannot be opened or read.
    pub fn from_file<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let mut contents = Vec::new();
        File::open(path)?.read_to_end(&mut contents)?;
        Ok(Self::from_vec(contents))
    }

    /// Peeks at the current byte without consuming it.
    ///
    /// # Returns
    /// * `Some(u8)` - The current byte if available
    /// * `None` - If at end of data (EOF)
    #[inline(always)]
    pub fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    /// Gets the current byte and advances the position (consumes it).
    ///
    /// # Returns
    /// * `Some(u8)` - The current byte if available
    /// * `None` - If at end of data (EOF)
    #[inline]
    pub fn next_byte(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.pos += 1;
        if byte == b'\n' {
            self.line += 1;
            self.line_start = self.pos;
        }
        Some(byte)
    }

    /// Skips (consumes) spaces and tabs, but not line breaks.
    pub fn skip_blanks(&mut self) {
        while let Some(b' ' | b'\t') = self.peek() {
            self.next_byte();
        }
    }

    /// Returns `true` at a line break (`\n` or `\r`) or at EOF.
    pub fn at_line_end(&self) -> bool {
        matches!(self.peek(), None | Some(b'\n') | Some(b'\r'))
    }

    /// Consumes the rest of the current line including its line break.
    pub fn skip_line(&mut self) {
        self.consume_until(b'\n', ConsumeMode::Inclusive);
    }

    /// Skips (consumes) lines that are blank or start with `#`.
    ///
    /// Leaves the parser at the first byte of the next content line, or at
    /// EOF.
    pub fn skip_empty_and_comment_lines(&mut self) {
        loop {
            let line_begin = self.pos;
            self.skip_blanks();
            match self.peek() {
                Some(COMMENT_START) | Some(b'\n') | Some(b'\r') => self.skip_line(),
                None => return,
                Some(_) => {
                    // Rewind to the start of the content so columns stay meaningful
                    self.pos = line_begin;
                    return;
                }
            }
        }
    }

    /// Consumes the current byte if it matches `ch`.
    ///
    /// # Returns
    /// `true` if the byte was matched and consumed, `false` otherwise
    pub fn consume_if(&mut self, ch: u8) -> bool {
        if self.peek() == Some(ch) {
            self.next_byte();
            true
        } else {
            false
        }
    }

    /// Consumes bytes until the target byte is found.
    ///
    /// # Arguments
    /// * `target` - The byte to search for
    /// * `mode` - Whether to consume the target byte (`Inclusive`) or stop before it (`Exclusive`)
    ///
    /// # Returns
    /// `true` if the target was found, `false` if EOF was reached first
    pub fn consume_until(&mut self, target: u8, mode: ConsumeMode) -> bool {
        while let Some(b) = self.peek() {
            if b == target {
                if mode == ConsumeMode::Inclusive {
                    self.next_byte();
                }
                return true;
            }
            self.next_byte();
        }
        false
    }

    /// Reads a token up to (not including) any of the given delimiters or
    /// EOF, with surrounding blanks removed.
    ///
    /// A carriage return always ends a token.
    pub fn parse_token(&mut self, delimiters: &[u8]) -> String {
        self.skip_blanks();
        let start = self.pos;
        while let Some(b) = self.peek() {
            if delimiters.contains(&b) || b == b'\r' {
                break;
            }
            self.next_byte();
        }

        String::from_utf8_lossy(&self.input[start..self.pos])
            .trim_end()
            .to_string()
    }

    /// Returns whether the end of data (EOF) has been reached.
    pub fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// Returns the current byte offset in the input.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Returns the current line, 1-based.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Returns the current column, 1-based.
    pub fn column(&self) -> usize {
        self.pos - self.line_start + 1
    }

    /// Returns a string from up to `k` bytes from the current position,
    /// stopping at the end of the line, for error context.
    ///
    /// Invalid UTF-8 sequences are replaced with the Unicode replacement character.
    pub fn get_context_as_string(&self, k: usize) -> String {
        let end = self.pos.saturating_add(k).min(self.input.len());
        let context = &self.input[self.pos..end];
        let context = match context.iter().position(|&b| b == b'\n' || b == b'\r') {
            Some(line_end) => &context[..line_end],
            None => context,
        };
        String::from_utf8_lossy(context).into_owned()
    }
}

/// Specifies whether to consume or leave the target when using
/// [`ByteParser::consume_until`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ConsumeMode {
    /// Consume the target byte along with everything before it.
    Inclusive,

    /// Stop before the target byte without consuming it.
    Exclusive,
}
