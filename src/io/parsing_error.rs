//! Error type for forest file parsing.
//!
//! This module provides [ParsingError] and [ParsingErrorType] for
//! representing and reporting errors found while reading forest files.

use crate::io::byte_parser::ByteParser;
use std::fmt;
use thiserror::Error;

/// Default length of context provided by error from parser
const DEFAULT_CONTEXT_LENGTH: usize = 50;

// =#========================================================================#=
// PARSING ERROR TYPE
// =#========================================================================#=
/// Error types that can occur while parsing a forest file.
#[derive(PartialEq, Debug, Clone, Error)]
pub enum ParsingErrorType {
    #[error("IO error - {0}")]
    IoError(String),
    #[error("Missing format line")]
    MissingFormatLine,
    #[error("Invalid format line - {0}")]
    InvalidFormatLine(String),
    #[error("Invalid number '{0}'")]
    InvalidNumber(String),
    #[error("Invalid value count - {0}")]
    InvalidValueCount(String),
    #[error("Invalid tree structure - {0}")]
    InvalidTreeStructure(String),
}

// =#========================================================================#=
// PARSING ERROR
// =#========================================================================#=
/// Parsing error with contextual information (line, column and surrounding bytes).
#[derive(Debug)]
pub struct ParsingError {
    kind: ParsingErrorType,
    line: usize,
    column: usize,
    context: String,
}

impl ParsingError {
    /// Create a ParsingError from an error type and parser state
    pub fn from_parser(kind: ParsingErrorType, parser: &ByteParser) -> Self {
        Self {
            kind,
            line: parser.line(),
            column: parser.column(),
            context: parser.get_context_as_string(DEFAULT_CONTEXT_LENGTH),
        }
    }

    /// Create a ParsingError for a whole line, with the line as context
    pub fn at_line(kind: ParsingErrorType, line: usize, context: String) -> Self {
        Self {
            kind,
            line,
            column: 1,
            context,
        }
    }

    /// Convenience constructor for MissingFormatLine
    pub fn missing_format_line(parser: &ByteParser) -> Self {
        Self::from_parser(ParsingErrorType::MissingFormatLine, parser)
    }

    /// Convenience constructor for InvalidFormatLine
    pub fn invalid_format_line(parser: &ByteParser, msg: String) -> Self {
        Self::from_parser(ParsingErrorType::InvalidFormatLine(msg), parser)
    }

    /// Convenience constructor for InvalidNumber
    pub fn invalid_number(parser: &ByteParser, token: String) -> Self {
        Self::from_parser(ParsingErrorType::InvalidNumber(token), parser)
    }

    /// Get the error kind
    pub fn kind(&self) -> &ParsingErrorType {
        &self.kind
    }

    /// Get the line where the error occurred, 1-based
    pub fn line(&self) -> usize {
        self.line
    }

    /// Get the column where the error occurred, 1-based
    pub fn column(&self) -> usize {
        self.column
    }
}

impl fmt::Display for ParsingError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} at line {}, column {}", self.kind, self.line, self.column)?;

        if !self.context.is_empty() {
            write!(f, "\n  Context: {}", self.context)?;
        }

        Ok(())
    }
}

impl std::error::Error for ParsingError {}

impl From<std::io::Error> for ParsingError {
    fn from(err: std::io::Error) -> Self {
        ParsingError {
            kind: ParsingErrorType::IoError(err.to_string()),
            line: 0,
            column: 0,
            context: String::new(),
        }
    }
}
