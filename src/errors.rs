//! Error types with rich diagnostics using miette
//!
//! `ParseError` carries only spans, so it stays cheap to clone and compare.
//! `SourceContext` attaches the program text when a report is rendered.

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::ast::Keyword;

/// Source context for error reporting
#[derive(Debug, Clone)]
pub struct SourceContext {
    /// Name of the source (filename or "<input>")
    pub name: String,
    /// The full program text
    pub source: String,
}

impl SourceContext {
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
        }
    }

    /// Create a NamedSource for miette
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.name, self.source.clone())
    }

    /// Turn a parse error into a report that can show the offending snippet
    pub fn report(&self, error: ParseError) -> miette::Report {
        miette::Report::new(error).with_source_code(self.named_source())
    }
}

/// Errors that abort a parse. The first one in source order wins.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Missing value for '{command}'")]
    #[diagnostic(code(drawbot::parse::missing_operand))]
    MissingOperand {
        command: Keyword,
        #[label("expected a value here")]
        span: SourceSpan,
    },

    #[error("Invalid color code: {code}")]
    #[diagnostic(
        code(drawbot::parse::invalid_color_code),
        help("color codes are K, Y, M and S")
    )]
    InvalidColorCode {
        code: String,
        #[label("unknown color")]
        span: SourceSpan,
    },

    #[error("Expected '[' after 'L'")]
    #[diagnostic(code(drawbot::parse::expected_open_bracket))]
    ExpectedOpenBracket {
        #[label("loop body should start here")]
        span: SourceSpan,
    },

    #[error("']' without matching '['")]
    #[diagnostic(code(drawbot::parse::unmatched_close_bracket))]
    UnmatchedCloseBracket {
        #[label("no loop to close")]
        span: SourceSpan,
    },

    #[error("Missing closing ']' for loop")]
    #[diagnostic(code(drawbot::parse::unterminated_loop))]
    UnterminatedLoop {
        #[label("this loop is never closed")]
        span: SourceSpan,
    },

    #[error("Unknown command: {word}")]
    #[diagnostic(
        code(drawbot::parse::unknown_command),
        help("commands are F, R, COLOR, P and L")
    )]
    UnknownCommand {
        word: String,
        #[label("not a command")]
        span: SourceSpan,
    },

    #[error("Number out of range: {literal}")]
    #[diagnostic(code(drawbot::parse::number_out_of_range))]
    NumberOutOfRange {
        literal: String,
        #[label("does not fit in 32 bits")]
        span: SourceSpan,
    },

    #[error("Loops nested deeper than {limit}")]
    #[diagnostic(code(drawbot::parse::nesting_too_deep))]
    NestingTooDeep {
        limit: usize,
        #[label("too deep")]
        span: SourceSpan,
    },

    #[error("Program expands to more than {limit} commands")]
    #[diagnostic(code(drawbot::parse::program_too_large))]
    ProgramTooLarge {
        limit: usize,
        #[label("this loop pushes it over")]
        span: SourceSpan,
    },
}

impl ParseError {
    /// Where in the program text the error was found
    pub fn span(&self) -> SourceSpan {
        match self {
            ParseError::MissingOperand { span, .. }
            | ParseError::InvalidColorCode { span, .. }
            | ParseError::ExpectedOpenBracket { span }
            | ParseError::UnmatchedCloseBracket { span }
            | ParseError::UnterminatedLoop { span }
            | ParseError::UnknownCommand { span, .. }
            | ParseError::NumberOutOfRange { span, .. }
            | ParseError::NestingTooDeep { span, .. }
            | ParseError::ProgramTooLarge { span, .. } => *span,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_read_like_the_gui_dialog() {
        let span: SourceSpan = (0, 1).into();
        assert_eq!(
            ParseError::MissingOperand {
                command: Keyword::Forward,
                span
            }
            .to_string(),
            "Missing value for 'F'"
        );
        assert_eq!(
            ParseError::InvalidColorCode {
                code: "B".into(),
                span
            }
            .to_string(),
            "Invalid color code: B"
        );
        assert_eq!(
            ParseError::UnknownCommand {
                word: "Z".into(),
                span
            }
            .to_string(),
            "Unknown command: Z"
        );
    }

    #[test]
    fn report_carries_code_and_source() {
        let ctx = SourceContext::new("square.drawbot", "F 10 Z 20");
        let err = ParseError::UnknownCommand {
            word: "Z".into(),
            span: (5, 1).into(),
        };
        let report = ctx.report(err.clone());
        assert_eq!(report.to_string(), "Unknown command: Z");
        assert_eq!(
            report.code().map(|c| c.to_string()).as_deref(),
            Some("drawbot::parse::unknown_command")
        );
        assert!(report.source_code().is_some());
        assert_eq!(err.span().offset(), 5);
    }
}
