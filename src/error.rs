use ariadne::{Color, Fmt, Label, Report, ReportKind, Source};
use thiserror::Error;

/// A range of character offsets into the input text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn single(pos: usize) -> Self {
        Self {
            start: pos,
            end: pos + 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ErrorKind {
    #[error("Invalid character '{found}' at position {position}")]
    InvalidCharacter { position: usize, found: char },

    #[error("Invalid syntax: expected {expected}, found {found}")]
    InvalidSyntax { expected: String, found: String },

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Integer overflow: {detail}")]
    IntegerOverflow { detail: String },

    #[error("Numeric overflow: {detail}")]
    NumericOverflow { detail: String },
}

/// A failure anywhere in the scan/parse/evaluate pipeline.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind}")]
pub struct CalcError {
    pub kind: ErrorKind,
    pub span: Span,
    pub help: Option<String>,
}

impl CalcError {
    pub fn new(kind: ErrorKind, span: Span) -> Self {
        Self {
            kind,
            span,
            help: None,
        }
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    pub fn invalid_character(position: usize, found: char) -> Self {
        Self::new(
            ErrorKind::InvalidCharacter { position, found },
            Span::single(position),
        )
    }

    pub fn invalid_syntax(span: Span, expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self::new(
            ErrorKind::InvalidSyntax {
                expected: expected.into(),
                found: found.into(),
            },
            span,
        )
    }

    pub fn division_by_zero(span: Span) -> Self {
        Self::new(ErrorKind::DivisionByZero, span)
            .with_help("The right-hand side of '/' evaluated to zero.")
    }

    pub fn integer_overflow(span: Span, detail: impl Into<String>) -> Self {
        Self::new(
            ErrorKind::IntegerOverflow {
                detail: detail.into(),
            },
            span,
        )
    }

    pub fn numeric_overflow(span: Span, detail: impl Into<String>) -> Self {
        Self::new(
            ErrorKind::NumericOverflow {
                detail: detail.into(),
            },
            span,
        )
    }

    /// Short label for the pipeline stage that raised the error.
    pub fn stage(&self) -> &'static str {
        match self.kind {
            ErrorKind::InvalidCharacter { .. } => "Lexical Error",
            ErrorKind::InvalidSyntax { .. } => "Syntax Error",
            ErrorKind::DivisionByZero
            | ErrorKind::IntegerOverflow { .. }
            | ErrorKind::NumericOverflow { .. } => "Runtime Error",
        }
    }

    /// Prints a labelled diagnostic for `source` to stderr.
    pub fn report(&self, source: &str, filename: Option<&str>) -> std::io::Result<()> {
        let filename = filename.unwrap_or("<input>");

        let color = match self.kind {
            ErrorKind::InvalidCharacter { .. } => Color::Red,
            ErrorKind::InvalidSyntax { .. } => Color::Yellow,
            ErrorKind::DivisionByZero
            | ErrorKind::IntegerOverflow { .. }
            | ErrorKind::NumericOverflow { .. } => Color::Magenta,
        };

        // Spans may point one past the last character (end of input)
        let len = source.chars().count();
        let start = self.span.start.min(len);
        let end = self.span.end.clamp(start, len);

        let mut report_builder = Report::build(ReportKind::Error, filename, start)
            .with_message(format!("{}: {}", self.stage().fg(color), self.kind))
            .with_label(
                Label::new((filename, start..end))
                    .with_message(self.kind.to_string())
                    .with_color(color),
            );

        if let Some(ref help_text) = self.help {
            report_builder = report_builder.with_note(format!("{}: {}", "help".fg(Color::Cyan), help_text));
        }

        report_builder
            .finish()
            .eprint((filename, Source::from(source)))
    }
}
