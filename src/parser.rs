use std::fmt;
use std::iter::Peekable;
use std::str::Chars;

use crate::Error;
use crate::detect::TypeDetector;
use crate::token::{
    BOM, CARRIAGE_RETURN, COMMENT, EQUALS, INTERPOLATION_END, INTERPOLATION_INDICATOR,
    INTERPOLATION_START, NEW_LINE, QUOTE_END, QUOTE_START, SPACE, Span,
};
use crate::value::{EnvMap, EnvValue};

/// Classifies a syntax error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntaxErrorKind {
    /// A space inside a name that is not followed by `=`.
    SpaceInName,
    /// Line break, comment, or end of input before `=`.
    UnexpectedEndOfLine,
    /// Assignment with nothing before `=`.
    EmptyName,
    /// Quoted value never closed.
    UnterminatedQuote,
    /// `${` never closed by `}` within the quoted value.
    UnterminatedInterpolation,
    /// Content after a value that is not a comment.
    UnexpectedCharacter(char),
}

impl fmt::Display for SyntaxErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SpaceInName => write!(f, "spaces not allowed in variable name"),
            Self::UnexpectedEndOfLine => write!(f, "unexpected end of line"),
            Self::EmptyName => write!(f, "missing variable name"),
            Self::UnterminatedQuote => write!(f, "unterminated quoted value"),
            Self::UnterminatedInterpolation => {
                write!(f, "unterminated interpolation, expected '}}'")
            }
            Self::UnexpectedCharacter(ch) => {
                write!(f, "unexpected character after value: {ch:?}")
            }
        }
    }
}

/// Error produced when the input is malformed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at line {}, column {}", span.line, span.column)]
pub struct SyntaxError {
    pub kind: SyntaxErrorKind,
    pub span: Span,
}

/// Error produced when `${NAME}` refers to a name not defined earlier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("variable {name} is not defined at line {}, column {}", span.line, span.column)]
pub struct InterpolationError {
    pub name: String,
    pub span: Span,
}

/// Parser configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Leave `${NAME}` markers unexpanded.
    pub raw: bool,
    /// Treat an empty unquoted value as null instead of an empty string.
    pub empty_as_null: bool,
}

impl ParseOptions {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            raw: false,
            empty_as_null: false,
        }
    }

    #[must_use]
    pub const fn raw(mut self, raw: bool) -> Self {
        self.raw = raw;
        self
    }

    #[must_use]
    pub const fn empty_as_null(mut self, empty_as_null: bool) -> Self {
        self.empty_as_null = empty_as_null;
        self
    }

    #[must_use]
    pub const fn detector(&self) -> TypeDetector {
        TypeDetector::new(self.empty_as_null)
    }
}

/// Parse `.env` source text into an ordered map of typed values.
///
/// # Errors
///
/// Returns [`Error::Syntax`] on malformed input and
/// [`Error::Interpolation`] when `${NAME}` refers to a name that was not
/// assigned earlier in the input. Nothing is returned on failure.
pub fn parse_str_with(input: &str, options: &ParseOptions) -> Result<EnvMap, Error> {
    Parser::new(input, options).parse()
}

struct Parser<'a> {
    chars: Peekable<Chars<'a>>,
    line: usize,
    col: usize,
    raw: bool,
    detector: TypeDetector,
    envs: EnvMap,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str, options: &ParseOptions) -> Self {
        let input = input.strip_prefix(BOM).unwrap_or(input);
        Self {
            chars: input.chars().peekable(),
            line: 1,
            col: 0,
            raw: options.raw,
            detector: options.detector(),
            envs: EnvMap::new(),
        }
    }

    fn parse(mut self) -> Result<EnvMap, Error> {
        while let Some(ch) = self.bump() {
            match ch {
                COMMENT => self.skip_line(),
                NEW_LINE | CARRIAGE_RETURN | SPACE => {}
                _ => {
                    let line = self.line;
                    let name = self.extract_name(ch)?;
                    let (value, quoted) = self.extract_value()?;
                    tracing::trace!(line, name = %name, kind = value.type_name(), quoted, "assignment");
                    let previous = if quoted {
                        self.envs.insert_quoted(name.clone(), value)
                    } else {
                        self.envs.insert(name.clone(), value)
                    };
                    if previous.is_some() {
                        tracing::warn!(line, name = %name, "duplicate variable overrides earlier value");
                    }
                }
            }
        }
        Ok(self.envs)
    }

    /// Location of the next character to be consumed.
    const fn span(&self) -> Span {
        Span::new(self.line, self.col)
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.chars.next()?;
        if ch == NEW_LINE {
            self.line += 1;
            self.col = 0;
        } else {
            self.col += 1;
        }
        Some(ch)
    }

    fn skip_spaces(&mut self) {
        while self.peek() == Some(SPACE) {
            self.bump();
        }
    }

    /// Discard everything up to and including the next line feed.
    fn skip_line(&mut self) {
        while let Some(ch) = self.bump() {
            if ch == NEW_LINE {
                break;
            }
        }
    }

    fn syntax_error(kind: SyntaxErrorKind, span: Span) -> Error {
        Error::Syntax(SyntaxError { kind, span })
    }

    fn extract_name(&mut self, first: char) -> Result<String, Error> {
        if first == EQUALS {
            return Err(Self::syntax_error(
                SyntaxErrorKind::EmptyName,
                Span::new(self.line, self.col - 1),
            ));
        }

        let mut name = String::from(first);
        loop {
            let span = self.span();
            match self.bump() {
                Some(EQUALS) => return Ok(name),
                Some(SPACE) => {
                    self.skip_spaces();
                    let span = self.span();
                    return match self.bump() {
                        Some(EQUALS) => Ok(name),
                        None | Some(NEW_LINE | CARRIAGE_RETURN | COMMENT) => Err(
                            Self::syntax_error(SyntaxErrorKind::UnexpectedEndOfLine, span),
                        ),
                        Some(_) => Err(Self::syntax_error(SyntaxErrorKind::SpaceInName, span)),
                    };
                }
                None | Some(NEW_LINE | CARRIAGE_RETURN | COMMENT) => {
                    return Err(Self::syntax_error(
                        SyntaxErrorKind::UnexpectedEndOfLine,
                        span,
                    ));
                }
                Some(ch) => name.push(ch),
            }
        }
    }

    /// Returns the value and whether it was a quoted literal.
    fn extract_value(&mut self) -> Result<(EnvValue, bool), Error> {
        self.skip_spaces();

        let value = if self.peek() == Some(QUOTE_START) {
            let start = self.span();
            self.bump();
            (EnvValue::Str(self.extract_quoted(start)?), true)
        } else {
            let raw = self.extract_scalar();
            (self.detector.detect(&raw), false)
        };

        self.finish_line()?;
        Ok(value)
    }

    fn extract_scalar(&mut self) -> String {
        let mut value = String::new();
        while let Some(ch) = self.peek() {
            if matches!(ch, NEW_LINE | CARRIAGE_RETURN | SPACE | COMMENT) {
                break;
            }
            value.push(ch);
            self.bump();
        }
        value
    }

    fn extract_quoted(&mut self, start: Span) -> Result<String, Error> {
        let mut value = String::new();
        loop {
            let span = self.span();
            match self.bump() {
                None => {
                    return Err(Self::syntax_error(
                        SyntaxErrorKind::UnterminatedQuote,
                        start,
                    ));
                }
                Some(QUOTE_END) => return Ok(value),
                Some(INTERPOLATION_INDICATOR)
                    if !self.raw && self.peek() == Some(INTERPOLATION_START) =>
                {
                    self.bump();
                    value.push_str(&self.interpolate(span)?);
                }
                Some(ch) => value.push(ch),
            }
        }
    }

    /// Resolve `${NAME}` against names assigned earlier in the input.
    /// `start` points at the `$`.
    fn interpolate(&mut self, start: Span) -> Result<String, Error> {
        let mut name = String::new();
        loop {
            match self.bump() {
                Some(INTERPOLATION_END) => break,
                None | Some(NEW_LINE | CARRIAGE_RETURN | QUOTE_END) => {
                    return Err(Self::syntax_error(
                        SyntaxErrorKind::UnterminatedInterpolation,
                        start,
                    ));
                }
                Some(ch) => name.push(ch),
            }
        }

        match self.envs.get(&name) {
            Some(value) => Ok(value.to_env_string()),
            None => Err(Error::Interpolation(InterpolationError { name, span: start })),
        }
    }

    /// After a value only spaces and an optional comment may follow
    /// on the same line.
    fn finish_line(&mut self) -> Result<(), Error> {
        self.skip_spaces();
        let span = self.span();
        match self.peek() {
            None | Some(NEW_LINE | CARRIAGE_RETURN) => Ok(()),
            Some(COMMENT) => {
                self.skip_line();
                Ok(())
            }
            Some(ch) => Err(Self::syntax_error(
                SyntaxErrorKind::UnexpectedCharacter(ch),
                span,
            )),
        }
    }
}
