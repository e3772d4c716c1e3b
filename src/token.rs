//! Character vocabulary recognized by the scanner.

/// Assignment between a name and its value.
pub const EQUALS: char = '=';
/// Starts a comment that runs to the end of the physical line.
pub const COMMENT: char = '#';
/// Opens a quoted (possibly multi-line) value.
pub const QUOTE_START: char = '"';
/// Closes a quoted value.
pub const QUOTE_END: char = '"';
pub const SPACE: char = ' ';
pub const NEW_LINE: char = '\n';
pub const CARRIAGE_RETURN: char = '\r';
/// Reserved. The scanner gives tabs no special meaning.
pub const TAB: char = '\t';
/// First character of an interpolation marker (`${`).
pub const INTERPOLATION_INDICATOR: char = '$';
pub const INTERPOLATION_START: char = '{';
pub const INTERPOLATION_END: char = '}';

/// Byte order mark skipped at the start of the input.
pub const BOM: char = '\u{FEFF}';

/// Source location for error reporting.
///
/// `line` is 1-based, `column` is the 0-based index of the character
/// within its physical line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub line: usize,
    pub column: usize,
}

impl Span {
    #[must_use]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}
