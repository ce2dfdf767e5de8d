//! Option types used by the value constructors and the array codec.

/// How out of range date fields are handled.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ArithmeticOverflow {
    /// Clamp the day of month to the month's length.
    #[default]
    Constrain,
    /// Reject any field outside of its range.
    Reject,
}

/// The element delimiter of an array literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArrayDelimiter(pub(crate) char);

impl ArrayDelimiter {
    /// The comma delimiter used by every built-in type except `box`.
    pub const COMMA: Self = Self(',');
    /// The semicolon delimiter used by `box`.
    pub const SEMICOLON: Self = Self(';');

    /// Creates a delimiter, rejecting characters that are part of the
    /// array grammar itself. Delimiters are single ASCII characters.
    pub fn try_new(delimiter: char) -> Option<Self> {
        if !delimiter.is_ascii_graphic() || matches!(delimiter, '{' | '}' | '"' | '\\') {
            return None;
        }
        Some(Self(delimiter))
    }

    pub const fn as_char(self) -> char {
        self.0
    }

    pub(crate) const fn as_byte(self) -> u8 {
        self.0 as u8
    }
}

impl Default for ArrayDelimiter {
    fn default() -> Self {
        Self::COMMA
    }
}
