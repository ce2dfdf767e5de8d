//! This module implements `ValueError`.

use alloc::borrow::Cow;
use core::fmt;

/// `ValueError`'s error type.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Error.
    #[default]
    Generic,
    /// The text does not match the expected grammar.
    Format,
    /// A component is outside of its valid domain, or a computation overflowed.
    Range,
    /// A required value was absent.
    NullInput,
    /// A finite quantity was requested from an infinite timestamp.
    InfiniteOperand,
    /// Unexpected internal state.
    Assert,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Generic => "Error",
            Self::Format => "FormatError",
            Self::Range => "RangeError",
            Self::NullInput => "NullInputError",
            Self::InfiniteOperand => "InfiniteOperandError",
            Self::Assert => "ImplementationError",
        }
        .fmt(f)
    }
}

/// The error type for `pgvalue_rs`.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueError {
    kind: ErrorKind,
    msg: Cow<'static, str>,
}

impl ValueError {
    #[inline]
    #[must_use]
    const fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            msg: Cow::Borrowed(""),
        }
    }

    /// Creates a generic error.
    #[inline]
    #[must_use]
    pub fn general<S>(msg: S) -> Self
    where
        S: Into<Cow<'static, str>>,
    {
        Self::new(ErrorKind::Generic).with_message(msg)
    }

    /// Create a format error.
    #[inline]
    #[must_use]
    pub const fn format() -> Self {
        Self::new(ErrorKind::Format)
    }

    /// Create a range error.
    #[inline]
    #[must_use]
    pub const fn range() -> Self {
        Self::new(ErrorKind::Range)
    }

    /// Create a null input error.
    #[inline]
    #[must_use]
    pub const fn null_input() -> Self {
        Self::new(ErrorKind::NullInput)
    }

    /// Create an infinite operand error.
    #[inline]
    #[must_use]
    pub const fn infinite_operand() -> Self {
        Self::new(ErrorKind::InfiniteOperand)
    }

    /// Create an assertion error.
    #[inline]
    #[must_use]
    pub(crate) const fn assert() -> Self {
        Self::new(ErrorKind::Assert)
    }

    /// Add a message to the error.
    #[inline]
    #[must_use]
    pub fn with_message<S>(mut self, msg: S) -> Self
    where
        S: Into<Cow<'static, str>>,
    {
        self.msg = msg.into();
        self
    }

    /// Add a fixed message to the error.
    #[inline]
    #[must_use]
    pub fn with_enum(mut self, msg: ErrorMessage) -> Self {
        self.msg = Cow::Borrowed(msg.as_str());
        self
    }

    /// Returns this error's kind.
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the error message.
    #[inline]
    #[must_use]
    pub fn message(&self) -> &str {
        &self.msg
    }

    /// Extracts the error message.
    #[inline]
    #[must_use]
    pub fn into_message(self) -> Cow<'static, str> {
        self.msg
    }
}

impl fmt::Display for ValueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;

        let msg = self.msg.trim();
        if !msg.is_empty() {
            write!(f, ": {msg}")?;
        }

        Ok(())
    }
}

impl core::error::Error for ValueError {}

/// Messages shared by more than one error site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorMessage {
    DateOutOfRange,
    InstantOutOfRange,
    IntervalOverflow,
    InfiniteSubtraction,
    UnexpectedEnd,
    TrailingCharacters,
    ExpectedDigit,
    NullElement,
}

impl ErrorMessage {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DateOutOfRange => "date is outside the supported range (4714 BC to 5874897 AD)",
            Self::InstantOutOfRange => "instant is outside the representable window",
            Self::IntervalOverflow => "interval component overflowed",
            Self::InfiniteSubtraction => "cannot subtract infinite timestamps",
            Self::UnexpectedEnd => "unexpected end of input",
            Self::TrailingCharacters => "unexpected characters after value",
            Self::ExpectedDigit => "expected an ascii digit",
            Self::NullElement => "NULL element is not accepted by this element codec",
        }
    }
}
