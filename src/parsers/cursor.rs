//! A byte cursor over the ASCII value grammars.

use crate::{error::ErrorMessage, ValueError, ValueResult, TICKS_PER_SECOND};

/// The number of fractional second digits a tick can represent.
pub(crate) const FRACTION_DIGITS: u32 = 7;

#[derive(Debug, Clone)]
pub(crate) struct Cursor<'a> {
    source: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(source: &'a str) -> Self {
        Self {
            source: source.as_bytes(),
            pos: 0,
        }
    }

    pub(crate) fn peek(&self) -> Option<u8> {
        self.source.get(self.pos).copied()
    }

    pub(crate) fn next(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.pos += 1;
        Some(byte)
    }

    pub(crate) fn check<F: FnOnce(u8) -> bool>(&self, pred: F) -> bool {
        self.peek().is_some_and(pred)
    }

    /// Consumes `byte` if it is the next byte.
    pub(crate) fn eat(&mut self, byte: u8) -> bool {
        if self.peek() == Some(byte) {
            self.pos += 1;
            return true;
        }
        false
    }

    /// Consumes `word` if the remaining input starts with it, ignoring ASCII case.
    pub(crate) fn eat_ignore_case(&mut self, word: &str) -> bool {
        let word = word.as_bytes();
        let end = self.pos + word.len();
        match self.source.get(self.pos..end) {
            Some(slice) if slice.eq_ignore_ascii_case(word) => {
                self.pos = end;
                true
            }
            _ => false,
        }
    }

    /// Consumes and returns the longest prefix whose bytes satisfy `pred`.
    pub(crate) fn take_while<F: Fn(u8) -> bool>(&mut self, pred: F) -> &'a [u8] {
        let start = self.pos;
        while self.check(&pred) {
            self.pos += 1;
        }
        &self.source[start..self.pos]
    }

    pub(crate) fn skip_whitespace(&mut self) -> bool {
        let start = self.pos;
        while self.check(|b| b.is_ascii_whitespace()) {
            self.pos += 1;
        }
        self.pos != start
    }

    pub(crate) fn is_done(&self) -> bool {
        self.pos >= self.source.len()
    }

    pub(crate) fn expect(&mut self, byte: u8) -> ValueResult<()> {
        match self.next() {
            Some(found) if found == byte => Ok(()),
            Some(found) => Err(ValueError::format().with_message(alloc::format!(
                "expected '{}' but found '{}'",
                byte as char,
                found as char
            ))),
            None => Err(ValueError::format().with_enum(ErrorMessage::UnexpectedEnd)),
        }
    }

    pub(crate) fn expect_end(&self) -> ValueResult<()> {
        if !self.is_done() {
            return Err(ValueError::format().with_enum(ErrorMessage::TrailingCharacters));
        }
        Ok(())
    }

    /// Parses a run of at least `min` digits, stopping after `max` digits.
    pub(crate) fn parse_digits(&mut self, min: usize, max: usize) -> ValueResult<u64> {
        let start = self.pos;
        let mut value: u64 = 0;
        while self.pos - start < max && self.check(|b| b.is_ascii_digit()) {
            let digit = u64::from(self.source[self.pos] - b'0');
            value = value
                .checked_mul(10)
                .and_then(|v| v.checked_add(digit))
                .ok_or_else(|| ValueError::range().with_message("numeric field overflowed"))?;
            self.pos += 1;
        }
        if self.pos - start < min {
            if self.is_done() {
                return Err(ValueError::format().with_enum(ErrorMessage::UnexpectedEnd));
            }
            return Err(ValueError::format().with_enum(ErrorMessage::ExpectedDigit));
        }
        Ok(value)
    }

    /// Parses the digits following a decimal point into ticks.
    ///
    /// Digits beyond tick precision are validated and truncated.
    pub(crate) fn parse_fraction_ticks(&mut self) -> ValueResult<i64> {
        let mut ticks = 0;
        let mut scale = TICKS_PER_SECOND;
        let mut digits = 0;
        while let Some(byte) = self.peek().filter(u8::is_ascii_digit) {
            self.pos += 1;
            digits += 1;
            if digits <= FRACTION_DIGITS {
                scale /= 10;
                ticks += i64::from(byte - b'0') * scale;
            }
        }
        if digits == 0 {
            return Err(ValueError::format().with_message("expected fractional second digits"));
        }
        Ok(ticks)
    }
}
