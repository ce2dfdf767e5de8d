//! This module implements `TimeOfDay` and any directly related algorithms.

use crate::{
    builtins::core::Interval,
    parsers::{parse_time, FormattableTime},
    ValueError, ValueResult, TICKS_PER_DAY, TICKS_PER_HOUR, TICKS_PER_MICROSECOND,
    TICKS_PER_MINUTE, TICKS_PER_SECOND,
};
use core::str::FromStr;
use writeable::{impl_display_with_writeable, LengthHint, Writeable};

/// A PostgreSQL `time`: a time of day in ticks of 100 nanoseconds.
///
/// Values lie in `[00:00:00, 24:00:00]`. The upper bound is kept as a
/// distinct value so that `24:00:00` survives a round trip through text.
///
/// ```rust
/// use pgvalue_rs::{TimeOfDay, TICKS_PER_DAY};
///
/// let end = TimeOfDay::from_ticks(TICKS_PER_DAY);
/// assert_eq!(end.to_string(), "24:00:00");
///
/// let (wrapped, carry) = end.add_ticks_with_carry(0);
/// assert_eq!(wrapped.to_string(), "00:00:00");
/// assert_eq!(carry, 1);
/// ```
#[non_exhaustive]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay {
    ticks: i64,
}

// ==== Private API ====

impl TimeOfDay {
    #[inline]
    #[must_use]
    pub(crate) const fn new_unchecked(ticks: i64) -> Self {
        Self { ticks }
    }
}

// ==== Public API ====

impl TimeOfDay {
    /// Midnight at the start of the day, `00:00:00`.
    pub const ALL_BALLS: Self = Self::new_unchecked(0);
    /// Midnight at the end of the day, `24:00:00`.
    pub const END_OF_DAY: Self = Self::new_unchecked(TICKS_PER_DAY);

    /// Creates a `TimeOfDay` from raw ticks.
    ///
    /// Exactly one day of ticks is kept as `24:00:00`; any other value is
    /// wrapped into a single day.
    #[must_use]
    pub const fn from_ticks(ticks: i64) -> Self {
        if ticks == TICKS_PER_DAY {
            return Self::END_OF_DAY;
        }
        Self::new_unchecked(ticks.rem_euclid(TICKS_PER_DAY))
    }

    /// Creates a new `TimeOfDay`, rejecting any field that is not in a valid
    /// range.
    ///
    /// An hour of 24 is accepted only when every other field is zero.
    ///
    /// ```rust
    /// use pgvalue_rs::TimeOfDay;
    ///
    /// assert!(TimeOfDay::try_new(24, 0, 0, 0).is_ok());
    /// assert!(TimeOfDay::try_new(24, 0, 1, 0).is_err());
    /// assert!(TimeOfDay::try_new(12, 60, 0, 0).is_err());
    /// ```
    pub fn try_new(hour: u8, minute: u8, second: u8, subsecond_ticks: u32) -> ValueResult<Self> {
        if hour > 24 || minute > 59 || second > 59 || i64::from(subsecond_ticks) >= TICKS_PER_SECOND
        {
            return Err(ValueError::range().with_message("time field out of range"));
        }
        if hour == 24 && (minute != 0 || second != 0 || subsecond_ticks != 0) {
            return Err(ValueError::range().with_message("24:00:00 is the last valid time"));
        }
        Ok(Self::new_unchecked(
            i64::from(hour) * TICKS_PER_HOUR
                + i64::from(minute) * TICKS_PER_MINUTE
                + i64::from(second) * TICKS_PER_SECOND
                + i64::from(subsecond_ticks),
        ))
    }

    /// Returns the ticks since midnight.
    #[inline]
    #[must_use]
    pub const fn ticks(&self) -> i64 {
        self.ticks
    }

    /// Returns the hour, which is 24 only for [`TimeOfDay::END_OF_DAY`].
    #[inline]
    #[must_use]
    pub const fn hour(&self) -> u8 {
        (self.ticks / TICKS_PER_HOUR) as u8
    }

    #[inline]
    #[must_use]
    pub const fn minute(&self) -> u8 {
        (self.ticks % TICKS_PER_HOUR / TICKS_PER_MINUTE) as u8
    }

    #[inline]
    #[must_use]
    pub const fn second(&self) -> u8 {
        (self.ticks % TICKS_PER_MINUTE / TICKS_PER_SECOND) as u8
    }

    /// Returns the ticks within the current second.
    #[inline]
    #[must_use]
    pub const fn subsecond_ticks(&self) -> u32 {
        (self.ticks % TICKS_PER_SECOND) as u32
    }

    /// Returns the whole microseconds within the current second.
    #[inline]
    #[must_use]
    pub const fn microsecond(&self) -> u32 {
        self.subsecond_ticks() / TICKS_PER_MICROSECOND as u32
    }

    #[inline]
    #[must_use]
    pub const fn is_end_of_day(&self) -> bool {
        self.ticks == TICKS_PER_DAY
    }

    /// Adds ticks, returning the wrapped time and the number of whole days
    /// that were carried out, which may be negative.
    ///
    /// The result is never `24:00:00`.
    #[must_use]
    pub fn add_ticks_with_carry(&self, ticks: i64) -> (Self, i32) {
        let total = i128::from(self.ticks) + i128::from(ticks);
        let day = i128::from(TICKS_PER_DAY);
        // |total| / day is at most 2^64 / TICKS_PER_DAY, well within i32.
        let carry = total.div_euclid(day) as i32;
        let ticks = total.rem_euclid(day) as i64;
        (Self::new_unchecked(ticks), carry)
    }

    /// Adds the tick component of an interval, returning the wrapped time
    /// and the carried days.
    #[must_use]
    pub fn add_with_carry(&self, interval: &Interval) -> (Self, i32) {
        self.add_ticks_with_carry(interval.ticks())
    }

    /// Adds the tick component of an interval, wrapping around midnight.
    ///
    /// ```rust
    /// use pgvalue_rs::{Interval, TimeOfDay, TICKS_PER_HOUR};
    /// use core::str::FromStr;
    ///
    /// let time = TimeOfDay::from_str("23:00:00").unwrap();
    /// let later = time.add(&Interval::from_ticks(2 * TICKS_PER_HOUR));
    /// assert_eq!(later.to_string(), "01:00:00");
    /// ```
    #[must_use]
    pub fn add(&self, interval: &Interval) -> Self {
        self.add_with_carry(interval).0
    }

    /// Returns the signed difference from `other` to `self`.
    #[must_use]
    pub fn subtract(&self, other: &Self) -> Interval {
        Interval::from_ticks(self.ticks - other.ticks)
    }

    /// Parses a time, returning `None` on failure.
    ///
    /// The fallback value for a failed parse is [`TimeOfDay::ALL_BALLS`].
    pub fn try_parse(source: &str) -> Option<Self> {
        parse_time(source).ok()
    }

    /// Parses optional text, failing with a null input error when absent.
    pub fn parse_nullable(source: Option<&str>) -> ValueResult<Self> {
        let source = source
            .ok_or_else(|| ValueError::null_input().with_message("time text must not be NULL"))?;
        parse_time(source)
    }

    pub(crate) fn formattable(&self) -> FormattableTime {
        FormattableTime::from_ticks(self.ticks as u64)
    }
}

impl Writeable for TimeOfDay {
    fn write_to<W: core::fmt::Write + ?Sized>(&self, sink: &mut W) -> core::fmt::Result {
        self.formattable().write_to(sink)
    }

    fn writeable_length_hint(&self) -> LengthHint {
        self.formattable().writeable_length_hint()
    }
}

impl_display_with_writeable!(TimeOfDay);

impl FromStr for TimeOfDay {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_time(s)
    }
}

// ==== Test land ====

#[cfg(test)]
mod tests {
    use alloc::string::ToString;
    use core::str::FromStr;

    use super::TimeOfDay;
    use crate::{error::ErrorKind, Interval, TICKS_PER_DAY, TICKS_PER_HOUR, TICKS_PER_SECOND};

    fn assert_time(time: TimeOfDay, values: (u8, u8, u8, u32)) {
        assert_eq!(
            (
                time.hour(),
                time.minute(),
                time.second(),
                time.subsecond_ticks()
            ),
            values
        );
    }

    #[test]
    fn from_ticks_wraps_except_end_of_day() {
        assert_eq!(TimeOfDay::from_ticks(TICKS_PER_DAY), TimeOfDay::END_OF_DAY);
        assert_eq!(TimeOfDay::from_ticks(TICKS_PER_DAY + 1).ticks(), 1);
        assert_eq!(
            TimeOfDay::from_ticks(-TICKS_PER_HOUR).ticks(),
            TICKS_PER_DAY - TICKS_PER_HOUR
        );
        assert_eq!(TimeOfDay::from_ticks(-TICKS_PER_DAY), TimeOfDay::ALL_BALLS);
    }

    #[test]
    fn fields() {
        let time = TimeOfDay::try_new(13, 14, 15, 1_234_567).unwrap();
        assert_time(time, (13, 14, 15, 1_234_567));
        assert_eq!(time.microsecond(), 123_456);
        assert_time(TimeOfDay::END_OF_DAY, (24, 0, 0, 0));
        assert!(TimeOfDay::END_OF_DAY.is_end_of_day());
        assert_eq!(
            TimeOfDay::try_new(1, 0, 0, 10_000_000).unwrap_err().kind(),
            ErrorKind::Range
        );
    }

    #[test]
    fn carry_out() {
        let time = TimeOfDay::try_new(22, 0, 0, 0).unwrap();
        let (wrapped, carry) = time.add_ticks_with_carry(3 * TICKS_PER_HOUR);
        assert_time(wrapped, (1, 0, 0, 0));
        assert_eq!(carry, 1);

        let (wrapped, carry) = time.add_ticks_with_carry(-23 * TICKS_PER_HOUR);
        assert_time(wrapped, (23, 0, 0, 0));
        assert_eq!(carry, -1);

        let (wrapped, carry) = TimeOfDay::ALL_BALLS.add_ticks_with_carry(-1);
        assert_eq!(wrapped.ticks(), TICKS_PER_DAY - 1);
        assert_eq!(carry, -1);

        let (wrapped, carry) = TimeOfDay::ALL_BALLS.add_ticks_with_carry(-3 * TICKS_PER_DAY);
        assert_eq!(wrapped, TimeOfDay::ALL_BALLS);
        assert_eq!(carry, -3);

        let (_, carry) = TimeOfDay::ALL_BALLS.add_ticks_with_carry(i64::MAX);
        assert_eq!(i64::from(carry), i64::MAX / TICKS_PER_DAY);
    }

    #[test]
    fn end_of_day_normalizes_on_add() {
        let (wrapped, carry) = TimeOfDay::END_OF_DAY.add_with_carry(&Interval::ZERO);
        assert_eq!(wrapped, TimeOfDay::ALL_BALLS);
        assert_eq!(carry, 1);
        assert_eq!(
            TimeOfDay::END_OF_DAY.add(&Interval::from_ticks(TICKS_PER_SECOND)),
            TimeOfDay::try_new(0, 0, 1, 0).unwrap()
        );
    }

    #[test]
    fn add_ignores_months_and_days() {
        let time = TimeOfDay::try_new(6, 0, 0, 0).unwrap();
        assert_eq!(time.add(&Interval::new(3, 4, 0)), time);
    }

    #[test]
    fn subtract() {
        let a = TimeOfDay::try_new(1, 0, 0, 0).unwrap();
        let b = TimeOfDay::try_new(3, 30, 0, 0).unwrap();
        assert_eq!(b.subtract(&a).to_string(), "02:30:00");
        assert_eq!(a.subtract(&b).to_string(), "-02:30:00");
    }

    #[test]
    fn parse_and_format() {
        let time = TimeOfDay::from_str("04:05:06.789").unwrap();
        assert_eq!(time.to_string(), "04:05:06.789");
        assert_eq!(TimeOfDay::from_str("24:00").unwrap().to_string(), "24:00:00");
        assert_eq!(
            TimeOfDay::try_parse("25:00:00").unwrap_or_default(),
            TimeOfDay::ALL_BALLS
        );
        assert_eq!(
            TimeOfDay::parse_nullable(None).unwrap_err().kind(),
            ErrorKind::NullInput
        );
    }
}
