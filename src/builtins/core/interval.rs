//! This module implements `Interval` along with its justification operations.

use crate::{
    error::ErrorMessage,
    parsers::{parse_interval, FormattableInterval},
    Sign, ValueError, ValueResult, DAYS_PER_MONTH, TICKS_PER_DAY, TICKS_PER_HOUR,
    TICKS_PER_MINUTE, TICKS_PER_SECOND,
};
use core::{cmp::Ordering, hash::Hash, str::FromStr, time::Duration};
use num_traits::ToPrimitive;
use writeable::{impl_display_with_writeable, LengthHint, Writeable};

#[cfg(test)]
mod tests;

const TICKS_PER_MONTH: i64 = TICKS_PER_DAY * DAYS_PER_MONTH as i64;

fn overflow() -> ValueError {
    ValueError::range().with_enum(ErrorMessage::IntervalOverflow)
}

/// A PostgreSQL `interval`.
///
/// An `Interval` is a `(months, days, ticks)` triple. The three components
/// are independent: no normalization happens on construction, so
/// `1 mon` and `30 days` are distinct values that compare as equal
/// durations.
///
/// Equality is component-wise. Ordering, via [`Interval::compare`], and
/// hashing use the unjustified total, where a month is 30 days and a day is
/// 24 hours.
///
/// ```rust
/// use pgvalue_rs::Interval;
/// use core::cmp::Ordering;
///
/// let month = Interval::from_months(1);
/// let thirty_days = Interval::from_days(30);
///
/// assert_ne!(month, thirty_days);
/// assert_eq!(month.compare(&thirty_days), Ordering::Equal);
/// ```
#[non_exhaustive]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    months: i32,
    days: i32,
    ticks: i64,
}

impl core::hash::Hash for Interval {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.total_ticks().hash(state);
    }
}

// ==== Creation ====

impl Interval {
    /// The zero length interval, `00:00:00`.
    pub const ZERO: Self = Self::new(0, 0, 0);

    /// Creates a new `Interval` from its three components.
    #[inline]
    #[must_use]
    pub const fn new(months: i32, days: i32, ticks: i64) -> Self {
        Self {
            months,
            days,
            ticks,
        }
    }

    /// Creates an `Interval` of only ticks.
    #[inline]
    #[must_use]
    pub const fn from_ticks(ticks: i64) -> Self {
        Self::new(0, 0, ticks)
    }

    /// Creates an `Interval` of only days.
    #[inline]
    #[must_use]
    pub const fn from_days(days: i32) -> Self {
        Self::new(0, days, 0)
    }

    /// Creates an `Interval` of only months.
    #[inline]
    #[must_use]
    pub const fn from_months(months: i32) -> Self {
        Self::new(months, 0, 0)
    }

    /// Creates an `Interval` from days and clock fields.
    ///
    /// The clock fields are folded into the tick component as given; they
    /// are not balanced into days.
    ///
    /// ```rust
    /// use pgvalue_rs::Interval;
    ///
    /// let interval = Interval::from_parts(1, 25, 0, 30, 0).unwrap();
    /// assert_eq!(interval.to_string(), "1 day 25:00:30");
    /// ```
    pub fn from_parts(
        days: i32,
        hours: i64,
        minutes: i64,
        seconds: i64,
        ticks: i64,
    ) -> ValueResult<Self> {
        let ticks = hours
            .checked_mul(TICKS_PER_HOUR)
            .and_then(|t| t.checked_add(minutes.checked_mul(TICKS_PER_MINUTE)?))
            .and_then(|t| t.checked_add(seconds.checked_mul(TICKS_PER_SECOND)?))
            .and_then(|t| t.checked_add(ticks))
            .ok_or_else(overflow)?;
        Ok(Self::new(0, days, ticks))
    }

    /// Converts a `core::time::Duration` into an `Interval` of ticks.
    ///
    /// Precision below one tick is truncated.
    pub fn try_from_duration(duration: Duration) -> ValueResult<Self> {
        let ticks = duration.as_nanos() / 100;
        let ticks = ticks.to_i64().ok_or_else(overflow)?;
        Ok(Self::from_ticks(ticks))
    }

    /// Converts this `Interval` into a `core::time::Duration` using the
    /// unjustified total.
    ///
    /// Fails with a range error when the interval is negative.
    pub fn to_duration(&self) -> ValueResult<Duration> {
        let total = self.total_ticks();
        if total < 0 {
            return Err(ValueError::range()
                .with_message("a negative interval cannot be converted to a Duration"));
        }
        let seconds = (total / i128::from(TICKS_PER_SECOND))
            .to_u64()
            .ok_or_else(overflow)?;
        let nanos = (total % i128::from(TICKS_PER_SECOND)) as u32 * 100;
        Ok(Duration::new(seconds, nanos))
    }
}

// ==== Getters ====

impl Interval {
    /// Returns the month component.
    #[inline]
    #[must_use]
    pub const fn months(&self) -> i32 {
        self.months
    }

    /// Returns the day component.
    #[inline]
    #[must_use]
    pub const fn days(&self) -> i32 {
        self.days
    }

    /// Returns the tick component.
    #[inline]
    #[must_use]
    pub const fn ticks(&self) -> i64 {
        self.ticks
    }

    /// Returns the whole hours of the tick component.
    #[inline]
    #[must_use]
    pub const fn hours(&self) -> i64 {
        self.ticks / TICKS_PER_HOUR
    }

    /// Returns the minute of the hour of the tick component.
    #[inline]
    #[must_use]
    pub const fn minutes(&self) -> i64 {
        self.ticks % TICKS_PER_HOUR / TICKS_PER_MINUTE
    }

    /// Returns the second of the minute of the tick component.
    #[inline]
    #[must_use]
    pub const fn seconds(&self) -> i64 {
        self.ticks % TICKS_PER_MINUTE / TICKS_PER_SECOND
    }

    #[inline]
    #[must_use]
    pub const fn subsecond_ticks(&self) -> i64 {
        self.ticks % TICKS_PER_SECOND
    }

    /// Returns the fully unjustified total in ticks.
    ///
    /// Unlike [`Interval::unjustify_interval`], this cannot overflow.
    #[inline]
    #[must_use]
    pub const fn total_ticks(&self) -> i128 {
        self.ticks as i128
            + self.days as i128 * TICKS_PER_DAY as i128
            + self.months as i128 * TICKS_PER_MONTH as i128
    }

    /// Returns the sign of the unjustified total.
    #[inline]
    #[must_use]
    pub fn sign(&self) -> Sign {
        match self.total_ticks().cmp(&0) {
            Ordering::Greater => Sign::Positive,
            Ordering::Equal => Sign::Zero,
            Ordering::Less => Sign::Negative,
        }
    }

    /// Returns whether every component is zero.
    #[inline]
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.months == 0 && self.days == 0 && self.ticks == 0
    }
}

// ==== Justification ====

impl Interval {
    /// Moves whole days out of the tick component.
    ///
    /// ```rust
    /// use pgvalue_rs::{Interval, TICKS_PER_HOUR};
    ///
    /// let interval = Interval::from_ticks(27 * TICKS_PER_HOUR);
    /// assert_eq!(interval.justify_days().unwrap().to_string(), "1 day 03:00:00");
    /// ```
    pub fn justify_days(&self) -> ValueResult<Self> {
        let days = (self.ticks / TICKS_PER_DAY)
            .to_i32()
            .and_then(|d| self.days.checked_add(d))
            .ok_or_else(overflow)?;
        Ok(Self::new(self.months, days, self.ticks % TICKS_PER_DAY))
    }

    /// Folds the day component into the tick component.
    pub fn unjustify_days(&self) -> ValueResult<Self> {
        let ticks = i64::from(self.days)
            .checked_mul(TICKS_PER_DAY)
            .and_then(|t| t.checked_add(self.ticks))
            .ok_or_else(overflow)?;
        Ok(Self::new(self.months, 0, ticks))
    }

    /// Moves whole 30 day months out of the day component.
    pub fn justify_months(&self) -> ValueResult<Self> {
        let months = self
            .months
            .checked_add(self.days / DAYS_PER_MONTH)
            .ok_or_else(overflow)?;
        Ok(Self::new(months, self.days % DAYS_PER_MONTH, self.ticks))
    }

    /// Folds the month component into the day component at 30 days a month.
    pub fn unjustify_months(&self) -> ValueResult<Self> {
        let days = self
            .months
            .checked_mul(DAYS_PER_MONTH)
            .and_then(|d| d.checked_add(self.days))
            .ok_or_else(overflow)?;
        Ok(Self::new(0, days, self.ticks))
    }

    /// Justifies months, then days.
    pub fn justify_interval(&self) -> ValueResult<Self> {
        self.justify_months()?.justify_days()
    }

    /// Folds every component into ticks.
    pub fn unjustify_interval(&self) -> ValueResult<Self> {
        let ticks = self.total_ticks().to_i64().ok_or_else(overflow)?;
        Ok(Self::from_ticks(ticks))
    }

    /// Returns PostgreSQL's preferred display form: no months, and a tick
    /// component strictly within one day of zero.
    ///
    /// ```rust
    /// use pgvalue_rs::{Interval, TICKS_PER_HOUR};
    ///
    /// let interval = Interval::new(1, 2, 50 * TICKS_PER_HOUR);
    /// assert_eq!(interval.canonicalize().unwrap().to_string(), "34 days 02:00:00");
    /// ```
    pub fn canonicalize(&self) -> ValueResult<Self> {
        let days = i64::from(self.months) * i64::from(DAYS_PER_MONTH)
            + i64::from(self.days)
            + self.ticks / TICKS_PER_DAY;
        let days = days.to_i32().ok_or_else(overflow)?;
        Ok(Self::new(0, days, self.ticks % TICKS_PER_DAY))
    }

    /// Returns the absolute value of this `Interval`.
    ///
    /// Negativity is decided by the unjustified total, so an interval with
    /// mixed component signs keeps its components when the total is positive.
    ///
    /// ```rust
    /// use pgvalue_rs::{Interval, TICKS_PER_HOUR};
    ///
    /// let mixed = Interval::new(1, -2, 0);
    /// assert_eq!(mixed.duration().unwrap(), mixed);
    ///
    /// let negative = Interval::new(0, -1, TICKS_PER_HOUR);
    /// assert_eq!(negative.duration().unwrap(), Interval::new(0, 1, -TICKS_PER_HOUR));
    /// ```
    pub fn duration(&self) -> ValueResult<Self> {
        if self.total_ticks() < 0 {
            return self.negate();
        }
        Ok(*self)
    }
}

// ==== Arithmetic ====

impl Interval {
    /// Adds two intervals component-wise.
    pub fn add(&self, other: &Self) -> ValueResult<Self> {
        let months = self.months.checked_add(other.months);
        let days = self.days.checked_add(other.days);
        let ticks = self.ticks.checked_add(other.ticks);
        match (months, days, ticks) {
            (Some(months), Some(days), Some(ticks)) => Ok(Self::new(months, days, ticks)),
            _ => Err(overflow()),
        }
    }

    /// Subtracts two intervals component-wise.
    pub fn subtract(&self, other: &Self) -> ValueResult<Self> {
        self.add(&other.negate()?)
    }

    /// Negates every component.
    pub fn negate(&self) -> ValueResult<Self> {
        let months = self.months.checked_neg();
        let days = self.days.checked_neg();
        let ticks = self.ticks.checked_neg();
        match (months, days, ticks) {
            (Some(months), Some(days), Some(ticks)) => Ok(Self::new(months, days, ticks)),
            _ => Err(overflow()),
        }
    }

    /// Compares two intervals by their unjustified totals.
    #[inline]
    #[must_use]
    pub fn compare(&self, other: &Self) -> Ordering {
        self.total_ticks().cmp(&other.total_ticks())
    }
}

// ==== Parsing and formatting ====

impl Interval {
    /// Parses an interval, returning `None` on failure.
    ///
    /// The fallback value for a failed parse is [`Interval::ZERO`], which is
    /// also `Interval::default()`.
    pub fn try_parse(source: &str) -> Option<Self> {
        parse_interval(source).ok()
    }

    /// Parses optional text, failing with a null input error when absent.
    pub fn parse_nullable(source: Option<&str>) -> ValueResult<Self> {
        let source = source.ok_or_else(|| {
            ValueError::null_input().with_message("interval text must not be NULL")
        })?;
        parse_interval(source)
    }

    fn formattable(&self) -> FormattableInterval {
        FormattableInterval {
            months: self.months,
            days: self.days,
            ticks: self.ticks,
        }
    }
}

impl Writeable for Interval {
    fn write_to<W: core::fmt::Write + ?Sized>(&self, sink: &mut W) -> core::fmt::Result {
        self.formattable().write_to(sink)
    }

    fn writeable_length_hint(&self) -> LengthHint {
        self.formattable().writeable_length_hint()
    }
}

impl_display_with_writeable!(Interval);

impl FromStr for Interval {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_interval(s)
    }
}

impl From<Interval> for (i32, i32, i64) {
    fn from(value: Interval) -> Self {
        (value.months, value.days, value.ticks)
    }
}
