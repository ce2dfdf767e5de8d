//! This module implements `Date` and any directly related algorithms.

use crate::{
    builtins::core::Interval,
    error::ErrorMessage,
    options::ArithmeticOverflow,
    parsers::{parse_date, write_era, FormattableDate},
    ValueError, ValueResult,
};
use core::str::FromStr;
use date_equations::proleptic;
use num_traits::ToPrimitive;
use writeable::{impl_display_with_writeable, LengthHint, Writeable};

/// Converts a year without a year zero into an astronomical year.
#[inline]
const fn to_astronomical(year: i32) -> i64 {
    if year > 0 {
        year as i64
    } else {
        year as i64 + 1
    }
}

/// Converts an astronomical year into a year without a year zero.
#[inline]
const fn from_astronomical(year: i64) -> i64 {
    if year > 0 {
        year
    } else {
        year - 1
    }
}

fn out_of_range() -> ValueError {
    ValueError::range().with_enum(ErrorMessage::DateOutOfRange)
}

/// A PostgreSQL `date`.
///
/// A `Date` is a day number counted from January 1st, 1 AD on the
/// proleptic Gregorian calendar. Years have no zero: the day before
/// 0001-01-01 is 0001-12-31 BC, which is a leap year.
///
/// The supported range is the one PostgreSQL accepts, from 4714-11-24 BC to
/// 5874897-12-31.
///
/// ```rust
/// use pgvalue_rs::Date;
///
/// let date = Date::try_new(-1, 12, 31).unwrap();
/// assert_eq!(date.to_string(), "0001-12-31 BC");
/// assert_eq!(date.add_days(1).unwrap(), Date::ERA);
/// ```
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Date {
    days: i32,
}

impl Default for Date {
    fn default() -> Self {
        Self::ERA
    }
}

// ==== Private API ====

impl Date {
    #[inline]
    #[must_use]
    pub(crate) const fn from_days_unchecked(days: i32) -> Self {
        Self { days }
    }

    /// Creates a `Date` from an astronomical year, validating only the range.
    fn from_astronomical_ymd(year: i64, month: u8, day: u8) -> ValueResult<Self> {
        let days = proleptic::days_from_ymd(year, month, day);
        Self::from_days(days.to_i32().ok_or_else(out_of_range)?)
    }

    fn astronomical_year(&self) -> i64 {
        proleptic::year_and_ordinal_from_days(i64::from(self.days)).0
    }
}

// ==== Public API ====

impl Date {
    /// January 1st, 1 AD.
    pub const ERA: Self = Self::from_days_unchecked(0);
    /// January 1st, 1970.
    pub const UNIX_EPOCH: Self = Self::from_days_unchecked(719_162);
    /// January 1st, 2000.
    pub const POSTGRES_EPOCH: Self = Self::from_days_unchecked(730_119);
    /// November 24th, 4714 BC.
    pub const MIN: Self =
        Self::from_days_unchecked(proleptic::days_from_ymd(-4713, 11, 24) as i32);
    /// December 31st, 5874897 AD.
    pub const MAX: Self =
        Self::from_days_unchecked(proleptic::days_from_ymd(5_874_897, 12, 31) as i32);

    /// Creates a new `Date`, rejecting any field that is not in a valid range.
    ///
    /// Negative years are BC: `-1` is 1 BC. There is no year zero.
    ///
    /// ```rust
    /// use pgvalue_rs::Date;
    ///
    /// assert!(Date::try_new(2024, 2, 29).is_ok());
    /// assert!(Date::try_new(2023, 2, 29).is_err());
    /// assert!(Date::try_new(0, 1, 1).is_err());
    /// ```
    pub fn try_new(year: i32, month: u8, day: u8) -> ValueResult<Self> {
        Self::new_with_overflow(year, month, day, ArithmeticOverflow::Reject)
    }

    /// Creates a new `Date` with the provided [`ArithmeticOverflow`] option.
    ///
    /// `Constrain` clamps the day to the length of the month. The year and
    /// month are always validated.
    pub fn new_with_overflow(
        year: i32,
        month: u8,
        day: u8,
        overflow: ArithmeticOverflow,
    ) -> ValueResult<Self> {
        if year == 0 {
            return Err(ValueError::range().with_message("there is no year zero"));
        }
        if !(1..=12).contains(&month) {
            return Err(ValueError::range().with_message("month must be within 1 and 12"));
        }
        let year = to_astronomical(year);
        let max_day = proleptic::days_in_month(year, month);
        let day = match overflow {
            ArithmeticOverflow::Constrain => day.clamp(1, max_day),
            ArithmeticOverflow::Reject if (1..=max_day).contains(&day) => day,
            ArithmeticOverflow::Reject => {
                return Err(ValueError::range().with_message("day is not within the month"))
            }
        };
        Self::from_astronomical_ymd(year, month, day)
    }

    /// Creates a `Date` from a day number, where `0` is 0001-01-01.
    pub fn from_days(days: i32) -> ValueResult<Self> {
        if !(Self::MIN.days..=Self::MAX.days).contains(&days) {
            return Err(out_of_range());
        }
        Ok(Self::from_days_unchecked(days))
    }

    /// Returns the day number, where `0` is 0001-01-01.
    #[inline]
    #[must_use]
    pub const fn days(&self) -> i32 {
        self.days
    }

    /// Returns the year, where negative years are BC.
    #[inline]
    #[must_use]
    pub fn year(&self) -> i32 {
        // The supported range keeps every year within `i32`.
        from_astronomical(self.astronomical_year()) as i32
    }

    /// Returns the month of the year, starting at 1.
    #[inline]
    #[must_use]
    pub fn month(&self) -> u8 {
        proleptic::ymd_from_days(i64::from(self.days)).1
    }

    /// Returns the day of the month, starting at 1.
    #[inline]
    #[must_use]
    pub fn day(&self) -> u8 {
        proleptic::ymd_from_days(i64::from(self.days)).2
    }

    /// Returns the day of the year, starting at 1.
    #[inline]
    #[must_use]
    pub fn day_of_year(&self) -> u16 {
        proleptic::year_and_ordinal_from_days(i64::from(self.days)).1 + 1
    }

    /// Returns the day of the week, where Sunday is `0` and Saturday is `6`.
    #[inline]
    #[must_use]
    pub fn day_of_week(&self) -> u8 {
        // 0001-01-01 was a Monday.
        (i64::from(self.days) + 1).rem_euclid(7) as u8
    }

    #[inline]
    #[must_use]
    pub fn is_leap_year(&self) -> bool {
        proleptic::is_leap_year(self.astronomical_year())
    }

    #[inline]
    #[must_use]
    pub fn days_in_month(&self) -> u8 {
        let (year, month, _) = proleptic::ymd_from_days(i64::from(self.days));
        proleptic::days_in_month(year, month)
    }

    #[inline]
    #[must_use]
    pub fn days_in_year(&self) -> u16 {
        proleptic::days_in_year(self.astronomical_year())
    }

    /// Adds a number of days.
    pub fn add_days(&self, days: i32) -> ValueResult<Self> {
        let days = self.days.checked_add(days).ok_or_else(out_of_range)?;
        Self::from_days(days)
    }

    /// Adds a number of months, clamping the day to the length of the
    /// destination month.
    ///
    /// ```rust
    /// use pgvalue_rs::Date;
    ///
    /// let date = Date::try_new(2023, 3, 31).unwrap();
    /// assert_eq!(date.add_months(-1).unwrap().to_string(), "2023-02-28");
    /// assert_eq!(date.add_months(11).unwrap().to_string(), "2024-02-29");
    /// ```
    pub fn add_months(&self, months: i32) -> ValueResult<Self> {
        let (year, month, day) = proleptic::ymd_from_days(i64::from(self.days));
        let index = year * 12 + i64::from(month) - 1 + i64::from(months);
        let year = index.div_euclid(12);
        let month = index.rem_euclid(12) as u8 + 1;
        let day = day.min(proleptic::days_in_month(year, month));
        Self::from_astronomical_ymd(year, month, day)
    }

    /// Adds a number of years, skipping year zero and clamping February 29th
    /// to February 28th in common years.
    ///
    /// ```rust
    /// use pgvalue_rs::Date;
    ///
    /// let date = Date::try_new(1, 6, 1).unwrap();
    /// assert_eq!(date.add_years(-1).unwrap().to_string(), "0001-06-01 BC");
    /// ```
    pub fn add_years(&self, years: i32) -> ValueResult<Self> {
        let (_, month, day) = proleptic::ymd_from_days(i64::from(self.days));
        let current = i64::from(self.year());
        let mut target = current + i64::from(years);
        if current > 0 && target <= 0 {
            target -= 1;
        } else if current < 0 && target >= 0 {
            target += 1;
        }
        let year = target.to_i32().ok_or_else(out_of_range)?;
        Self::new_with_overflow(year, month, day, ArithmeticOverflow::Constrain)
    }

    /// Adds the month and day components of an interval. The tick
    /// component is ignored.
    pub fn add(&self, interval: &Interval) -> ValueResult<Self> {
        self.add_months(interval.months())?
            .add_days(interval.days())
    }

    /// Subtracts the month and day components of an interval.
    pub fn subtract_interval(&self, interval: &Interval) -> ValueResult<Self> {
        self.add(&interval.negate()?)
    }

    /// Returns the number of days from `other` to `self` as an interval.
    ///
    /// The supported range spans fewer than `i32::MAX` days, so the
    /// difference always fits.
    #[must_use]
    pub fn subtract(&self, other: &Self) -> Interval {
        Interval::from_days(self.days - other.days)
    }

    /// Parses a date, returning `None` on failure.
    ///
    /// The fallback value for a failed parse is [`Date::ERA`].
    pub fn try_parse(source: &str) -> Option<Self> {
        parse_date(source).ok()
    }

    /// Parses optional text, failing with a null input error when absent.
    pub fn parse_nullable(source: Option<&str>) -> ValueResult<Self> {
        let source = source
            .ok_or_else(|| ValueError::null_input().with_message("date text must not be NULL"))?;
        parse_date(source)
    }

    pub(crate) fn formattable(&self) -> (FormattableDate, bool) {
        let (year, month, day) = proleptic::ymd_from_days(i64::from(self.days));
        let year = from_astronomical(year);
        (
            FormattableDate(year.unsigned_abs() as u32, month, day),
            year < 0,
        )
    }
}

// ==== Trait impls ====

impl Writeable for Date {
    fn write_to<W: core::fmt::Write + ?Sized>(&self, sink: &mut W) -> core::fmt::Result {
        let (date, bc) = self.formattable();
        date.write_to(sink)?;
        write_era(bc, sink)
    }

    fn writeable_length_hint(&self) -> LengthHint {
        let (date, bc) = self.formattable();
        date.writeable_length_hint() + LengthHint::exact(if bc { 3 } else { 0 })
    }
}

impl_display_with_writeable!(Date);

impl FromStr for Date {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_date(s)
    }
}

// ==== Test land ====

#[cfg(test)]
mod tests {
    use alloc::string::ToString;
    use core::str::FromStr;

    use super::Date;
    use crate::{error::ErrorKind, options::ArithmeticOverflow, Interval};

    #[test]
    fn ymd_round_trip() {
        for year in (-4713..=-1).chain(1..=2500).step_by(7) {
            for month in 1..=12 {
                for day in [1, 15, 28] {
                    let date = Date::try_new(year, month, day).unwrap();
                    assert_eq!(
                        (date.year(), date.month(), date.day()),
                        (year, month, day),
                        "{date:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn leap_years_without_year_zero() {
        // 1 BC, 5 BC and 401 BC are leap years.
        for year in [-1, -5, -401, 4, 2000, 2024] {
            assert!(Date::try_new(year, 2, 29).is_ok(), "{year}");
        }
        for year in [-2, -4, -101, 1, 1900, 2023] {
            assert_eq!(
                Date::try_new(year, 2, 29).unwrap_err().kind(),
                ErrorKind::Range,
                "{year}"
            );
        }
        assert!(Date::try_new(-1, 1, 1).unwrap().is_leap_year());
        assert_eq!(Date::try_new(-1, 1, 1).unwrap().days_in_year(), 366);
        assert_eq!(Date::try_new(1900, 2, 1).unwrap().days_in_month(), 28);
    }

    #[test]
    fn era_boundary() {
        let bc = Date::try_new(-1, 12, 31).unwrap();
        assert_eq!(bc.days(), -1);
        assert_eq!(bc.add_days(1).unwrap(), Date::ERA);
        assert_eq!(Date::ERA.year(), 1);
        assert_eq!(Date::from_days(-366).unwrap().to_string(), "0001-01-01 BC");
    }

    #[test]
    fn epochs_and_limits() {
        assert_eq!(Date::try_new(1970, 1, 1).unwrap(), Date::UNIX_EPOCH);
        assert_eq!(Date::try_new(2000, 1, 1).unwrap(), Date::POSTGRES_EPOCH);
        assert_eq!(Date::MIN.days(), -1_721_426);
        assert_eq!(Date::MAX.days(), 2_145_762_067);
        assert_eq!(Date::MIN.to_string(), "4714-11-24 BC");
        assert_eq!(Date::MAX.to_string(), "5874897-12-31");
        assert_eq!(
            Date::MAX.add_days(1).unwrap_err().kind(),
            ErrorKind::Range
        );
        assert_eq!(
            Date::MIN.add_days(-1).unwrap_err().kind(),
            ErrorKind::Range
        );
        assert_eq!(
            Date::try_new(-4714, 11, 23).unwrap_err().kind(),
            ErrorKind::Range
        );
        assert!(Date::MAX.subtract(&Date::MIN).days() > 0);
    }

    #[test]
    fn calendar_fields() {
        let date = Date::try_new(2024, 3, 1).unwrap();
        assert_eq!(date.day_of_year(), 61);
        // 2024-03-01 was a Friday.
        assert_eq!(date.day_of_week(), 5);
        assert_eq!(Date::try_new(2024, 1, 7).unwrap().day_of_week(), 0);
        assert_eq!(Date::ERA.day_of_week(), 1);
    }

    #[test]
    fn overflow_options() {
        let constrained = Date::new_with_overflow(2023, 2, 31, ArithmeticOverflow::Constrain);
        assert_eq!(constrained.unwrap().to_string(), "2023-02-28");
        let rejected = Date::new_with_overflow(2023, 2, 31, ArithmeticOverflow::Reject);
        assert_eq!(rejected.unwrap_err().kind(), ErrorKind::Range);
        assert_eq!(
            Date::new_with_overflow(2023, 13, 1, ArithmeticOverflow::Constrain)
                .unwrap_err()
                .kind(),
            ErrorKind::Range
        );
    }

    #[test]
    fn add_months_clamps() {
        let date = Date::try_new(2024, 1, 31).unwrap();
        assert_eq!(date.add_months(1).unwrap().to_string(), "2024-02-29");
        assert_eq!(date.add_months(13).unwrap().to_string(), "2025-02-28");
        assert_eq!(date.add_months(-2).unwrap().to_string(), "2023-11-30");
        assert_eq!(date.add_months(0).unwrap(), date);

        // Month arithmetic crosses the era without a year zero.
        let jan = Date::try_new(1, 1, 15).unwrap();
        assert_eq!(jan.add_months(-1).unwrap().to_string(), "0001-12-15 BC");
        assert_eq!(
            Date::try_new(-1, 12, 15).unwrap().add_months(1).unwrap(),
            jan
        );
    }

    #[test]
    fn add_years_skips_year_zero() {
        let date = Date::try_new(2, 3, 4).unwrap();
        assert_eq!(date.add_years(-2).unwrap().year(), -1);
        assert_eq!(date.add_years(-3).unwrap().year(), -2);

        let bc = Date::try_new(-2, 3, 4).unwrap();
        assert_eq!(bc.add_years(2).unwrap().year(), 1);
        assert_eq!(bc.add_years(1).unwrap().year(), -1);

        let leap_day = Date::try_new(2024, 2, 29).unwrap();
        assert_eq!(leap_day.add_years(1).unwrap().to_string(), "2025-02-28");
        assert_eq!(leap_day.add_years(4).unwrap().to_string(), "2028-02-29");

        assert_eq!(
            Date::MAX.add_years(1).unwrap_err().kind(),
            ErrorKind::Range
        );
    }

    #[test]
    fn interval_arithmetic() {
        let date = Date::try_new(2024, 1, 31).unwrap();
        let interval = Interval::new(1, 1, 123);
        assert_eq!(date.add(&interval).unwrap().to_string(), "2024-03-01");
        assert_eq!(
            date.subtract_interval(&Interval::from_days(31)).unwrap().to_string(),
            "2023-12-31"
        );

        let later = Date::try_new(2024, 3, 1).unwrap();
        assert_eq!(later.subtract(&date), Interval::from_days(30));
        assert_eq!(date.subtract(&later), Interval::from_days(-30));
    }

    #[test]
    fn parse_and_format() {
        let date = Date::from_str("2024-07-04").unwrap();
        assert_eq!(date.to_string(), "2024-07-04");
        assert_eq!(Date::from_str("0753-04-21 BC").unwrap().year(), -753);
        assert_eq!(Date::from_str("12345-01-01").unwrap().to_string(), "12345-01-01");
        assert_eq!(Date::from_str("7/4/2024").unwrap_err().kind(), ErrorKind::Format);
        assert_eq!(Date::try_parse("bogus").unwrap_or_default(), Date::ERA);
        assert_eq!(
            Date::parse_nullable(None).unwrap_err().kind(),
            ErrorKind::NullInput
        );
    }
}
