//! This module implements `ZonedTime`, PostgreSQL's `timetz`.

use crate::{
    builtins::core::{Interval, TimeOfDay, ZoneOffset},
    parsers::parse_zoned_time,
    ValueError, ValueResult, TICKS_PER_SECOND,
};
use core::{cmp::Ordering, str::FromStr};
use writeable::{impl_display_with_writeable, LengthHint, Writeable};

/// A time of day with a fixed UTC offset.
///
/// Equality is exact. Ordering compares the UTC normalized time first and
/// breaks ties with the [`ZoneOffset`] order.
#[non_exhaustive]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ZonedTime {
    time: TimeOfDay,
    offset: ZoneOffset,
}

impl ZonedTime {
    #[inline]
    #[must_use]
    pub const fn new(time: TimeOfDay, offset: ZoneOffset) -> Self {
        Self { time, offset }
    }

    #[inline]
    #[must_use]
    pub const fn time(&self) -> TimeOfDay {
        self.time
    }

    #[inline]
    #[must_use]
    pub const fn offset(&self) -> ZoneOffset {
        self.offset
    }

    /// Returns the UTC time in ticks, which may fall outside of one day.
    fn utc_ticks(&self) -> i64 {
        self.time.ticks() - i64::from(self.offset.seconds()) * TICKS_PER_SECOND
    }

    /// Rebases this time onto another offset, wrapping around midnight.
    ///
    /// ```rust
    /// use pgvalue_rs::{ZoneOffset, ZonedTime};
    /// use core::str::FromStr;
    ///
    /// let time = ZonedTime::from_str("23:30:00+00").unwrap();
    /// let rebased = time.at_zone(ZoneOffset::from_str("+02").unwrap());
    /// assert_eq!(rebased.to_string(), "01:30:00+02");
    /// ```
    #[must_use]
    pub fn at_zone(&self, to: ZoneOffset) -> Self {
        if to == self.offset {
            return *self;
        }
        let shift = i64::from(to.seconds() - self.offset.seconds()) * TICKS_PER_SECOND;
        let (time, _) = self.time.add_ticks_with_carry(shift);
        Self::new(time, to)
    }

    /// Adds the tick component of an interval, wrapping around midnight.
    #[must_use]
    pub fn add(&self, interval: &Interval) -> Self {
        Self::new(self.time.add(interval), self.offset)
    }

    #[must_use]
    pub fn compare(&self, other: &Self) -> Ordering {
        self.utc_ticks()
            .cmp(&other.utc_ticks())
            .then_with(|| self.offset.compare(&other.offset))
    }

    /// Parses a zoned time, returning `None` on failure.
    pub fn try_parse(source: &str) -> Option<Self> {
        parse_zoned_time(source).ok()
    }

    /// Parses optional text, failing with a null input error when absent.
    pub fn parse_nullable(source: Option<&str>) -> ValueResult<Self> {
        let source = source
            .ok_or_else(|| ValueError::null_input().with_message("timetz text must not be NULL"))?;
        parse_zoned_time(source)
    }
}

impl PartialOrd for ZonedTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ZonedTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other)
    }
}

impl Writeable for ZonedTime {
    fn write_to<W: core::fmt::Write + ?Sized>(&self, sink: &mut W) -> core::fmt::Result {
        self.time.write_to(sink)?;
        self.offset.write_to(sink)
    }

    fn writeable_length_hint(&self) -> LengthHint {
        self.time.writeable_length_hint() + self.offset.writeable_length_hint()
    }
}

impl_display_with_writeable!(ZonedTime);

impl FromStr for ZonedTime {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_zoned_time(s)
    }
}
