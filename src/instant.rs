//! This module implements `Instant`, an absolute point on the UTC time line.

use crate::{error::ErrorMessage, ValueError, ValueResult, TICKS_PER_DAY};
use num_traits::ToPrimitive;

/// Ticks from 0001-01-01T00:00:00Z to 1970-01-01T00:00:00Z.
const UNIX_EPOCH_TICKS: i64 = 719_162 * TICKS_PER_DAY;

/// An absolute instant in ticks of 100 nanoseconds since
/// 0001-01-01T00:00:00Z.
///
/// Instants are limited to the window from 0001-01-01 to the last tick of
/// 9999-12-31. The two ends of the window stand in for negative and
/// positive infinity when a timestamp is converted to or from an instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Instant(i64);

impl Instant {
    /// The first representable instant, which maps to `-infinity`.
    pub const MIN: Self = Self(0);
    /// The last representable instant, which maps to `infinity`.
    pub const MAX: Self = Self(3_155_378_975_999_999_999);

    /// Creates an `Instant` from ticks since 0001-01-01T00:00:00Z.
    pub fn try_from_ticks(ticks: i64) -> ValueResult<Self> {
        if !(Self::MIN.0..=Self::MAX.0).contains(&ticks) {
            return Err(ValueError::range().with_enum(ErrorMessage::InstantOutOfRange));
        }
        Ok(Self(ticks))
    }

    pub(crate) fn try_from_i128(ticks: i128) -> ValueResult<Self> {
        let ticks = ticks
            .to_i64()
            .ok_or_else(|| ValueError::range().with_enum(ErrorMessage::InstantOutOfRange))?;
        Self::try_from_ticks(ticks)
    }

    /// Creates an `Instant` from ticks since the Unix epoch.
    pub fn from_unix_ticks(ticks: i64) -> ValueResult<Self> {
        Self::try_from_i128(i128::from(ticks) + i128::from(UNIX_EPOCH_TICKS))
    }

    /// Returns the ticks since 0001-01-01T00:00:00Z.
    #[inline]
    #[must_use]
    pub const fn ticks(&self) -> i64 {
        self.0
    }

    /// Returns the ticks since the Unix epoch.
    #[inline]
    #[must_use]
    pub const fn unix_ticks(&self) -> i64 {
        self.0 - UNIX_EPOCH_TICKS
    }

    /// Returns the whole days since 0001-01-01 and the ticks into that day.
    #[inline]
    pub(crate) const fn day_and_ticks(&self) -> (i32, i64) {
        // The window ends before day 3_652_059.
        ((self.0 / TICKS_PER_DAY) as i32, self.0 % TICKS_PER_DAY)
    }
}

#[cfg(test)]
mod tests {
    use super::Instant;
    use crate::{error::ErrorKind, TICKS_PER_DAY, TICKS_PER_SECOND};

    #[test]
    fn window() {
        assert_eq!(Instant::MAX.ticks() + 1, 3_652_059 * TICKS_PER_DAY);
        assert!(Instant::try_from_ticks(0).is_ok());
        assert_eq!(
            Instant::try_from_ticks(-1).unwrap_err().kind(),
            ErrorKind::Range
        );
        assert_eq!(
            Instant::try_from_ticks(Instant::MAX.ticks() + 1)
                .unwrap_err()
                .kind(),
            ErrorKind::Range
        );
    }

    #[test]
    fn unix_ticks() {
        let epoch = Instant::from_unix_ticks(0).unwrap();
        assert_eq!(epoch.ticks(), 621_355_968_000_000_000);
        assert_eq!(epoch.unix_ticks(), 0);

        let instant = Instant::from_unix_ticks(-TICKS_PER_SECOND).unwrap();
        assert_eq!(instant.day_and_ticks(), (719_161, TICKS_PER_DAY - TICKS_PER_SECOND));
        assert!(Instant::from_unix_ticks(i64::MAX).is_err());
    }
}
