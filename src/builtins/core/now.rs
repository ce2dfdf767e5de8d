//! The `Now` component

use crate::{
    builtins::core::{Timestamp, ZoneOffset, ZonedTimestamp},
    instant::Instant,
    ValueResult,
};

/// Access to the current time.
///
/// The `*_with_system_instant` methods take an instant supplied by the
/// caller; the others read the host clock and require the `sys` feature.
pub struct Now;

impl Now {
    /// Returns the UTC `Timestamp` for a system instant.
    #[must_use]
    pub fn timestamp_utc_with_system_instant(instant: Instant) -> Timestamp {
        Timestamp::from_instant(instant)
    }

    /// Returns the `ZonedTimestamp` for a system instant as observed at
    /// `offset`.
    pub fn zoned_timestamp_with_system_instant(
        instant: Instant,
        offset: ZoneOffset,
    ) -> ValueResult<ZonedTimestamp> {
        ZonedTimestamp::from_instant(instant).at_zone(offset)
    }
}

#[cfg(feature = "sys")]
impl Now {
    /// Returns the current instant
    ///
    /// Enable with the `sys` feature flag.
    pub fn instant() -> ValueResult<Instant> {
        crate::sys::get_system_instant()
    }

    /// Returns the current UTC time as a `Timestamp`.
    ///
    /// Enable with the `sys` feature flag.
    pub fn timestamp_utc() -> ValueResult<Timestamp> {
        Ok(Self::timestamp_utc_with_system_instant(Self::instant()?))
    }

    /// Returns the current time as a `ZonedTimestamp` at `+00`.
    ///
    /// Enable with the `sys` feature flag.
    pub fn zoned_timestamp_utc() -> ValueResult<ZonedTimestamp> {
        Self::zoned_timestamp_with_system_instant(Self::instant()?, ZoneOffset::UTC)
    }
}
