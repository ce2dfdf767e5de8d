//! The native Rust implementations of the PostgreSQL date and time values.

pub(crate) mod date;
pub(crate) mod interval;
pub(crate) mod now;
pub(crate) mod time;
pub(crate) mod timestamp;
pub(crate) mod timezone;
pub(crate) mod zoned_time;
pub(crate) mod zoned_timestamp;

#[doc(inline)]
pub use date::Date;
#[doc(inline)]
pub use interval::Interval;
#[doc(inline)]
pub use now::Now;
#[doc(inline)]
pub use time::TimeOfDay;
#[doc(inline)]
pub use timestamp::Timestamp;
#[doc(inline)]
pub use timezone::ZoneOffset;
#[doc(inline)]
pub use zoned_time::ZonedTime;
#[doc(inline)]
pub use zoned_timestamp::ZonedTimestamp;
