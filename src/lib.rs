//! The `pgvalue_rs` crate implements PostgreSQL's extended text values in
//! Rust: dates, times, intervals and timestamps with PostgreSQL's
//! arithmetic rules, and the brace-delimited array literal codec.
//!
//! ```rust
//! use pgvalue_rs::{Date, Interval, Timestamp};
//! use core::str::FromStr;
//!
//! let date = Date::try_new(2024, 1, 31).unwrap();
//! // Month arithmetic clamps to the end of the destination month.
//! assert_eq!(date.add_months(1).unwrap().to_string(), "2024-02-29");
//!
//! // Interval comparisons use 30 day months and 24 hour days.
//! let interval = Interval::from_str("1 mon 10 days").unwrap();
//! assert_eq!(interval.to_string(), "1 mon 10 days");
//!
//! let timestamp = Timestamp::from_str("2024-01-31 23:30:00").unwrap();
//! let later = timestamp.add(&Interval::from_str("01:00:00").unwrap()).unwrap();
//! assert_eq!(later.to_string(), "2024-02-01 00:30:00");
//! ```
//!
//! Values are immutable and `Copy` where possible. Every operation is a
//! pure function of its inputs, so values can be shared freely between
//! threads.
//!
//! The date and time model follows PostgreSQL rather than the calendar:
//! an interval is a `(months, days, ticks)` triple, a month is 30 days
//! whenever an interval is reduced to a single quantity, and years run
//! from 4714 BC to 5874897 AD with no year zero.
#![no_std]
#![cfg_attr(not(test), forbid(clippy::unwrap_used))]
#![allow(
    clippy::module_name_repetitions,
    clippy::redundant_pub_crate,
    clippy::too_many_lines,
    clippy::missing_errors_doc,
    clippy::option_if_let_else,

    // Narrowing casts are range checked before they happen.
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_possible_wrap,
)]

extern crate alloc;
extern crate core;

#[cfg(feature = "std")]
extern crate std;

pub mod array;
pub mod error;
pub mod options;
pub mod parsers;

#[cfg(feature = "sys")]
pub(crate) mod sys;

mod builtins;
mod instant;

use core::cmp::Ordering;

#[doc(inline)]
pub use error::ValueError;

/// The `pgvalue_rs` result type
pub type ValueResult<T> = Result<T, ValueError>;

pub use crate::array::{ArrayCodec, ArrayValue, DenseArray, ElementCodec, Odometer};
pub use crate::builtins::{
    Date, Interval, Now, TimeOfDay, Timestamp, ZoneOffset, ZonedTime, ZonedTimestamp,
};
pub use crate::instant::Instant;

#[doc(hidden)]
#[macro_export]
macro_rules! value_assert {
    ($condition:expr $(,)*) => {
        if !$condition {
            return Err($crate::ValueError::assert());
        }
    };
    ($condition:expr, $($args:tt)+) => {
        if !$condition {
            #[cfg(feature = "log")]
            log::error!($($args)+);
            return Err($crate::ValueError::assert());
        }
    };
}

/// A general Sign type.
#[repr(i8)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Sign {
    #[default]
    Positive = 1,
    Zero = 0,
    Negative = -1,
}

impl From<i64> for Sign {
    fn from(value: i64) -> Self {
        match value.cmp(&0) {
            Ordering::Greater => Self::Positive,
            Ordering::Equal => Self::Zero,
            Ordering::Less => Self::Negative,
        }
    }
}

impl Sign {
    /// Coerces the current `Sign` to be either negative or positive.
    pub(crate) fn as_sign_multiplier(&self) -> i8 {
        if matches!(self, Self::Zero) {
            return 1;
        }
        *self as i8
    }

    #[must_use]
    pub fn is_negative(&self) -> bool {
        matches!(self, Self::Negative)
    }
}

// Relevant numeric constants
/// Ticks per microsecond constant: one tick is 100 nanoseconds.
pub const TICKS_PER_MICROSECOND: i64 = 10;
/// Ticks per millisecond constant: 1e+4
pub const TICKS_PER_MILLISECOND: i64 = TICKS_PER_MICROSECOND * 1_000;
/// Ticks per second constant: 1e+7
pub const TICKS_PER_SECOND: i64 = TICKS_PER_MILLISECOND * 1_000;
/// Ticks per minute constant: 6e+8
pub const TICKS_PER_MINUTE: i64 = TICKS_PER_SECOND * 60;
/// Ticks per hour constant: 3.6e+10
pub const TICKS_PER_HOUR: i64 = TICKS_PER_MINUTE * 60;
/// Ticks per day constant: 8.64e+11
pub const TICKS_PER_DAY: i64 = TICKS_PER_HOUR * 24;
/// The number of days in an interval month.
///
/// This is PostgreSQL's justification rate, not a calendar month.
pub const DAYS_PER_MONTH: i32 = 30;
/// Seconds per day constant
pub(crate) const SECONDS_PER_DAY: i32 = 86_400;
