//! # Date Equations
//!
//! Date Equations is a small library of proleptic Gregorian calendar
//! calculations over a signed day number.
//!
//! Day `0` is January 1st of 1 CE. Years are astronomical: year `0` is
//! 1 BCE, year `-1` is 2 BCE, and so on. Converting to and from a
//! calendar with no year zero is left to the caller.
//!
//! ``` rust
//! use date_equations::proleptic;
//!
//! assert_eq!(proleptic::ymd_from_days(0), (1, 1, 1));
//! assert_eq!(proleptic::ymd_from_days(-1), (0, 12, 31));
//! assert_eq!(proleptic::days_from_ymd(2000, 1, 1), 730_119);
//! ```
#![no_std]

pub mod proleptic;

pub use proleptic::{
    days_before_year, days_from_ymd, days_in_month, days_in_year, is_leap_year,
    year_and_ordinal_from_days, ymd_from_days,
};
