/// Proleptic Gregorian Calculations
///
/// Days before a year are computed by decomposing the elapsed years into
/// blocks of 400, 100, 4 and 1 years. Euclidean division keeps the same
/// decomposition valid for years before 1 CE, so the leap year 1 BCE
/// (astronomical year 0) needs no special casing.
///
/// | Block | Days |
/// |-------|------|
/// | 400 years | 146,097 |
/// | 100 years | 36,524 |
/// | 4 years | 1,461 |
/// | 1 year | 365 |
///
pub const DAYS_IN_400_YEARS: i64 = 146_097;
pub const DAYS_IN_100_YEARS: i64 = 36_524;
pub const DAYS_IN_4_YEARS: i64 = 1_461;
pub const DAYS_IN_COMMON_YEAR: i64 = 365;

/// Days elapsed in a common year before the first of each month, with the
/// year length as the final entry.
pub const COMMON_MONTH_OFFSETS: [u16; 13] =
    [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334, 365];

/// Days elapsed in a leap year before the first of each month, with the
/// year length as the final entry.
pub const LEAP_MONTH_OFFSETS: [u16; 13] =
    [0, 31, 60, 91, 121, 152, 182, 213, 244, 274, 305, 335, 366];

/// Returns whether the astronomical `year` is a leap year.
pub const fn is_leap_year(year: i64) -> bool {
    year.rem_euclid(4) == 0 && (year.rem_euclid(100) != 0 || year.rem_euclid(400) == 0)
}

pub const fn days_in_year(year: i64) -> u16 {
    if is_leap_year(year) {
        366
    } else {
        365
    }
}

/// Returns the cumulative month table for the astronomical `year`.
pub const fn month_offsets(year: i64) -> &'static [u16; 13] {
    if is_leap_year(year) {
        &LEAP_MONTH_OFFSETS
    } else {
        &COMMON_MONTH_OFFSETS
    }
}

/// Returns the number of days in `month` (1..=12) of the astronomical `year`.
pub const fn days_in_month(year: i64, month: u8) -> u8 {
    let offsets = month_offsets(year);
    let index = month as usize;
    (offsets[index] - offsets[index - 1]) as u8
}

/// Returns the day number of January 1st of the astronomical `year`.
pub const fn days_before_year(year: i64) -> i64 {
    let elapsed = year - 1;
    let cycles = elapsed.div_euclid(400);
    let rem = elapsed.rem_euclid(400);
    cycles * DAYS_IN_400_YEARS
        + (rem / 100) * DAYS_IN_100_YEARS
        + (rem % 100 / 4) * DAYS_IN_4_YEARS
        + (rem % 4) * DAYS_IN_COMMON_YEAR
}

/// Returns the day number for an astronomical year, a month in 1..=12 and
/// a day of the month.
///
/// The month and day are not validated.
pub const fn days_from_ymd(year: i64, month: u8, day: u8) -> i64 {
    let offsets = month_offsets(year);
    days_before_year(year) + offsets[month as usize - 1] as i64 + day as i64 - 1
}

/// Returns the astronomical year containing `days` together with the
/// zero-based day of that year.
///
/// This is the exact inverse of [`days_before_year`]: the result is the
/// largest year whose first day is not after `days`.
pub const fn year_and_ordinal_from_days(days: i64) -> (i64, u16) {
    let cycles = days.div_euclid(DAYS_IN_400_YEARS);
    let mut rem = days.rem_euclid(DAYS_IN_400_YEARS);

    // The fourth century of a cycle carries the extra leap day.
    let mut centuries = rem / DAYS_IN_100_YEARS;
    if centuries > 3 {
        centuries = 3;
    }
    rem -= centuries * DAYS_IN_100_YEARS;

    let quads = rem / DAYS_IN_4_YEARS;
    rem -= quads * DAYS_IN_4_YEARS;

    // Same for the fourth year of a four year block.
    let mut years = rem / DAYS_IN_COMMON_YEAR;
    if years > 3 {
        years = 3;
    }
    rem -= years * DAYS_IN_COMMON_YEAR;

    let year = cycles * 400 + centuries * 100 + quads * 4 + years + 1;
    (year, rem as u16)
}

/// Returns the month (1..=12) and day of month for a zero-based day of the
/// astronomical `year`.
pub const fn month_day_from_ordinal(year: i64, ordinal: u16) -> (u8, u8) {
    let offsets = month_offsets(year);
    let mut month = 1;
    while month < 12 && offsets[month] <= ordinal {
        month += 1;
    }
    (month as u8, (ordinal - offsets[month - 1] + 1) as u8)
}

/// Returns the astronomical year, month and day for a day number.
pub const fn ymd_from_days(days: i64) -> (i64, u8, u8) {
    let (year, ordinal) = year_and_ordinal_from_days(days);
    let (month, day) = month_day_from_ordinal(year, ordinal);
    (year, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leap_years() {
        assert!(is_leap_year(2000));
        assert!(is_leap_year(2024));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(2023));
        // 1 BCE and 5 BCE
        assert!(is_leap_year(0));
        assert!(is_leap_year(-4));
        assert!(!is_leap_year(-1));
        assert!(!is_leap_year(-100));
        assert!(is_leap_year(-400));
    }

    #[test]
    fn known_days() {
        assert_eq!(days_before_year(1), 0);
        assert_eq!(days_before_year(0), -366);
        assert_eq!(days_before_year(-1), -731);
        assert_eq!(days_before_year(1970), 719_162);
        assert_eq!(days_before_year(2000), 730_119);
        assert_eq!(days_before_year(401), DAYS_IN_400_YEARS);
        assert_eq!(days_before_year(-399), -DAYS_IN_400_YEARS);
    }

    #[test]
    fn year_inverse_matches_block_decomposition() {
        let mut year = -5_000;
        while year <= 5_000 {
            let first = days_before_year(year);
            assert_eq!(year_and_ordinal_from_days(first), (year, 0), "year {year}");
            let last = first + i64::from(days_in_year(year)) - 1;
            assert_eq!(
                year_and_ordinal_from_days(last),
                (year, days_in_year(year) - 1),
                "year {year}"
            );
            assert_eq!(year_and_ordinal_from_days(first - 1).0, year - 1);
            year += 1;
        }
    }

    #[test]
    fn year_inverse_at_block_boundaries() {
        for cycle in [-12_000i64, -400, -100, -4, 0, 4, 100, 400, 5_874_800] {
            for offset in [-1i64, 0, 1] {
                let year = cycle + offset;
                assert_eq!(year_and_ordinal_from_days(days_before_year(year)).0, year);
            }
        }
    }

    #[test]
    fn ymd_round_trip() {
        let mut days = -800_000;
        while days < 800_000 {
            let (year, month, day) = ymd_from_days(days);
            assert!(day <= days_in_month(year, month));
            assert_eq!(days_from_ymd(year, month, day), days);
            days += 17;
        }
    }

    #[test]
    fn month_lengths() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(0, 2), 29);
        assert_eq!(days_in_month(2023, 12), 31);
        assert_eq!(days_in_month(2023, 4), 30);
    }
}
