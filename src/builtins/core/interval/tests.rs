use alloc::string::ToString;
use alloc::vec::Vec;
use core::{cmp::Ordering, str::FromStr, time::Duration};

use crate::{
    error::ErrorKind, Interval, Sign, DAYS_PER_MONTH, TICKS_PER_DAY, TICKS_PER_HOUR,
    TICKS_PER_MINUTE, TICKS_PER_SECOND,
};

fn samples() -> Vec<Interval> {
    let mut samples = Vec::new();
    for months in [-14, -1, 0, 1, 25] {
        for days in [-45, -1, 0, 1, 31] {
            for ticks in [
                -TICKS_PER_DAY * 3 - 7,
                -TICKS_PER_HOUR,
                -1,
                0,
                1,
                TICKS_PER_MINUTE * 90 + 5_000_000,
                TICKS_PER_DAY + TICKS_PER_SECOND,
            ] {
                samples.push(Interval::new(months, days, ticks));
            }
        }
    }
    samples
}

#[test]
fn interval_is_not_normalized_on_construction() {
    let interval = Interval::new(0, 40, TICKS_PER_DAY * 2);
    assert_eq!(interval.months(), 0);
    assert_eq!(interval.days(), 40);
    assert_eq!(interval.ticks(), TICKS_PER_DAY * 2);
}

#[test]
fn thirty_day_month_ordering() {
    assert_eq!(
        Interval::from_days(40).compare(&Interval::from_months(1)),
        Ordering::Greater
    );
    assert_eq!(
        Interval::from_days(30).compare(&Interval::from_months(1)),
        Ordering::Equal
    );
    assert_eq!(
        Interval::new(1, 10, 0).compare(&Interval::from_months(1)),
        Ordering::Greater
    );
    assert_eq!(
        Interval::new(0, 29, TICKS_PER_DAY - 1).compare(&Interval::from_months(1)),
        Ordering::Less
    );
    assert_eq!(
        Interval::from_ticks(TICKS_PER_DAY).compare(&Interval::from_days(1)),
        Ordering::Equal
    );
}

#[test]
fn ordering_follows_unjustified_total() {
    let samples = samples();
    for a in &samples {
        for b in &samples {
            let expected = a
                .unjustify_interval()
                .unwrap()
                .ticks()
                .cmp(&b.unjustify_interval().unwrap().ticks());
            assert_eq!(a.compare(b), expected, "{a:?} vs {b:?}");
        }
    }
}

#[test]
fn hash_agrees_with_equal_totals() {
    use core::hash::{Hash, Hasher};

    #[derive(Default)]
    struct Recorder(Vec<u8>);

    impl Hasher for Recorder {
        fn finish(&self) -> u64 {
            0
        }

        fn write(&mut self, bytes: &[u8]) {
            self.0.extend_from_slice(bytes);
        }
    }

    let hash = |interval: Interval| {
        let mut recorder = Recorder::default();
        interval.hash(&mut recorder);
        recorder.0
    };

    assert_eq!(hash(Interval::from_months(1)), hash(Interval::from_days(30)));
    assert_eq!(
        hash(Interval::from_days(1)),
        hash(Interval::from_ticks(TICKS_PER_DAY))
    );
    assert_ne!(hash(Interval::from_days(1)), hash(Interval::from_days(2)));
}

#[test]
fn justify_and_unjustify_days() {
    let interval = Interval::new(0, 1, TICKS_PER_DAY * 2 + TICKS_PER_HOUR);
    let justified = interval.justify_days().unwrap();
    assert_eq!(justified, Interval::new(0, 3, TICKS_PER_HOUR));
    assert_eq!(
        justified.unjustify_days().unwrap(),
        Interval::new(0, 0, TICKS_PER_DAY * 3 + TICKS_PER_HOUR)
    );

    // Truncating division keeps the sign of the tick component.
    let negative = Interval::from_ticks(-(TICKS_PER_DAY + TICKS_PER_HOUR));
    assert_eq!(
        negative.justify_days().unwrap(),
        Interval::new(0, -1, -TICKS_PER_HOUR)
    );
}

#[test]
fn justify_and_unjustify_months() {
    let interval = Interval::new(1, 65, 0);
    let justified = interval.justify_months().unwrap();
    assert_eq!(justified, Interval::new(3, 5, 0));
    assert_eq!(justified.unjustify_months().unwrap(), Interval::new(0, 95, 0));

    assert_eq!(
        Interval::from_days(-31).justify_months().unwrap(),
        Interval::new(-1, -1, 0)
    );
}

#[test]
fn justify_interval_moves_months_before_days() {
    let interval = Interval::new(0, 29, TICKS_PER_DAY + TICKS_PER_MINUTE);
    // Months are justified first, so the carried day stays a day.
    assert_eq!(
        interval.justify_interval().unwrap(),
        Interval::new(0, 30, TICKS_PER_MINUTE)
    );
    assert_eq!(
        Interval::new(0, 31, TICKS_PER_HOUR)
            .justify_interval()
            .unwrap(),
        Interval::new(1, 1, TICKS_PER_HOUR)
    );
}

#[test]
fn unjustify_interval_folds_everything() {
    let interval = Interval::new(2, 3, 4);
    let expected = 4 + 3 * TICKS_PER_DAY + 2 * i64::from(DAYS_PER_MONTH) * TICKS_PER_DAY;
    assert_eq!(
        interval.unjustify_interval().unwrap(),
        Interval::from_ticks(expected)
    );
    assert_eq!(
        Interval::new(i32::MAX, i32::MAX, i64::MAX)
            .unjustify_interval()
            .unwrap_err()
            .kind(),
        ErrorKind::Range
    );
}

#[test]
fn canonicalize_is_idempotent() {
    for interval in samples() {
        let once = interval.canonicalize().unwrap();
        assert_eq!(once.months(), 0);
        assert!(once.ticks().abs() < TICKS_PER_DAY, "{once:?}");
        assert_eq!(once.canonicalize().unwrap(), once);
        assert_eq!(once.compare(&interval), Ordering::Equal);
    }
}

#[test]
fn duration_uses_the_total_sign() {
    let positive_total = Interval::new(1, -29, -TICKS_PER_HOUR);
    assert_eq!(positive_total.duration().unwrap(), positive_total);

    let negative_total = Interval::new(-1, 29, TICKS_PER_HOUR);
    assert_eq!(
        negative_total.duration().unwrap(),
        Interval::new(1, -29, -TICKS_PER_HOUR)
    );

    for interval in samples() {
        assert_ne!(interval.duration().unwrap().sign(), Sign::Negative);
    }
}

#[test]
fn checked_arithmetic() {
    let a = Interval::new(1, 2, 3);
    let b = Interval::new(4, -5, 6);
    assert_eq!(a.add(&b).unwrap(), Interval::new(5, -3, 9));
    assert_eq!(a.subtract(&b).unwrap(), Interval::new(-3, 7, -3));
    assert_eq!(a.negate().unwrap(), Interval::new(-1, -2, -3));

    assert_eq!(
        Interval::from_months(i32::MAX)
            .add(&Interval::from_months(1))
            .unwrap_err()
            .kind(),
        ErrorKind::Range
    );
    assert_eq!(
        Interval::from_ticks(i64::MIN).negate().unwrap_err().kind(),
        ErrorKind::Range
    );
}

#[test]
fn clock_accessors() {
    let interval = Interval::from_parts(2, 26, 3, 4, 5).unwrap();
    assert_eq!(interval.days(), 2);
    assert_eq!(interval.hours(), 26);
    assert_eq!(interval.minutes(), 3);
    assert_eq!(interval.seconds(), 4);
    assert_eq!(interval.subsecond_ticks(), 5);

    let negative = Interval::from_ticks(-(TICKS_PER_HOUR + TICKS_PER_SECOND));
    assert_eq!(negative.hours(), -1);
    assert_eq!(negative.minutes(), 0);
    assert_eq!(negative.seconds(), -1);
}

#[test]
fn core_duration_conversions() {
    let interval = Interval::try_from_duration(Duration::new(90, 150)).unwrap();
    assert_eq!(interval, Interval::from_ticks(90 * TICKS_PER_SECOND + 1));

    let duration = Interval::new(0, 1, 5).to_duration().unwrap();
    assert_eq!(duration, Duration::new(86_400, 500));

    assert_eq!(
        Interval::from_ticks(-1).to_duration().unwrap_err().kind(),
        ErrorKind::Range
    );
    assert_eq!(
        Interval::try_from_duration(Duration::MAX).unwrap_err().kind(),
        ErrorKind::Range
    );
}

#[test]
fn formatting() {
    let cases = [
        (Interval::ZERO, "00:00:00"),
        (Interval::from_months(1), "1 mon"),
        (Interval::from_months(-1), "-1 mons"),
        (Interval::new(14, 3, 0), "14 mons 3 days"),
        (Interval::from_days(1), "1 day"),
        (
            Interval::new(0, -1, TICKS_PER_HOUR * 2 + TICKS_PER_SECOND / 4),
            "-1 days +02:00:00.25",
        ),
        (
            Interval::new(-2, -3, TICKS_PER_MINUTE),
            "-2 mons -3 days +00:01:00",
        ),
        (Interval::from_ticks(-TICKS_PER_MINUTE), "-00:01:00"),
        (Interval::from_ticks(TICKS_PER_DAY * 2), "48:00:00"),
    ];
    for (interval, expected) in cases {
        assert_eq!(interval.to_string(), expected);
    }
}

#[test]
fn format_then_parse_preserves_total() {
    for interval in samples() {
        let text = interval.to_string();
        let parsed = Interval::from_str(&text).unwrap();
        assert_eq!(parsed.total_ticks(), interval.total_ticks(), "{text}");
        assert_eq!(parsed, interval, "{text}");
    }
}

#[test]
fn try_parse_and_nullable() {
    assert_eq!(
        Interval::try_parse("1 day").unwrap_or_default(),
        Interval::from_days(1)
    );
    assert_eq!(
        Interval::try_parse("one day").unwrap_or_default(),
        Interval::ZERO
    );
    assert_eq!(
        Interval::parse_nullable(None).unwrap_err().kind(),
        ErrorKind::NullInput
    );
    assert_eq!(
        Interval::parse_nullable(Some("2 mons")).unwrap(),
        Interval::from_months(2)
    );
}
