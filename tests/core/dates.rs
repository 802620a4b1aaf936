use stockwatch::DateRange;

use crate::common::day;

#[test]
fn lookback_subtracts_calendar_days() {
    let w = DateRange::lookback(5, day(2024, 3, 10));
    assert_eq!(w.from, day(2024, 3, 5));
    assert_eq!(w.to, day(2024, 3, 10));
}

#[test]
fn lookback_crosses_leap_day_and_year_boundary() {
    assert_eq!(DateRange::lookback(5, day(2024, 3, 1)).from, day(2024, 2, 25));
    assert_eq!(DateRange::lookback(5, day(2023, 3, 1)).from, day(2023, 2, 24));
    assert_eq!(DateRange::lookback(5, day(2025, 1, 3)).from, day(2024, 12, 29));
}

#[test]
fn params_are_iso_dates() {
    let w = DateRange::lookback(5, day(2024, 1, 9));
    assert_eq!(w.from_param(), "2024-01-04");
    assert_eq!(w.to_param(), "2024-01-09");
    assert_eq!(w.to_string(), "2024-01-04..=2024-01-09");
}

#[test]
fn lookback_from_now_ends_today_utc() {
    let w = DateRange::lookback_from_now(5);
    assert_eq!(w.to, chrono::Utc::now().date_naive());
    assert_eq!((w.to - w.from).num_days(), 5);
}
