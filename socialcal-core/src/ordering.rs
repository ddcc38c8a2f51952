//! Timeline ordering for mixed personal and public events.
//!
//! Upcoming events come first, then past ones. Within each half the order is
//! reverse-chronological, so the most distant upcoming event leads the list
//! and the most recent past event leads the past half.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};

use crate::event::Dated;

/// Compare two events relative to `now`. Usable directly with `sort_by`.
pub fn compare_by_date<A, B>(a: &A, b: &B, now: DateTime<Utc>) -> Ordering
where
    A: Dated + ?Sized,
    B: Dated + ?Sized,
{
    let date_a = a.date();
    let date_b = b.date();
    let a_upcoming = date_a >= now;
    let b_upcoming = date_b >= now;

    match (a_upcoming, b_upcoming) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => date_b.cmp(&date_a),
    }
}

/// Sort in place with [`compare_by_date`]. The sort is stable.
pub fn sort_by_date<T: Dated>(events: &mut [T], now: DateTime<Utc>) {
    events.sort_by(|a, b| compare_by_date(a, b, now));
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    struct At(DateTime<Utc>);

    impl Dated for At {
        fn date(&self) -> DateTime<Utc> {
            self.0
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 15, 12, 0, 0).unwrap()
    }

    fn days(n: i64) -> At {
        At(now() + Duration::days(n))
    }

    #[test]
    fn test_both_future_later_first() {
        assert_eq!(compare_by_date(&days(1), &days(30), now()), Ordering::Greater);
        assert_eq!(compare_by_date(&days(30), &days(1), now()), Ordering::Less);
    }

    #[test]
    fn test_both_past_most_recent_first() {
        assert_eq!(compare_by_date(&days(-1), &days(-30), now()), Ordering::Less);
        assert_eq!(compare_by_date(&days(-30), &days(-1), now()), Ordering::Greater);
    }

    #[test]
    fn test_future_always_before_past() {
        assert_eq!(compare_by_date(&days(365), &days(-1), now()), Ordering::Less);
        assert_eq!(compare_by_date(&days(-1), &days(365), now()), Ordering::Greater);
    }

    #[test]
    fn test_now_counts_as_upcoming() {
        let exactly_now = At(now());
        assert_eq!(compare_by_date(&exactly_now, &days(-1), now()), Ordering::Less);
        assert_eq!(compare_by_date(&exactly_now, &At(now()), now()), Ordering::Equal);
    }

    #[test]
    fn test_sort_mixed_list() {
        let mut events = vec![days(-10), days(2), days(-1), days(40), days(0)];
        sort_by_date(&mut events, now());

        let offsets: Vec<i64> = events.iter().map(|e| (e.0 - now()).num_days()).collect();
        assert_eq!(offsets, vec![40, 2, 0, -1, -10]);
    }
}
