//! crates/guidance_core/src/prayer.rs
//!
//! Next-prayer computation over the five "HH:MM" daily timings.
//!
//! Times are compared in whatever local clock the caller and the timings
//! share; no timezone conversion is performed. This is only correct when
//! the server and the queried location share a timezone (known scope
//! limitation).

use chrono::NaiveTime;

use crate::domain::DailyTimings;

/// The result of scanning today's timings against the current clock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextPrayer {
    /// The first prayer whose time is strictly later than now.
    Upcoming {
        name: &'static str,
        hours: i64,
        minutes: i64,
    },
    /// Every prayer of the day has already passed.
    AllPassed,
}

impl NextPrayer {
    /// Human-readable form, e.g. "Asr in 2h 14m".
    pub fn describe(&self) -> String {
        match self {
            NextPrayer::Upcoming {
                name,
                hours,
                minutes,
            } => format!("{name} in {hours}h {minutes}m"),
            NextPrayer::AllPassed => "All prayers for today have passed".to_string(),
        }
    }
}

/// Scans the five prayers in fixed daily order and reports the first one
/// strictly later than `now`. Timings that do not parse as "HH:MM" are
/// skipped.
pub fn next_prayer(timings: &DailyTimings, now: NaiveTime) -> NextPrayer {
    for (name, time_str) in timings.ordered() {
        let Ok(time) = NaiveTime::parse_from_str(time_str, "%H:%M") else {
            continue;
        };
        if time > now {
            let remaining = time - now;
            let hours = remaining.num_hours();
            let minutes = remaining.num_minutes() - hours * 60;
            return NextPrayer::Upcoming {
                name,
                hours,
                minutes,
            };
        }
    }
    NextPrayer::AllPassed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timings() -> DailyTimings {
        DailyTimings {
            fajr: "05:12".to_string(),
            dhuhr: "12:30".to_string(),
            asr: "15:45".to_string(),
            maghrib: "18:10".to_string(),
            isha: "19:40".to_string(),
        }
    }

    fn at(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn first_upcoming_prayer_is_reported() {
        let next = next_prayer(&timings(), at(13, 0));
        assert_eq!(
            next,
            NextPrayer::Upcoming {
                name: "Asr",
                hours: 2,
                minutes: 45
            }
        );
        assert_eq!(next.describe(), "Asr in 2h 45m");
    }

    #[test]
    fn early_morning_points_at_fajr() {
        let next = next_prayer(&timings(), at(3, 0));
        assert_eq!(
            next,
            NextPrayer::Upcoming {
                name: "Fajr",
                hours: 2,
                minutes: 12
            }
        );
    }

    #[test]
    fn exact_prayer_time_is_not_upcoming() {
        // "Strictly later than now": at 12:30 sharp, Dhuhr has started.
        let next = next_prayer(&timings(), at(12, 30));
        assert!(matches!(next, NextPrayer::Upcoming { name: "Asr", .. }));
    }

    #[test]
    fn all_passed_after_isha() {
        assert_eq!(next_prayer(&timings(), at(23, 0)), NextPrayer::AllPassed);
    }

    #[test]
    fn unparseable_timings_are_skipped() {
        let mut t = timings();
        t.asr = "not a time".to_string();
        let next = next_prayer(&t, at(13, 0));
        assert!(matches!(next, NextPrayer::Upcoming { name: "Maghrib", .. }));
    }
}
