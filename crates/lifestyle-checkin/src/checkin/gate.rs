use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::Serialize;

/// Latest hour the check-in can open; larger unlock hours are clamped to it.
pub const LATEST_UNLOCK_HOUR: u32 = 23;

/// Whether the user may start today's check-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum CheckinAvailability {
    Locked { unlocks_at: NaiveDateTime },
    Available,
    Completed,
}

impl CheckinAvailability {
    /// Evaluates the gate for the local wall-clock `now`.
    ///
    /// An existing record wins over the time lock so that a completed day never reads as locked.
    /// An `unlock_hour` past [`LATEST_UNLOCK_HOUR`] is treated as that hour, so the day
    /// always opens and `unlocks_at` never lies in the past.
    pub fn evaluate(now: NaiveDateTime, completed_today: bool, unlock_hour: u32) -> Self {
        if completed_today {
            return Self::Completed;
        }

        let unlock_hour = unlock_hour.min(LATEST_UNLOCK_HOUR);
        if now.hour() < unlock_hour {
            let midnight = now.date().and_time(NaiveTime::MIN);
            return Self::Locked {
                unlocks_at: midnight + Duration::hours(i64::from(unlock_hour)),
            };
        }

        Self::Available
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Locked { .. } => "locked",
            Self::Available => "available",
            Self::Completed => "completed",
        }
    }

    pub fn is_available(self) -> bool {
        matches!(self, Self::Available)
    }
}

/// Calendar day a check-in made at local time `now` is filed under.
pub fn checkin_date(now: NaiveDateTime) -> NaiveDate {
    now.date()
}
