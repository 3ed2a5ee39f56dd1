//! Call-boundary checks. The scorers trust their input; callers that want
//! defensive behaviour run these first.

use crate::error::CheckInError;
use crate::models::CheckIn;

const RATING_RANGE: std::ops::RangeInclusive<u8> = 1..=5;

pub fn validate_check_in(check_in: &CheckIn) -> Result<(), CheckInError> {
    if check_in.week == 0 {
        return Err(CheckInError::InvalidWeek(check_in.week));
    }

    let ratings = [
        ("headache", Some(check_in.headache)),
        ("swelling", Some(check_in.swelling)),
        ("sleepQuality", Some(check_in.sleep_quality)),
        ("fatigue", Some(check_in.fatigue)),
        ("mood", Some(check_in.mood)),
        ("dizziness", Some(check_in.dizziness)),
        ("activityLevel", check_in.activity_level),
    ];

    for (field, value) in ratings {
        match value {
            Some(value) if !RATING_RANGE.contains(&value) => {
                return Err(CheckInError::RatingOutOfRange {
                    week: check_in.week,
                    field,
                    value,
                });
            }
            _ => {}
        }
    }

    Ok(())
}

/// Confirms `history` is ordered most recent first.
pub fn ensure_descending(history: &[CheckIn]) -> Result<(), CheckInError> {
    match history.windows(2).find(|pair| pair[0].week < pair[1].week) {
        Some(pair) => Err(CheckInError::HistoryNotDescending {
            previous: pair[0].week,
            next: pair[1].week,
        }),
        None => Ok(()),
    }
}

/// Check-ins strictly before `week`, most recent first, ready to hand to the
/// scorers.
pub fn history_before(check_ins: &[CheckIn], week: u32) -> Vec<CheckIn> {
    let mut history: Vec<CheckIn> = check_ins
        .iter()
        .filter(|c| c.week < week)
        .cloned()
        .collect();
    history.sort_by(|a, b| b.week.cmp(&a.week));
    history
}
