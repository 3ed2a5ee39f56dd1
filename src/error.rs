use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckInError {
    #[error("week must be a positive gestational week, got {0}")]
    InvalidWeek(u32),

    #[error("week {week}: {field} rating {value} is outside range [1, 5]")]
    RatingOutOfRange {
        week: u32,
        field: &'static str,
        value: u8,
    },

    #[error("history must be sorted most recent first: week {previous} is followed by week {next}")]
    HistoryNotDescending { previous: u32, next: u32 },
}
