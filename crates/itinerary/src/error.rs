use thiserror::Error;

use crate::model::DayNumber;

/// Reasons an itinerary dataset is rejected at load time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ItineraryError {
    #[error("failed to read itinerary file '{path}': {message}")]
    Io { path: String, message: String },
    #[error("itinerary JSON is malformed: {0}")]
    Json(String),
    #[error("itinerary has no days")]
    Empty,
    #[error("day numbers must be contiguous from 1: expected day {expected}, found {found}")]
    NonContiguousDay { expected: DayNumber, found: DayNumber },
    #[error("day {day} has a target zoom of 0")]
    ZeroZoom { day: DayNumber },
    #[error("day {day}: '{name}' has rating {rating} outside 0..=5")]
    RatingOutOfRange {
        day: DayNumber,
        name: String,
        rating: String,
    },
    #[error("day {day}: coordinate of '{what}' is not a valid position")]
    InvalidCoordinate { day: DayNumber, what: String },
}

impl From<serde_json::Error> for ItineraryError {
    fn from(err: serde_json::Error) -> Self {
        ItineraryError::Json(err.to_string())
    }
}
