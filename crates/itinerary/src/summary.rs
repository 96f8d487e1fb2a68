use std::collections::BTreeSet;

use serde::Serialize;

use crate::model::DayEntry;

/// Headline figures shown above the day list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TripSummary {
    pub days: usize,
    pub cities: usize,
    pub countries: usize,
    pub first_date: Option<String>,
    pub last_date: Option<String>,
}

impl TripSummary {
    pub fn from_entries(entries: &[DayEntry]) -> Self {
        let cities: BTreeSet<&str> = entries.iter().map(|e| e.city.as_str()).collect();
        let countries: BTreeSet<&str> = entries.iter().map(|e| e.country.as_str()).collect();
        Self {
            days: entries.len(),
            cities: cities.len(),
            countries: countries.len(),
            first_date: entries.first().map(|e| e.date.clone()),
            last_date: entries.last().map(|e| e.date.clone()),
        }
    }
}
