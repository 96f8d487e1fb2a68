use std::collections::BTreeMap;

use foundation::{CoordKey, LatLng};
use serde::Serialize;

use crate::model::{DayEntry, DayNumber};

/// One pin per distinct (rounded) location along the route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteMarker {
    /// Position of the first day that visited this location.
    pub position: LatLng,
    /// Every day at this location, ascending.
    pub days: Vec<DayNumber>,
    /// `D{first}` or `D{first}-{last}`.
    pub label: String,
}

/// Groups days by [`CoordKey`], keeping first-occurrence order of locations.
pub fn route_markers(entries: &[DayEntry]) -> Vec<RouteMarker> {
    let mut slots: BTreeMap<CoordKey, usize> = BTreeMap::new();
    let mut grouped: Vec<(LatLng, Vec<DayNumber>)> = Vec::new();

    for entry in entries {
        match slots.get(&entry.position.key()) {
            Some(&slot) => grouped[slot].1.push(entry.day),
            None => {
                slots.insert(entry.position.key(), grouped.len());
                grouped.push((entry.position, vec![entry.day]));
            }
        }
    }

    grouped
        .into_iter()
        .map(|(position, mut days)| {
            days.sort_unstable();
            let label = day_range_label(&days);
            RouteMarker {
                position,
                days,
                label,
            }
        })
        .collect()
}

/// Polyline vertices in day order. Revisited places appear more than once.
pub fn route_path(entries: &[DayEntry]) -> Vec<LatLng> {
    entries.iter().map(|e| e.position).collect()
}

fn day_range_label(sorted_days: &[DayNumber]) -> String {
    match sorted_days {
        [] => String::new(),
        [only] => format!("D{only}"),
        [first, .., last] => format!("D{first}-{last}"),
    }
}
