//! Derived view queries
//!
//! Pure, stateless projections over the current snapshot. Nothing here
//! persists or mutates; screens recompute these on every render.

use crate::models::{Activity, MediaItem, Trip};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// An activity paired with its owning trip
#[derive(Debug, Clone, Copy)]
pub struct ActivityRef<'a> {
    pub trip: &'a Trip,
    pub activity: &'a Activity,
}

/// A media item paired with its owning trip and activity
#[derive(Debug, Clone, Copy)]
pub struct MediaRef<'a> {
    pub trip: &'a Trip,
    pub activity: &'a Activity,
    pub item: &'a MediaItem,
}

/// Calendar marker for a single date
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DayMark {
    pub marked: bool,
    pub selected: bool,
}

/// Activities across all trips scheduled on the given date, sorted
/// ascending by time of day.
pub fn activities_on(trips: &[Trip], date: NaiveDate) -> Vec<ActivityRef<'_>> {
    let mut result = Vec::new();

    for trip in trips {
        if let Some(day) = trip.days.iter().find(|d| d.date == date) {
            for activity in &day.activities {
                result.push(ActivityRef { trip, activity });
            }
        }
    }

    result.sort_by(|a, b| a.activity.time.cmp(&b.activity.time));
    result
}

/// Every media item across all trips, newest capture first
pub fn all_media(trips: &[Trip]) -> Vec<MediaRef<'_>> {
    let mut result = Vec::new();

    for trip in trips {
        for day in &trip.days {
            for activity in &day.activities {
                for item in &activity.media {
                    result.push(MediaRef {
                        trip,
                        activity,
                        item,
                    });
                }
            }
        }
    }

    result.sort_by(|a, b| b.item.timestamp.cmp(&a.item.timestamp));
    result
}

/// Narrow a media projection by owning trip and/or free-text query on
/// the trip or activity title.
pub fn filter_media<'a>(
    media: &[MediaRef<'a>],
    trip_id: Option<&str>,
    query: &str,
) -> Vec<MediaRef<'a>> {
    let query = query.to_lowercase();

    media
        .iter()
        .filter(|m| trip_id.map_or(true, |id| m.trip.id == id))
        .filter(|m| {
            query.is_empty()
                || m.trip.title.to_lowercase().contains(&query)
                || m.activity.title.to_lowercase().contains(&query)
        })
        .copied()
        .collect()
}

/// Free-text filter over trip title and destination, case-insensitive
pub fn filter_trips<'a>(trips: &'a [Trip], query: &str) -> Vec<&'a Trip> {
    let query = query.to_lowercase();

    trips
        .iter()
        .filter(|t| {
            t.title.to_lowercase().contains(&query)
                || t.destination.to_lowercase().contains(&query)
        })
        .collect()
}

/// Calendar markers: every trip-day date is marked, and the selected
/// date carries the selected flag whether or not a trip-day falls on it.
pub fn marked_dates(trips: &[Trip], selected: NaiveDate) -> BTreeMap<NaiveDate, DayMark> {
    let mut marks: BTreeMap<NaiveDate, DayMark> = BTreeMap::new();

    for trip in trips {
        for day in &trip.days {
            marks.entry(day.date).or_default().marked = true;
        }
    }

    marks.entry(selected).or_default().selected = true;
    marks
}
