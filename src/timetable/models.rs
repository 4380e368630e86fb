use serde::{Deserialize, Serialize};

use crate::{
    shared::{Coordinate, Duration, Time},
    timetable,
};

/// One raw line of the connection table. Columns not listed here are ignored.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct TimetableRow {
    pub company: String,
    pub line: String,
    pub departure_time: String,
    pub arrival_time: String,
    pub start_stop: String,
    pub end_stop: String,
    pub start_stop_lat: f64,
    pub start_stop_lon: f64,
    pub end_stop_lat: f64,
    pub end_stop_lon: f64,
}

/// A timetable row with its times converted to minutes since midnight.
#[derive(Debug, Clone)]
pub struct TimetableEntry {
    pub company: String,
    pub line: String,
    pub departure_time: Time,
    pub arrival_time: Time,
    pub start_stop: String,
    pub end_stop: String,
    pub start_coordinate: Coordinate,
    pub end_coordinate: Coordinate,
}

impl TimetableEntry {
    pub fn travel_time(&self) -> Duration {
        self.arrival_time - self.departure_time
    }

    pub(crate) fn parse(row_idx: usize, row: TimetableRow) -> Result<Self, timetable::Error> {
        let departure_time = parse_time(row_idx, &row.departure_time)?;
        let arrival_time = parse_time(row_idx, &row.arrival_time)?;
        Ok(Self {
            company: row.company,
            line: row.line,
            departure_time,
            arrival_time,
            start_stop: row.start_stop,
            end_stop: row.end_stop,
            start_coordinate: Coordinate::new(row.start_stop_lat, row.start_stop_lon),
            end_coordinate: Coordinate::new(row.end_stop_lat, row.end_stop_lon),
        })
    }
}

fn parse_time(row: usize, value: &str) -> Result<Time, timetable::Error> {
    Time::from_hms(value).ok_or_else(|| timetable::Error::InvalidTime {
        row,
        value: value.to_string(),
    })
}
