use crate::{
    graph::{Connection, Station},
    router::RouterConfig,
    shared::time::{Duration, Time},
};

/// How many boarding options the resolver hands back per neighbour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boarding {
    /// Only the earliest admissible departure.
    Earliest,
    /// Every admissible departure in the scan window, earliest first.
    All,
}

/// Turns a station's static departure lists into the departures a rider standing
/// there at a given time can actually take.
#[derive(Debug, Clone)]
pub struct ConnectionResolver {
    min_transfer_time: Duration,
    scan_window: usize,
    boarding: Boarding,
}

impl ConnectionResolver {
    pub fn new(config: &RouterConfig, boarding: Boarding) -> Self {
        Self {
            min_transfer_time: config.min_transfer_time,
            scan_window: config.scan_window,
            boarding,
        }
    }

    pub fn boarding(&self) -> Boarding {
        self.boarding
    }

    /// Boarding options from `station` towards `next_station` at `current_time`,
    /// having arrived on `previous_line` (None at the start of the journey).
    pub fn resolve<'a>(
        &self,
        station: &'a Station,
        next_station: &str,
        current_time: Time,
        previous_line: Option<&str>,
    ) -> Vec<&'a Connection> {
        let mut out = Vec::new();
        self.resolve_into(
            station.connections_to(next_station),
            current_time,
            previous_line,
            &mut out,
        );
        out
    }

    /// Same as [`ConnectionResolver::resolve`] over an already looked up departure
    /// list, writing into a reusable buffer. `connections` must be sorted by
    /// departure time.
    pub fn resolve_into<'a>(
        &self,
        connections: &'a [Connection],
        current_time: Time,
        previous_line: Option<&str>,
        out: &mut Vec<&'a Connection>,
    ) {
        out.clear();
        let start = connections.partition_point(|c| c.departure_time < current_time);
        for connection in connections[start..].iter().take(self.scan_window) {
            // Staying on the same line skips the transfer buffer and wins outright
            if let Some(previous_line) = previous_line
                && connection.is_same_line(previous_line)
            {
                out.clear();
                out.push(connection);
                return;
            }
            // No transfer buffer before the first boarding
            if previous_line.is_some()
                && connection.departure_time - current_time < self.min_transfer_time
            {
                continue;
            }
            out.push(connection);
        }
        if self.boarding == Boarding::Earliest {
            out.truncate(1);
        }
    }
}

#[cfg(test)]
fn station_with(departures: &[(f64, &str)]) -> Station {
    use crate::shared::geo::Coordinate;
    let mut station = Station::new("A", Coordinate::default());
    for (departure, line) in departures {
        station.add_connection(
            "X".into(),
            Connection::new(*line, "MPK", (*departure).into(), (*departure + 5.0).into()),
        );
    }
    station
}

#[cfg(test)]
fn resolver(min_transfer_time: f64, boarding: Boarding) -> ConnectionResolver {
    let config =
        RouterConfig::default().with_min_transfer_time(Duration::from_minutes(min_transfer_time));
    ConnectionResolver::new(&config, boarding)
}

#[cfg(test)]
fn departures(connections: &[&Connection]) -> Vec<f64> {
    connections
        .iter()
        .map(|c| c.departure_time.as_minutes())
        .collect()
}

#[test]
fn first_departure_at_or_after_current_time() {
    let station = station_with(&[(5.0, "1"), (10.0, "1"), (15.0, "1"), (50.0, "1")]);
    let found = resolver(3.0, Boarding::Earliest).resolve(&station, "X", Time::from_minutes(12.0), None);
    assert_eq!(departures(&found), vec![15.0]);
}

#[test]
fn transfer_buffer_applies_after_a_ride() {
    let station = station_with(&[(5.0, "1"), (10.0, "1"), (14.0, "1"), (50.0, "1")]);
    let found = resolver(3.0, Boarding::Earliest).resolve(
        &station,
        "X",
        Time::from_minutes(12.0),
        Some("2 (MPK)"),
    );
    assert_eq!(departures(&found), vec![50.0]);
}

#[test]
fn first_boarding_has_no_buffer() {
    let station = station_with(&[(0.0, "1"), (10.0, "1")]);
    let found = resolver(1.0, Boarding::Earliest).resolve(&station, "X", Time::from_minutes(0.0), None);
    assert_eq!(departures(&found), vec![0.0]);
}

#[test]
fn same_line_ignores_transfer_buffer() {
    let station = station_with(&[(5.0, "1"), (10.0, "2"), (15.0, "1"), (50.0, "1")]);
    let found =
        resolver(3.0, Boarding::Earliest).resolve(&station, "X", Time::from_minutes(9.0), Some("2 (MPK)"));
    assert_eq!(departures(&found), vec![10.0]);
}

#[test]
fn same_line_wins_over_earlier_survivors() {
    let station = station_with(&[(20.0, "1"), (25.0, "2"), (30.0, "3")]);
    let found = resolver(3.0, Boarding::All).resolve(&station, "X", Time::from_minutes(12.0), Some("3 (MPK)"));
    assert_eq!(departures(&found), vec![30.0]);
}

#[test]
fn different_line_inside_buffer_is_skipped() {
    let station = station_with(&[(10.0, "2"), (15.0, "1")]);
    let found =
        resolver(3.0, Boarding::Earliest).resolve(&station, "X", Time::from_minutes(9.0), Some("1 (MPK)"));
    // The line 1 departure at 15 is reached before anything survives the buffer
    assert_eq!(departures(&found), vec![15.0]);
}

#[test]
fn all_boarding_returns_every_survivor() {
    let station = station_with(&[(5.0, "1"), (10.0, "2"), (15.0, "3"), (50.0, "4")]);
    let found = resolver(3.0, Boarding::All).resolve(
        &station,
        "X",
        Time::from_minutes(13.0),
        Some("9 (MPK)"),
    );
    assert_eq!(departures(&found), vec![50.0]);
    let found = resolver(3.0, Boarding::All).resolve(&station, "X", Time::from_minutes(12.0), None);
    assert_eq!(departures(&found), vec![15.0, 50.0]);
}

#[test]
fn nothing_after_current_time() {
    let station = station_with(&[(5.0, "1"), (10.0, "1")]);
    let found = resolver(0.0, Boarding::All).resolve(&station, "X", Time::from_minutes(11.0), None);
    assert!(found.is_empty());
}

#[test]
fn unknown_neighbour_is_empty() {
    let station = station_with(&[(5.0, "1")]);
    let found = resolver(0.0, Boarding::All).resolve(&station, "Y", Time::from_minutes(0.0), None);
    assert!(found.is_empty());
}

#[test]
fn scan_window_bounds_the_search() {
    // Twelve departures that are all too soon, then one that is fine
    let mut schedule: Vec<(f64, &str)> = (0..12).map(|i| (i as f64 * 0.1, "2")).collect();
    schedule.push((30.0, "2"));
    let station = station_with(&schedule);
    let found = resolver(5.0, Boarding::Earliest).resolve(
        &station,
        "X",
        Time::from_minutes(0.0),
        Some("1 (MPK)"),
    );
    assert!(found.is_empty());

    let config = RouterConfig::default()
        .with_min_transfer_time(Duration::from_minutes(5.0))
        .with_scan_window(13);
    let found = ConnectionResolver::new(&config, Boarding::Earliest).resolve(
        &station,
        "X",
        Time::from_minutes(0.0),
        Some("1 (MPK)"),
    );
    assert_eq!(departures(&found), vec![30.0]);
}

#[test]
fn window_includes_last_departure() {
    let station = station_with(&[(5.0, "1"), (10.0, "1"), (15.0, "1")]);
    let found = resolver(0.0, Boarding::Earliest).resolve(&station, "X", Time::from_minutes(14.0), None);
    assert_eq!(departures(&found), vec![15.0]);
}
