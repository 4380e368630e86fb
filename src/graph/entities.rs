use std::{collections::BTreeMap, sync::Arc};

use crate::shared::{
    geo::Coordinate,
    time::{Duration, Time},
};

/// One scheduled vehicle leg from a station to one of its neighbours.
#[derive(Debug, Clone, PartialEq)]
pub struct Connection {
    pub line: Arc<str>,
    pub company: Arc<str>,
    /// `"{line} ({company})"`, the identity used to tell whether two legs
    /// belong to the same line.
    pub line_company: Arc<str>,
    pub departure_time: Time,
    pub arrival_time: Time,
    pub travel_time: Duration,
}

impl Connection {
    pub fn new(
        line: impl Into<Arc<str>>,
        company: impl Into<Arc<str>>,
        departure_time: Time,
        arrival_time: Time,
    ) -> Self {
        let line = line.into();
        let company = company.into();
        Self {
            line_company: format!("{line} ({company})").into(),
            line,
            company,
            departure_time,
            arrival_time,
            travel_time: arrival_time - departure_time,
        }
    }

    pub fn is_same_line(&self, line_company: &str) -> bool {
        *self.line_company == *line_company
    }
}

/// A stop together with every departure it offers, grouped by the neighbour
/// each departure runs to.
#[derive(Debug, Clone)]
pub struct Station {
    /// The unique stop identifier, also used as the graph key.
    pub id: Arc<str>,
    /// Display name. The connection table identifies stops by name, so this
    /// usually equals `id`.
    pub name: Arc<str>,
    pub coordinate: Coordinate,
    /// Departures per neighbour, each list sorted ascending by departure time.
    pub(crate) connections: BTreeMap<Arc<str>, Vec<Connection>>,
}

impl Station {
    pub fn new(id: impl Into<Arc<str>>, coordinate: Coordinate) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            coordinate,
            connections: BTreeMap::new(),
        }
    }

    /// Adds a departure towards `neighbour`, keeping the list sorted.
    pub fn add_connection(&mut self, neighbour: Arc<str>, connection: Connection) {
        let connections = self.connections.entry(neighbour).or_default();
        let idx = connections.partition_point(|c| c.departure_time <= connection.departure_time);
        connections.insert(idx, connection);
    }

    /// Appends without keeping order. Callers must run [`Station::sort_connections`]
    /// before the station is searched.
    pub(crate) fn push_connection(&mut self, neighbour: Arc<str>, connection: Connection) {
        self.connections.entry(neighbour).or_default().push(connection);
    }

    pub fn sort_connections(&mut self) {
        self.connections.values_mut().for_each(|connections| {
            connections.sort_by(|a, b| a.departure_time.total_cmp(&b.departure_time))
        });
    }

    /// All departures towards `neighbour`, earliest first.
    pub fn connections_to(&self, neighbour: &str) -> &[Connection] {
        self.connections
            .get(neighbour)
            .map(|connections| connections.as_slice())
            .unwrap_or_default()
    }

    /// Neighbours in stop id order, each with its sorted departures.
    pub fn neighbours(&self) -> impl Iterator<Item = (&Arc<str>, &[Connection])> {
        self.connections
            .iter()
            .map(|(id, connections)| (id, connections.as_slice()))
    }

    pub fn connection_count(&self) -> usize {
        self.connections.values().map(|c| c.len()).sum()
    }
}

#[test]
fn line_company_label() {
    let connection = Connection::new(
        "A",
        "MPK Autobusy",
        Time::from_minutes(300.0),
        Time::from_minutes(310.0),
    );
    assert_eq!(&*connection.line_company, "A (MPK Autobusy)");
    assert_eq!(connection.travel_time, Duration::from_minutes(10.0));
    assert!(connection.is_same_line("A (MPK Autobusy)"));
    assert!(!connection.is_same_line("A (MPK Tramwaje)"));
}

#[test]
fn add_connection_keeps_order() {
    let mut station = Station::new("PL. GRUNWALDZKI", Coordinate::default());
    let neighbour: Arc<str> = "Most Grunwaldzki".into();
    for departure in [15.0, 5.0, 50.0, 10.0] {
        station.add_connection(
            neighbour.clone(),
            Connection::new(
                "1",
                "MPK",
                Time::from_minutes(departure),
                Time::from_minutes(departure + 2.0),
            ),
        );
    }
    let departures: Vec<f64> = station
        .connections_to("Most Grunwaldzki")
        .iter()
        .map(|c| c.departure_time.as_minutes())
        .collect();
    assert_eq!(departures, vec![5.0, 10.0, 15.0, 50.0]);
    assert!(station.connections_to("Unknown").is_empty());
}
