use std::{collections::HashMap, sync::Arc};

pub mod cache;
mod entities;
mod source;
pub use cache::GraphCache;
pub use entities::*;

use tracing::{info, warn};

use crate::{router::Router, timetable};

/// The timetable graph: every stop keyed by its identifier.
///
/// Built once, then only read. Edges are directed; a connection from A to B says
/// nothing about B to A.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    stations: HashMap<Arc<str>, Station>,
}

impl Graph {
    pub fn new() -> Self {
        Default::default()
    }

    /// Loads the graph from `cache`, or builds it from `reader` on a cache miss
    /// and then refreshes the cache. A failed save is logged and otherwise ignored.
    pub fn load_or_build(
        cache: &GraphCache,
        reader: timetable::TimetableReader,
    ) -> Result<Self, timetable::Error> {
        if let Some(graph) = cache.load() {
            info!("Graph loaded from {}", cache.path().display());
            return Ok(graph);
        }
        info!("Graph cache not usable, constructing graph...");
        let graph = Self::from_timetable(&reader)?;
        match cache.save(&graph) {
            Ok(()) => info!("Graph constructed and saved to {}", cache.path().display()),
            Err(err) => warn!("Graph constructed but could not be cached: {err}"),
        }
        Ok(graph)
    }

    /// Get a station with the given id.
    /// If no station is found with the given id None is returned.
    pub fn station_by_id(&self, id: &str) -> Option<&Station> {
        self.stations.get(id)
    }

    pub fn stations(&self) -> impl Iterator<Item = &Station> {
        self.stations.values()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.stations.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    pub fn connection_count(&self) -> usize {
        self.stations.values().map(Station::connection_count).sum()
    }

    /// Inserts a station, or returns the existing one with the same id.
    pub fn insert_station(&mut self, station: Station) -> &mut Station {
        self.stations.entry(station.id.clone()).or_insert(station)
    }

    /// Adds a departure from `from` to `to`, creating either station if needed.
    /// The departure list stays sorted, so the graph is searchable right away.
    pub fn add_connection(
        &mut self,
        from: &Station,
        to: &Station,
        connection: Connection,
    ) -> &mut Self {
        let to_id = self.insert_station(to.clone()).id.clone();
        self.insert_station(from.clone())
            .add_connection(to_id, connection);
        self
    }

    pub fn router<'a>(&'a self, from: &'a str, to: &'a str) -> Router<'a> {
        Router::new(self, from, to)
    }
}

#[test]
fn add_connection_creates_both_stations() {
    use crate::shared::{Coordinate, Time};
    let from = Station::new("Kromera", Coordinate::new(51.13, 17.06));
    let to = Station::new("Psie Pole", Coordinate::new(51.15, 17.11));
    let mut graph = Graph::new();
    graph.add_connection(
        &from,
        &to,
        Connection::new("A", "MPK", Time::from_minutes(5.0), Time::from_minutes(9.0)),
    );
    assert_eq!(graph.len(), 2);
    assert_eq!(graph.connection_count(), 1);
    assert!(graph.contains("Psie Pole"));
    assert_eq!(
        graph.station_by_id("Kromera").map(|s| s.connections_to("Psie Pole").len()),
        Some(1)
    );
    assert_eq!(
        graph.station_by_id("Psie Pole").map(Station::connection_count),
        Some(0)
    );
}
