//! Best-effort JSON snapshot of a built [`Graph`].
//!
//! A missing or unreadable cache file is a cache miss, never an error: the caller
//! rebuilds from the timetable instead.

use std::{
    collections::BTreeMap,
    fs::File,
    io::{self, BufReader, BufWriter, Write},
    path::{Path, PathBuf},
    sync::Arc,
    time::Instant,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    graph::{Connection, Graph, Station},
    shared::geo::Coordinate,
};

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Json error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct StationRecord {
    pub name: String,
    pub location: Coordinate,
    pub connections: BTreeMap<String, Vec<ConnectionRecord>>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ConnectionRecord {
    pub line: String,
    pub company: String,
    pub departure_time_minutes: f64,
    pub arrival_time_minutes: f64,
    pub travel_time_minutes: f64,
}

impl From<&Connection> for ConnectionRecord {
    fn from(value: &Connection) -> Self {
        Self {
            line: value.line.to_string(),
            company: value.company.to_string(),
            departure_time_minutes: value.departure_time.as_minutes(),
            arrival_time_minutes: value.arrival_time.as_minutes(),
            travel_time_minutes: value.travel_time.as_minutes(),
        }
    }
}

impl From<&Station> for StationRecord {
    fn from(value: &Station) -> Self {
        Self {
            name: value.name.to_string(),
            location: value.coordinate,
            connections: value
                .neighbours()
                .map(|(id, connections)| {
                    (
                        id.to_string(),
                        connections.iter().map(ConnectionRecord::from).collect(),
                    )
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GraphCache {
    path: PathBuf,
}

impl GraphCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the cached graph. Returns None when the file is missing or malformed.
    pub fn load(&self) -> Option<Graph> {
        debug!("Loading graph cache...");
        let now = Instant::now();
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) => {
                debug!("Graph cache miss at {}: {err}", self.path.display());
                return None;
            }
        };
        let records: BTreeMap<String, StationRecord> =
            match serde_json::from_reader(BufReader::new(file)) {
                Ok(records) => records,
                Err(err) => {
                    warn!("Ignoring malformed graph cache {}: {err}", self.path.display());
                    return None;
                }
            };
        let graph = Graph::from_records(records);
        debug!(
            "Loading graph cache with {} stations took {:?}",
            graph.len(),
            now.elapsed()
        );
        Some(graph)
    }

    pub fn save(&self, graph: &Graph) -> Result<(), self::Error> {
        debug!("Saving graph cache...");
        let now = Instant::now();
        let records: BTreeMap<&str, StationRecord> = graph
            .stations
            .iter()
            .map(|(id, station)| (&**id, StationRecord::from(station)))
            .collect();
        let mut writer = BufWriter::new(File::create(&self.path)?);
        serde_json::to_writer(&mut writer, &records)?;
        writer.flush()?;
        debug!("Saving graph cache took {:?}", now.elapsed());
        Ok(())
    }
}

impl Graph {
    fn from_records(records: BTreeMap<String, StationRecord>) -> Self {
        let mut graph = Graph::new();
        let ids: BTreeMap<String, Arc<str>> = records
            .keys()
            .map(|id| (id.clone(), Arc::from(id.as_str())))
            .collect();
        for (id, record) in records {
            let station_id = ids[&id].clone();
            let mut station = Station::new(station_id.clone(), record.location);
            station.name = record.name.into();
            for (neighbour, connections) in record.connections {
                let neighbour: Arc<str> = ids
                    .get(&neighbour)
                    .cloned()
                    .unwrap_or_else(|| neighbour.into());
                for connection in connections {
                    station.push_connection(
                        neighbour.clone(),
                        Connection::new(
                            connection.line,
                            connection.company,
                            connection.departure_time_minutes.into(),
                            connection.arrival_time_minutes.into(),
                        ),
                    );
                }
            }
            graph.stations.insert(station_id, station);
        }
        graph.sort_connections();
        graph
    }
}
