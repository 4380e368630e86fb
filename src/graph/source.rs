use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
    time::Instant,
};

use rayon::prelude::*;
use tracing::debug;

use crate::{
    graph::{Connection, Graph, Station},
    timetable::{self, TimetableReader},
};

impl Graph {
    /// Builds the graph from a connection table.
    /// Depending on the size of the table this can be a long blocking function.
    pub fn from_timetable(reader: &TimetableReader) -> Result<Self, timetable::Error> {
        let mut graph = Self::new();
        graph.load_connections(reader)?;
        graph.sort_connections();
        Ok(graph)
    }

    fn load_connections(&mut self, reader: &TimetableReader) -> Result<(), timetable::Error> {
        debug!("Loading connections...");
        let now = Instant::now();
        let mut owner_lookup: HashSet<Arc<str>> = HashSet::new();
        let mut line_lookup: HashMap<(String, String), (Arc<str>, Arc<str>)> = HashMap::new();
        let stations = &mut self.stations;
        let rows = reader.stream_entries(|(_, entry)| {
            let start = intern(&mut owner_lookup, entry.start_stop);
            let end = intern(&mut owner_lookup, entry.end_stop);
            let (line, company) = line_lookup
                .entry((entry.line, entry.company))
                .or_insert_with_key(|(line, company)| {
                    (line.as_str().into(), company.as_str().into())
                })
                .clone();

            // Stops that only ever appear as a destination still need a location
            stations
                .entry(end.clone())
                .or_insert_with(|| Station::new(end.clone(), entry.end_coordinate));
            stations
                .entry(start.clone())
                .or_insert_with(|| Station::new(start, entry.start_coordinate))
                .push_connection(
                    end,
                    Connection::new(line, company, entry.departure_time, entry.arrival_time),
                );
        })?;
        debug!(
            "Loading {rows} connections into {} stations took {:?}",
            stations.len(),
            now.elapsed()
        );
        Ok(())
    }

    /// Sorts every neighbour list by departure time.
    pub(crate) fn sort_connections(&mut self) {
        debug!("Sorting connections...");
        let now = Instant::now();
        self.stations
            .par_iter_mut()
            .for_each(|(_, station)| station.sort_connections());
        debug!("Sorting connections took {:?}", now.elapsed());
    }
}

fn intern(lookup: &mut HashSet<Arc<str>>, value: String) -> Arc<str> {
    if let Some(id) = lookup.get(value.as_str()) {
        id.clone()
    } else {
        let id: Arc<str> = value.into();
        lookup.insert(id.clone());
        id
    }
}
