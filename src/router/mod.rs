use std::{
    collections::{BinaryHeap, HashSet},
    rc::Rc,
    sync::Arc,
    time::Instant,
};

pub mod config;
pub mod cost;
pub mod heuristic;
pub mod itinerary;
pub mod path;
pub mod resolver;
pub mod state;

pub use config::RouterConfig;
pub use cost::{CostModel, Criterion, TimeCost, TransferCost};
pub use heuristic::{DistanceCache, DistanceFn, Heuristic};
pub use itinerary::{Itinerary, Leg};
pub use path::{PathStep, Route};
pub use resolver::{Boarding, ConnectionResolver};

use thiserror::Error;
use tracing::{debug, trace};

use crate::{
    graph::{Connection, Graph, Station},
    router::state::{SearchState, SearchStateRef},
    shared::time::Time,
};

#[derive(Error, Debug)]
pub enum Error {
    #[error("Stop id does not match any entry: {0}")]
    InvalidStopID(String),
    #[error("Could not find a route")]
    NoRouteFound,
}

/// A single time-dependent search between two stops.
///
/// Without a heuristic this is Dijkstra and each neighbour is reached by its
/// earliest admissible departure, which makes the returned cost optimal. With a
/// heuristic it becomes A* and branches over every admissible departure in the
/// scan window. See [`heuristic`] for why the A* result is best-effort.
pub struct Router<'a> {
    graph: &'a Graph,
    from: &'a str,
    to: &'a str,
    departure: Time,
    criterion: Criterion,
    heuristic: Option<&'a Heuristic>,
    config: RouterConfig,
}

impl<'a> Router<'a> {
    pub fn new(graph: &'a Graph, from: &'a str, to: &'a str) -> Self {
        Self {
            graph,
            from,
            to,
            departure: Time::now(),
            criterion: Criterion::default(),
            heuristic: None,
            config: RouterConfig::default(),
        }
    }

    pub fn departure_at(mut self, departure: Time) -> Self {
        self.departure = departure;
        self
    }

    pub fn optimize_for(mut self, criterion: Criterion) -> Self {
        self.criterion = criterion;
        self
    }

    pub fn with_heuristic(mut self, heuristic: &'a Heuristic) -> Self {
        self.heuristic = Some(heuristic);
        self
    }

    pub fn with_config(mut self, config: RouterConfig) -> Self {
        self.config = config;
        self
    }

    pub fn solve(self) -> Result<Route, self::Error> {
        let graph = self.graph;
        let start = graph
            .station_by_id(self.from)
            .ok_or_else(|| self::Error::InvalidStopID(self.from.to_string()))?;
        let end = graph
            .station_by_id(self.to)
            .ok_or_else(|| self::Error::InvalidStopID(self.to.to_string()))?;

        let boarding = match self.heuristic {
            Some(_) => Boarding::All,
            None => Boarding::Earliest,
        };
        let resolver = ConnectionResolver::new(&self.config, boarding);
        let cost_model = self.criterion.cost_model();
        let estimate = |station: &Station| -> f64 {
            self.heuristic
                .map(|heuristic| {
                    cost_model.estimate(heuristic.distance(&station.coordinate, &end.coordinate))
                })
                .unwrap_or(0.0)
        };

        debug!(
            "Routing {} -> {} at {} optimizing for {} ({:?})",
            start.id, end.id, self.departure, self.criterion, boarding
        );
        let now = Instant::now();

        let mut heap: BinaryHeap<SearchStateRef> = BinaryHeap::new();
        let mut closed: HashSet<Arc<str>> = HashSet::new();
        let mut boardable: Vec<&Connection> = Vec::new();
        let mut sequence: u64 = 0;

        heap.push(Rc::new(SearchState::genesis(
            start.id.clone(),
            self.departure,
            estimate(start),
        )));

        while let Some(state) = heap.pop() {
            if !closed.insert(state.stop.clone()) {
                continue;
            }
            trace!(
                "Expanding {} at {} with cost {}",
                state.stop, state.current_time, state.g_cost
            );

            if state.stop == end.id {
                debug!(
                    "Found route with cost {} after closing {} stops in {:?}",
                    state.g_cost,
                    closed.len(),
                    now.elapsed()
                );
                return Ok(Route::from_state(&state));
            }

            let Some(station) = graph.station_by_id(&state.stop) else {
                continue;
            };
            for (neighbour_id, connections) in station.neighbours() {
                if closed.contains(neighbour_id) {
                    continue;
                }
                resolver.resolve_into(
                    connections,
                    state.current_time,
                    state.line_company(),
                    &mut boardable,
                );
                if boardable.is_empty() {
                    continue;
                }
                let h_cost = graph
                    .station_by_id(neighbour_id)
                    .map(&estimate)
                    .unwrap_or(0.0);
                for &connection in &boardable {
                    sequence += 1;
                    let g_cost = cost_model.edge_cost(
                        state.g_cost,
                        state.current_time,
                        connection,
                        state.line_company(),
                    );
                    heap.push(Rc::new(SearchState {
                        stop: neighbour_id.clone(),
                        current_time: connection.arrival_time,
                        line_company: Some(connection.line_company.clone()),
                        departure_time: Some(connection.departure_time),
                        g_cost,
                        h_cost,
                        sequence,
                        parent: Some(state.clone()),
                    }));
                }
            }
        }

        debug!(
            "No route after closing {} stops in {:?}",
            closed.len(),
            now.elapsed()
        );
        Err(self::Error::NoRouteFound)
    }
}

/// Dijkstra search from `start` to `end` leaving at `start_time`.
pub fn shortest_path(
    graph: &Graph,
    start: &str,
    end: &str,
    start_time: Time,
    criterion: Criterion,
) -> Result<Route, self::Error> {
    Router::new(graph, start, end)
        .departure_at(start_time)
        .optimize_for(criterion)
        .solve()
}
