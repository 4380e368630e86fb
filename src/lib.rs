//! Time-dependent public transit routing over a scheduled connection table.
//!
//! ```no_run
//! use hopper::prelude::*;
//!
//! let reader = TimetableReader::default().from_csv("connection_graph.csv".into());
//! let graph = Graph::load_or_build(&GraphCache::new("graph.json"), reader)?;
//! let route = graph
//!     .router("PL. GRUNWALDZKI", "Psie Pole")
//!     .departure_at(Time::from_hms("08:00:00").unwrap_or_default())
//!     .optimize_for(Criterion::Transfer)
//!     .solve()?;
//! println!("{}", Itinerary::from_route(&route));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod graph;
pub mod router;
pub mod shared;
pub mod timetable;

pub mod prelude {
    pub use crate::graph::{Connection, Graph, GraphCache, Station};
    pub use crate::router::{
        Criterion, Heuristic, Itinerary, Route, Router, RouterConfig, shortest_path,
    };
    pub use crate::shared::{Coordinate, Distance, Duration, Time};
    pub use crate::timetable::TimetableReader;
}
