use std::{path::PathBuf, time::Instant};

use anyhow::{Context, bail};
use clap::{Parser, ValueEnum};
use hopper::{prelude::*, router::DistanceFn, timetable};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum HeuristicArg {
    /// Plain Dijkstra
    None,
    Euclidean,
    Manhattan,
}

/// Find a route through a scheduled connection table.
#[derive(Parser, Debug)]
#[command(name = "hopper", version, about, long_about = None)]
struct Cli {
    /// Connection table, either a .csv file or a .zip archive containing one
    #[arg(long, env = "HOPPER_TIMETABLE", default_value = "connection_graph.csv")]
    timetable: PathBuf,

    /// Name of the csv inside a zip archive
    #[arg(long, default_value = "connection_graph.csv")]
    timetable_name: String,

    /// Where the built graph is cached between runs
    #[arg(long, env = "HOPPER_CACHE", default_value = "graph.json")]
    cache: PathBuf,

    #[arg(long)]
    from: String,

    #[arg(long)]
    to: String,

    /// Departure time as HH:MM:SS, defaults to now
    #[arg(long)]
    at: Option<String>,

    /// time or transfer
    #[arg(long, default_value_t = Criterion::Time)]
    optimize: Criterion,

    #[arg(long, value_enum, default_value_t = HeuristicArg::None)]
    heuristic: HeuristicArg,

    /// Minimum minutes between arriving and boarding a different line
    #[arg(long, default_value_t = 2.0)]
    min_transfer: f64,

    /// Departures looked at per neighbour
    #[arg(long, default_value_t = 10)]
    scan_window: usize,
}

impl Cli {
    fn reader(&self) -> TimetableReader {
        let config = timetable::Config {
            file_name: self.timetable_name.clone(),
            ..Default::default()
        };
        let reader = TimetableReader::new(config);
        match self.timetable.extension().and_then(|ext| ext.to_str()) {
            Some("zip") => reader.from_zip(self.timetable.clone()),
            _ => reader.from_csv(self.timetable.clone()),
        }
    }

    fn departure(&self) -> anyhow::Result<Time> {
        match &self.at {
            Some(at) => Time::from_hms(at).with_context(|| format!("invalid --at time {at:?}")),
            None => Ok(Time::now()),
        }
    }

    fn heuristic(&self) -> Option<Heuristic> {
        match self.heuristic {
            HeuristicArg::None => None,
            HeuristicArg::Euclidean => Some(Heuristic::new(DistanceFn::Euclidean)),
            HeuristicArg::Manhattan => Some(Heuristic::new(DistanceFn::Manhattan)),
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    if cli.min_transfer < 0.0 {
        bail!("--min-transfer must not be negative");
    }
    let departure = cli.departure()?;

    let now = Instant::now();
    let graph = Graph::load_or_build(&GraphCache::new(&cli.cache), cli.reader())
        .with_context(|| format!("failed to load timetable {}", cli.timetable.display()))?;
    info!(
        "Graph with {} stations and {} connections ready in {:?}",
        graph.len(),
        graph.connection_count(),
        now.elapsed()
    );

    let config = RouterConfig::default()
        .with_min_transfer_time(Duration::from_minutes(cli.min_transfer))
        .with_scan_window(cli.scan_window);
    let heuristic = cli.heuristic();
    let mut router = graph
        .router(&cli.from, &cli.to)
        .departure_at(departure)
        .optimize_for(cli.optimize)
        .with_config(config);
    if let Some(heuristic) = &heuristic {
        router = router.with_heuristic(heuristic);
    }

    let now = Instant::now();
    let route = router.solve()?;
    info!("Routing took {:?}", now.elapsed());

    let itinerary = Itinerary::from_route(&route);
    print!("{itinerary}");
    match cli.optimize {
        Criterion::Time => println!("Total time: {:.1} min", route.cost),
        Criterion::Transfer => println!("Transfers: {}", route.cost),
    }
    if let Some(arrival) = route.arrival_time() {
        println!("Arrival: {arrival}");
    }
    Ok(())
}
