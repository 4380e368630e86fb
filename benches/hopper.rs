use criterion::{Criterion, criterion_group, criterion_main};
use hopper::{
    graph::{Connection, Graph, Station},
    router::{self, Heuristic},
    shared::{Coordinate, Time},
    timetable::TimetableReader,
};
use std::{env, hint::black_box, path::Path, time::Duration};

const GRID: usize = 40;

fn stop_id(row: usize, col: usize) -> String {
    format!("{row}:{col}")
}

/// A GRID x GRID lattice of stops with a line per row and per column,
/// each running every 5 minutes from 05:00 to 23:00.
fn grid_graph() -> Graph {
    let mut graph = Graph::new();
    let station = |row: usize, col: usize| {
        let coordinate = Coordinate::new(51.0 + row as f64 * 0.005, 17.0 + col as f64 * 0.008);
        Station::new(stop_id(row, col), coordinate)
    };
    for row in 0..GRID {
        for col in 0..GRID {
            let from = station(row, col);
            for (to, line, offset) in [
                (col + 1 < GRID).then(|| (station(row, col + 1), format!("R{row}"), col)),
                (row + 1 < GRID).then(|| (station(row + 1, col), format!("C{col}"), row)),
            ]
            .into_iter()
            .flatten()
            {
                for run in 0..(18 * 12) {
                    let departure = 300.0 + run as f64 * 5.0 + offset as f64 * 2.0;
                    let connection = Connection::new(
                        line.as_str(),
                        "MPK",
                        Time::from_minutes(departure),
                        Time::from_minutes(departure + 2.0),
                    );
                    graph.add_connection(&from, &to, connection);
                }
            }
        }
    }
    graph
}

fn criterion_benchmark(c: &mut Criterion) {
    let graph = grid_graph();
    let heuristic = Heuristic::euclidean();
    let start = Time::from_minutes(480.0);
    let (from, to) = (stop_id(0, 0), stop_id(GRID - 1, GRID - 1));

    let mut group = c.benchmark_group("Routing");
    group.measurement_time(Duration::from_secs(10));

    group.bench_function("Grid dijkstra", |b| {
        b.iter(|| {
            black_box(router::shortest_path(
                &graph,
                &from,
                &to,
                start,
                router::Criterion::Time,
            ))
        })
    });

    group.bench_function("Grid astar", |b| {
        b.iter(|| {
            black_box(
                graph
                    .router(&from, &to)
                    .departure_at(start)
                    .with_heuristic(&heuristic)
                    .solve(),
            )
        })
    });

    group.bench_function("Grid fewest transfers", |b| {
        b.iter(|| {
            black_box(router::shortest_path(
                &graph,
                &from,
                &to,
                start,
                router::Criterion::Transfer,
            ))
        })
    });

    // Real timetable, only when one is provided
    if let Ok(path) = env::var("HOPPER_TIMETABLE") {
        let reader = TimetableReader::default().from_csv(Path::new(&path).to_owned());
        group.bench_function("Timetable build", |b| {
            b.iter(|| black_box(Graph::from_timetable(&reader)))
        });
    }

    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
