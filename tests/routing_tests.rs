mod common;

use common::*;
use hopper::{
    prelude::*,
    router::{self, DistanceFn},
};

fn stops(route: &Route) -> Vec<&str> {
    route.stops().collect()
}

#[test]
fn line_graph_end_to_end() {
    let graph = line_graph();
    let config = RouterConfig::default().with_min_transfer_time(Duration::from_minutes(1.0));
    let route = graph
        .router("A", "C")
        .departure_at(Time::from_minutes(0.0))
        .with_config(config)
        .solve()
        .unwrap();
    assert_eq!(route.cost, 20.0);
    let arrivals: Vec<_> = route
        .path
        .iter()
        .map(|step| (&*step.stop, step.arrival_time.as_minutes()))
        .collect();
    assert_eq!(arrivals, vec![("A", 0.0), ("B", 10.0), ("C", 20.0)]);
    assert_eq!(route.path[0].line_company, None);
    assert_eq!(route.path[2].line_company.as_deref(), Some("2 (MPK)"));
}

#[test]
fn shortest_path_entry_point() {
    let graph = line_graph();
    let route =
        router::shortest_path(&graph, "A", "C", Time::from_minutes(0.0), Criterion::Time).unwrap();
    assert_eq!(route.cost, 20.0);
    assert_eq!(route.transfers(), 1);
}

#[test]
fn no_outgoing_connections() {
    let graph = line_graph();
    let result = router::shortest_path(&graph, "C", "A", Time::from_minutes(0.0), Criterion::Time);
    assert!(matches!(result, Err(router::Error::NoRouteFound)));
}

#[test]
fn missed_last_departure() {
    let graph = line_graph();
    let result = router::shortest_path(&graph, "A", "C", Time::from_minutes(1.0), Criterion::Time);
    assert!(matches!(result, Err(router::Error::NoRouteFound)));
}

#[test]
fn unknown_stop() {
    let graph = line_graph();
    let result = router::shortest_path(&graph, "A", "Z", Time::from_minutes(0.0), Criterion::Time);
    match result {
        Err(router::Error::InvalidStopID(id)) => assert_eq!(id, "Z"),
        other => panic!("expected InvalidStopID, got {other:?}"),
    }
}

#[test]
fn origin_is_destination() {
    let graph = line_graph();
    let route =
        router::shortest_path(&graph, "B", "B", Time::from_minutes(42.0), Criterion::Time).unwrap();
    assert_eq!(route.cost, 0.0);
    assert_eq!(route.path.len(), 1);
    assert_eq!(route.arrival_time(), Some(Time::from_minutes(42.0)));
}

#[test]
fn waiting_is_charged() {
    let (a, b) = (stop("A"), stop("B"));
    let mut graph = Graph::new();
    graph.add_connection(&a, &b, leg("1", 5.0, 10.0));
    let route =
        router::shortest_path(&graph, "A", "B", Time::from_minutes(0.0), Criterion::Time).unwrap();
    assert_eq!(route.cost, 10.0);
}

#[test]
fn dijkstra_finds_the_faster_detour() {
    let (a, b, c) = (stop("A"), stop("B"), stop("C"));
    let mut graph = Graph::new();
    graph
        .add_connection(&a, &c, leg("1", 0.0, 50.0))
        .add_connection(&a, &b, leg("2", 0.0, 10.0))
        .add_connection(&b, &c, leg("3", 15.0, 25.0));
    let route =
        router::shortest_path(&graph, "A", "C", Time::from_minutes(0.0), Criterion::Time).unwrap();
    assert_eq!(route.cost, 25.0);
    assert_eq!(stops(&route), vec!["A", "B", "C"]);
}

#[test]
fn transfer_buffer_forces_later_departure() {
    let (a, b, c) = (stop("A"), stop("B"), stop("C"));
    let mut graph = Graph::new();
    graph
        .add_connection(&a, &b, leg("1", 0.0, 10.0))
        .add_connection(&b, &c, leg("2", 11.0, 15.0))
        .add_connection(&b, &c, leg("2", 20.0, 24.0));
    let route =
        router::shortest_path(&graph, "A", "C", Time::from_minutes(0.0), Criterion::Time).unwrap();
    assert_eq!(route.cost, 24.0);
}

#[test]
fn staying_on_the_line_costs_no_transfers() {
    let (a, b, c) = (stop("A"), stop("B"), stop("C"));
    let mut graph = Graph::new();
    graph
        .add_connection(&a, &b, leg("1", 0.0, 5.0))
        .add_connection(&b, &c, leg("1", 5.0, 10.0))
        .add_connection(&b, &c, leg("2", 6.0, 8.0));
    let route = router::shortest_path(
        &graph,
        "A",
        "C",
        Time::from_minutes(0.0),
        Criterion::Transfer,
    )
    .unwrap();
    assert_eq!(route.cost, 0.0);
    assert_eq!(route.path[2].line_company.as_deref(), Some("1 (MPK)"));
}

#[test]
fn each_line_change_costs_one() {
    let (a, b, c, d) = (stop("A"), stop("B"), stop("C"), stop("D"));
    let mut graph = Graph::new();
    graph
        .add_connection(&a, &b, leg("1", 0.0, 5.0))
        .add_connection(&b, &c, leg("2", 10.0, 15.0))
        .add_connection(&c, &d, leg("3", 20.0, 25.0));
    let route = router::shortest_path(
        &graph,
        "A",
        "D",
        Time::from_minutes(0.0),
        Criterion::Transfer,
    )
    .unwrap();
    assert_eq!(route.cost, 2.0);
    assert_eq!(route.transfers(), 2);
}

#[test]
fn fastest_route_through_wroclaw() {
    let graph = wroclaw();
    let route = graph
        .router("PL. GRUNWALDZKI", "Dworzec Glowny")
        .departure_at(at("08:00:00"))
        .solve()
        .unwrap();
    assert_eq!(route.cost, 15.0);
    assert_eq!(
        stops(&route),
        vec![
            "PL. GRUNWALDZKI",
            "Most Grunwaldzki",
            "Galeria Dominikanska",
            "Dworzec Glowny"
        ]
    );
    assert_eq!(
        Itinerary::from_route(&route).to_string(),
        "PL. GRUNWALDZKI (08:00:00) -> Galeria Dominikanska on 4 (MPK Tramwaje) (08:06:00)\n\
         Galeria Dominikanska (08:09:00) -> Dworzec Glowny on 10 (MPK Tramwaje) (08:15:00)\n"
    );
}

#[test]
fn fewest_transfers_through_wroclaw() {
    let graph = wroclaw();
    let route = graph
        .router("PL. GRUNWALDZKI", "Dworzec Glowny")
        .departure_at(at("08:00:00"))
        .optimize_for(Criterion::Transfer)
        .solve()
        .unwrap();
    assert_eq!(route.cost, 0.0);
    assert_eq!(stops(&route), vec!["PL. GRUNWALDZKI", "Dworzec Glowny"]);
    assert_eq!(
        route.path[1].line_company.as_deref(),
        Some("145 (MPK Autobusy)")
    );
}

#[test]
fn astar_agrees_with_dijkstra() {
    let graph = wroclaw();
    let dijkstra = graph
        .router("PL. GRUNWALDZKI", "Dworzec Glowny")
        .departure_at(at("08:00:00"))
        .solve()
        .unwrap();
    for heuristic in [Heuristic::euclidean(), Heuristic::manhattan()] {
        let astar = graph
            .router("PL. GRUNWALDZKI", "Dworzec Glowny")
            .departure_at(at("08:00:00"))
            .with_heuristic(&heuristic)
            .solve()
            .unwrap();
        assert_eq!(astar, dijkstra);
        assert!(!heuristic.cache().is_empty());
    }
}

#[test]
fn astar_reuses_cached_distances() {
    let graph = wroclaw();
    let heuristic = Heuristic::new(DistanceFn::Euclidean);
    let search = || {
        graph
            .router("PL. GRUNWALDZKI", "Renoma")
            .departure_at(at("08:00:00"))
            .with_heuristic(&heuristic)
            .solve()
            .unwrap()
    };
    let first = search();
    let cached = heuristic.cache().len();
    let second = search();
    assert_eq!(first, second);
    assert_eq!(heuristic.cache().len(), cached);
}

#[test]
fn searches_share_graph_and_heuristic_across_threads() {
    let graph = wroclaw();
    let heuristic = Heuristic::euclidean();
    let routes: Vec<Route> = std::thread::scope(|scope| {
        let handles: Vec<_> = ["Dworzec Glowny", "Renoma"]
            .into_iter()
            .map(|to| {
                let (graph, heuristic) = (&graph, &heuristic);
                scope.spawn(move || {
                    graph
                        .router("PL. GRUNWALDZKI", to)
                        .departure_at(at("08:00:00"))
                        .with_heuristic(heuristic)
                        .solve()
                        .unwrap()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    assert_eq!(routes[0].cost, 15.0);
    assert_eq!(routes[1].destination().map(|s| &*s.stop), Some("Renoma"));
}

#[test]
fn narrow_scan_window_hides_departures() {
    let (a, b, c) = (stop("A"), stop("B"), stop("C"));
    let mut graph = Graph::new();
    graph.add_connection(&a, &b, leg("1", 0.0, 10.0));
    // Three departures inside the transfer buffer, then one that works
    for departure in [10.0, 10.5, 11.0, 30.0] {
        graph.add_connection(&b, &c, leg("2", departure, departure + 5.0));
    }
    let narrow = RouterConfig::default().with_scan_window(3);
    let result = graph
        .router("A", "C")
        .departure_at(Time::from_minutes(0.0))
        .with_config(narrow)
        .solve();
    assert!(matches!(result, Err(router::Error::NoRouteFound)));

    let route = graph
        .router("A", "C")
        .departure_at(Time::from_minutes(0.0))
        .solve()
        .unwrap();
    assert_eq!(route.cost, 35.0);
}
