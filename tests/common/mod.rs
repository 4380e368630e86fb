#![allow(dead_code)]

use hopper::prelude::*;

/// A handful of Wroclaw stops around the old town.
///
/// Tram 4 runs PL. GRUNWALDZKI -> Most Grunwaldzki -> Galeria Dominikanska -> Renoma
/// twice, tram 10 feeds Dworzec Glowny from Galeria and Renoma, and bus 145 goes
/// straight to Dworzec Glowny but slowly.
pub const TIMETABLE: &str = "\
,id,company,line,departure_time,arrival_time,start_stop,end_stop,start_stop_lat,start_stop_lon,end_stop_lat,end_stop_lon
0,0,MPK Tramwaje,4,08:00:00,08:03:00,PL. GRUNWALDZKI,Most Grunwaldzki,51.1113,17.0602,51.1099,17.0510
1,1,MPK Tramwaje,4,08:03:00,08:06:00,Most Grunwaldzki,Galeria Dominikanska,51.1099,17.0510,51.1077,17.0395
2,2,MPK Tramwaje,4,08:06:00,08:10:00,Galeria Dominikanska,Renoma,51.1077,17.0395,51.1035,17.0312
3,3,MPK Tramwaje,4,08:10:00,08:13:00,PL. GRUNWALDZKI,Most Grunwaldzki,51.1113,17.0602,51.1099,17.0510
4,4,MPK Tramwaje,4,08:13:00,08:16:00,Most Grunwaldzki,Galeria Dominikanska,51.1099,17.0510,51.1077,17.0395
5,5,MPK Tramwaje,4,08:16:00,08:20:00,Galeria Dominikanska,Renoma,51.1077,17.0395,51.1035,17.0312
6,6,MPK Tramwaje,10,08:09:00,08:15:00,Galeria Dominikanska,Dworzec Glowny,51.1077,17.0395,51.0988,17.0366
7,7,MPK Tramwaje,10,08:12:00,08:16:00,Renoma,Dworzec Glowny,51.1035,17.0312,51.0988,17.0366
8,8,MPK Autobusy,145,08:01:00,08:25:00,PL. GRUNWALDZKI,Dworzec Glowny,51.1113,17.0602,51.0988,17.0366
";

pub fn reader() -> TimetableReader {
    TimetableReader::default().from_memory(TIMETABLE.as_bytes())
}

pub fn wroclaw() -> Graph {
    Graph::from_timetable(&reader()).unwrap()
}

pub fn at(time: &str) -> Time {
    Time::from_hms(time).unwrap()
}

pub fn stop(id: &str) -> Station {
    Station::new(id, Coordinate::default())
}

pub fn leg(line: &str, departure: f64, arrival: f64) -> Connection {
    Connection::new(
        line,
        "MPK",
        Time::from_minutes(departure),
        Time::from_minutes(arrival),
    )
}

/// A -> B (0 -> 10) on line 1, B -> C (12 -> 20) on line 2.
pub fn line_graph() -> Graph {
    let (a, b, c) = (stop("A"), stop("B"), stop("C"));
    let mut graph = Graph::new();
    graph
        .add_connection(&a, &b, leg("1", 0.0, 10.0))
        .add_connection(&b, &c, leg("2", 12.0, 20.0));
    graph
}
