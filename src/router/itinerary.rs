use std::{fmt::Display, sync::Arc};

use crate::{
    router::path::{PathStep, Route},
    shared::time::Time,
};

/// A route split into rides, one per stretch spent on the same line.
#[derive(Clone, Debug)]
pub struct Itinerary {
    pub legs: Vec<Leg>,
}

impl Itinerary {
    pub fn from_route(route: &Route) -> Self {
        Self::from_path(&route.path)
    }

    pub fn from_path(path: &[PathStep]) -> Self {
        let mut legs: Vec<Leg> = vec![];
        for (prev, curr) in path.iter().zip(path.iter().skip(1)) {
            let Some(line) = &curr.line_company else {
                continue;
            };
            if let Some(leg) = legs.last_mut()
                && leg.line == *line
                && leg.to == prev.stop
            {
                leg.extend(curr);
            } else {
                legs.push(Leg::new(prev, curr, line.clone()));
            }
        }
        Self { legs }
    }

    pub fn is_empty(&self) -> bool {
        self.legs.is_empty()
    }

    /// Line changes along the way, the first boarding excluded.
    pub fn transfers(&self) -> usize {
        self.legs.len().saturating_sub(1)
    }
}

impl Display for Itinerary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for leg in &self.legs {
            writeln!(f, "{leg}")?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug)]
pub struct Leg {
    pub from: Arc<str>,
    pub to: Arc<str>,
    pub line: Arc<str>,
    pub departure_time: Time,
    pub arrival_time: Time,
    /// Every stop on the ride, boarding and alighting included.
    pub stops: Vec<Arc<str>>,
}

impl Leg {
    fn new(from: &PathStep, to: &PathStep, line: Arc<str>) -> Self {
        Self {
            from: from.stop.clone(),
            to: to.stop.clone(),
            line,
            departure_time: to.departure_time.unwrap_or(from.arrival_time),
            arrival_time: to.arrival_time,
            stops: vec![from.stop.clone(), to.stop.clone()],
        }
    }

    fn extend(&mut self, to: &PathStep) {
        self.to = to.stop.clone();
        self.arrival_time = to.arrival_time;
        self.stops.push(to.stop.clone());
    }
}

impl Display for Leg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({}) -> {} on {} ({})",
            self.from, self.departure_time, self.to, self.line, self.arrival_time
        )
    }
}

#[cfg(test)]
fn step(stop: &str, departure: f64, arrival: f64, line: Option<&str>) -> PathStep {
    PathStep {
        stop: stop.into(),
        arrival_time: Time::from_minutes(arrival),
        line_company: line.map(Into::into),
        departure_time: line.map(|_| Time::from_minutes(departure)),
    }
}

#[test]
fn collapses_same_line_runs() {
    let path = vec![
        step("A", 0.0, 300.0, None),
        step("B", 302.0, 305.0, Some("1 (MPK)")),
        step("C", 305.0, 309.5, Some("1 (MPK)")),
        step("D", 312.0, 320.0, Some("2 (MPK)")),
    ];
    let itinerary = Itinerary::from_path(&path);
    assert_eq!(itinerary.legs.len(), 2);
    assert_eq!(itinerary.transfers(), 1);
    assert_eq!(&*itinerary.legs[0].to, "C");
    assert_eq!(itinerary.legs[0].stops.len(), 3);
    assert_eq!(
        itinerary.to_string(),
        "A (05:02:00) -> C on 1 (MPK) (05:09:30)\nC (05:12:00) -> D on 2 (MPK) (05:20:00)\n"
    );
}

#[test]
fn origin_only_path_has_no_legs() {
    let itinerary = Itinerary::from_path(&[step("A", 0.0, 300.0, None)]);
    assert!(itinerary.is_empty());
    assert_eq!(itinerary.to_string(), "");
}
