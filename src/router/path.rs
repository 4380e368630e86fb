use std::sync::Arc;

use crate::{router::state::SearchStateRef, shared::time::Time};

/// One stop along a found route.
#[derive(Debug, Clone, PartialEq)]
pub struct PathStep {
    pub stop: Arc<str>,
    pub arrival_time: Time,
    /// The line the rider arrived on. None for the origin.
    pub line_company: Option<Arc<str>>,
    /// When the arriving leg left the previous stop. None for the origin.
    pub departure_time: Option<Time>,
}

impl From<&SearchStateRef> for PathStep {
    fn from(value: &SearchStateRef) -> Self {
        Self {
            stop: value.stop.clone(),
            arrival_time: value.current_time,
            line_company: value.line_company.clone(),
            departure_time: value.departure_time,
        }
    }
}

/// The result of a successful search.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    /// Total cost under the criterion the search optimized for.
    pub cost: f64,
    /// From the origin to the destination, inclusive.
    pub path: Vec<PathStep>,
}

impl Route {
    pub(crate) fn from_state(end: &SearchStateRef) -> Self {
        Self {
            cost: end.g_cost,
            path: end.unwind().iter().map(PathStep::from).collect(),
        }
    }

    pub fn origin(&self) -> Option<&PathStep> {
        self.path.first()
    }

    pub fn destination(&self) -> Option<&PathStep> {
        self.path.last()
    }

    pub fn arrival_time(&self) -> Option<Time> {
        self.destination().map(|step| step.arrival_time)
    }

    /// Number of times the rider boards a different line than the one they arrived on.
    pub fn transfers(&self) -> usize {
        self.path
            .windows(2)
            .filter(|steps| match (&steps[0].line_company, &steps[1].line_company) {
                (Some(a), Some(b)) => a != b,
                _ => false,
            })
            .count()
    }

    pub fn stops(&self) -> impl Iterator<Item = &str> {
        self.path.iter().map(|step| &*step.stop)
    }
}

#[cfg(test)]
fn step(stop: &str, arrival: f64, line: Option<&str>) -> PathStep {
    PathStep {
        stop: stop.into(),
        arrival_time: Time::from_minutes(arrival),
        line_company: line.map(Into::into),
        departure_time: line.map(|_| Time::from_minutes(arrival - 1.0)),
    }
}

#[test]
fn counts_line_changes() {
    let route = Route {
        cost: 0.0,
        path: vec![
            step("A", 0.0, None),
            step("B", 5.0, Some("1 (MPK)")),
            step("C", 9.0, Some("1 (MPK)")),
            step("D", 14.0, Some("2 (MPK)")),
            step("E", 20.0, Some("1 (MPK)")),
        ],
    };
    assert_eq!(route.transfers(), 2);
    assert_eq!(route.arrival_time(), Some(Time::from_minutes(20.0)));
    assert_eq!(route.stops().collect::<Vec<_>>(), vec!["A", "B", "C", "D", "E"]);
}
