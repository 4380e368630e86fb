use std::{fmt::Display, str::FromStr};

use crate::{
    graph::Connection,
    shared::{geo::Distance, time::Time},
};

/// Fastest any vehicle in the network is assumed to travel, in meters per minute.
/// 100 km/h.
pub const MAX_TRANSIT_SPEED: f64 = 100_000.0 / 60.0;

/// How a search scores an edge.
///
/// Costs are plain floats, lower is better. `estimate` must be in the same unit as
/// `edge_cost` since the two are added together in A*.
pub trait CostModel: Send + Sync {
    /// Accumulated cost after boarding `connection` at `current_time`, having
    /// arrived on `previous_line`.
    fn edge_cost(
        &self,
        accumulated: f64,
        current_time: Time,
        connection: &Connection,
        previous_line: Option<&str>,
    ) -> f64;

    /// Hint for the remaining cost when `remaining` is left to the destination.
    fn estimate(&self, remaining: Distance) -> f64;
}

/// Minutes spent, waiting included.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeCost;

impl CostModel for TimeCost {
    fn edge_cost(
        &self,
        accumulated: f64,
        current_time: Time,
        connection: &Connection,
        _previous_line: Option<&str>,
    ) -> f64 {
        let wait = connection.departure_time - current_time;
        accumulated + wait.as_minutes() + connection.travel_time.as_minutes()
    }

    fn estimate(&self, remaining: Distance) -> f64 {
        remaining.as_meters() / MAX_TRANSIT_SPEED
    }
}

/// Number of line changes. Boarding the first vehicle is free.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransferCost;

impl CostModel for TransferCost {
    fn edge_cost(
        &self,
        accumulated: f64,
        _current_time: Time,
        connection: &Connection,
        previous_line: Option<&str>,
    ) -> f64 {
        match previous_line {
            Some(line) if !connection.is_same_line(line) => accumulated + 1.0,
            _ => accumulated,
        }
    }

    fn estimate(&self, _remaining: Distance) -> f64 {
        0.0
    }
}

/// What a search minimizes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Criterion {
    #[default]
    Time,
    Transfer,
}

impl Criterion {
    pub fn cost_model(&self) -> &'static dyn CostModel {
        match self {
            Criterion::Time => &TimeCost,
            Criterion::Transfer => &TransferCost,
        }
    }
}

impl Display for Criterion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Criterion::Time => f.write_str("time"),
            Criterion::Transfer => f.write_str("transfer"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseCriterionError(String);

impl Display for ParseCriterionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown criterion {:?}, expected time or transfer", self.0)
    }
}

impl std::error::Error for ParseCriterionError {}

impl FromStr for Criterion {
    type Err = ParseCriterionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "time" => Ok(Criterion::Time),
            "transfer" | "transfers" => Ok(Criterion::Transfer),
            _ => Err(ParseCriterionError(s.to_string())),
        }
    }
}

#[cfg(test)]
fn leg(line: &str, departure: f64, arrival: f64) -> Connection {
    Connection::new(
        line,
        "MPK",
        Time::from_minutes(departure),
        Time::from_minutes(arrival),
    )
}

#[test]
fn time_cost_charges_wait_and_travel() {
    let cost = TimeCost.edge_cost(4.0, Time::from_minutes(12.0), &leg("1", 15.0, 20.0), None);
    assert_eq!(cost, 4.0 + 3.0 + 5.0);
}

#[test]
fn time_estimate_uses_max_speed() {
    let minutes = TimeCost.estimate(Distance::from_kilometers(50.0));
    assert!((minutes - 30.0).abs() < 1e-9);
}

#[test]
fn first_boarding_is_free() {
    let cost = TransferCost.edge_cost(0.0, Time::default(), &leg("1", 0.0, 5.0), None);
    assert_eq!(cost, 0.0);
}

#[test]
fn line_change_adds_one() {
    let connection = leg("2", 0.0, 5.0);
    assert_eq!(
        TransferCost.edge_cost(1.0, Time::default(), &connection, Some("1 (MPK)")),
        2.0
    );
    assert_eq!(
        TransferCost.edge_cost(1.0, Time::default(), &connection, Some("2 (MPK)")),
        1.0
    );
    assert_eq!(TransferCost.estimate(Distance::from_kilometers(10.0)), 0.0);
}

#[test]
fn parse_criterion() {
    assert_eq!("time".parse::<Criterion>(), Ok(Criterion::Time));
    assert_eq!("Transfer".parse::<Criterion>(), Ok(Criterion::Transfer));
    assert!("distance".parse::<Criterion>().is_err());
}
