use std::{
    cmp,
    fmt::Display,
    ops::{Add, Sub},
};

use serde::{Deserialize, Serialize};

pub(crate) const LONGITUDE_DISTANCE: Distance = Distance::from_meters(111_320.0);
pub(crate) const LATITUDE_DISTANCE: Distance = Distance::from_meters(110_540.0);

#[derive(Debug, Clone, Copy, Default)]
pub struct Distance(f64);

impl PartialEq for Distance {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl PartialOrd for Distance {
    fn partial_cmp(&self, other: &Self) -> Option<cmp::Ordering> {
        self.0.partial_cmp(&other.0)
    }
}

impl Add for Distance {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Distance {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl From<f64> for Distance {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl Distance {
    pub const fn from_meters(distance: f64) -> Self {
        Self(distance)
    }

    pub const fn from_kilometers(distance: f64) -> Self {
        Self(distance * 1000.0)
    }

    pub const fn as_meters(&self) -> f64 {
        self.0
    }

    pub const fn as_kilometers(&self) -> f64 {
        self.0 / 1000.0
    }
}

/// A position in degrees. Only ever used to estimate remaining distance,
/// never to decide whether a route is valid.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    #[serde(rename = "lat")]
    pub latitude: f64,
    #[serde(rename = "lon")]
    pub longitude: f64,
}

impl Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{}, {}", self.latitude, self.longitude))
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((latitude, longitude): (f64, f64)) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl From<Coordinate> for (f64, f64) {
    fn from(value: Coordinate) -> Self {
        (value.latitude, value.longitude)
    }
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Straight-line distance using an equirectangular projection: degree deltas
    /// scaled to meters, with longitude shrunk by the cosine of the mean latitude.
    pub fn euclidean_distance(&self, coord: &Self) -> Distance {
        let (lat_dist, lon_dist) = self.scaled_deltas(coord);
        Distance::from_meters(f64::sqrt(lat_dist * lat_dist + lon_dist * lon_dist))
    }

    /// Sum of the absolute north-south and east-west distances.
    pub fn manhattan_distance(&self, coord: &Self) -> Distance {
        let (lat_dist, lon_dist) = self.scaled_deltas(coord);
        Distance::from_meters(lat_dist.abs() + lon_dist.abs())
    }

    fn scaled_deltas(&self, coord: &Self) -> (f64, f64) {
        let mean_lat = f64::to_radians((self.latitude + coord.latitude) / 2.0);
        let lat_dist = (coord.latitude - self.latitude) * LATITUDE_DISTANCE.as_meters();
        let lon_dist =
            (coord.longitude - self.longitude) * LONGITUDE_DISTANCE.as_meters() * mean_lat.cos();
        (lat_dist, lon_dist)
    }
}

#[test]
fn distance_eq_test() {
    let dist_a = Distance::from_meters(1000.0);
    let dist_b = Distance::from_kilometers(1.0);
    assert_eq!(dist_a, dist_b)
}

#[test]
fn distance_cmp_test() {
    let dist_a = Distance::from_meters(1000.0);
    let dist_b = Distance::from_kilometers(0.5);
    assert!(dist_a > dist_b)
}

#[test]
fn same_point_is_zero() {
    let coord = Coordinate::new(51.107_883, 17.038_538);
    assert_eq!(coord.euclidean_distance(&coord).as_meters(), 0.0);
    assert_eq!(coord.manhattan_distance(&coord).as_meters(), 0.0);
}
