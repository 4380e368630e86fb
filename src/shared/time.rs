use std::{
    cmp,
    fmt::Display,
    ops::{Add, AddAssign, Sub},
};

use chrono::{Local, Timelike};
use serde::{Deserialize, Serialize};

/// A point in time, in minutes since midnight of the service day.
///
/// Trips that cross midnight keep counting upwards, so values above 1440 are valid.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Time(f64);

impl PartialEq for Time {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl PartialOrd for Time {
    fn partial_cmp(&self, other: &Self) -> Option<cmp::Ordering> {
        self.0.partial_cmp(&other.0)
    }
}

impl From<f64> for Time {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl Sub<Time> for Time {
    type Output = Duration;

    fn sub(self, rhs: Self) -> Self::Output {
        Duration(self.0 - rhs.0)
    }
}

impl Add<Duration> for Time {
    type Output = Self;

    fn add(self, rhs: Duration) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign<Duration> for Time {
    fn add_assign(&mut self, rhs: Duration) {
        self.0 += rhs.0
    }
}

impl Display for Time {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hms_string())
    }
}

impl Time {
    pub fn now() -> Self {
        let now = Local::now();
        Self(now.num_seconds_from_midnight() as f64 / 60.0)
    }

    pub const fn from_minutes(minutes: f64) -> Self {
        Self(minutes)
    }

    pub const fn as_minutes(&self) -> f64 {
        self.0
    }

    pub fn total_cmp(&self, other: &Self) -> cmp::Ordering {
        self.0.total_cmp(&other.0)
    }

    /// Renders the time as `HH:MM:SS`, rounded to the nearest whole second.
    pub fn to_hms_string(&self) -> String {
        let total = (self.0 * 60.0).round().max(0.0) as u64;
        let h = total / 3600;
        let m = (total % 3600) / 60;
        let s = total % 60;
        format!("{:02}:{:02}:{:02}", h, m, s)
    }

    /// Parses `H:M:S` into minutes since midnight. Hours past 23 are accepted.
    pub fn from_hms(time: &str) -> Option<Self> {
        let mut split = time.trim().split(':');
        let hours: u32 = split.next()?.parse().ok()?;
        let minutes: u32 = split.next()?.parse().ok()?;
        let seconds: u32 = split.next()?.parse().ok()?;
        if split.next().is_some() {
            return None;
        }
        Some(Self(
            hours as f64 * 60.0 + minutes as f64 + seconds as f64 / 60.0,
        ))
    }
}

/// A span of time in minutes.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Duration(f64);

impl PartialEq for Duration {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl PartialOrd for Duration {
    fn partial_cmp(&self, other: &Self) -> Option<cmp::Ordering> {
        self.0.partial_cmp(&other.0)
    }
}

impl From<f64> for Duration {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl Add for Duration {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Duration {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0
    }
}

impl Duration {
    pub const fn from_seconds(secs: f64) -> Self {
        Self(secs / 60.0)
    }

    pub const fn from_minutes(minutes: f64) -> Self {
        Self(minutes)
    }

    pub const fn from_hours(hours: f64) -> Self {
        Self(hours * 60.0)
    }

    pub const fn as_minutes(&self) -> f64 {
        self.0
    }

    pub const fn as_seconds(&self) -> f64 {
        self.0 * 60.0
    }
}

#[test]
fn parse_unparse_1() {
    let time = "00:00:00";
    let stime = Time::from_hms(time).unwrap();
    assert_eq!(time, stime.to_hms_string())
}

#[test]
fn parse_unparse_2() {
    let time = "00:00:30";
    let stime = Time::from_hms(time).unwrap();
    assert_eq!(time, stime.to_hms_string())
}

#[test]
fn parse_unparse_3() {
    let time = "05:05:30";
    let stime = Time::from_hms(time).unwrap();
    assert_eq!(stime.as_minutes(), 305.5);
    assert_eq!(time, stime.to_hms_string())
}

#[test]
fn parse_unparse_past_midnight() {
    let time = "25:10:00";
    let stime = Time::from_hms(time).unwrap();
    assert_eq!(stime.as_minutes(), 1510.0);
    assert_eq!(time, stime.to_hms_string())
}

#[test]
fn unpadded_input() {
    let stime = Time::from_hms("5:0:0").unwrap();
    assert_eq!(stime.as_minutes(), 300.0);
}

#[test]
fn valid_time_test_1() {
    assert_eq!(Time::from_hms("00:01:30").unwrap().as_minutes(), 1.5);
}

#[test]
fn invalid_time_test_1() {
    assert!(Time::from_hms("00:00:0a").is_none())
}

#[test]
fn invalid_time_test_2() {
    assert!(Time::from_hms("00:00").is_none())
}

#[test]
fn invalid_time_test_3() {
    assert!(Time::from_hms("00:00:00:00").is_none())
}

#[test]
fn time_minus_time_is_duration() {
    let wait = Time::from_minutes(15.0) - Time::from_minutes(12.0);
    assert_eq!(wait, Duration::from_minutes(3.0));
    assert_eq!(wait.as_seconds(), 180.0);
}
