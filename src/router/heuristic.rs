//! Straight-line distance estimates used to steer A*.
//!
//! These are approximations. The time cost model turns them into minutes at a
//! fixed top speed, which is not a strict lower bound on real travel time, so A*
//! with a heuristic is best-effort rather than guaranteed optimal.

use std::{
    collections::HashMap,
    sync::{PoisonError, RwLock},
};

use crate::shared::geo::{Coordinate, Distance};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DistanceFn {
    #[default]
    Euclidean,
    Manhattan,
}

impl DistanceFn {
    pub fn distance(&self, a: &Coordinate, b: &Coordinate) -> Distance {
        match self {
            DistanceFn::Euclidean => a.euclidean_distance(b),
            DistanceFn::Manhattan => a.manhattan_distance(b),
        }
    }
}

type CacheKey = [u64; 4];

fn cache_key(a: &Coordinate, b: &Coordinate) -> CacheKey {
    [
        a.latitude.to_bits(),
        a.longitude.to_bits(),
        b.latitude.to_bits(),
        b.longitude.to_bits(),
    ]
}

/// Memo of already computed distances, keyed by the exact coordinate pair.
#[derive(Debug, Default)]
pub struct DistanceCache {
    entries: RwLock<HashMap<CacheKey, Distance>>,
}

impl DistanceCache {
    pub fn new() -> Self {
        Default::default()
    }

    // A poisoned lock still holds a usable map, every entry is written whole
    fn get(&self, key: &CacheKey) -> Option<Distance> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .copied()
    }

    fn insert(&self, key: CacheKey, distance: Distance) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, distance);
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

/// A distance function together with its memo. One value can be shared by
/// reference between searches, including searches on different threads.
#[derive(Debug, Default)]
pub struct Heuristic {
    function: DistanceFn,
    cache: DistanceCache,
}

impl Heuristic {
    pub fn new(function: DistanceFn) -> Self {
        Self {
            function,
            cache: DistanceCache::new(),
        }
    }

    pub fn euclidean() -> Self {
        Self::new(DistanceFn::Euclidean)
    }

    pub fn manhattan() -> Self {
        Self::new(DistanceFn::Manhattan)
    }

    pub fn function(&self) -> DistanceFn {
        self.function
    }

    pub fn cache(&self) -> &DistanceCache {
        &self.cache
    }

    pub fn distance(&self, from: &Coordinate, to: &Coordinate) -> Distance {
        let key = cache_key(from, to);
        if let Some(distance) = self.cache.get(&key) {
            return distance;
        }
        let distance = self.function.distance(from, to);
        self.cache.insert(key, distance);
        distance
    }
}

#[test]
fn memoizes_pairs() {
    let heuristic = Heuristic::euclidean();
    let a = Coordinate::new(51.107_883, 17.038_538);
    let b = Coordinate::new(51.110_000, 17.060_000);
    let first = heuristic.distance(&a, &b);
    assert_eq!(heuristic.cache().len(), 1);
    assert_eq!(heuristic.distance(&a, &b), first);
    assert_eq!(heuristic.cache().len(), 1);
    heuristic.distance(&b, &a);
    assert_eq!(heuristic.cache().len(), 2);
    heuristic.cache().clear();
    assert!(heuristic.cache().is_empty());
}

#[test]
fn manhattan_is_never_shorter() {
    let a = Coordinate::new(51.107_883, 17.038_538);
    let b = Coordinate::new(51.130_000, 17.000_000);
    let euclidean = Heuristic::euclidean().distance(&a, &b);
    let manhattan = Heuristic::manhattan().distance(&a, &b);
    assert!(manhattan >= euclidean);
    assert!(euclidean.as_meters() > 0.0);
}
