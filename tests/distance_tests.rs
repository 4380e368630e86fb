use hopper::shared::{Coordinate, Distance};

#[test]
fn distance_test() {
    let paris = Coordinate {
        latitude: 48.85800943005911,
        longitude: 2.3514350059357927,
    };
    let london = Coordinate {
        latitude: 51.5052389927712,
        longitude: -0.12495407345099824,
    };
    let d = paris.euclidean_distance(&london);
    assert!((d.as_kilometers() - 343.0).abs() < 5.0);
    assert_eq!(d, london.euclidean_distance(&paris));
}

#[test]
fn manhattan_test() {
    let grunwaldzki = Coordinate::new(51.1113, 17.0602);
    let dworzec = Coordinate::new(51.0988, 17.0366);
    let euclidean = grunwaldzki.euclidean_distance(&dworzec);
    let manhattan = grunwaldzki.manhattan_distance(&dworzec);
    assert!((euclidean.as_kilometers() - 2.15).abs() < 0.1);
    assert!(manhattan > euclidean);
    assert!(manhattan.as_meters() < euclidean.as_meters() * std::f64::consts::SQRT_2 + 1e-6);
}

#[test]
fn distance_eq_test() {
    let dist_a = Distance::from_meters(1000.0);
    let dist_b = Distance::from_kilometers(1.0);
    assert_eq!(dist_a, dist_b)
}
