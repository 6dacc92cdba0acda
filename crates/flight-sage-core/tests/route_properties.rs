// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use flight_sage_core::{compute_route, haversine_km, Coordinate, RouteError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const NEW_YORK: Coordinate = Coordinate {
    lat: 40.7128,
    lon: -74.0060,
};
const LOS_ANGELES: Coordinate = Coordinate {
    lat: 34.0522,
    lon: -118.2437,
};

fn random_coordinate(rng: &mut StdRng) -> Coordinate {
    Coordinate {
        lat: rng.gen_range(-90.0..=90.0),
        lon: rng.gen_range(-180.0..=180.0),
    }
}

fn close(a: Coordinate, b: Coordinate) -> bool {
    (a.lat - b.lat).abs() < 1e-9 && (a.lon - b.lon).abs() < 1e-9
}

#[test]
fn test_new_york_to_los_angeles() {
    let route = compute_route(NEW_YORK, LOS_ANGELES).unwrap();

    assert!(
        (route.distance_km - 3936.0).abs() <= 5.0,
        "NY-LA should be ~3936 km, got {}",
        route.distance_km
    );
    assert_eq!(route.waypoints.len(), 2);
    assert!(close(route.waypoints[0], Coordinate { lat: 41.2128, lon: -74.5060 }));
    assert!(close(route.waypoints[1], Coordinate { lat: 33.5522, lon: -117.7437 }));
    assert_eq!(route.origin, NEW_YORK);
    assert_eq!(route.destination, LOS_ANGELES);
}

#[test]
fn test_distance_is_symmetric() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _ in 0..500 {
        let p = random_coordinate(&mut rng);
        let q = random_coordinate(&mut rng);
        let pq = compute_route(p, q).unwrap().distance_km;
        let qp = compute_route(q, p).unwrap().distance_km;
        assert!((pq - qp).abs() < 1e-6, "{:?} {:?}: {} vs {}", p, q, pq, qp);
        assert!(pq >= 0.0);
    }
}

#[test]
fn test_same_point_is_zero() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..200 {
        let p = random_coordinate(&mut rng);
        let d = compute_route(p, p).unwrap().distance_km;
        assert!(d.abs() < 1e-6, "{:?} -> {}", p, d);
    }
}

#[test]
fn test_triangle_inequality() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..1000 {
        let p = random_coordinate(&mut rng);
        let q = random_coordinate(&mut rng);
        let r = random_coordinate(&mut rng);
        let direct = haversine_km(p, r);
        let via = haversine_km(p, q) + haversine_km(q, r);
        assert!(
            direct <= via + 1e-6,
            "triangle inequality broken for {:?} {:?} {:?}: {} > {}",
            p,
            q,
            r,
            direct,
            via
        );
    }
}

#[test]
fn test_invalid_latitude_is_rejected() {
    let bad = Coordinate { lat: 200.0, lon: 0.0 };
    assert!(matches!(
        compute_route(bad, LOS_ANGELES),
        Err(RouteError::InvalidCoordinate(_))
    ));
    assert!(matches!(
        compute_route(NEW_YORK, bad),
        Err(RouteError::InvalidCoordinate(_))
    ));
    assert!(matches!(
        compute_route(NEW_YORK, Coordinate { lat: 0.0, lon: 181.0 }),
        Err(RouteError::InvalidCoordinate(_))
    ));
}

#[test]
fn test_deterministic() {
    let a = compute_route(NEW_YORK, LOS_ANGELES).unwrap();
    let b = compute_route(NEW_YORK, LOS_ANGELES).unwrap();
    assert_eq!(a, b);
    assert_ne!(a.waypoints.as_ptr(), b.waypoints.as_ptr());
}

#[test]
fn test_inputs_are_not_mutated() {
    let origin = NEW_YORK;
    let destination = LOS_ANGELES;
    let _ = compute_route(origin, destination).unwrap();
    assert_eq!(origin, NEW_YORK);
    assert_eq!(destination, LOS_ANGELES);
}

#[test]
fn test_polar_origin_waypoint_not_range_checked() {
    let route = compute_route(Coordinate { lat: 90.0, lon: 0.0 }, NEW_YORK).unwrap();
    assert_eq!(route.waypoints[0], Coordinate { lat: 90.5, lon: -0.5 });
}
