use geo::HaversineDistance;
use geo::Point;

/// Great-circle distance in meters between two lon/lat points
pub fn haversine_distance(lon1: f64, lat1: f64, lon2: f64, lat2: f64) -> f64 {
    let p1 = Point::new(lon1, lat1);
    let p2 = Point::new(lon2, lat2);
    p1.haversine_distance(&p2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_haversine_zero() {
        assert_eq!(haversine_distance(4.35, 50.85, 4.35, 50.85), 0.0);
    }

    #[test]
    fn test_haversine_one_degree_lon_at_equator() {
        let d = haversine_distance(0.0, 0.0, 1.0, 0.0);
        assert!(
            d > 110_000.0 && d < 112_500.0,
            "one degree at the equator should be ~111km, got {}",
            d
        );
    }
}
