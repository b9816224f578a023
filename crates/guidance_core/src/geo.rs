//! crates/guidance_core/src/geo.rs
//!
//! Great-circle math for the Qibla direction: initial bearing and distance
//! from an arbitrary point to the Kaaba.

/// Latitude of the Kaaba in Mecca, degrees north.
pub const KAABA_LAT: f64 = 21.4225;
/// Longitude of the Kaaba in Mecca, degrees east.
pub const KAABA_LON: f64 = 39.8262;

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Initial great-circle bearing from (`lat`, `lon`) to the Kaaba, in degrees
/// clockwise from true north, normalized into [0, 360).
///
/// NaN inputs propagate; validating coordinates is the caller's job.
pub fn qibla_bearing(lat: f64, lon: f64) -> f64 {
    let d_lon = (KAABA_LON - lon).to_radians();
    let y = d_lon.sin() * KAABA_LAT.to_radians().cos();
    let x = lat.to_radians().cos() * KAABA_LAT.to_radians().sin()
        - lat.to_radians().sin() * KAABA_LAT.to_radians().cos() * d_lon.cos();
    let bearing = y.atan2(x).to_degrees();
    (bearing + 360.0) % 360.0
}

/// Haversine great-circle distance between two points, in kilometres.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

/// Distance from (`lat`, `lon`) to the Kaaba, in kilometres.
pub fn distance_to_kaaba_km(lat: f64, lon: f64) -> f64 {
    haversine_km(lat, lon, KAABA_LAT, KAABA_LON)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bearing_is_normalized() {
        let points = [
            (23.685, 90.3563),
            (51.5074, -0.1278),
            (-33.8688, 151.2093),
            (0.0, 0.0),
            (89.9, 179.9),
        ];
        for (lat, lon) in points {
            let b = qibla_bearing(lat, lon);
            assert!((0.0..360.0).contains(&b), "bearing {b} out of range for ({lat}, {lon})");
        }
    }

    #[test]
    fn bearing_from_due_south_is_north() {
        // Same meridian, south of the Kaaba: the great circle runs due north.
        let b = qibla_bearing(10.0, KAABA_LON);
        assert!(b < 1e-9 || (360.0 - b) < 1e-9, "got {b}");
    }

    #[test]
    fn bearing_from_due_north_is_south() {
        let b = qibla_bearing(35.0, KAABA_LON);
        assert!((b - 180.0).abs() < 1e-9, "got {b}");
    }

    #[test]
    fn bearing_at_kaaba_does_not_panic() {
        // Degenerate input: any value is acceptable, it just must not throw.
        let b = qibla_bearing(KAABA_LAT, KAABA_LON);
        assert!(b.is_finite());
    }

    #[test]
    fn distance_to_self_is_zero() {
        assert!(haversine_km(23.685, 90.3563, 23.685, 90.3563).abs() < 1e-9);
    }

    #[test]
    fn distance_is_symmetric() {
        let d1 = haversine_km(23.685, 90.3563, KAABA_LAT, KAABA_LON);
        let d2 = haversine_km(KAABA_LAT, KAABA_LON, 23.685, 90.3563);
        assert!((d1 - d2).abs() < 1e-6);
        assert!(d1 > 0.0);
    }

    #[test]
    fn nan_propagates() {
        assert!(qibla_bearing(f64::NAN, 0.0).is_nan());
        assert!(haversine_km(f64::NAN, 0.0, 1.0, 1.0).is_nan());
    }
}
