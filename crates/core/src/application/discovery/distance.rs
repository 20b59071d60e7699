// Great-circle distance between two coordinates

use crate::domain::Coordinates;

/// Mean Earth radius in kilometres
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine great-circle distance in kilometres, rounded to one decimal.
///
/// Pure function over well-formed numeric input. Callers must not invoke it
/// for a job with missing coordinates; such jobs carry an unknown distance
/// instead.
pub fn haversine_km(a: Coordinates, b: Coordinates) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();
    let lat_a = a.lat.to_radians();
    let lat_b = b.lat.to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (d_lng / 2.0).sin().powi(2);
    let central_angle = 2.0 * h.sqrt().asin();

    round_to_tenth(EARTH_RADIUS_KM * central_angle)
}

fn round_to_tenth(km: f64) -> f64 {
    (km * 10.0).round() / 10.0
}
