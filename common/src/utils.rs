use crate::constants::{BASE_LATITUDE, BASE_LONGITUDE, COORDINATE_SPAN_DEG};
use rand::Rng;

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Distancia de círculo máximo (haversine) entre dos pares `(latitud, longitud)`
/// expresados en grados. Devuelve kilómetros.
pub fn distance_km(a: (f64, f64), b: (f64, f64)) -> f64 {
    let (lat1, lon1) = (a.0.to_radians(), a.1.to_radians());
    let (lat2, lon2) = (b.0.to_radians(), b.1.to_radians());

    let dlat = lat2 - lat1;
    let dlon = lon2 - lon1;

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

/// Posición aleatoria alrededor del centro configurado en `constants`.
pub fn random_position() -> (f64, f64) {
    let mut rng = rand::thread_rng();
    (
        BASE_LATITUDE + rng.gen_range(-COORDINATE_SPAN_DEG..COORDINATE_SPAN_DEG),
        BASE_LONGITUDE + rng.gen_range(-COORDINATE_SPAN_DEG..COORDINATE_SPAN_DEG),
    )
}

pub fn random_bool_by_given_probability(probability: f32) -> bool {
    let rand_value: f32 = rand::random();
    rand_value < probability
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_to_self_is_zero() {
        let p = (BASE_LATITUDE, BASE_LONGITUDE);
        assert!(distance_km(p, p) < 1e-9);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = (-34.6037, -58.3816);
        let b = (-34.9214, -57.9544);
        assert!((distance_km(a, b) - distance_km(b, a)).abs() < 1e-9);
    }

    #[test]
    fn known_distance_buenos_aires_la_plata() {
        // Obelisco a La Plata, unos 52 km en línea recta.
        let obelisco = (-34.6037, -58.3816);
        let la_plata = (-34.9214, -57.9544);
        let d = distance_km(obelisco, la_plata);
        assert!(d > 45.0 && d < 60.0, "got {}", d);
    }

    #[test]
    fn probability_extremes() {
        assert!(random_bool_by_given_probability(1.1));
        assert!(!random_bool_by_given_probability(0.0));
    }
}
