//! Projection Lambert Conique Conforme 2SP
//!
//! Inverse seulement : coordonnées planes → géographiques. Les constantes
//! de la projection sont calculées une fois à la construction.

use super::ellipsoid::GRS80;

/// Pied international en mètres
pub const INTERNATIONAL_FOOT: f64 = 0.3048;

/// Paramètres d'une zone Lambert (angles en radians, distances en mètres)
#[derive(Debug, Clone, Copy)]
struct Parameters {
    /// Longitude origine
    lon0: f64,
    /// Latitude origine
    lat0: f64,
    /// Premier parallèle standard
    lat1: f64,
    /// Deuxième parallèle standard
    lat2: f64,
    /// False easting
    x0: f64,
    /// False northing
    y0: f64,
    /// Taille de l'unité linéaire des coordonnées en mètres
    unit: f64,
}

impl Parameters {
    /// NAD83 / Oregon North (ft) - EPSG:2269
    fn oregon_north() -> Self {
        Self {
            lon0: (-120.5_f64).to_radians(),             // 120°30'W
            lat0: (43.0 + 40.0 / 60.0_f64).to_radians(), // 43°40'N
            lat1: 46.0_f64.to_radians(),                 // 46°N
            lat2: (44.0 + 20.0 / 60.0_f64).to_radians(), // 44°20'N
            x0: 2_500_000.000_142_4,                     // 8202099.738 ft
            y0: 0.0,
            unit: INTERNATIONAL_FOOT,
        }
    }
}

/// Inverse Lambert Conique Conforme sur l'ellipsoïde GRS80
#[derive(Debug, Clone, Copy)]
pub struct LambertConformal {
    params: Parameters,
    /// Exposant de la projection
    n: f64,
    /// Constante C
    c: f64,
    /// Rayon à l'origine
    r0: f64,
}

impl LambertConformal {
    /// Zone Oregon North (EPSG:2269)
    pub fn oregon_north() -> Self {
        Self::from_parameters(Parameters::oregon_north())
    }

    fn from_parameters(params: Parameters) -> Self {
        let e = GRS80::E;
        let e2 = GRS80::E2;
        let a = GRS80::A;

        let n1 = grande_normale(params.lat1, a, e2);
        let n2 = grande_normale(params.lat2, a, e2);

        let iso_lat1 = isometric_latitude(params.lat1, e);
        let iso_lat2 = isometric_latitude(params.lat2, e);
        let iso_lat0 = isometric_latitude(params.lat0, e);

        let n = (n1 * params.lat1.cos()).ln() - (n2 * params.lat2.cos()).ln();
        let n = n / (iso_lat2 - iso_lat1);

        let c = (n1 * params.lat1.cos() / n) * (n * iso_lat1).exp();
        let r0 = c * (-n * iso_lat0).exp();

        Self { params, n, c, r0 }
    }

    /// Convertit (x, y) dans l'unité de la zone en (longitude, latitude) en degrés
    pub fn to_geographic(&self, x: f64, y: f64) -> (f64, f64) {
        let p = &self.params;

        let dx = x * p.unit - p.x0;
        let dy = y * p.unit - p.y0;

        let r = (dx.powi(2) + (self.r0 - dy).powi(2)).sqrt();
        let r = if self.n < 0.0 { -r } else { r };

        let gamma = (dx / (self.r0 - dy)).atan();

        let iso_lat = -(r / self.c).ln() / self.n;
        let lat = latitude_from_isometric(iso_lat, GRS80::E);
        let lon = p.lon0 + gamma / self.n;

        (lon.to_degrees(), lat.to_degrees())
    }
}

/// Calcule la latitude isométrique
fn isometric_latitude(lat: f64, e: f64) -> f64 {
    let sin_lat = lat.sin();
    let term = ((1.0 - e * sin_lat) / (1.0 + e * sin_lat)).powf(e / 2.0);
    ((std::f64::consts::FRAC_PI_4 + lat / 2.0).tan() * term).ln()
}

/// Calcule la latitude depuis la latitude isométrique (itératif)
fn latitude_from_isometric(iso_lat: f64, e: f64) -> f64 {
    let mut lat = 2.0 * iso_lat.exp().atan() - std::f64::consts::FRAC_PI_2;

    for _ in 0..15 {
        let sin_lat = lat.sin();
        let term = ((1.0 + e * sin_lat) / (1.0 - e * sin_lat)).powf(e / 2.0);
        let new_lat = 2.0 * (iso_lat.exp() * term).atan() - std::f64::consts::FRAC_PI_2;

        if (new_lat - lat).abs() < 1e-14 {
            return new_lat;
        }
        lat = new_lat;
    }
    lat
}

/// Calcule la grande normale (rayon de courbure dans le plan vertical)
fn grande_normale(lat: f64, a: f64, e2: f64) -> f64 {
    a / (1.0 - e2 * lat.sin().powi(2)).sqrt()
}
