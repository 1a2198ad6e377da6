//! Reprojection Oregon North State Plane (EPSG:2269) → WGS84 (EPSG:4326)
//!
//! Deux implémentations :
//! - `Lite` : Lambert Conique Conforme en Rust pur (par défaut)
//! - `Proj` : bibliothèque PROJ (feature `proj`)
//!
//! La transformation NAD83 → WGS84 est l'identité, comme le choix par défaut
//! de PROJ/GDAL pour ce couple de systèmes.

mod ellipsoid;
mod lambert;
#[cfg(feature = "proj")]
mod proj;

pub use lambert::{LambertConformal, INTERNATIONAL_FOOT};
#[cfg(feature = "proj")]
pub use self::proj::ProjReprojector;

use geo::Point;

use crate::error::ReprojectError;

/// NAD83 / Oregon North (ft)
pub const SOURCE_EPSG: u32 = 2269;

/// WGS84 longitude/latitude
pub const TARGET_EPSG: u32 = 4326;

/// Reprojector EPSG:2269 → EPSG:4326
///
/// Immuable après construction, partagé entre toutes les lignes converties.
pub enum Reprojector {
    /// Reprojection légère (pure Rust)
    Lite(LambertConformal),
    /// Reprojection via PROJ
    #[cfg(feature = "proj")]
    Proj(ProjReprojector),
}

impl Reprojector {
    /// Crée le reprojector : PROJ si le feature est activé, sinon Rust pur
    pub fn new() -> Result<Self, ReprojectError> {
        #[cfg(feature = "proj")]
        {
            let proj = ProjReprojector::new(SOURCE_EPSG, TARGET_EPSG)?;
            return Ok(Self::Proj(proj));
        }

        #[cfg(not(feature = "proj"))]
        Ok(Self::lite())
    }

    /// Reprojector Rust pur, toujours disponible
    pub fn lite() -> Self {
        Self::Lite(LambertConformal::oregon_north())
    }

    /// Transforme (x, y) en pieds State Plane vers (longitude, latitude)
    pub fn transform(&self, x: f64, y: f64) -> Result<(f64, f64), ReprojectError> {
        match self {
            Self::Lite(lcc) => Ok(lcc.to_geographic(x, y)),
            #[cfg(feature = "proj")]
            Self::Proj(proj) => proj.transform(x, y),
        }
    }

    /// Transforme un point `geo`
    pub fn transform_point(&self, point: Point<f64>) -> Result<Point<f64>, ReprojectError> {
        let (lon, lat) = self.transform(point.x(), point.y())?;
        Ok(Point::new(lon, lat))
    }

    /// Retourne une description du reprojector utilisé
    pub fn description(&self) -> &'static str {
        match self {
            Self::Lite(_) => "reproject_lite (pure Rust)",
            #[cfg(feature = "proj")]
            Self::Proj(_) => "proj (PROJ library)",
        }
    }
}
