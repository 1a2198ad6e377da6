//! Reprojection avec PROJ
//!
//! Ce module est disponible uniquement avec le feature `proj`.

use proj::Proj;

use crate::error::ReprojectError;

/// Reprojection de coordonnées entre deux systèmes via PROJ
pub struct ProjReprojector {
    proj: Proj,
}

impl ProjReprojector {
    /// Crée un nouveau reprojector entre deux EPSG
    ///
    /// `new_known_crs` normalise l'ordre des axes : la sortie EPSG:4326 est
    /// (longitude, latitude).
    pub fn new(source_epsg: u32, target_epsg: u32) -> Result<Self, ReprojectError> {
        let source = format!("EPSG:{}", source_epsg);
        let target = format!("EPSG:{}", target_epsg);

        let proj = Proj::new_known_crs(&source, &target, None).map_err(|e| {
            ReprojectError::Create {
                source_epsg,
                target_epsg,
                reason: e.to_string(),
            }
        })?;

        Ok(Self { proj })
    }

    /// Transforme une coordonnée unique
    pub fn transform(&self, x: f64, y: f64) -> Result<(f64, f64), ReprojectError> {
        self.proj
            .convert((x, y))
            .map_err(|e| ReprojectError::Transform {
                x,
                y,
                reason: e.to_string(),
            })
    }
}
