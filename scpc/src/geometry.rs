//! Calcul de l'emprise à imprimer autour du centre de la parcelle

use crate::error::ScpcError;
use crate::protocol::{FOOTPRINT_DIVISOR, PAGE_FOOTPRINTS};
use crate::types::{Orientation, PaperSize, ParcelCenter, PrintBBox};

/// Emprise papier (largeur, hauteur) pour une taille et une orientation
pub fn page_footprint(taille: PaperSize, orientation: Orientation) -> Result<(u32, u32), ScpcError> {
    PAGE_FOOTPRINTS
        .iter()
        .find(|(size, orient, _, _)| *size == taille.as_str() && *orient == orientation.as_str())
        .map(|&(_, _, width, height)| (width, height))
        .ok_or_else(|| {
            ScpcError::Internal(format!(
                "gabarit inconnu: {}-{}",
                taille.as_str(),
                orientation.as_str()
            ))
        })
}

/// Calcule l'emprise centrée sur la parcelle.
///
/// Demi-étendue = (dimension / 100000) × échelle / 2, pour chaque axe.
pub fn compute_bbox(
    center: ParcelCenter,
    taille: PaperSize,
    orientation: Orientation,
    echelle: u32,
) -> Result<PrintBBox, ScpcError> {
    let (width, height) = page_footprint(taille, orientation)?;
    let scale = f64::from(echelle);

    let half_width = (f64::from(width) / FOOTPRINT_DIVISOR) * scale / 2.0;
    let half_height = (f64::from(height) / FOOTPRINT_DIVISOR) * scale / 2.0;

    Ok(PrintBBox {
        x_min: center.x - half_width,
        x_max: center.x + half_width,
        y_min: center.y - half_height,
        y_max: center.y + half_height,
    })
}
