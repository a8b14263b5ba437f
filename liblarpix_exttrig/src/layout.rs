use std::path::Path;

use ndarray::Array2;
use serde::Deserialize;

use super::channel_id::encode_channel_id;
use super::constants::MAX_UID;
use super::error::LayoutError;

#[derive(Debug, Deserialize)]
struct LayoutDocument {
    chips: Vec<(u8, Vec<Option<usize>>)>,
    pixels: Vec<Vec<f64>>,
}

/// Load the pixel layout, producing a MAX_UID x 2 array of (x, y) positions.
///
/// The layout document lists, per chip, the pixel wired to each of its
/// channels (null for unrouted channels) and the coordinate record of every
/// pixel. Unrouted channels keep NaN coordinates; plotting masks on the
/// summary table's active flag, so NaN rows never enter the analysis.
pub fn load_layout(path: &Path) -> Result<Array2<f64>, LayoutError> {
    if !path.exists() {
        return Err(LayoutError::BadFilePath(path.to_path_buf()));
    }
    let yaml_str = std::fs::read_to_string(path)?;
    parse_layout(&yaml_str)
}

fn parse_layout(yaml_str: &str) -> Result<Array2<f64>, LayoutError> {
    let doc: LayoutDocument = serde_yaml::from_str(yaml_str)?;

    let mut pix_loc = Array2::<f64>::from_elem((MAX_UID, 2), f64::NAN);
    for (chip_id, pix_ids) in &doc.chips {
        for (channel_id, pix_id) in pix_ids.iter().enumerate() {
            if let Some(pix_id) = pix_id {
                let pixel = match doc.pixels.get(*pix_id) {
                    Some(pixel) if pixel.len() >= 3 => pixel,
                    _ => return Err(LayoutError::BadPixelId(*pix_id)),
                };
                let uid = encode_channel_id(*chip_id, channel_id as u8)? as usize;
                // Coordinate records are (pixel id, x, y, ..)
                pix_loc[[uid, 0]] = pixel[1];
                pix_loc[[uid, 1]] = pixel[2];
            }
        }
    }
    Ok(pix_loc)
}

//Unit tests
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_layout() {
        let yaml_str = "
chips:
  - [11, [0, 1, null]]
  - [12, [2]]
pixels:
  - [0, 1.5, 2.5]
  - [1, 3.5, 4.5]
  - [2, 5.5, 6.5]
";
        let pix_loc = parse_layout(yaml_str).unwrap();
        assert_eq!(pix_loc.shape(), &[MAX_UID, 2]);
        assert_eq!(pix_loc[[0, 0]], 1.5);
        assert_eq!(pix_loc[[0, 1]], 2.5);
        assert_eq!(pix_loc[[1, 0]], 3.5);
        assert!(pix_loc[[2, 0]].is_nan());
        assert_eq!(pix_loc[[64, 0]], 5.5);
        assert!(pix_loc[[3, 0]].is_nan());
    }

    #[test]
    fn test_parse_layout_rejects_unknown_pixel() {
        let yaml_str = "
chips:
  - [11, [5]]
pixels:
  - [0, 1.0, 2.0]
";
        assert!(matches!(
            parse_layout(yaml_str),
            Err(LayoutError::BadPixelId(5))
        ));
    }
}
