use serde::{Deserialize, Serialize};

/// Luminous intensity distribution of a luminaire, as parsed from an LDT or IES file.
///
/// `intensities` is stored plane-major: the value for C-plane `p` and gamma
/// index `g` lives at `p * gamma_count + g`. Files with a symmetry code only
/// carry the active planes, so the array may be shorter than `nominal_len`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PhotometricDataset {
    pub manufacturer: String,
    pub luminaire_name: String,
    pub lamp_type: String,
    /// Total lamp flux (lm).
    pub total_lumens: f64,
    pub wattage: f64,
    /// Light output ratio of the luminaire, in percent.
    pub lorl: f64,
    /// Normalization reference (cd). Not required to equal the stored maximum.
    pub max_intensity: f64,
    /// EULUMDAT symmetry code.
    pub symmetry: i32,
    pub c_plane_count: usize,
    pub gamma_count: usize,
    /// Azimuth of each C-plane in degrees.
    pub c_angles: Vec<f64>,
    /// Polar angles in degrees, non-decreasing from 0.
    pub gamma_angles: Vec<f64>,
    pub intensities: Vec<f64>,
}

impl PhotometricDataset {
    /// Length of the intensity table if every C-plane were stored.
    pub fn nominal_len(&self) -> usize {
        self.c_plane_count.saturating_mul(self.gamma_count)
    }

    /// True when there is nothing to plot.
    pub fn is_empty(&self) -> bool {
        self.intensities.is_empty() || self.gamma_angles.is_empty()
    }

    /// Display label for the C-plane at `plane`, e.g. `C90`.
    pub fn c_plane_label(&self, plane: usize) -> String {
        match self.c_angles.get(plane) {
            Some(angle) => format!("C{}", format_degrees(*angle)),
            None => format!("C#{plane}"),
        }
    }
}

/// Format an angle without a trailing `.0` for whole degrees.
pub fn format_degrees(angle: f64) -> String {
    if (angle - angle.round()).abs() < 1e-9 {
        format!("{}", angle.round() as i64)
    } else {
        format!("{angle:.1}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_camel_case() {
        let json = r#"{
            "luminaireName": "Downlight",
            "maxIntensity": 250.0,
            "symmetry": 1,
            "cPlaneCount": 1,
            "gammaCount": 3,
            "cAngles": [0.0],
            "gammaAngles": [0.0, 45.0, 90.0],
            "intensities": [250.0, 120.0, 0.0]
        }"#;
        let ds: PhotometricDataset = serde_json::from_str(json).unwrap();
        assert_eq!(ds.luminaire_name, "Downlight");
        assert_eq!(ds.gamma_count, 3);
        assert_eq!(ds.nominal_len(), 3);
        assert!(ds.manufacturer.is_empty());
    }

    #[test]
    fn test_nominal_len_saturates() {
        let ds = PhotometricDataset {
            c_plane_count: usize::MAX,
            gamma_count: 4,
            ..Default::default()
        };
        assert_eq!(ds.nominal_len(), usize::MAX);
    }

    #[test]
    fn test_c_plane_label() {
        let ds = PhotometricDataset {
            c_angles: vec![0.0, 90.0, 22.5],
            ..Default::default()
        };
        assert_eq!(ds.c_plane_label(1), "C90");
        assert_eq!(ds.c_plane_label(2), "C22.5");
        assert_eq!(ds.c_plane_label(7), "C#7");
    }
}
