//! Patient record types and feature encoding for renal risk prediction.
//!
//! Field set and clinical bounds follow the chronic kidney disease (CKD)
//! screening panel: vitals, urinalysis, blood chemistry and history flags.

use serde::{Deserialize, Serialize};

/// Number of features the risk model consumes.
pub const FEATURE_COUNT: usize = 24;

/// Calibration levels at which urine specific gravity is reported.
pub const SPECIFIC_GRAVITY_LEVELS: [f64; 5] = [1.005, 1.010, 1.015, 1.020, 1.025];

/// Maximum dipstick grade for albumin and sugar.
const MAX_GRADE: u8 = 5;

/// Feature names in encoding order.
///
/// The risk model is order-sensitive and has no field names of its own;
/// this order is part of its input contract and must never change without
/// retraining every shipped artifact.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "age",
    "blood_pressure",
    "specific_gravity",
    "albumin",
    "sugar",
    "red_blood_cells",
    "pus_cell",
    "pus_cell_clumps",
    "bacteria",
    "blood_glucose_random",
    "blood_urea",
    "serum_creatinine",
    "sodium",
    "potassium",
    "haemoglobin",
    "packed_cell_volume",
    "white_blood_cell_count",
    "red_blood_cell_count",
    "hypertension",
    "diabetes_mellitus",
    "coronary_artery_disease",
    "appetite",
    "pedal_edema",
    "anemia",
];

/// Patient gender as recorded on the form. Carried for reporting only;
/// not part of the feature vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

/// Microscopy result for cellular examinations (red blood cells, pus cells).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellMorphology {
    Normal,
    Abnormal,
}

impl CellMorphology {
    /// Encoding polarity: normal maps to 1.
    fn encode(self) -> f64 {
        match self {
            Self::Normal => 1.0,
            Self::Abnormal => 0.0,
        }
    }
}

/// Presence finding for urine sediment observations (cell clumps, bacteria).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Finding {
    Present,
    Absent,
}

impl Finding {
    /// Encoding polarity: present maps to 1.
    fn encode(self) -> f64 {
        match self {
            Self::Present => 1.0,
            Self::Absent => 0.0,
        }
    }
}

/// Reported appetite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Appetite {
    Good,
    Poor,
}

impl Appetite {
    /// Encoding polarity: good maps to 1.
    fn encode(self) -> f64 {
        match self {
            Self::Good => 1.0,
            Self::Poor => 0.0,
        }
    }
}

/// Error raised when a record field violates its clinical bound.
///
/// Out-of-contract values are rejected before they reach the model;
/// nothing is coerced.
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("{field} = {value} out of range [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("{field} = {value} is not a permitted level")]
    NotALevel { field: &'static str, value: f64 },
}

/// A structured patient record as collected at the UI boundary.
///
/// Transient: exists only for the duration of one assessment and is never
/// persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientRecord {
    pub name: String,
    pub gender: Gender,

    /// Age in years (1-120)
    pub age: u32,

    /// Blood pressure in mmHg (50-250)
    pub blood_pressure: u32,

    /// Urine specific gravity, one of the calibration levels
    pub specific_gravity: f64,

    /// Urine albumin dipstick grade (0-5)
    pub albumin: u8,

    /// Urine sugar dipstick grade (0-5)
    pub sugar: u8,

    pub red_blood_cells: CellMorphology,
    pub pus_cell: CellMorphology,
    pub pus_cell_clumps: Finding,
    pub bacteria: Finding,

    /// Random blood glucose in mg/dL (50-500)
    pub blood_glucose_random: u32,

    /// Blood urea in mg/dL (10-200)
    pub blood_urea: u32,

    /// Serum creatinine in mg/dL (0.1-15.0)
    pub serum_creatinine: f64,

    /// Sodium in mEq/L (120-160)
    pub sodium: u32,

    /// Potassium in mEq/L (2.0-8.0)
    pub potassium: f64,

    /// Haemoglobin in g/dL (5.0-20.0)
    pub haemoglobin: f64,

    /// Packed cell volume in % (20-60)
    pub packed_cell_volume: u32,

    /// White blood cell count in cells/cumm (2000-20000)
    pub white_blood_cell_count: u32,

    /// Red blood cell count in millions/cumm (2.0-8.0)
    pub red_blood_cell_count: f64,

    pub hypertension: bool,
    pub diabetes_mellitus: bool,
    pub coronary_artery_disease: bool,
    pub appetite: Appetite,
    pub pedal_edema: bool,
    pub anemia: bool,
}

/// Fixed-order numeric encoding of a patient record, the sole input to the
/// risk model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    /// View the features in encoding order.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

impl From<[f64; FEATURE_COUNT]> for FeatureVector {
    fn from(values: [f64; FEATURE_COUNT]) -> Self {
        Self(values)
    }
}

fn check_range(
    field: &'static str,
    value: f64,
    min: f64,
    max: f64,
) -> Result<f64, EncodeError> {
    if (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(EncodeError::OutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}

fn flag(on: bool) -> f64 {
    if on {
        1.0
    } else {
        0.0
    }
}

impl PatientRecord {
    /// Encode the record into the model's feature vector.
    ///
    /// Pure and deterministic: structurally identical records yield
    /// bit-identical vectors. Order matches [`FEATURE_NAMES`].
    ///
    /// # Errors
    /// Returns [`EncodeError`] for any field outside its clinical bound.
    pub fn encode(&self) -> Result<FeatureVector, EncodeError> {
        let mut v = [0.0; FEATURE_COUNT];

        v[0] = check_range("age", f64::from(self.age), 1.0, 120.0)?;
        v[1] = check_range("blood_pressure", f64::from(self.blood_pressure), 50.0, 250.0)?;

        if !SPECIFIC_GRAVITY_LEVELS
            .iter()
            .any(|level| (level - self.specific_gravity).abs() < 1e-9)
        {
            return Err(EncodeError::NotALevel {
                field: "specific_gravity",
                value: self.specific_gravity,
            });
        }
        v[2] = self.specific_gravity;

        v[3] = check_range("albumin", f64::from(self.albumin), 0.0, f64::from(MAX_GRADE))?;
        v[4] = check_range("sugar", f64::from(self.sugar), 0.0, f64::from(MAX_GRADE))?;

        v[5] = self.red_blood_cells.encode();
        v[6] = self.pus_cell.encode();
        v[7] = self.pus_cell_clumps.encode();
        v[8] = self.bacteria.encode();

        v[9] = check_range(
            "blood_glucose_random",
            f64::from(self.blood_glucose_random),
            50.0,
            500.0,
        )?;
        v[10] = check_range("blood_urea", f64::from(self.blood_urea), 10.0, 200.0)?;
        v[11] = check_range("serum_creatinine", self.serum_creatinine, 0.1, 15.0)?;
        v[12] = check_range("sodium", f64::from(self.sodium), 120.0, 160.0)?;
        v[13] = check_range("potassium", self.potassium, 2.0, 8.0)?;
        v[14] = check_range("haemoglobin", self.haemoglobin, 5.0, 20.0)?;
        v[15] = check_range(
            "packed_cell_volume",
            f64::from(self.packed_cell_volume),
            20.0,
            60.0,
        )?;
        v[16] = check_range(
            "white_blood_cell_count",
            f64::from(self.white_blood_cell_count),
            2000.0,
            20000.0,
        )?;
        v[17] = check_range(
            "red_blood_cell_count",
            self.red_blood_cell_count,
            2.0,
            8.0,
        )?;

        v[18] = flag(self.hypertension);
        v[19] = flag(self.diabetes_mellitus);
        v[20] = flag(self.coronary_artery_disease);
        v[21] = self.appetite.encode();
        v[22] = flag(self.pedal_edema);
        v[23] = flag(self.anemia);

        Ok(FeatureVector(v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> PatientRecord {
        PatientRecord {
            name: "Jane Roe".to_string(),
            gender: Gender::Female,
            age: 45,
            blood_pressure: 120,
            specific_gravity: 1.020,
            albumin: 0,
            sugar: 0,
            red_blood_cells: CellMorphology::Normal,
            pus_cell: CellMorphology::Normal,
            pus_cell_clumps: Finding::Absent,
            bacteria: Finding::Absent,
            blood_glucose_random: 120,
            blood_urea: 30,
            serum_creatinine: 1.2,
            sodium: 138,
            potassium: 4.5,
            haemoglobin: 13.5,
            packed_cell_volume: 40,
            white_blood_cell_count: 8000,
            red_blood_cell_count: 4.8,
            hypertension: false,
            diabetes_mellitus: false,
            coronary_artery_disease: false,
            appetite: Appetite::Good,
            pedal_edema: false,
            anemia: false,
        }
    }

    #[test]
    fn encodes_in_fixed_order() {
        let vector = sample_record().encode().expect("in-bounds record");
        let v = vector.as_slice();

        assert_eq!(v.len(), FEATURE_COUNT);
        assert!((v[0] - 45.0).abs() < f64::EPSILON);
        assert!((v[2] - 1.020).abs() < f64::EPSILON);
        assert!((v[11] - 1.2).abs() < f64::EPSILON);
        assert!((v[14] - 13.5).abs() < f64::EPSILON);
    }

    #[test]
    fn categorical_polarity() {
        let mut record = sample_record();
        record.red_blood_cells = CellMorphology::Abnormal;
        record.pus_cell_clumps = Finding::Present;
        record.appetite = Appetite::Poor;
        record.hypertension = true;

        let vector = record.encode().expect("in-bounds record");
        let v = vector.as_slice();

        assert!((v[5] - 0.0).abs() < f64::EPSILON); // abnormal
        assert!((v[6] - 1.0).abs() < f64::EPSILON); // normal
        assert!((v[7] - 1.0).abs() < f64::EPSILON); // present
        assert!((v[8] - 0.0).abs() < f64::EPSILON); // absent
        assert!((v[18] - 1.0).abs() < f64::EPSILON);
        assert!((v[21] - 0.0).abs() < f64::EPSILON); // poor
    }

    #[test]
    fn encoding_is_deterministic() {
        let record = sample_record();
        let first = record.encode().expect("in-bounds record");
        let second = record.clone().encode().expect("in-bounds record");
        assert_eq!(first, second);
    }

    #[test]
    fn rejects_albumin_above_grade_scale() {
        let mut record = sample_record();
        record.albumin = 7;

        let err = record.encode().expect_err("grade 7 is off the scale");
        assert!(matches!(
            err,
            EncodeError::OutOfRange {
                field: "albumin",
                ..
            }
        ));
    }

    #[test]
    fn rejects_unlisted_specific_gravity() {
        let mut record = sample_record();
        record.specific_gravity = 1.030;

        let err = record.encode().expect_err("1.030 is not a level");
        assert!(matches!(
            err,
            EncodeError::NotALevel {
                field: "specific_gravity",
                ..
            }
        ));
    }

    #[test]
    fn rejects_out_of_range_vitals() {
        let mut record = sample_record();
        record.age = 0;
        assert!(record.encode().is_err());

        let mut record = sample_record();
        record.blood_pressure = 300;
        assert!(record.encode().is_err());

        let mut record = sample_record();
        record.serum_creatinine = 16.0;
        assert!(record.encode().is_err());
    }

    #[test]
    fn bounds_are_inclusive() {
        let mut record = sample_record();
        record.age = 1;
        record.blood_pressure = 250;
        record.serum_creatinine = 15.0;
        record.potassium = 2.0;
        assert!(record.encode().is_ok());
    }

    #[test]
    fn feature_names_match_vector_length() {
        assert_eq!(FEATURE_NAMES.len(), FEATURE_COUNT);
    }
}
