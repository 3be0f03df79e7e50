use super::Column;
use serde::Deserialize;

/// One row of the diabetes prediction table
///
/// Field names follow the CSV header through serde renames, so the column order
/// inside the file does not matter.
///
/// # Fields
///
/// - `gender` - Reported gender (`Female`, `Male`, `Other`)
/// - `age` - Age in years, fractional for infants
/// - `hypertension` - 1 if the patient has hypertension
/// - `heart_disease` - 1 if the patient has a heart disease
/// - `smoking_history` - Raw smoking category (`never`, `No Info`, `current`, ...)
/// - `bmi` - Body mass index
/// - `hba1c_level` - Glycated haemoglobin level
/// - `blood_glucose_level` - Blood glucose level
/// - `diabetes` - Binary outcome label
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DiabetesRecord {
    pub gender: String,
    pub age: f64,
    pub hypertension: u8,
    pub heart_disease: u8,
    pub smoking_history: String,
    pub bmi: f64,
    #[serde(rename = "HbA1c_level")]
    pub hba1c_level: f64,
    pub blood_glucose_level: f64,
    pub diabetes: u8,
}

impl DiabetesRecord {
    /// Returns the value of a string-typed column, `None` for numeric columns
    pub fn text(&self, column: Column) -> Option<&str> {
        match column {
            Column::Gender => Some(&self.gender),
            Column::SmokingHistory => Some(&self.smoking_history),
            _ => None,
        }
    }

    /// Returns the value of a numeric column as `f64`, `None` for string columns
    pub fn number(&self, column: Column) -> Option<f64> {
        match column {
            Column::Age => Some(self.age),
            Column::Hypertension => Some(self.hypertension as f64),
            Column::HeartDisease => Some(self.heart_disease as f64),
            Column::Bmi => Some(self.bmi),
            Column::HbA1cLevel => Some(self.hba1c_level),
            Column::BloodGlucoseLevel => Some(self.blood_glucose_level),
            Column::Diabetes => Some(self.diabetes as f64),
            Column::Gender | Column::SmokingHistory => None,
        }
    }

    /// Renders any column as the text used for frequency counts and previews
    pub fn display_value(&self, column: Column) -> String {
        match column {
            Column::Gender => self.gender.clone(),
            Column::SmokingHistory => self.smoking_history.clone(),
            Column::Hypertension => self.hypertension.to_string(),
            Column::HeartDisease => self.heart_disease.to_string(),
            Column::Diabetes => self.diabetes.to_string(),
            Column::Age => self.age.to_string(),
            Column::Bmi => self.bmi.to_string(),
            Column::HbA1cLevel => self.hba1c_level.to_string(),
            Column::BloodGlucoseLevel => self.blood_glucose_level.to_string(),
        }
    }

    /// The label as a float target
    pub fn label(&self) -> f64 {
        self.diabetes as f64
    }
}
