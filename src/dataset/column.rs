use std::fmt;

/// Whether a column is summarised by frequency counts or by moments and quantiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnKind {
    Categorical,
    Numerical,
}

/// The nine columns of the diabetes prediction table, in header order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Gender,
    Age,
    Hypertension,
    HeartDisease,
    SmokingHistory,
    Bmi,
    HbA1cLevel,
    BloodGlucoseLevel,
    Diabetes,
}

/// All columns in the order they appear in the CSV header
pub const ALL_COLUMNS: [Column; 9] = [
    Column::Gender,
    Column::Age,
    Column::Hypertension,
    Column::HeartDisease,
    Column::SmokingHistory,
    Column::Bmi,
    Column::HbA1cLevel,
    Column::BloodGlucoseLevel,
    Column::Diabetes,
];

/// Columns summarised by distinct-value frequencies
pub const CATEGORICAL_COLUMNS: [Column; 5] = [
    Column::Gender,
    Column::Hypertension,
    Column::HeartDisease,
    Column::SmokingHistory,
    Column::Diabetes,
];

/// Columns summarised by descriptive statistics and plotted
pub const NUMERICAL_COLUMNS: [Column; 4] = [
    Column::Age,
    Column::Bmi,
    Column::HbA1cLevel,
    Column::BloodGlucoseLevel,
];

/// Feature matrix layout: every column except the label, in header order
pub const FEATURE_COLUMNS: [Column; 8] = [
    Column::Gender,
    Column::Age,
    Column::Hypertension,
    Column::HeartDisease,
    Column::SmokingHistory,
    Column::Bmi,
    Column::HbA1cLevel,
    Column::BloodGlucoseLevel,
];

/// The binary outcome column
pub const LABEL_COLUMN: Column = Column::Diabetes;

impl Column {
    /// Header text of the column in the CSV file
    pub fn name(self) -> &'static str {
        match self {
            Column::Gender => "gender",
            Column::Age => "age",
            Column::Hypertension => "hypertension",
            Column::HeartDisease => "heart_disease",
            Column::SmokingHistory => "smoking_history",
            Column::Bmi => "bmi",
            Column::HbA1cLevel => "HbA1c_level",
            Column::BloodGlucoseLevel => "blood_glucose_level",
            Column::Diabetes => "diabetes",
        }
    }

    pub fn kind(self) -> ColumnKind {
        match self {
            Column::Gender
            | Column::Hypertension
            | Column::HeartDisease
            | Column::SmokingHistory
            | Column::Diabetes => ColumnKind::Categorical,
            Column::Age | Column::Bmi | Column::HbA1cLevel | Column::BloodGlucoseLevel => {
                ColumnKind::Numerical
            }
        }
    }

    /// Rust type the column is parsed into, shown by the dataset info table
    pub fn value_type(self) -> &'static str {
        match self {
            Column::Gender | Column::SmokingHistory => "String",
            Column::Hypertension | Column::HeartDisease | Column::Diabetes => "u8",
            Column::Age | Column::Bmi | Column::HbA1cLevel | Column::BloodGlucoseLevel => "f64",
        }
    }

    /// Looks a column up by its header text
    pub fn from_name(name: &str) -> Option<Column> {
        ALL_COLUMNS.iter().copied().find(|c| c.name() == name)
    }

    /// Position of the column inside the feature matrix, `None` for the label
    pub fn feature_index(self) -> Option<usize> {
        FEATURE_COLUMNS.iter().position(|&c| c == self)
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
