use crate::dataset::{Column, DiabetesRecord, FEATURE_COLUMNS};
use crate::error::{ModelError, TransformError};
use ahash::AHashMap;
use log::debug;
use ndarray::{Array1, Array2};

/// Text columns replaced by integer codes
pub const ENCODED_COLUMNS: [Column; 2] = [Column::Gender, Column::SmokingHistory];

/// Code reserved for categories never seen while fitting
pub const UNKNOWN_CATEGORY_CODE: f64 = -1.0;

/// What `transform` does with a category that was not in the training rows
///
/// # Variants
///
/// - `Value(f64)` - Substitute this code (default `-1.0`)
/// - `Error` - Fail with `TransformError::UnknownCategory`
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UnknownCategoryPolicy {
    Value(f64),
    Error,
}

impl Default for UnknownCategoryPolicy {
    fn default() -> Self {
        UnknownCategoryPolicy::Value(UNKNOWN_CATEGORY_CODE)
    }
}

/// Learned categories of one column; category `i` has code `i + 1`
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryMapping {
    column: Column,
    categories: Vec<String>,
    codes: AHashMap<String, usize>,
}

impl CategoryMapping {
    fn learn<'a, I>(column: Column, values: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut categories = Vec::new();
        let mut codes = AHashMap::new();
        for value in values {
            if !codes.contains_key(value) {
                categories.push(value.to_string());
                codes.insert(value.to_string(), categories.len());
            }
        }
        CategoryMapping {
            column,
            categories,
            codes,
        }
    }

    pub fn column(&self) -> Column {
        self.column
    }

    /// Categories in code order (first appearance in the training rows)
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Code of `category`, if it was seen while fitting
    pub fn code(&self, category: &str) -> Option<f64> {
        self.codes.get(category).map(|&c| c as f64)
    }

    /// Category behind `code`, if `code` is one of the learned codes
    pub fn category(&self, code: f64) -> Option<&str> {
        if code.fract() != 0.0 || code < 1.0 {
            return None;
        }
        self.categories
            .get(code as usize - 1)
            .map(|s| s.as_str())
    }
}

/// Ordinal encoder for the gender and smoking history columns
///
/// Codes start at 1 and follow the order in which each category first appears in the
/// rows passed to `fit`. The mapping is learned once and then applied unchanged to any
/// other rows, so the test partition never influences it.
///
/// # Examples
/// ```rust
/// use diabetes_insight::dataset::{Column, DiabetesDataset};
/// use diabetes_insight::utility::OrdinalEncoder;
///
/// let csv = "gender,age,hypertension,heart_disease,smoking_history,bmi,HbA1c_level,blood_glucose_level,diabetes\n\
///            Female,80.0,0,1,never,25.19,6.6,140,0\n\
///            Male,28.0,0,0,current,27.32,5.7,158,1\n\
///            Female,54.0,0,0,never,27.32,6.6,80,0\n";
/// let dataset = DiabetesDataset::from_reader(csv.as_bytes()).unwrap();
///
/// let mut encoder = OrdinalEncoder::default();
/// let x = encoder.fit_transform(dataset.records()).unwrap();
/// assert_eq!(x.shape(), &[3, 8]);
/// assert_eq!(x[[0, 0]], 1.0); // Female
/// assert_eq!(x[[1, 0]], 2.0); // Male
/// assert_eq!(x[[1, 4]], 2.0); // current
/// assert_eq!(encoder.mapping(Column::Gender).unwrap().categories(), &["Female", "Male"]);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OrdinalEncoder {
    policy: UnknownCategoryPolicy,
    mappings: Option<Vec<CategoryMapping>>,
}

impl OrdinalEncoder {
    /// Creates an unfitted encoder with the given unknown-category policy
    pub fn new(policy: UnknownCategoryPolicy) -> Self {
        OrdinalEncoder {
            policy,
            mappings: None,
        }
    }

    get_field!(get_policy, policy, UnknownCategoryPolicy);

    /// Whether `fit` has been called
    pub fn is_fitted(&self) -> bool {
        self.mappings.is_some()
    }

    /// Learned mapping of one encoded column
    pub fn mapping(&self, column: Column) -> Option<&CategoryMapping> {
        self.mappings
            .as_ref()?
            .iter()
            .find(|m| m.column == column)
    }

    /// Learns the categories of every encoded column from `rows`
    ///
    /// # Parameters
    ///
    /// - `rows` - Training rows
    ///
    /// # Returns
    ///
    /// - `Ok(&mut Self)` - The fitted encoder
    /// - `Err(ModelError::InputValidationError)` - If `rows` is empty
    pub fn fit(&mut self, rows: &[DiabetesRecord]) -> Result<&mut Self, ModelError> {
        if rows.is_empty() {
            return Err(ModelError::InputValidationError(
                "Cannot fit an encoder on zero rows".to_string(),
            ));
        }

        let mappings: Vec<CategoryMapping> = ENCODED_COLUMNS
            .iter()
            .map(|&column| {
                CategoryMapping::learn(column, rows.iter().filter_map(|r| r.text(column)))
            })
            .collect();
        for mapping in &mappings {
            debug!(
                "encoder learned {} categories for `{}`: {:?}",
                mapping.categories.len(),
                mapping.column,
                mapping.categories
            );
        }
        self.mappings = Some(mappings);
        Ok(self)
    }

    fn encode(
        &self,
        mapping: &CategoryMapping,
        value: &str,
        row: usize,
    ) -> Result<f64, TransformError> {
        match (mapping.code(value), self.policy) {
            (Some(code), _) => Ok(code),
            (None, UnknownCategoryPolicy::Value(code)) => Ok(code),
            (None, UnknownCategoryPolicy::Error) => Err(TransformError::UnknownCategory {
                column: mapping.column.name(),
                value: value.to_string(),
                row,
            }),
        }
    }

    /// Builds the feature matrix of `rows`
    ///
    /// Columns follow the header order without the label. Gender and smoking history
    /// hold their codes, every other column is passed through as a number.
    ///
    /// # Returns
    ///
    /// - `Ok(Array2<f64>)` - Matrix of shape `(rows.len(), 8)`
    ///
    /// # Errors
    ///
    /// - `TransformError::Model(ModelError::NotFitted)` - If `fit` has not been called
    /// - `TransformError::UnknownCategory` - If a category is new and the policy is `Error`
    pub fn transform(&self, rows: &[DiabetesRecord]) -> Result<Array2<f64>, TransformError> {
        let mappings = self.mappings.as_ref().ok_or(ModelError::NotFitted)?;

        let mut x = Array2::<f64>::zeros((rows.len(), FEATURE_COLUMNS.len()));
        for (i, record) in rows.iter().enumerate() {
            for (j, &column) in FEATURE_COLUMNS.iter().enumerate() {
                x[[i, j]] = match (record.text(column), mappings.iter().find(|m| m.column == column)) {
                    (Some(value), Some(mapping)) => self.encode(mapping, value, i + 1)?,
                    (_, _) => record.number(column).ok_or_else(|| {
                        ModelError::ProcessingError(format!(
                            "column `{}` is neither encoded nor numeric",
                            column
                        ))
                    })?,
                };
            }
        }
        Ok(x)
    }

    /// Fits on `rows` and returns their feature matrix
    pub fn fit_transform(&mut self, rows: &[DiabetesRecord]) -> Result<Array2<f64>, TransformError> {
        self.fit(rows)?;
        self.transform(rows)
    }

    /// Recovers the categories behind the encoded columns of a feature matrix
    ///
    /// # Parameters
    ///
    /// - `x` - Matrix produced by `transform`
    ///
    /// # Returns
    ///
    /// - `Ok(Vec<Vec<String>>)` - Per row, the categories in [`ENCODED_COLUMNS`] order
    ///
    /// # Errors
    ///
    /// - `TransformError::Model(ModelError::NotFitted)` - If `fit` has not been called
    /// - `TransformError::Model(ModelError::InputValidationError)` - If `x` does not have 8 columns
    /// - `TransformError::UnknownCode` - If a code is not one of the learned codes, including the unknown code
    pub fn inverse_transform(&self, x: &Array2<f64>) -> Result<Vec<Vec<String>>, TransformError> {
        let mappings = self.mappings.as_ref().ok_or(ModelError::NotFitted)?;
        if x.ncols() != FEATURE_COLUMNS.len() {
            return Err(ModelError::InputValidationError(format!(
                "expected {} feature columns, got {}",
                FEATURE_COLUMNS.len(),
                x.ncols()
            ))
            .into());
        }

        x.rows()
            .into_iter()
            .enumerate()
            .map(|(i, row)| {
                mappings
                    .iter()
                    .map(|mapping| {
                        // ENCODED_COLUMNS are all feature columns
                        let j = mapping.column.feature_index().unwrap_or(0);
                        let code = row[j];
                        mapping
                            .category(code)
                            .map(str::to_string)
                            .ok_or(TransformError::UnknownCode {
                                column: mapping.column.name(),
                                code,
                                row: i + 1,
                            })
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect()
    }
}

/// Label vector of `rows`, aligned with the rows of `OrdinalEncoder::transform`
pub fn labels(rows: &[DiabetesRecord]) -> Array1<f64> {
    rows.iter().map(DiabetesRecord::label).collect()
}
