use super::{ALL_COLUMNS, Column, ColumnKind, DiabetesRecord, LABEL_COLUMN};
use crate::error::DatasetError;
use log::{debug, info};
use ndarray::Array1;
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// In-memory diabetes prediction table
///
/// Rows keep the order they had in the source file; every stage downstream relies on
/// that order for reproducible splits.
///
/// # Examples
/// ```rust
/// use diabetes_insight::dataset::DiabetesDataset;
///
/// let csv = "gender,age,hypertension,heart_disease,smoking_history,bmi,HbA1c_level,blood_glucose_level,diabetes\n\
///            Female,80.0,0,1,never,25.19,6.6,140,0\n\
///            Male,28.0,0,0,current,27.32,5.7,158,1\n";
/// let dataset = DiabetesDataset::from_reader(csv.as_bytes()).unwrap();
/// assert_eq!(dataset.shape(), (2, 9));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DiabetesDataset {
    records: Vec<DiabetesRecord>,
}

impl DiabetesDataset {
    /// Wraps already parsed records
    pub fn new(records: Vec<DiabetesRecord>) -> Self {
        DiabetesDataset { records }
    }

    /// Reads the table from a CSV file with a header row
    ///
    /// # Errors
    ///
    /// - `DatasetError::Io` - If the file cannot be opened
    /// - Any error of [`DiabetesDataset::from_reader`]
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let dataset = Self::from_reader(file)?;
        info!(
            "Loaded {} rows and {} columns from {}",
            dataset.len(),
            ALL_COLUMNS.len(),
            path.display()
        );
        Ok(dataset)
    }

    /// Reads the table from any CSV source with a header row
    ///
    /// # Errors
    ///
    /// - `DatasetError::MissingColumns` - If any of the nine required headers is absent
    /// - `DatasetError::Csv` - If a row is malformed or a field cannot be parsed
    /// - `DatasetError::InvalidLabel` - If the label is neither 0 nor 1
    /// - `DatasetError::Empty` - If the source has a header but no rows
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DatasetError> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = rdr.headers()?.clone();
        let missing: Vec<String> = ALL_COLUMNS
            .iter()
            .filter(|c| !headers.iter().any(|h| h == c.name()))
            .map(|c| c.name().to_string())
            .collect();
        if !missing.is_empty() {
            return Err(DatasetError::MissingColumns(missing));
        }

        let mut records = Vec::new();
        for (i, result) in rdr.deserialize::<DiabetesRecord>().enumerate() {
            let record = result?;
            if record.diabetes > 1 {
                return Err(DatasetError::InvalidLabel {
                    row: i + 1,
                    value: record.diabetes,
                });
            }
            records.push(record);
        }

        if records.is_empty() {
            return Err(DatasetError::Empty);
        }

        debug!("Parsed {} records", records.len());
        Ok(DiabetesDataset { records })
    }

    pub fn records(&self) -> &[DiabetesRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<DiabetesRecord> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns `(rows, columns)`
    pub fn shape(&self) -> (usize, usize) {
        (self.records.len(), ALL_COLUMNS.len())
    }

    /// Header names in file order
    pub fn column_names(&self) -> Vec<&'static str> {
        ALL_COLUMNS.iter().map(|c| c.name()).collect()
    }

    /// Values of one column rendered as text, in row order
    pub fn text_column(&self, column: Column) -> Vec<String> {
        self.records
            .iter()
            .map(|r| r.display_value(column))
            .collect()
    }

    /// Values of a numeric column, `None` for gender and smoking history
    pub fn numeric_column(&self, column: Column) -> Option<Array1<f64>> {
        if matches!(column, Column::Gender | Column::SmokingHistory) {
            return None;
        }
        Some(
            self.records
                .iter()
                .filter_map(|r| r.number(column))
                .collect(),
        )
    }

    /// The label column as a float vector
    pub fn labels(&self) -> Array1<f64> {
        self.records.iter().map(|r| r.label()).collect()
    }

    /// First `n` rows as a printable preview
    pub fn head(&self, n: usize) -> DatasetHead<'_> {
        DatasetHead {
            rows: &self.records[..n.min(self.records.len())],
        }
    }

    /// Column overview: kind, value type and non-null count
    pub fn info(&self) -> DatasetInfo {
        let columns = ALL_COLUMNS
            .iter()
            .map(|&column| {
                let non_null = self
                    .records
                    .iter()
                    .filter(|r| match r.text(column) {
                        Some(text) => !text.is_empty(),
                        None => r.number(column).is_some_and(|v| v.is_finite()),
                    })
                    .count();
                ColumnInfo {
                    column,
                    non_null,
                    kind: column.kind(),
                }
            })
            .collect();
        DatasetInfo {
            n_rows: self.records.len(),
            columns,
        }
    }
}

/// Preview of the first rows, formatted as an aligned table
pub struct DatasetHead<'a> {
    rows: &'a [DiabetesRecord],
}

impl fmt::Display for DatasetHead<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let widths: Vec<usize> = ALL_COLUMNS
            .iter()
            .map(|&c| {
                self.rows
                    .iter()
                    .map(|r| r.display_value(c).len())
                    .chain(std::iter::once(c.name().len()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();
        let index_width = self.rows.len().saturating_sub(1).to_string().len();

        write!(f, "{:index_width$}", "")?;
        for (c, w) in ALL_COLUMNS.iter().zip(widths.iter().copied()) {
            write!(f, "  {:>w$}", c.name())?;
        }
        writeln!(f)?;
        for (i, row) in self.rows.iter().enumerate() {
            write!(f, "{:<index_width$}", i)?;
            for (&c, w) in ALL_COLUMNS.iter().zip(widths.iter().copied()) {
                write!(f, "  {:>w$}", row.display_value(c))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Per-column entry of [`DatasetInfo`]
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnInfo {
    pub column: Column,
    pub non_null: usize,
    pub kind: ColumnKind,
}

/// Summary of the table layout, in the spirit of a dataframe `info()` call
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetInfo {
    pub n_rows: usize,
    pub columns: Vec<ColumnInfo>,
}

impl fmt::Display for DatasetInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "RangeIndex: {} entries, 0 to {}",
            self.n_rows,
            self.n_rows.saturating_sub(1)
        )?;
        writeln!(f, "Data columns (total {} columns):", self.columns.len())?;
        writeln!(
            f,
            " {:<3} {:<20} {:<16} {:<12} {}",
            "#", "Column", "Non-Null Count", "Kind", "Type"
        )?;
        for (i, info) in self.columns.iter().enumerate() {
            let kind = match info.kind {
                ColumnKind::Categorical => "categorical",
                ColumnKind::Numerical => "numerical",
            };
            let label = if info.column == LABEL_COLUMN {
                " (label)"
            } else {
                ""
            };
            writeln!(
                f,
                " {:<3} {:<20} {:<16} {:<12} {}{}",
                i,
                info.column.name(),
                format!("{} non-null", info.non_null),
                kind,
                info.column.value_type(),
                label
            )?;
        }
        Ok(())
    }
}
