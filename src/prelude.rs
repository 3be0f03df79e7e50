pub use crate::analysis::{
    CategoricalSummary, DescriptiveReport, NumericalSummary, OutlierCount, count_bmi_outliers,
    count_outliers, value_counts,
};
pub use crate::config::*;
pub use crate::dataset::{Column, ColumnKind, DiabetesDataset, DiabetesRecord};
pub use crate::error::*;
pub use crate::machine_learning::*;
pub use crate::metric::*;
pub use crate::pipeline::{PipelineReport, run, run_on_dataset};
pub use crate::traits::*;
pub use crate::utility::*;
