/// This module turns raw categorical values into the coarse categories used for modelling
/// and drops the rows excluded from it
pub mod feature_normalizer;

/// This module provides an ordinal encoder that learns category codes from the training
/// rows only and applies them unchanged to any other rows
pub mod ordinal_encoding;

/// This module provides functionality for splitting datasets into training and test sets,
/// which is a fundamental preprocessing step in machine learning workflows
pub mod train_test_split;

pub use feature_normalizer::*;
pub use ordinal_encoding::*;
pub use train_test_split::*;
