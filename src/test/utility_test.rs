use super::{dataset_from_rows, small_dataset};
use crate::dataset::Column;
use crate::error::{ModelError, TransformError};
use crate::utility::*;

mod feature_normalizer_test;
mod ordinal_encoding_test;
mod train_test_split_test;
