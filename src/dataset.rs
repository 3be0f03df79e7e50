/// Column names, kinds and the feature/label layout of the table
pub mod column;
/// Typed row of the diabetes prediction table
pub mod record;
/// CSV loading and inspection of the whole table
pub mod table;

pub use column::*;
pub use record::*;
pub use table::*;
