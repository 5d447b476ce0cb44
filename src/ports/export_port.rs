//! Index series sink port trait.

use crate::domain::error::IndexError;
use crate::domain::index_series::IndexSeries;

/// Port for writing the computed (date, index_level) series.
pub trait ExportPort {
    fn write(&self, series: &IndexSeries, output_path: &str) -> Result<(), IndexError>;
}
