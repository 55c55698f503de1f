pub mod discovery;
pub mod error;
pub mod polars_utils;
pub mod source;

pub use discovery::{discover_input_files, source_name};
pub use error::{IngestError, Result};
pub use polars_utils::{
    any_to_display, any_to_i64, bool_values, cell_display, date_values, days_to_date, filter_rows,
    int_values, require_column, require_columns, text_values,
};
pub use source::{CsvTableSource, TableSource, coerce_contract_types, parse_bool, parse_date};
