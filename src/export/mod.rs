pub mod csv;

pub use self::csv::{export_results, export_file_name, to_csv};
