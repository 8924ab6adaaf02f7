pub mod io;
pub mod record;

pub use io::{read_records, read_records_csv};
pub use record::Record;
