pub mod output;
pub mod table;

pub use output::{error, header, info, success, warn, Level};
pub use table::{listing_table, stats_table};
