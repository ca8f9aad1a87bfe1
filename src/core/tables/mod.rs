pub mod table_models;
pub mod table_source;

pub use table_models::{Row, Table, TableError};
pub use table_source::{ScrapeError, TableSource};
