pub mod query;
pub mod table;

pub use query::{SortDirection, SortSpec, TableQuery};
pub use table::{view, TablePage};
