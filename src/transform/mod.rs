pub mod authors;
pub mod dates;
pub mod fields;
pub mod rows;

pub use authors::{primary_author, primary_author_name, PrimaryAuthor};
pub use dates::{days_since, parse_date};
pub use rows::{normalize_rows, BillRow};
