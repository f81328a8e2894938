pub mod archive;
pub mod camara;
pub mod client;
pub mod types;

pub use camara::KeywordQuery;
pub use client::{CamaraClient, ClientConfig};
pub use types::RawRecord;
