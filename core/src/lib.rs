pub mod config;
pub mod error;
pub mod index;
pub mod pagination;
pub mod persist;
pub mod search;
pub mod store;
pub mod tokenizer;
pub mod util;

pub use config::Config;
pub use error::{Error, Result};
pub use index::{build_index, entry_id, Document, IndexEntry, ID_SEPARATOR};
pub use pagination::{Pagination, Paginator};
pub use persist::SledStore;
pub use search::{search, Hit, Results};
pub use store::{IndexReader, IndexWriter};
