pub mod crawl;
pub mod extract;
pub mod source;

pub use crawl::{crawl, crawl_all, document_id, DEFAULT_DELIMITER};
pub use extract::{extract, Extracted};
pub use source::{Source, StaticSource, WebSource};
