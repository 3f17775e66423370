pub mod search_opensearch;

pub use search_opensearch::SearchOpenSearchRepository;
