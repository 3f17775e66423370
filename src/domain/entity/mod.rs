pub mod query_audit;
pub mod search;

pub use query_audit::QueryAudit;
pub use search::{Hit, Hits, SearchRequest, SearchResult, ShardStats, TotalHits};
