use async_trait::async_trait;

use crate::domain::entity::query_audit::QueryAudit;
use crate::domain::entity::search::{SearchRequest, SearchResult};
use crate::error::SearchError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SearchRepository: Send + Sync {
    async fn search(&self, request: &SearchRequest) -> Result<SearchResult, SearchError>;
    /// 監査ドキュメントを書き込み、受付結果の 1 行サマリを返す。呼び出し側は戻り値を無視してよい。
    async fn record_query(&self, index: &str, audit: &QueryAudit) -> Result<String, SearchError>;
}
