use std::sync::Arc;

use chrono::Local;
use tracing::{debug, warn};

use crate::domain::entity::query_audit::QueryAudit;
use crate::domain::entity::search::{SearchRequest, SearchResult};
use crate::domain::repository::SearchRepository;
use crate::error::SearchError;

#[derive(Debug, Clone)]
pub struct SearchInput {
    pub search_term: String,
    pub index: String,
    pub fields: Vec<String>,
    pub user_agent: String,
}

pub struct SearchUseCase {
    repo: Arc<dyn SearchRepository>,
}

impl SearchUseCase {
    pub fn new(repo: Arc<dyn SearchRepository>) -> Self {
        Self { repo }
    }

    /// 検索を実行する。クエリ監査の書き込みはバックグラウンドタスクに切り離し、
    /// 成否を読み取り経路に一切影響させない(ログへの出力のみ)。
    pub async fn execute(&self, input: &SearchInput) -> Result<SearchResult, SearchError> {
        let audit = QueryAudit::new(&input.search_term, &input.user_agent, Local::now());

        // Launch background audit write
        let repo = self.repo.clone();
        let index = input.index.clone();
        tokio::spawn(async move {
            match repo.record_query(&index, &audit).await {
                Ok(receipt) => debug!(index = %index, %receipt, "query audit recorded"),
                Err(e) => warn!(index = %index, error = %e, "query audit write failed"),
            }
        });

        let request = SearchRequest {
            search_term: input.search_term.clone(),
            index: input.index.clone(),
            fields: input.fields.clone(),
        };
        self.repo.search(&request).await
    }
}
