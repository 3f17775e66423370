use std::time::Duration;

use async_trait::async_trait;
use opensearch::auth::Credentials;
use opensearch::cert::CertificateValidation;
use opensearch::http::transport::{SingleNodeConnectionPool, TransportBuilder};
use opensearch::http::Url;
use opensearch::params::{Refresh, TrackTotalHits};
use opensearch::{IndexParts, OpenSearch, SearchParts};
use serde::Deserialize;
use serde_json::json;

use crate::domain::entity::query_audit::QueryAudit;
use crate::domain::entity::search::{SearchRequest, SearchResult};
use crate::domain::repository::SearchRepository;
use crate::error::SearchError;
use crate::infrastructure::config::{EngineConfig, SearchConfig};

/// 監査ドキュメントは検索対象インデックス名にこのサフィックスを付けた
/// 兄弟インデックスへ書き込む(下流の分析側と共有する名前規約)。
const AUDIT_INDEX_SUFFIX: &str = "-queries";

/// エンジンが返すエラー封筒 {"error":{"type","reason"}}。
#[derive(Debug, Deserialize)]
struct EngineErrorEnvelope {
    error: EngineErrorBody,
}

#[derive(Debug, Deserialize)]
struct EngineErrorBody {
    #[serde(rename = "type")]
    error_type: String,
    reason: String,
}

/// ドキュメント登録 API の応答のうち受付サマリに使う部分。
#[derive(Debug, Deserialize)]
struct IndexReceipt {
    result: String,
    #[serde(rename = "_version")]
    version: i64,
}

/// SearchOpenSearchRepository は OpenSearch を使った SearchRepository 実装。
pub struct SearchOpenSearchRepository {
    client: OpenSearch,
    default_fields: Vec<String>,
    track_total_hits: bool,
}

impl SearchOpenSearchRepository {
    pub fn new(engine: &EngineConfig, search: &SearchConfig) -> anyhow::Result<Self> {
        let url = Url::parse(&engine.url)?;
        let conn_pool = SingleNodeConnectionPool::new(url);
        let mut builder = TransportBuilder::new(conn_pool)
            .cert_validation(CertificateValidation::None)
            .timeout(Duration::from_secs(engine.request_timeout_seconds));

        if !engine.username.is_empty() && !engine.password.is_empty() {
            builder = builder.auth(Credentials::Basic(
                engine.username.clone(),
                engine.password.clone(),
            ));
        }

        let transport = builder.build()?;
        let client = OpenSearch::new(transport);

        Ok(Self {
            client,
            default_fields: search.default_fields.clone(),
            track_total_hits: search.track_total_hits,
        })
    }

    /// multi_match クエリ本体を組み立てる。fields が空ならデフォルトにフォールバック。
    /// ブースト記法(`field^2`)は検証せずそのままエンジンへ渡す。
    fn build_query(&self, request: &SearchRequest) -> serde_json::Value {
        let fields = if request.fields.is_empty() {
            &self.default_fields
        } else {
            &request.fields
        };
        json!({
            "query": {
                "multi_match": {
                    "query": request.search_term,
                    "fields": fields,
                    "type": "best_fields"
                }
            }
        })
    }
}

/// 非 2xx 応答をエラーに変換する。エンジンの封筒が読めた場合は Engine、
/// 封筒自体が壊れている場合は Decode として区別する。
fn engine_error(status: u16, body: &str) -> SearchError {
    match serde_json::from_str::<EngineErrorEnvelope>(body) {
        Ok(envelope) => SearchError::Engine {
            status,
            error_type: envelope.error.error_type,
            reason: envelope.error.reason,
        },
        Err(e) => SearchError::Decode(format!("unrecognized engine error body: {}", e)),
    }
}

#[async_trait]
impl SearchRepository for SearchOpenSearchRepository {
    async fn search(&self, request: &SearchRequest) -> Result<SearchResult, SearchError> {
        let body = self.build_query(request);

        let response = self
            .client
            .search(SearchParts::Index(&[&request.index]))
            .track_total_hits(TrackTotalHits::Track(self.track_total_hits))
            .pretty(true)
            .body(body)
            .send()
            .await
            .map_err(|e| SearchError::Transport(e.to_string()))?;

        let status = response.status_code();
        let text = response
            .text()
            .await
            .map_err(|e| SearchError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(engine_error(status.as_u16(), &text));
        }

        serde_json::from_str(&text).map_err(|e| SearchError::Decode(e.to_string()))
    }

    async fn record_query(
        &self,
        index: &str,
        audit: &QueryAudit,
    ) -> Result<String, SearchError> {
        let audit_index = format!("{}{}", index, AUDIT_INDEX_SUFFIX);
        let doc_id = audit.document_id();

        let response = self
            .client
            .index(IndexParts::IndexId(&audit_index, &doc_id))
            .refresh(Refresh::True)
            .body(audit)
            .send()
            .await
            .map_err(|e| SearchError::Transport(e.to_string()))?;

        let status = response.status_code();
        let text = response
            .text()
            .await
            .map_err(|e| SearchError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(engine_error(status.as_u16(), &text));
        }

        let receipt: IndexReceipt =
            serde_json::from_str(&text).map_err(|e| SearchError::Decode(e.to_string()))?;
        Ok(format!(
            "[{}] {}; version={}",
            status.as_u16(),
            receipt.result,
            receipt.version
        ))
    }
}
