use chrono::{DateTime, Local};
use md5::{Digest, Md5};
use serde::Serialize;

/// QueryAudit は受信した検索クエリの監査ドキュメントを表す。
/// フィールド名は監査インデックス側の既存スキーマに合わせて固定。
#[derive(Debug, Clone, Serialize)]
pub struct QueryAudit {
    #[serde(rename = "searchTerm")]
    pub search_term: String,
    #[serde(rename = "user-agent")]
    pub user_agent: String,
    pub date: String,
}

impl QueryAudit {
    pub fn new(search_term: &str, user_agent: &str, captured_at: DateTime<Local>) -> Self {
        Self {
            search_term: search_term.to_string(),
            user_agent: user_agent.to_string(),
            date: captured_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }

    /// ドキュメント ID はクエリ文字列と秒精度の日時から導出する。
    /// 同一秒内の同一クエリは同じ ID になり、後続の書き込みが前の記録を上書きする(意図した重複排除)。
    pub fn document_id(&self) -> String {
        let mut hasher = Md5::new();
        hasher.update(self.search_term.as_bytes());
        hasher.update(self.date.as_bytes());
        hex::encode(hasher.finalize())
    }
}
