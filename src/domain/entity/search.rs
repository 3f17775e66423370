use serde::{Deserialize, Serialize};

/// SearchRequest は 1 回の検索要求を表す。
/// fields が空の場合は設定のデフォルトフィールドが使われる。
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub search_term: String,
    pub index: String,
    #[serde(default)]
    pub fields: Vec<String>,
}

/// SearchResult は検索エンジンの応答全体の射影。
/// 応答に無いフィールドはゼロ値にフォールバックする(デコード失敗にしない)。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchResult {
    pub took: u64,
    pub timed_out: bool,
    #[serde(rename = "_shards")]
    pub shards: ShardStats,
    pub hits: Hits,
}

/// シャード実行サマリ。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ShardStats {
    pub total: u64,
    pub successful: u64,
    pub skipped: u64,
    pub failed: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Hits {
    pub total: TotalHits,
    /// ヒット 0 件のとき null になるため Option で受ける。
    pub max_score: Option<f64>,
    pub hits: Vec<Hit>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TotalHits {
    pub value: i64,
    /// "eq"(正確値)または "gte"(下限値)。
    pub relation: String,
}

/// Hit は 1 件のヒット。_source の中身はインデックス側が決めるため Value のまま保持する。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Hit {
    #[serde(rename = "_index")]
    pub index: String,
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_score")]
    pub score: f64,
    #[serde(rename = "_source")]
    pub source: serde_json::Value,
}
