//! Firestore REST score store
//!
//! Document encoding and query decoding are plain functions so they can be
//! tested natively; only the HTTP transport is browser-specific.

use serde::Deserialize;
use serde_json::json;

use super::StoreError;
use crate::highscores::ScoreEntry;

const API_ROOT: &str = "https://firestore.googleapis.com/v1";

/// Where the scores live (read from `window.SWAN_STORE` in the browser)
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreConfig {
    pub project_id: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_collection")]
    pub collection: String,
}

fn default_collection() -> String {
    "scores".to_string()
}

impl StoreConfig {
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            api_key: None,
            collection: default_collection(),
        }
    }

    fn documents_url(&self) -> String {
        format!(
            "{}/projects/{}/databases/(default)/documents",
            API_ROOT, self.project_id
        )
    }

    fn with_key(&self, url: String) -> String {
        match &self.api_key {
            Some(key) => format!("{}?key={}", url, key),
            None => url,
        }
    }

    /// POST target for a new score document
    pub fn submit_url(&self) -> String {
        self.with_key(format!("{}/{}", self.documents_url(), self.collection))
    }

    /// POST target for the top-N query
    pub fn query_url(&self) -> String {
        self.with_key(format!("{}:runQuery", self.documents_url()))
    }
}

/// Request body creating a score document
pub fn encode_score(name: &str, score: u32, created_at: &str) -> String {
    json!({
        "fields": {
            "name": { "stringValue": name },
            // Firestore encodes int64 as a string
            "score": { "integerValue": score.to_string() },
            "createdAt": { "timestampValue": created_at },
        }
    })
    .to_string()
}

/// Request body for the best `n` scores
pub fn encode_top_query(collection: &str, n: usize) -> String {
    json!({
        "structuredQuery": {
            "from": [{ "collectionId": collection }],
            "orderBy": [{
                "field": { "fieldPath": "score" },
                "direction": "DESCENDING",
            }],
            "limit": n,
        }
    })
    .to_string()
}

#[derive(Debug, Deserialize)]
struct QueryRow {
    #[serde(default)]
    document: Option<Document>,
}

#[derive(Debug, Deserialize)]
struct Document {
    #[serde(default)]
    fields: Fields,
}

#[derive(Debug, Default, Deserialize)]
struct Fields {
    #[serde(default)]
    name: Option<Value>,
    #[serde(default)]
    score: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Value {
    #[serde(default)]
    string_value: Option<String>,
    #[serde(default)]
    integer_value: Option<String>,
    #[serde(default)]
    double_value: Option<f64>,
}

impl Value {
    fn as_score(&self) -> Option<u32> {
        if let Some(int) = &self.integer_value {
            return int.parse::<i64>().ok().map(|v| v.clamp(0, u32::MAX as i64) as u32);
        }
        self.double_value
            .filter(|v| v.is_finite())
            .map(|v| v.max(0.0).floor() as u32)
    }
}

/// Decode a `:runQuery` response into entries, highest first.
///
/// Rows without a document (the trailing read-time row) are skipped, as are
/// documents missing a usable name or score.
pub fn decode_top(body: &str) -> Result<Vec<ScoreEntry>, StoreError> {
    let rows: Vec<QueryRow> = serde_json::from_str(body)?;
    let mut entries: Vec<ScoreEntry> = rows
        .into_iter()
        .filter_map(|row| row.document)
        .filter_map(|doc| {
            let name = doc.fields.name.and_then(|v| v.string_value);
            let score = doc.fields.score.as_ref().and_then(Value::as_score);
            match (name, score) {
                (Some(name), Some(score)) => Some(ScoreEntry::new(name, score)),
                _ => {
                    log::warn!("Skipping malformed score document");
                    None
                }
            }
        })
        .collect();
    entries.sort_by(|a, b| b.score.cmp(&a.score));
    Ok(entries)
}

/// Score store backed by the Firestore REST API
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone)]
pub struct FirestoreStore {
    config: StoreConfig,
}

#[cfg(target_arch = "wasm32")]
impl FirestoreStore {
    pub fn new(config: StoreConfig) -> Self {
        log::info!(
            "Score store: Firestore project '{}' collection '{}'",
            config.project_id,
            config.collection
        );
        Self { config }
    }

    /// Read `window.SWAN_STORE` (a `{projectId, apiKey?, collection?}` object)
    pub fn from_window() -> Option<Self> {
        let window = web_sys::window()?;
        let value = js_sys::Reflect::get(&window, &"SWAN_STORE".into()).ok()?;
        if value.is_undefined() || value.is_null() {
            return None;
        }
        let json: String = js_sys::JSON::stringify(&value).ok()?.into();
        match serde_json::from_str::<StoreConfig>(&json) {
            Ok(config) => Some(Self::new(config)),
            Err(e) => {
                log::warn!("Invalid SWAN_STORE config: {}", e);
                None
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
async fn post_json(url: String, body: String) -> Result<String, StoreError> {
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{Request, RequestInit, RequestMode, Response};

    let transport = |e: wasm_bindgen::JsValue| StoreError::Transport(format!("{:?}", e));

    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(RequestMode::Cors);
    opts.set_body(&wasm_bindgen::JsValue::from_str(&body));

    let request = Request::new_with_str_and_init(&url, &opts).map_err(transport)?;
    request
        .headers()
        .set("Content-Type", "application/json")
        .map_err(transport)?;

    let window = web_sys::window().ok_or_else(|| StoreError::Transport("no window".to_string()))?;
    let response: Response = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(transport)?
        .dyn_into()
        .map_err(transport)?;

    if !response.ok() {
        return Err(StoreError::Status {
            status: response.status(),
        });
    }

    let text = JsFuture::from(response.text().map_err(transport)?)
        .await
        .map_err(transport)?;
    Ok(text.as_string().unwrap_or_default())
}

#[cfg(target_arch = "wasm32")]
impl super::ScoreStore for FirestoreStore {
    fn submit(&self, name: &str, score: u32) -> super::StoreFuture<()> {
        let url = self.config.submit_url();
        let name = super::validate_name(name);
        Box::pin(async move {
            let name = name?;
            let created_at: String = js_sys::Date::new_0().to_iso_string().into();
            post_json(url, encode_score(&name, score, &created_at)).await?;
            Ok(())
        })
    }

    fn fetch_top(&self, n: usize) -> super::StoreFuture<Vec<ScoreEntry>> {
        let url = self.config.query_url();
        let body = encode_top_query(&self.config.collection, n);
        Box::pin(async move {
            let text = post_json(url, body).await?;
            let mut entries = decode_top(&text)?;
            entries.truncate(n);
            Ok(entries)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls() {
        let mut config = StoreConfig::new("swan-board");
        assert_eq!(
            config.submit_url(),
            "https://firestore.googleapis.com/v1/projects/swan-board/databases/(default)/documents/scores"
        );
        config.api_key = Some("k".to_string());
        assert!(config.query_url().ends_with("/documents:runQuery?key=k"));
    }

    #[test]
    fn test_config_from_json() {
        let config: StoreConfig = serde_json::from_str(r#"{"projectId": "p"}"#).unwrap();
        assert_eq!(config, StoreConfig::new("p"));
    }

    #[test]
    fn test_encode_score() {
        let body: serde_json::Value =
            serde_json::from_str(&encode_score("swan", 512, "2024-05-01T00:00:00Z")).unwrap();
        assert_eq!(body["fields"]["name"]["stringValue"], "swan");
        assert_eq!(body["fields"]["score"]["integerValue"], "512");
        assert_eq!(body["fields"]["createdAt"]["timestampValue"], "2024-05-01T00:00:00Z");
    }

    #[test]
    fn test_encode_top_query() {
        let body: serde_json::Value =
            serde_json::from_str(&encode_top_query("scores", 10)).unwrap();
        let query = &body["structuredQuery"];
        assert_eq!(query["from"][0]["collectionId"], "scores");
        assert_eq!(query["orderBy"][0]["direction"], "DESCENDING");
        assert_eq!(query["limit"], 10);
    }

    #[test]
    fn test_decode_top() {
        let body = r#"[
            {"document": {"name": "projects/p/databases/(default)/documents/scores/a",
              "fields": {"name": {"stringValue": "low"}, "score": {"integerValue": "12"}}},
             "readTime": "2024-05-01T00:00:00Z"},
            {"document": {"fields": {"name": {"stringValue": "high"}, "score": {"doubleValue": 340.7}}}},
            {"document": {"fields": {"score": {"integerValue": "99"}}}},
            {"readTime": "2024-05-01T00:00:00Z"}
        ]"#;
        let entries = decode_top(body).unwrap();
        assert_eq!(entries, vec![ScoreEntry::new("high", 340), ScoreEntry::new("low", 12)]);
    }

    #[test]
    fn test_decode_empty_and_garbage() {
        assert!(decode_top(r#"[{"readTime": "x"}]"#).unwrap().is_empty());
        assert!(matches!(decode_top("<html>"), Err(StoreError::Malformed(_))));
    }
}
