use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::json;
use thiserror::Error;

use crate::{upstream_error_message, Document, FirebaseUrl, Value};

pub const FIRESTORE_URL: &str = "https://firestore.googleapis.com/v1";

#[derive(Error, Debug)]
pub enum FirestoreError {
    #[error("Unauthorized")]
    Unauthorized,
    #[error("{0}")]
    Rejected(String),
    #[error("ResponseError: {0}")]
    ResponseError(String),
    #[error("ParsingError: {0}")]
    ParsingError(String),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AggregationRow {
    result: Option<AggregationResult>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AggregationResult {
    #[serde(default)]
    aggregate_fields: std::collections::BTreeMap<String, Value>,
}

fn count_from_rows(rows: Vec<AggregationRow>) -> Result<u64, FirestoreError> {
    let value = rows
        .into_iter()
        .find_map(|row| row.result)
        .and_then(|result| result.aggregate_fields.get("count").cloned())
        .ok_or_else(|| FirestoreError::ParsingError("Aggregation returned no count".into()))?;

    value
        .as_integer()
        .and_then(|n| u64::try_from(n).ok())
        .ok_or_else(|| FirestoreError::ParsingError(format!("Invalid count value: {:?}", value)))
}

/// Document client for one Firestore database, authenticated with a user's ID token.
#[derive(Debug, Clone)]
pub struct FirestoreClient {
    client: Client,
    documents_url: FirebaseUrl,
}

impl FirestoreClient {
    pub fn new(project_id: &str) -> Self {
        Self::with_base_url(FIRESTORE_URL, project_id)
    }

    /// Use a different API root, e.g. `http://localhost:8080/v1` for the emulator.
    pub fn with_base_url(base_url: &str, project_id: &str) -> Self {
        let documents_url = FirebaseUrl::new(base_url)
            .append_path("projects")
            .append_segment(project_id)
            .append_path("databases/(default)/documents");
        Self {
            client: Client::new(),
            documents_url,
        }
    }

    fn document_url(&self, path: &[&str]) -> FirebaseUrl {
        path.iter()
            .fold(self.documents_url.clone(), |url, segment| url.append_segment(segment))
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        call_name: &str,
    ) -> Result<Option<T>, FirestoreError> {
        let resp = request
            .send()
            .await
            .map_err(|e| FirestoreError::ResponseError(format!("{}: {}", call_name, e)))?;

        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
            return Err(FirestoreError::Unauthorized);
        }

        let text = resp
            .text()
            .await
            .map_err(|e| FirestoreError::ResponseError(format!("{}: {}", call_name, e)))?;

        if !status.is_success() {
            let message =
                upstream_error_message(&text).unwrap_or_else(|| format!("HTTP {}", status));
            tracing::warn!(%status, %message, "{} failed", call_name);
            return Err(FirestoreError::Rejected(message));
        }

        serde_json::from_str(&text).map(Some).map_err(|e| {
            FirestoreError::ParsingError(format!("Failed to parse {} response: {}", call_name, e))
        })
    }

    /// Fetch a document by its path segments. A missing document is `Ok(None)`.
    pub async fn get_document(
        &self,
        id_token: &str,
        path: &[&str],
    ) -> Result<Option<Document>, FirestoreError> {
        let request = self
            .client
            .get(self.document_url(path).as_ref())
            .bearer_auth(id_token);
        self.send(request, "GET document").await
    }

    /// Replace the whole document at `path`, creating it if needed.
    ///
    /// No update mask is sent, so fields absent from `document` are removed.
    pub async fn set_document(
        &self,
        id_token: &str,
        path: &[&str],
        document: &Document,
    ) -> Result<Document, FirestoreError> {
        let body = Document {
            name: None,
            create_time: None,
            update_time: None,
            fields: document.fields.clone(),
        };
        let request = self
            .client
            .patch(self.document_url(path).as_ref())
            .bearer_auth(id_token)
            .json(&body);

        self.send(request, "PATCH document")
            .await?
            .ok_or_else(|| FirestoreError::Rejected("Document parent not found".into()))
    }

    /// Count the documents in the collection `collection_id` directly under `parent`.
    pub async fn count(
        &self,
        id_token: &str,
        parent: &[&str],
        collection_id: &str,
    ) -> Result<u64, FirestoreError> {
        let url = self.document_url(parent).append_suffix(":runAggregationQuery");
        let body = json!({
            "structuredAggregationQuery": {
                "structuredQuery": { "from": [{ "collectionId": collection_id }] },
                "aggregations": [{ "alias": "count", "count": {} }]
            }
        });
        let request = self.client.post(url.as_ref()).bearer_auth(id_token).json(&body);

        match self.send::<Vec<AggregationRow>>(request, "runAggregationQuery").await? {
            Some(rows) => count_from_rows(rows),
            None => Ok(0),
        }
    }
}
