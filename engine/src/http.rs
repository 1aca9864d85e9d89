//! HTTP store adapter.
//!
//! Talks to a `tally-server` instance (or anything serving the same routes):
//!
//! - `GET    {base}/documents`                        list every document
//! - `GET    {base}/document?key={key}`               read one, 404 when absent
//! - `PUT    {base}/document?key={key}&merge={bool}`  write one
//! - `DELETE {base}/document?key={key}`               delete one, 404 when absent
//!
//! The key travels as a query parameter. Path segments `.` and `..` (and
//! their percent-encoded forms) are normalized away by URL parsing, so a key
//! in the path could not carry every valid item name.

use crate::{error::Result, Document, Error, Record, StoreAdapter};
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode, Url};
use serde::Deserialize;

/// Error body returned by the server.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
    #[serde(default)]
    details: Option<String>,
}

/// Body of a list response.
#[derive(Debug, Deserialize)]
struct ListBody {
    documents: Vec<Document>,
}

/// A [`StoreAdapter`] backed by a remote document store over HTTP.
#[derive(Debug, Clone)]
pub struct HttpStore {
    base_url: Url,
    client: Client,
}

impl HttpStore {
    /// Create an adapter for the server at `base_url`.
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_client(base_url, Client::new())
    }

    /// Create an adapter reusing an existing client (timeouts, TLS, pools).
    pub fn with_client(base_url: &str, client: Client) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| Error::store(format!("invalid base url {base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(Error::store(format!("invalid base url {base_url}")));
        }
        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build `{base}/{resource}`, keeping any path prefix of the base.
    fn url(&self, resource: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(resource);
        }
        url
    }

    /// Build `{base}/document?key={key}`.
    fn document_url(&self, key: &str) -> Url {
        let mut url = self.url("document");
        url.query_pairs_mut().append_pair("key", key);
        url
    }
}

/// Map a transport failure.
fn transport(e: reqwest::Error) -> Error {
    Error::store(format!("request failed: {e}"))
}

/// Turn a non-success response into a store error, keeping the server's message.
async fn failure(response: Response) -> Error {
    let status = response.status();
    match response.json::<ErrorBody>().await {
        Ok(ErrorBody {
            error,
            details: Some(details),
        }) => Error::store(format!("{error}: {details} ({status})")),
        Ok(ErrorBody { error, .. }) => Error::store(format!("{error} ({status})")),
        Err(_) => Error::store(format!("unexpected status {status}")),
    }
}

#[async_trait]
impl StoreAdapter for HttpStore {
    async fn get_item(&self, key: &str) -> Result<Option<Record>> {
        let response = self
            .client
            .get(self.document_url(key))
            .send()
            .await
            .map_err(transport)?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => {
                let document: Document = response.json().await.map_err(transport)?;
                Ok(Some(document.data))
            }
            _ => Err(failure(response).await),
        }
    }

    async fn list_items(&self) -> Result<Vec<(String, Record)>> {
        let response = self
            .client
            .get(self.url("documents"))
            .send()
            .await
            .map_err(transport)?;

        if !response.status().is_success() {
            return Err(failure(response).await);
        }
        let body: ListBody = response.json().await.map_err(transport)?;
        Ok(body
            .documents
            .into_iter()
            .map(|doc| (doc.key, doc.data))
            .collect())
    }

    async fn put_item(&self, key: &str, record: &Record, merge: bool) -> Result<()> {
        let response = self
            .client
            .put(self.document_url(key))
            .query(&[("merge", merge)])
            .json(record)
            .send()
            .await
            .map_err(transport)?;

        if !response.status().is_success() {
            return Err(failure(response).await);
        }
        Ok(())
    }

    async fn delete_item(&self, key: &str) -> Result<()> {
        let response = self
            .client
            .delete(self.document_url(key))
            .send()
            .await
            .map_err(transport)?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(Error::not_found(key)),
            status if status.is_success() => Ok(()),
            _ => Err(failure(response).await),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_document_urls() {
        let store = HttpStore::new("http://localhost:3000").unwrap();
        assert_eq!(
            store.url("documents").as_str(),
            "http://localhost:3000/documents"
        );
        assert_eq!(
            store.document_url("apple").as_str(),
            "http://localhost:3000/document?key=apple"
        );
    }

    #[test]
    fn keeps_base_path_prefix() {
        let store = HttpStore::new("http://localhost:3000/api/").unwrap();
        assert_eq!(
            store.document_url("green apple/large").as_str(),
            "http://localhost:3000/api/document?key=green+apple%2Flarge"
        );
    }

    #[test]
    fn dot_keys_survive_url_building() {
        let store = HttpStore::new("http://localhost:3000").unwrap();
        for key in [".", "..", "a&b=c", "%2E"] {
            let url = store.document_url(key);
            assert_eq!(url.path(), "/document");
            let (_, value) = url.query_pairs().find(|(name, _)| name == "key").unwrap();
            assert_eq!(value, key);
        }
    }

    #[test]
    fn rejects_invalid_base_url() {
        assert!(HttpStore::new("not a url").unwrap_err().is_store());
        assert!(HttpStore::new("mailto:someone@example.com").is_err());
    }
}
