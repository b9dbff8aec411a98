use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::Deserialize;

use super::GitHubClient;
use crate::error::{DecodeError, GitHubError};
use crate::repo_ref::RepoRef;

/// Body of a blob lookup.
#[derive(Debug, Clone, Deserialize)]
pub struct BlobPayload {
    pub content: String,
    #[serde(default = "base64_encoding")]
    pub encoding: String,
}

fn base64_encoding() -> String {
    "base64".to_string()
}

impl BlobPayload {
    /// Decodes the blob to UTF-8 text. GitHub wraps base64 content at 60
    /// columns, so whitespace is dropped before decoding.
    pub fn decode_text(&self) -> Result<String, DecodeError> {
        match self.encoding.as_str() {
            "base64" => {
                let compact: Vec<u8> = self
                    .content
                    .bytes()
                    .filter(|b| !b.is_ascii_whitespace())
                    .collect();
                let bytes = STANDARD.decode(compact)?;
                Ok(String::from_utf8(bytes)?)
            }
            "utf-8" | "utf8" => Ok(self.content.clone()),
            other => Err(DecodeError::Encoding(other.to_string())),
        }
    }
}

impl GitHubClient {
    /// Fetches the blob at `location`, the `url` of a tree entry.
    pub async fn fetch_blob(
        &self,
        repo: &RepoRef,
        location: &str,
    ) -> Result<BlobPayload, GitHubError> {
        self.send_json(repo, self.request(location), "blob").await
    }
}
