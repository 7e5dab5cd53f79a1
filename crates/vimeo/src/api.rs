//! HTTP client for the Vimeo REST API using [`reqwest`].

use serde::{Deserialize, Serialize};

/// Accept header value pinning the Vimeo API version.
const ACCEPT_HEADER: &str = "application/vnd.vimeo.*+json;version=3.4";

/// Tus protocol version sent with upload PATCH requests.
const TUS_VERSION: &str = "1.0.0";

/// HTTP client for the Vimeo API.
pub struct VimeoApi {
    client: reqwest::Client,
    api_url: String,
    access_token: String,
}

/// Result of a completed video upload.
#[derive(Debug, Clone)]
pub struct UploadedVideo {
    /// Opaque video id, extracted from the canonical URI.
    pub vimeo_id: String,
    /// Canonical resource URI (e.g. `/videos/76979871`).
    pub uri: String,
}

/// One caption (text track) entry on a video.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Caption {
    pub uri: String,
    pub name: String,
    pub language: String,
}

/// Errors from the Vimeo API layer.
#[derive(Debug, thiserror::Error)]
pub enum VimeoApiError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Vimeo returned a non-2xx status code.
    #[error("Vimeo API error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// A 2xx response was missing a field the flow depends on.
    #[error("Unexpected Vimeo response: {0}")]
    UnexpectedResponse(String),
}

#[derive(Debug, Deserialize)]
struct CreateVideoResponse {
    uri: String,
    upload: Option<UploadInfo>,
}

#[derive(Debug, Deserialize)]
struct UploadInfo {
    upload_link: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CreateTrackResponse {
    uri: String,
    link: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TextTrackList {
    data: Vec<Caption>,
}

impl VimeoApi {
    /// Create a client against the production API.
    pub fn new(access_token: impl Into<String>) -> Self {
        Self::with_api_url("https://api.vimeo.com", access_token)
    }

    /// Create a client against an alternate base URL (tests, proxies).
    pub fn with_api_url(api_url: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: api_url.into(),
            access_token: access_token.into(),
        }
    }

    /// Upload a video and return its id once the bytes are accepted.
    ///
    /// Two steps: create the video resource (which allocates a tus upload
    /// link sized to the payload), then push the whole payload in a single
    /// tus PATCH. Transcoding continues asynchronously on Vimeo's side;
    /// duration is not available until it finishes.
    pub async fn upload_video(
        &self,
        bytes: Vec<u8>,
        name: &str,
        description: &str,
    ) -> Result<UploadedVideo, VimeoApiError> {
        let body = serde_json::json!({
            "upload": {
                "approach": "tus",
                "size": bytes.len().to_string(),
            },
            "name": name,
            "description": description,
            "privacy": {
                "view": "anybody",
                "embed": "public",
                "comments": "nobody",
            },
        });

        let response = self
            .client
            .post(format!("{}/me/videos", self.api_url))
            .bearer_auth(&self.access_token)
            .header(reqwest::header::ACCEPT, ACCEPT_HEADER)
            .json(&body)
            .send()
            .await?;
        let created: CreateVideoResponse = Self::parse_response(response).await?;

        let upload_link = created
            .upload
            .and_then(|u| u.upload_link)
            .ok_or_else(|| {
                VimeoApiError::UnexpectedResponse("missing upload.upload_link".into())
            })?;

        let patch = self
            .client
            .patch(&upload_link)
            .header("Tus-Resumable", TUS_VERSION)
            .header("Upload-Offset", "0")
            .header(reqwest::header::CONTENT_TYPE, "application/offset+octet-stream")
            .body(bytes)
            .send()
            .await?;
        Self::check_status(patch).await?;

        let vimeo_id = video_id_from_uri(&created.uri).ok_or_else(|| {
            VimeoApiError::UnexpectedResponse(format!("unparseable video uri '{}'", created.uri))
        })?;

        tracing::info!(vimeo_id = %vimeo_id, "Video upload accepted");

        Ok(UploadedVideo {
            vimeo_id,
            uri: created.uri,
        })
    }

    /// Raw metadata for a video, including transcode status. Passed through
    /// to callers untouched.
    pub async fn video_info(&self, vimeo_id: &str) -> Result<serde_json::Value, VimeoApiError> {
        let response = self
            .client
            .get(format!("{}/videos/{vimeo_id}", self.api_url))
            .bearer_auth(&self.access_token)
            .header(reqwest::header::ACCEPT, ACCEPT_HEADER)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    /// Transcoded duration in whole seconds. Zero until transcoding reports
    /// a duration.
    pub async fn duration_secs(&self, vimeo_id: &str) -> Result<u64, VimeoApiError> {
        let info = self.video_info(vimeo_id).await?;
        Ok(info.get("duration").and_then(|d| d.as_u64()).unwrap_or(0))
    }

    /// Create a caption track and upload its content.
    ///
    /// The track resource is created first; Vimeo answers with a one-shot
    /// upload link the subtitle file content is PUT to.
    pub async fn create_caption(
        &self,
        vimeo_id: &str,
        language: &str,
        name: &str,
        content: String,
    ) -> Result<(), VimeoApiError> {
        let body = serde_json::json!({
            "active": true,
            "type": "subtitles",
            "language": language,
            "name": name,
        });

        let response = self
            .client
            .post(format!("{}/videos/{vimeo_id}/texttracks", self.api_url))
            .bearer_auth(&self.access_token)
            .header(reqwest::header::ACCEPT, ACCEPT_HEADER)
            .json(&body)
            .send()
            .await?;
        let track: CreateTrackResponse = Self::parse_response(response).await?;

        let upload_link = track.link.ok_or_else(|| {
            VimeoApiError::UnexpectedResponse(format!(
                "text track {} has no upload link",
                track.uri
            ))
        })?;

        let put = self
            .client
            .put(&upload_link)
            .header(reqwest::header::CONTENT_TYPE, "text/plain")
            .body(content)
            .send()
            .await?;
        Self::check_status(put).await
    }

    /// List a video's caption tracks. Always fetched live; nothing is
    /// cached locally.
    pub async fn list_captions(&self, vimeo_id: &str) -> Result<Vec<Caption>, VimeoApiError> {
        let response = self
            .client
            .get(format!("{}/videos/{vimeo_id}/texttracks", self.api_url))
            .bearer_auth(&self.access_token)
            .header(reqwest::header::ACCEPT, ACCEPT_HEADER)
            .send()
            .await?;
        let list: TextTrackList = Self::parse_response(response).await?;
        Ok(list.data)
    }

    /// Delete one caption track.
    pub async fn delete_caption(
        &self,
        vimeo_id: &str,
        caption_id: &str,
    ) -> Result<(), VimeoApiError> {
        let response = self
            .client
            .delete(format!(
                "{}/videos/{vimeo_id}/texttracks/{caption_id}",
                self.api_url
            ))
            .bearer_auth(&self.access_token)
            .header(reqwest::header::ACCEPT, ACCEPT_HEADER)
            .send()
            .await?;
        Self::check_status(response).await
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code, otherwise surface the
    /// status and body text as [`VimeoApiError::ApiError`].
    async fn check_status(response: reqwest::Response) -> Result<(), VimeoApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(VimeoApiError::ApiError {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }

    /// Check the status, then deserialize the JSON body.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, VimeoApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(VimeoApiError::ApiError {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.json().await?)
    }
}

/// Extract the opaque video id from a canonical video URI.
fn video_id_from_uri(uri: &str) -> Option<String> {
    let id = uri.trim_end_matches('/').rsplit('/').next()?;
    if id.is_empty() {
        None
    } else {
        Some(id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_from_plain_uri() {
        assert_eq!(
            video_id_from_uri("/videos/76979871").as_deref(),
            Some("76979871")
        );
    }

    #[test]
    fn id_from_trailing_slash() {
        assert_eq!(
            video_id_from_uri("/videos/76979871/").as_deref(),
            Some("76979871")
        );
    }

    #[test]
    fn empty_uri_is_none() {
        assert_eq!(video_id_from_uri(""), None);
        assert_eq!(video_id_from_uri("///"), None);
    }
}
