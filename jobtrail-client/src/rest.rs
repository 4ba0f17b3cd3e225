//! Job store over HTTP.
//!
//! `GET {base}/jobs` lists jobs. `PUT {base}/jobs/{id}` with
//! `{"column_id": "column-N"}` moves one and answers with the updated record,
//! or with 204, in which case the record is read back with
//! `GET {base}/jobs/{id}`.

use crate::config::{AuthConfig, ClientConfig};
use crate::error::ClientError;
use async_trait::async_trait;
use jobtrail_core::{ColumnId, JobId, JobRecord, JobStore, JobStoreError, UpdateJobRequest};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Serialize)]
struct MoveJobBody {
    column_id: ColumnId,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

#[derive(Debug, Clone)]
pub struct RestJobStore {
    client: reqwest::Client,
    base_url: String,
    auth_header: HeaderMap,
}

impl RestJobStore {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let timeout = Duration::from_millis(config.request_timeout_ms);
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        let auth_header = build_auth_headers(&config.auth)?;
        Ok(Self {
            client,
            base_url: config.api_base_url.trim().trim_end_matches('/').to_string(),
            auth_header,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn list_jobs(&self) -> Result<Vec<JobRecord>, ClientError> {
        let response = self
            .client
            .get(self.url("/jobs"))
            .headers(self.auth_header.clone())
            .send()
            .await?;
        parse_response(response).await
    }

    pub async fn get_job(&self, id: JobId) -> Result<JobRecord, ClientError> {
        let response = self
            .client
            .get(self.url(&format!("/jobs/{}", id)))
            .headers(self.auth_header.clone())
            .send()
            .await?;
        parse_response(response).await
    }

    pub async fn move_job(&self, request: UpdateJobRequest) -> Result<JobRecord, ClientError> {
        let body = MoveJobBody {
            column_id: request.column_id,
        };
        let response = self
            .client
            .put(self.url(&format!("/jobs/{}", request.id)))
            .headers(self.auth_header.clone())
            .json(&body)
            .send()
            .await?;

        if response.status() == StatusCode::NO_CONTENT {
            return self.get_job(request.id).await;
        }
        parse_response(response).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl JobStore for RestJobStore {
    async fn fetch_jobs(&self) -> Result<Vec<JobRecord>, JobStoreError> {
        self.list_jobs().await.map_err(|err| JobStoreError::FetchFailed {
            reason: err.to_string(),
        })
    }

    async fn update_job(&self, request: UpdateJobRequest) -> Result<JobRecord, JobStoreError> {
        self.move_job(request).await.map_err(|err| {
            if err.is_not_found() {
                JobStoreError::NotFound { id: request.id }
            } else {
                JobStoreError::UpdateFailed {
                    id: request.id,
                    reason: err.to_string(),
                }
            }
        })
    }
}

async fn parse_response<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ClientError> {
    let status = response.status();
    let text = response.text().await?;
    if status.is_success() {
        return Ok(serde_json::from_str(&text)?);
    }

    let message = serde_json::from_str::<ErrorBody>(&text)
        .map(|body| body.message)
        .unwrap_or(text);
    Err(ClientError::Status {
        status: status.as_u16(),
        message,
    })
}

fn build_auth_headers(auth: &AuthConfig) -> Result<HeaderMap, ClientError> {
    let mut headers = HeaderMap::new();
    if let Some(token) = &auth.bearer_token {
        let value = format!("Bearer {}", token.trim());
        let mut value =
            HeaderValue::from_str(&value).map_err(|e| ClientError::InvalidHeader(e.to_string()))?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);
    }
    Ok(headers)
}
