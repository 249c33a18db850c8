use crate::{
    command::Method,
    errors::{RetailChatError, RetailChatResult},
    logging::log_api_call,
    models::ApiCallLog,
};
use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use serde_json::Value;
use std::time::Instant;

/// Issues one HTTP request against the analytics API and hands back the
/// parsed JSON body.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> RetailChatResult<Value>;
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl HttpClient for ApiClient {
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> RetailChatResult<Value> {
        let url = self.url(path);
        let mut builder = match method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
        };
        if let Some(body) = &body {
            builder = builder.json(body);
        }

        let start_time = Instant::now();
        let sent = builder.send().await;

        log_api_call(&ApiCallLog {
            timestamp: Utc::now(),
            method: method.to_string(),
            endpoint: url.clone(),
            response_status: sent.as_ref().ok().map(|r| r.status().as_u16()),
            response_time_ms: start_time.elapsed().as_millis(),
        });

        let response = sent.map_err(|e| {
            log::warn!("{} {} failed: {}", method, url, e);
            RetailChatError::network_error(format!("Request failed: {}", e))
        })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            log::warn!("{} {} returned {}", method, url, status);
            return Err(RetailChatError::network_error(format!(
                "API returned error: {} - {}",
                status, error_text
            )));
        }

        let text = response
            .text()
            .await
            .map_err(|e| RetailChatError::network_error(format!("Failed to read response: {}", e)))?;

        serde_json::from_str(&text).map_err(|e| {
            RetailChatError::parse_error(format!("Failed to parse API response: {}", e))
        })
    }
}
