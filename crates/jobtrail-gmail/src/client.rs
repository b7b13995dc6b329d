//! HTTP client for the Gmail REST API.

use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::message::{Message, MessageList, MessageRef};

/// Base URL for the authenticated user's mailbox.
const API_BASE: &str = "https://gmail.googleapis.com/gmail/v1/users/me";

/// Error body shape of the Gmail API.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    #[serde(default)]
    message: String,
}

/// Client for a single user's Gmail mailbox.
///
/// Holds the bearer token for one request batch; the caller refreshes the
/// credential and constructs a new client per sync run.
#[derive(Debug, Clone)]
pub struct GmailClient {
    http: Client,
    access_token: String,
}

impl GmailClient {
    /// Creates a client around an access token.
    #[must_use]
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            access_token: access_token.into(),
        }
    }

    /// Lists message references matching a Gmail search query.
    ///
    /// Returns an empty vec when nothing matches.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unauthorized`] when the token is rejected and
    /// [`Error::Api`] for other non-success responses.
    pub async fn list_messages(&self, query: &str, max_results: u32) -> Result<Vec<MessageRef>> {
        let max_results = max_results.to_string();
        let response = self
            .http
            .get(format!("{API_BASE}/messages"))
            .bearer_auth(&self.access_token)
            .query(&[("q", query), ("maxResults", max_results.as_str())])
            .send()
            .await?;

        let response = check_status(response).await?;
        let list: MessageList = response.json().await?;
        debug!(
            count = list.messages.len(),
            estimate = list.result_size_estimate,
            "listed messages"
        );
        Ok(list.messages)
    }

    /// Fetches a full message (format `full`, the API default) by id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unauthorized`] when the token is rejected and
    /// [`Error::Api`] for other non-success responses.
    pub async fn get_message(&self, id: &str) -> Result<Message> {
        let response = self
            .http
            .get(format!("{API_BASE}/messages/{id}"))
            .bearer_auth(&self.access_token)
            .send()
            .await?;

        let response = check_status(response).await?;
        Ok(response.json().await?)
    }
}

/// Maps non-success responses to errors, reading the API error body when
/// one is present.
async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(Error::Unauthorized(status.as_u16()));
    }

    let message = match response.json::<ApiErrorBody>().await {
        Ok(body) if !body.error.message.is_empty() => body.error.message,
        _ => status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string(),
    };

    Err(Error::Api {
        status: status.as_u16(),
        message,
    })
}
