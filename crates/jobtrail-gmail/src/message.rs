//! Wire model of Gmail messages, plus the helpers the sync engine uses to
//! pull a subject, sender and plain-text body out of a payload tree.

use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::debug;

/// Gmail encodes body data as base64url; padding varies by producer, so
/// decode indifferent to it.
const BODY_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Reference to a message, as returned by the list endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageRef {
    /// Message identifier.
    pub id: String,
    /// Thread identifier.
    pub thread_id: String,
}

/// Response of the message list endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageList {
    /// Matching messages. Absent entirely when nothing matches.
    #[serde(default)]
    pub messages: Vec<MessageRef>,
    /// Gmail's estimate of the total result count.
    #[serde(default)]
    pub result_size_estimate: u32,
}

/// A full message as returned by the get endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Message identifier.
    pub id: String,
    /// Short preview of the message text.
    #[serde(default)]
    pub snippet: String,
    /// Internal timestamp: epoch milliseconds as a decimal string.
    #[serde(default)]
    pub internal_date: Option<String>,
    /// MIME payload tree.
    pub payload: Option<MessagePart>,
}

/// One node of the MIME payload tree.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessagePart {
    /// MIME type of this part.
    #[serde(default)]
    pub mime_type: String,
    /// Headers on this part.
    #[serde(default)]
    pub headers: Vec<Header>,
    /// Body of this part.
    #[serde(default)]
    pub body: PartBody,
    /// Child parts for multipart types.
    #[serde(default)]
    pub parts: Vec<MessagePart>,
}

/// A single message header.
#[derive(Debug, Clone, Deserialize)]
pub struct Header {
    /// Header name.
    pub name: String,
    /// Header value.
    pub value: String,
}

/// Body of a payload part.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PartBody {
    /// Size in bytes.
    #[serde(default)]
    pub size: u64,
    /// Base64url-encoded content; absent for container parts.
    #[serde(default)]
    pub data: Option<String>,
}

impl Message {
    /// Looks up a header value on the top-level payload,
    /// case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.payload.as_ref().and_then(|p| {
            p.headers
                .iter()
                .find(|h| h.name.eq_ignore_ascii_case(name))
                .map(|h| h.value.as_str())
        })
    }

    /// The `Subject` header.
    #[must_use]
    pub fn subject(&self) -> Option<&str> {
        self.header("Subject")
    }

    /// The `From` header.
    #[must_use]
    pub fn from(&self) -> Option<&str> {
        self.header("From")
    }

    /// Decodes the plain-text body of the message.
    ///
    /// Uses the top-level body when it carries data, otherwise the first
    /// `text/plain` part found depth-first. Returns `None` when there is
    /// no text body or its data does not decode; a bad body is not worth
    /// failing a whole sync batch over.
    #[must_use]
    pub fn plain_text_body(&self) -> Option<String> {
        let payload = self.payload.as_ref()?;

        if let Some(data) = payload.body.data.as_deref() {
            return decode_body(data);
        }

        payload
            .find_part("text/plain")
            .and_then(|part| part.body.data.as_deref())
            .and_then(decode_body)
    }

    /// The internal date as a UTC timestamp.
    #[must_use]
    pub fn internal_date_utc(&self) -> Option<DateTime<Utc>> {
        self.internal_date
            .as_deref()
            .and_then(|ms| ms.parse::<i64>().ok())
            .and_then(DateTime::from_timestamp_millis)
    }
}

impl MessagePart {
    /// Finds the first part with the given MIME type, searching this part
    /// and then its children depth-first.
    #[must_use]
    pub fn find_part(&self, mime_type: &str) -> Option<&Self> {
        if self.mime_type.eq_ignore_ascii_case(mime_type) {
            return Some(self);
        }
        self.parts.iter().find_map(|p| p.find_part(mime_type))
    }
}

/// Decodes base64url body data into a string, lossily for non-UTF-8 bytes.
fn decode_body(data: &str) -> Option<String> {
    match BODY_ENGINE.decode(data) {
        Ok(bytes) => Some(String::from_utf8_lossy(&bytes).into_owned()),
        Err(e) => {
            debug!("undecodable body data: {e}");
            None
        }
    }
}
