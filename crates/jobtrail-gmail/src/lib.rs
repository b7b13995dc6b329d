//! # jobtrail-gmail
//!
//! Minimal client for the Gmail REST API, covering exactly what the sync
//! engine needs: search for message ids and fetch full messages.
//!
//! ```ignore
//! use jobtrail_gmail::GmailClient;
//!
//! let client = GmailClient::new(access_token);
//! let refs = client.list_messages("subject:(job) newer_than:30d", 20).await?;
//! for r in refs {
//!     let msg = client.get_message(&r.id).await?;
//!     println!("{:?}: {:?}", msg.subject(), msg.plain_text_body());
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod client;
mod error;
mod message;

pub use client::GmailClient;
pub use error::{Error, Result};
pub use message::{Header, Message, MessageList, MessagePart, MessageRef, PartBody};
