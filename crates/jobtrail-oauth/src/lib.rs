//! # jobtrail-oauth
//!
//! Google `OAuth2` client used by jobtrail to read a Gmail mailbox.
//!
//! The crate covers the full credential lifecycle of a single-user
//! installed app:
//!
//! - Loading the Google client-credentials JSON (`credentials.json`)
//! - Building the consent URL (authorization-code flow, optional PKCE)
//! - Exchanging the redirect code for a [`Credential`]
//! - Refreshing an expired access token in place
//!
//! ```ignore
//! use jobtrail_oauth::{AppCredentials, AuthCodeFlow, OAuthClient};
//!
//! let app = AppCredentials::load("credentials.json")?;
//! let flow = AuthCodeFlow::new(OAuthClient::from_app_credentials(&app)).with_pkce();
//!
//! println!("Visit: {}", flow.authorization_url(None)?);
//! let credential = flow.exchange_code("code_from_redirect").await?;
//!
//! if credential.is_expired() {
//!     let credential = OAuthClient::from_app_credentials(&app)
//!         .refresh(&credential)
//!         .await?;
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod credentials;
mod error;
pub mod flow;
mod token;

pub use credentials::AppCredentials;
pub use error::{Error, Result};
pub use flow::{AuthCodeFlow, OAuthClient, PkceChallenge};
pub use token::{Credential, ErrorResponse, TokenResponse};
