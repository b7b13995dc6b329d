//! # jobtrail-core
//!
//! Core business logic for the jobtrail job-application tracker.
//!
//! This crate provides:
//! - Job records and their `SQLite` repository
//! - Credential persistence (single-row atomic upsert)
//! - **Email classifier** - ordered regex heuristics turning an email's
//!   subject/snippet/sender into a job title, company and status
//! - **Sync engine** - pulls job-related Gmail messages, de-duplicates by
//!   subject, classifies and persists them
//! - **Auth session** - the `OAuth2` credential lifecycle (authorize,
//!   refresh, revoke) threaded through calls as an explicit object

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod auth;
pub mod classify;
pub mod credential;
mod error;
pub mod job;
pub mod sync;

pub use auth::{AuthSession, AuthStatus};
pub use classify::{Classification, classify, extract_company, extract_status, extract_title};
pub use credential::CredentialRepository;
pub use error::{Error, Result};
pub use job::{JobPatch, JobRecord, JobRepository, JobStatus};
pub use sync::{JOB_QUERY, SyncEngine, SyncOutcome};
