//! Request handlers, grouped by API area.

pub mod auth;
pub mod jobs;
pub mod probes;
pub mod sync;
