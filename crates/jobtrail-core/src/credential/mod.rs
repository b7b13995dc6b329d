//! Persistence for the single Gmail credential.

mod repository;

pub use repository::CredentialRepository;
