//! Provider-agnostic primitives for the contact backend.
//!
//! This crate owns configuration, resource specs and descriptors, the
//! GraphQL schema text, the `amplify_outputs.json` document, function code
//! packaging and the readiness poll. It intentionally excludes AWS SDK and
//! Lambda runtime concerns; those live in `contact_backend_aws`.

pub mod config;
pub mod contract;
pub mod error;
pub mod output;
pub mod packaging;
pub mod readiness;
pub mod schema;
