//! AWS-facing side of the contact backend.
//!
//! This crate owns the provider ports and their SDK adapters, the
//! provisioners and the workflow that sequences them, plus the `say_hello`
//! Lambda handler. Provider-agnostic types come from `contact_backend_core`.

pub mod adapters;
pub mod cli;
pub mod handlers;
pub mod logging;
pub mod provisioners;
pub mod workflow;
