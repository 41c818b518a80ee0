//! Provider ports and their AWS SDK implementations.
//!
//! Each port is a synchronous trait standing for one provider service, so
//! provisioners can run against in-memory fakes in tests.

pub mod aws;
pub mod execution_roles;
pub mod function_registry;
pub mod graph_apis;
pub mod table_store;
