//! One provisioner per resource category.
//!
//! Every provisioner catches the errors of its own provider calls, logs them
//! and returns `None`, so a failed step never stops the ones after it.

pub mod api;
pub mod function;
pub mod table;
