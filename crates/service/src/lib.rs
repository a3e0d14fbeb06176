//! Service layer owning the employee directory.
//! - Loads the directory from its JSON file once at startup.
//! - Exposes list/get/put behind the `EmployeeStore` trait so the HTTP layer does not
//!   depend on the backing implementation.

pub mod errors;
pub mod runtime;
pub mod directory;

pub use directory::{file_store::EmployeeDirectory, EmployeeStore};
