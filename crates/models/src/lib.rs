//! Data model shared by the directory service and its client.

pub mod employee;

pub use employee::{DirectoryDocument, EmployeeId, EmployeeRecord, EmployeeView};
