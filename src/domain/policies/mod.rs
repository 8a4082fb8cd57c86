//! Domain Policies
//!
//! Business rules that gate behavior.

mod delete_authorization;

pub use delete_authorization::DeleteAuthorization;
