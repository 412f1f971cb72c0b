//! Request handlers for the application front end.
//!
//! Each handler takes a serde DTO and returns a serde DTO. Stateless
//! handlers report errors as text; stateful ones return [`CommandError`].
//!
//! [`CommandError`]: crate::CommandError

pub mod password_generator;
pub mod secrets;
