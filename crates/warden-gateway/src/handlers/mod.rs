//! HTTP request handlers.
//!
//! Guards are composed explicitly: authentication through the
//! [`crate::auth::SessionAuth`] extractor, the cooldown through an
//! in-handler call, so the control flow of each endpoint stays visible.

pub mod health;
pub mod login;
pub mod server;
