//! Best-effort check for a newer published version.
//!
//! The checker fetches a plain-text version identifier over HTTP and
//! compares it, ignoring case, with the version the caller is running.
//! Network and server failures are logged and reported as "no answer";
//! they never reach the caller as errors from [`UpdateChecker::check`].
//!
//! HTTP is reached through the [`HttpClient`] trait so tests can swap in a
//! scripted client; [`ReqwestClient`] is the production implementation.

mod checker;
mod client;
mod error;
mod http;

#[cfg(test)]
#[path = "checker_tests.rs"]
mod tests;

pub use checker::{UpdateChecker, UpdateStatus};
pub use client::ReqwestClient;
pub use error::{HttpError, UpdateError};
pub use http::{HttpClient, HttpRequest, HttpResponse};
