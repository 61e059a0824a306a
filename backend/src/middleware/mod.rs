//! Actix middleware shared by every route.
//!
//! [`Trace`] assigns each request a [`crate::TraceId`] before any handler or
//! error responder runs.

pub mod trace;

pub use trace::Trace;
