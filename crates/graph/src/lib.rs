//! Instagram Graph API client and publish orchestrator.
//!
//! [`api::GraphClient`] wraps the four Graph API calls needed to publish an
//! image using [`reqwest`]. [`publisher::Publisher`] drives them in order
//! (create container, poll status, publish, fetch permalink), each call
//! bounded by a timeout.

pub mod api;
pub mod config;
pub mod error;
pub mod publisher;
