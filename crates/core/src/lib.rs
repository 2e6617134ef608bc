//! Domain types shared by the Graph client and the HTTP server.
//!
//! Nothing here talks to the network: it holds the publish request shape,
//! its boundary validation, and the values passed between orchestration
//! stages.

pub mod error;
pub mod publish;
