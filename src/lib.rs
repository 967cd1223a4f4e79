//! spaserve - serves a directory of pre-built static assets and falls
//! through to the entry HTML document for unmatched paths, so client-side
//! routed single-page applications work without server-side route tables.

pub mod api;
pub mod config;
pub mod error;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;
