//! Request handler module
//!
//! Routing dispatch and static asset serving with SPA fallback.

pub mod assets;
pub mod router;

// Re-export main entry point
pub use router::handle_request;
