//! Session services used by the HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own session persistence so route handlers can stay focused
//! on cookie plumbing and rendering.

pub mod memory_store;
pub mod pg_store;
pub mod session;
