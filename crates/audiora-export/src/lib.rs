//! audiora-export
//!
//! Printable reports: a display-only context built from a session, rendered
//! through Tera with the chosen section layout, then packed into DOCX.

pub mod context;
pub mod docx;
pub mod error;
pub mod render;
pub mod styles;
pub mod templates;
