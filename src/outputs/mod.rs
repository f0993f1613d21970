//! Output of the finished digest.
//!
//! # Submodules
//!
//! - [`html`]: Renders a `Digest` into subject, HTML body and plain-text fallback
//! - [`mail`]: Delivers the rendered digest over authenticated SMTP

pub mod html;
pub mod mail;
