//! # docforge – financial documents as printable HTML
//!
//! This crate turns structured accounting data (invoices, quotes, bills,
//! credit notes, customer statements and payslips) into self-contained HTML
//! documents with an embedded print style sheet. The stages are:
//!
//! 1. **Format** – currency, escaping and line breaks ([`format`])
//! 2. **Fragments** – header, party, details, table and totals blocks ([`fragments`])
//! 3. **Model** – each kind declared as data on one document model
//!    ([`document`], [`assemblers`], [`payslip`])
//! 4. **Wrap** – a full HTML document with the [`theme`] inlined
//! 5. **Output** – print or download through a host ([`output`])
//!
//! [`pipeline`] dispatches JSON data to the right assembler, and a
//! C-compatible FFI surface is exposed via the [`ffi`] module.

pub mod assemblers;
pub mod document;
pub mod dom;
pub mod error;
pub mod ffi;
pub mod format;
pub mod fragments;
pub mod model;
pub mod output;
pub mod payslip;
pub mod pipeline;
pub mod preview;
pub mod rows;
pub mod samples;
pub mod theme;

// Re-exports for convenience
pub use error::{ForgeError, Result};
pub use model::RenderedDocument;
pub use pipeline::{render_json, render_value, DocumentData, DocumentKind, RenderConfig};
pub use theme::Theme;
