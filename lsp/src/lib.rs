//! Language server for the ezsql dialect, built on `tower-lsp`.

pub mod server;

pub use server::{RopeLines, completion_items, definition_links, run};
