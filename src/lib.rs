//! Browse, view and search an on-disk archive of categorized code samples.
//!
//! The archive is laid out as `<root>/<category>/<item>/`. Each item may carry
//! a description file with a title, keywords and a description. A JSON
//! snapshot of all item metadata is cached with a time-to-live and searched
//! by substring.

pub mod archive;
pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod search;
