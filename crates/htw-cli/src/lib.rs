//! htw CLI - Command-line interface library
//!
//! This library provides the CLI functionality for htw:
//! - Convert: HTML to DOCX
//! - Blocks: list the blocks an HTML file converts to
//! - Inspect: show what a DOCX file contains
//!
//! # Binary Usage
//!
//! ```bash
//! # Convert with a "第 N 页" footer
//! htw convert report.html --output report.docx --footer-prefix 第 --footer-suffix 页
//!
//! # Convert using a configuration file
//! htw convert report.html --config htw.toml
//!
//! # List classified blocks as JSON
//! htw blocks report.html --format json
//!
//! # Inspect the result
//! htw inspect report.docx
//! ```

pub mod app;

// Re-export main entry point and types
pub use app::{
    blocks_command, convert_command, format_blocks, format_summary, inspect_command, run_cli,
    FooterOverrides, OutputFormat,
};
