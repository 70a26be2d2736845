//! ArduPilot Log Parser Library
//!
//! A Rust library for extracting messages from ArduPilot DataFlash binary
//! logs. Logs are self-describing: FMT records declare each message type's
//! id, length and name, and every record is framed by a two-byte header plus
//! its type id. This library discovers the declared formats and pulls out
//! every framed instance of the selected types in a single pass. Payloads are
//! returned as raw bytes; decoding them by format string is left to callers.
//!
//! # Features
//!
//! - **`csv`** (default): Enable CSV export functionality
//! - **`cli`** (default): Build the command-line interface binary
//! - **`json`**: Enable JSON summary export
//! - **`serde`**: Enable serialization/deserialization of types
//!
//! # Quick Start
//!
//! Parse a log file and list what it contains:
//! ```rust,no_run
//! use ardupilot_log_parser::{parse_log_file, FrameHeader, ParseOptions};
//! use std::path::Path;
//!
//! let result = parse_log_file(
//!     Path::new("flight.bin"),
//!     FrameHeader::ARDUPILOT,
//!     &ParseOptions::default(),
//!     false,
//! )
//! .unwrap();
//! println!("FMT length {}", result.fmt_record_length);
//! for (format, instances) in result.active_formats() {
//!     println!("{}: {} messages", format.name, instances.len());
//! }
//! ```
//!
//! Extract only some message types:
//! ```rust,no_run
//! use ardupilot_log_parser::{parse_log_bytes, FilterSpec, FrameHeader, ParseOptions};
//!
//! let data = std::fs::read("flight.bin").unwrap();
//! let options = ParseOptions::with_filter(FilterSpec::by_names(["ATT", "GPS"]));
//! let result = parse_log_bytes(&data, FrameHeader::ARDUPILOT, &options, false).unwrap();
//! if let Some(att) = result.instances_by_name("ATT") {
//!     println!("{} ATT records", att.len());
//! }
//! ```
//!
//! # Public API
//!
//! ## Parsing Functions
//! - [`parse_log_file`] - Parse a log file
//! - [`parse_log_bytes`] - Parse log data from memory
//! - [`parse_log`] - Parse from memory with default header and options
//! - [`find_fmt_length`], [`build_format_table`], [`resolve_filter`],
//!   [`scan_messages`] - The individual pipeline stages
//!
//! ## Data Types
//! - [`ParseResult`] - Format table, per-type instances and totals
//! - [`FormatRecord`] - One declared message type
//! - [`MessageInstance`] - One extracted record
//! - [`FilterSpec`] - Which message types to extract
//! - [`ParseOptions`] - Parse configuration
//!
//! ## Export Functions
//! - [`export_to_csv`] - Format table and per-type CSV files
//! - `export_to_json` - JSON summary (`json` feature)
//! - [`compute_export_paths`] - Helper for consistent path computation

// Module declarations
pub mod conversion;
pub mod error;
pub mod export;
pub mod filters;
pub mod parser;
pub mod types;

// Re-export everything from modules for convenience
#[allow(ambiguous_glob_reexports)]
pub use conversion::*;
#[allow(ambiguous_glob_reexports)]
pub use error::*;
#[allow(ambiguous_glob_reexports)]
pub use export::*;
#[allow(ambiguous_glob_reexports)]
pub use filters::*;
#[allow(ambiguous_glob_reexports)]
pub use parser::*;
#[allow(ambiguous_glob_reexports)]
pub use types::*;
