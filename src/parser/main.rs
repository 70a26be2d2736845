use crate::error::Result;
use crate::filters::{resolve_filter, FilterSpec};
use crate::parser::fmt_table::{build_format_table, MAX_FORMATS};
use crate::parser::probe::find_fmt_length;
use crate::parser::scanner::{scan_messages, INITIAL_CAPACITY};
use crate::parser::stream::LogStream;
use crate::types::*;
use std::path::Path;

/// Options controlling a parse
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Which message types to extract
    pub filter: FilterSpec,
    /// Ceiling on the number of FMT records collected
    pub max_formats: usize,
    /// Starting capacity of each selected type's instance list
    pub initial_capacity: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            filter: FilterSpec::None,
            max_formats: MAX_FORMATS,
            initial_capacity: INITIAL_CAPACITY,
        }
    }
}

impl ParseOptions {
    pub fn with_filter(filter: FilterSpec) -> Self {
        Self {
            filter,
            ..Self::default()
        }
    }
}

/// Parse an ArduPilot log file
pub fn parse_log_file(
    file_path: &Path,
    header: FrameHeader,
    options: &ParseOptions,
    debug: bool,
) -> Result<ParseResult> {
    if debug {
        println!("=== PARSING LOG FILE ===");
        let metadata = std::fs::metadata(file_path)?;
        println!(
            "File size: {} bytes ({:.2} MB)",
            metadata.len(),
            metadata.len() as f64 / 1024.0 / 1024.0
        );
    }

    let file_data = std::fs::read(file_path)?;
    parse_log_bytes(&file_data, header, options, debug)
}

/// Parse an ArduPilot log held in memory.
///
/// Runs the FMT length probe, builds the format table, resolves the filter
/// and extracts every selected message in one pass. Fails only when the log
/// declares no formats at all.
pub fn parse_log_bytes(
    data: &[u8],
    header: FrameHeader,
    options: &ParseOptions,
    debug: bool,
) -> Result<ParseResult> {
    if debug {
        println!("=== PARSING LOG DATA ===");
        println!("Data size: {} bytes, header {}", data.len(), header);
    }

    let stream = LogStream::new(data, header);

    let fmt_record_length = find_fmt_length(&stream, debug);
    let table = build_format_table(&stream, fmt_record_length, options.max_formats, debug)?;
    let accepted = resolve_filter(&table.formats, &options.filter, debug);

    if debug {
        println!(
            "Extracting {} of {} declared type(s)",
            accepted.len(),
            table.formats.len()
        );
    }

    let scan = scan_messages(
        &stream,
        &table.formats,
        &accepted,
        options.initial_capacity,
        debug,
    );

    Ok(ParseResult {
        header,
        fmt_record_length,
        formats: table.formats,
        instances_by_format: scan.instances_by_format,
        total_message_count: scan.total_message_count,
        warnings: table.warnings,
    })
}

/// Parse with the ArduPilot header and no filter
pub fn parse_log(data: &[u8]) -> Result<ParseResult> {
    parse_log_bytes(data, FrameHeader::ARDUPILOT, &ParseOptions::default(), false)
}

