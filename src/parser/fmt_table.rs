//! FMT record discovery
//!
//! Scans every byte offset of the log for FMT frames and decodes the fixed
//! layout of each accepted record into a [`FormatRecord`]. The FMT payload is:
//!
//! | offset | size | field         |
//! |--------|------|---------------|
//! | 0      | 1    | type id       |
//! | 1      | 1    | record length |
//! | 2      | 4    | name          |
//! | 6      | 16   | format codes  |
//! | 22     | 64   | field labels  |

use crate::error::{LogError, Result};
use crate::parser::stream::LogStream;
use crate::types::{FormatRecord, ParseWarning, FMT_TYPE_ID, FRAME_PREFIX_LEN};

/// Default ceiling on the number of FMT records collected
pub const MAX_FORMATS: usize = 256;

const NAME_OFFSET: usize = 2;
const NAME_LEN: usize = 4;
const FORMAT_OFFSET: usize = 6;
const FORMAT_LEN: usize = 16;
const LABELS_OFFSET: usize = 22;
const LABELS_LEN: usize = 64;

/// Formats discovered in a log, with any warnings raised while collecting them
#[derive(Debug, Clone, Default)]
pub struct FormatTable {
    pub formats: Vec<FormatRecord>,
    pub warnings: Vec<ParseWarning>,
}

/// Collect every well-framed FMT record in the log, in discovery order.
///
/// Every offset is examined, so redeclared or overlapping FMT records are
/// all kept. Collection stops with a [`ParseWarning::FormatTableOverflow`]
/// once `max_formats` records are held and another one turns up.
/// Returns [`LogError::EmptyFormatTable`] if nothing was found.
pub fn build_format_table(
    stream: &LogStream,
    fmt_length: usize,
    max_formats: usize,
    debug: bool,
) -> Result<FormatTable> {
    let mut table = FormatTable::default();
    let payload_len = fmt_length.saturating_sub(FRAME_PREFIX_LEN);

    if stream.len() >= fmt_length {
        for i in 0..=stream.len() - fmt_length {
            if !stream.frame_at(i, FMT_TYPE_ID) || !stream.is_valid_frame(i, fmt_length) {
                continue;
            }

            if table.formats.len() >= max_formats {
                eprintln!("Warning: Maximum message types exceeded ({})", max_formats);
                table
                    .warnings
                    .push(ParseWarning::FormatTableOverflow { limit: max_formats });
                break;
            }

            let payload = stream.slice_clipped(i + FRAME_PREFIX_LEN, payload_len);
            let record = parse_fmt_payload(payload);

            if debug {
                println!(
                    "FMT at offset {}: type={} length={} name={} format={}",
                    i, record.type_id, record.record_length, record.name, record.format_codes
                );
            }

            if !record.is_dispatchable() {
                eprintln!(
                    "Warning: Format {} ({}) declares length {}, too short for a frame",
                    record.type_id, record.name, record.record_length
                );
                table.warnings.push(ParseWarning::UndersizedFormat {
                    type_id: record.type_id,
                    record_length: record.record_length,
                });
            }

            table.formats.push(record);
        }
    }

    if table.formats.is_empty() {
        return Err(LogError::EmptyFormatTable);
    }

    if debug {
        println!("Found {} FMT message(s)", table.formats.len());
    }

    Ok(table)
}

/// Decode the fixed fields of an FMT payload. Fields that fall outside a
/// short payload come back as zero or empty.
pub fn parse_fmt_payload(payload: &[u8]) -> FormatRecord {
    FormatRecord {
        type_id: payload.first().copied().unwrap_or(0),
        record_length: payload.get(1).copied().unwrap_or(0),
        name: read_fixed_string(payload, NAME_OFFSET, NAME_LEN),
        format_codes: read_fixed_string(payload, FORMAT_OFFSET, FORMAT_LEN),
        field_labels: read_fixed_string(payload, LABELS_OFFSET, LABELS_LEN),
    }
}

/// Read a NUL-padded string field, stopping at the first zero byte
fn read_fixed_string(payload: &[u8], offset: usize, len: usize) -> String {
    let start = offset.min(payload.len());
    let end = (offset + len).min(payload.len());
    let field = &payload[start..end];
    let terminated = field
        .iter()
        .position(|&b| b == 0)
        .map_or(field, |nul| &field[..nul]);
    String::from_utf8_lossy(terminated).into_owned()
}
