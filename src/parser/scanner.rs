use crate::filters::AcceptedTypes;
use crate::parser::stream::LogStream;
use crate::types::{FormatRecord, MessageInstance, FRAME_PREFIX_LEN};

/// Starting capacity of each selected type's instance list
pub const INITIAL_CAPACITY: usize = 1000;

/// Instances extracted by one scan, parallel to the format table
#[derive(Debug, Clone, Default)]
pub struct ScanOutput {
    pub instances_by_format: Vec<Vec<MessageInstance>>,
    pub total_message_count: usize,
}

/// Map each type id to the format-table index it dispatches to.
///
/// Only accepted types are entered. When an id is declared more than once
/// the last declaration wins; a last declaration too short to hold a frame
/// leaves the id undispatched.
pub fn build_dispatch_table(
    formats: &[FormatRecord],
    accepted: &AcceptedTypes,
) -> [Option<usize>; 256] {
    let mut dispatch = [None; 256];
    for (index, format) in formats.iter().enumerate() {
        if accepted.contains(format.type_id) {
            dispatch[format.type_id as usize] = format.is_dispatchable().then_some(index);
        }
    }
    dispatch
}

/// Single forward pass extracting every instance of every accepted type.
///
/// At each header match the type id is looked up; a known type whose record
/// passes the frame check is copied out and the scan jumps past it. Anything
/// else advances one byte, which lets the scan recover from header bytes
/// that happen to appear inside payloads.
pub fn scan_messages(
    stream: &LogStream,
    formats: &[FormatRecord],
    accepted: &AcceptedTypes,
    initial_capacity: usize,
    debug: bool,
) -> ScanOutput {
    let dispatch = build_dispatch_table(formats, accepted);

    let mut instances_by_format: Vec<Vec<MessageInstance>> = vec![Vec::new(); formats.len()];
    for index in dispatch.iter().flatten() {
        instances_by_format[*index].reserve_exact(initial_capacity);
    }

    let mut total_message_count = 0;
    let mut rejected_candidates = 0usize;
    let mut pos = 0;

    while pos + 2 < stream.len() {
        if stream.header_at(pos) {
            let index = stream
                .byte_at(pos + 2)
                .and_then(|type_id| dispatch[type_id as usize]);

            if let Some(index) = index {
                let record_length = formats[index].record_length as usize;
                let payload = stream
                    .is_valid_frame(pos, record_length)
                    .then(|| {
                        stream.slice(pos + FRAME_PREFIX_LEN, record_length - FRAME_PREFIX_LEN)
                    })
                    .flatten();

                if let Some(payload) = payload {
                    instances_by_format[index].push(MessageInstance {
                        byte_offset: pos + 1,
                        payload: payload.to_vec(),
                    });
                    total_message_count += 1;
                    pos += record_length;
                    continue;
                }
                rejected_candidates += 1;
            }
        }
        pos += 1;
    }

    if debug {
        println!(
            "Extracted {} message(s), rejected {} badly framed candidate(s)",
            total_message_count, rejected_candidates
        );
        for (format, instances) in formats.iter().zip(&instances_by_format) {
            if !instances.is_empty() {
                println!("  {:<4} (id {:>3}): {}", format.name, format.type_id, instances.len());
            }
        }
    }

    ScanOutput {
        instances_by_format,
        total_message_count,
    }
}
