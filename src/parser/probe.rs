use crate::parser::stream::LogStream;
use crate::types::FMT_TYPE_ID;

/// FMT record length used by ArduPilot logs when none can be found
pub const DEFAULT_FMT_LENGTH: usize = 89;

/// Find the on-wire length of FMT records.
///
/// The FMT record that describes FMT itself is recognised by its frame
/// followed by the FMT id again as the declared type; its length byte comes
/// right after. Falls back to [`DEFAULT_FMT_LENGTH`] when no such record exists.
pub fn find_fmt_length(stream: &LogStream, debug: bool) -> usize {
    // Frame (3) + declared type (1) + declared length (1)
    const PROBE_WINDOW: usize = 5;

    if stream.len() >= PROBE_WINDOW {
        for i in 0..=stream.len() - PROBE_WINDOW {
            if stream.frame_at(i, FMT_TYPE_ID) && stream.byte_at(i + 3) == Some(FMT_TYPE_ID) {
                if let Some(length) = stream.byte_at(i + 4) {
                    if debug {
                        println!("FMT self-description at offset {}: length {}", i, length);
                    }
                    return length as usize;
                }
            }
        }
    }

    if debug {
        println!(
            "No FMT self-description found, using default length {}",
            DEFAULT_FMT_LENGTH
        );
    }
    DEFAULT_FMT_LENGTH
}
