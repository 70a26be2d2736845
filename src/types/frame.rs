use crate::types::header::FRAME_PREFIX_LEN;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Message type declared by one FMT record
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FormatRecord {
    pub type_id: u8,
    /// Total on-wire length including the 3-byte frame
    pub record_length: u8,
    pub name: String,
    pub format_codes: String,
    pub field_labels: String,
}

impl FormatRecord {
    /// Payload bytes carried by each instance, or `None` when the declared
    /// length cannot even hold a frame.
    pub fn payload_length(&self) -> Option<usize> {
        (self.record_length as usize).checked_sub(FRAME_PREFIX_LEN)
    }

    /// Whether instances of this type can be framed at all
    pub fn is_dispatchable(&self) -> bool {
        self.record_length as usize >= FRAME_PREFIX_LEN
    }

    pub fn field_names(&self) -> Vec<&str> {
        if self.field_labels.is_empty() {
            return Vec::new();
        }
        self.field_labels.split(',').collect()
    }
}

/// One extracted occurrence of a message type
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MessageInstance {
    /// Record position as reported to callers: the zero-based offset of the
    /// second header byte, which is the one-based offset of the first.
    pub byte_offset: usize,
    pub payload: Vec<u8>,
}

impl MessageInstance {
    /// Zero-based offset of the first header byte of this record
    pub fn frame_start(&self) -> usize {
        self.byte_offset.saturating_sub(1)
    }

    /// Zero-based offset of the type-id byte
    pub fn type_id_offset(&self) -> usize {
        self.byte_offset + 1
    }
}
