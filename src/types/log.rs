use crate::types::{FormatRecord, FrameHeader, MessageInstance};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Non-fatal conditions met while parsing
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ParseWarning {
    /// More FMT records were found than the format table may hold
    FormatTableOverflow { limit: usize },
    /// A format declares a record length too short to hold its own frame
    UndersizedFormat { type_id: u8, record_length: u8 },
}

impl std::fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseWarning::FormatTableOverflow { limit } => {
                write!(f, "Maximum message types exceeded ({} formats)", limit)
            }
            ParseWarning::UndersizedFormat {
                type_id,
                record_length,
            } => write!(
                f,
                "Format {} declares length {} which cannot hold a frame; ignored by scanner",
                type_id, record_length
            ),
        }
    }
}

/// Complete result of parsing one log buffer
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ParseResult {
    pub header: FrameHeader,
    pub fmt_record_length: usize,
    /// Declared formats in discovery order
    pub formats: Vec<FormatRecord>,
    /// Extracted instances, parallel to `formats`
    pub instances_by_format: Vec<Vec<MessageInstance>>,
    pub total_message_count: usize,
    pub warnings: Vec<ParseWarning>,
}

impl ParseResult {
    pub fn format_count(&self) -> usize {
        self.formats.len()
    }

    pub fn format_names(&self) -> Vec<&str> {
        self.formats.iter().map(|f| f.name.as_str()).collect()
    }

    /// Number of instances extracted for the format at `index`
    pub fn message_count(&self, index: usize) -> usize {
        self.instances_by_format.get(index).map_or(0, Vec::len)
    }

    /// Byte offsets of every instance of the format at `index`
    pub fn offsets(&self, index: usize) -> Vec<usize> {
        self.instances_by_format
            .get(index)
            .map(|instances| instances.iter().map(|m| m.byte_offset).collect())
            .unwrap_or_default()
    }

    /// All payloads of the format at `index` packed back to back,
    /// one `record_length - 3` block per instance.
    pub fn payload_matrix(&self, index: usize) -> Vec<u8> {
        let Some(instances) = self.instances_by_format.get(index) else {
            return Vec::new();
        };
        let width = self
            .formats
            .get(index)
            .and_then(FormatRecord::payload_length)
            .unwrap_or(0);
        let mut matrix = Vec::with_capacity(width * instances.len());
        for instance in instances {
            matrix.extend_from_slice(&instance.payload);
        }
        matrix
    }

    /// Index of the format named `name`. When a name is declared more than
    /// once the last declaration wins, the same entry the scanner dispatches to.
    pub fn format_index_by_name(&self, name: &str) -> Option<usize> {
        self.formats.iter().rposition(|f| f.name == name)
    }

    pub fn instances_by_name(&self, name: &str) -> Option<&[MessageInstance]> {
        let index = self.format_index_by_name(name)?;
        self.instances_by_format.get(index).map(Vec::as_slice)
    }

    /// Formats that produced at least one instance, with their instances
    pub fn active_formats(&self) -> impl Iterator<Item = (&FormatRecord, &[MessageInstance])> {
        self.formats
            .iter()
            .zip(self.instances_by_format.iter())
            .filter(|(_, instances)| !instances.is_empty())
            .map(|(format, instances)| (format, instances.as_slice()))
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_result() -> ParseResult {
        let format = |type_id, name: &str| FormatRecord {
            type_id,
            record_length: 5,
            name: name.to_string(),
            format_codes: "BB".to_string(),
            field_labels: "A,B".to_string(),
        };
        ParseResult {
            header: FrameHeader::ARDUPILOT,
            fmt_record_length: 89,
            formats: vec![format(10, "ATT"), format(11, "GPS"), format(12, "ATT")],
            instances_by_format: vec![
                vec![],
                vec![MessageInstance {
                    byte_offset: 4,
                    payload: vec![1, 2],
                }],
                vec![
                    MessageInstance {
                        byte_offset: 9,
                        payload: vec![3, 4],
                    },
                    MessageInstance {
                        byte_offset: 14,
                        payload: vec![5, 6],
                    },
                ],
            ],
            total_message_count: 3,
            warnings: Vec::new(),
        }
    }

    #[test]
    fn test_payload_matrix_is_instance_major() {
        let result = sample_result();
        assert_eq!(result.payload_matrix(2), vec![3, 4, 5, 6]);
        assert!(result.payload_matrix(0).is_empty());
        assert!(result.payload_matrix(99).is_empty());
    }

    #[test]
    fn test_name_lookup_prefers_last_declaration() {
        let result = sample_result();
        assert_eq!(result.format_index_by_name("ATT"), Some(2));
        assert_eq!(result.instances_by_name("ATT").map(|i| i.len()), Some(2));
        assert!(result.instances_by_name("MAG").is_none());
    }

    #[test]
    fn test_active_formats_skip_empty() {
        let result = sample_result();
        let names: Vec<&str> = result.active_formats().map(|(f, _)| f.name.as_str()).collect();
        assert_eq!(names, vec!["GPS", "ATT"]);
        assert_eq!(result.offsets(2), vec![9, 14]);
        assert_eq!(result.message_count(0), 0);
    }
}
