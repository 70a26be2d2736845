//! Value conversion helpers shared by the export layer and the CLI

use crate::error::{LogError, Result};

/// Render payload bytes as contiguous lowercase hex
pub fn payload_to_hex(payload: &[u8]) -> String {
    use std::fmt::Write;

    let mut hex = String::with_capacity(payload.len() * 2);
    for byte in payload {
        // Writing to a String cannot fail
        let _ = write!(hex, "{:02x}", byte);
    }
    hex
}

/// Parse a byte given as decimal (`163`) or hex (`0xA3`)
pub fn parse_byte_value(text: &str) -> Result<u8> {
    let text = text.trim();
    let parsed = match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => u8::from_str_radix(hex, 16),
        None => text.parse::<u8>(),
    };
    parsed.map_err(|_| LogError::InvalidHeader(format!("'{}' is not a byte value (0-255)", text)))
}

/// Parse a comma separated list of type ids
pub fn parse_id_list(text: &str) -> Result<Vec<u8>> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(parse_byte_value)
        .collect()
}

/// Parse a comma separated list of message names
pub fn parse_name_list(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_to_hex() {
        assert_eq!(payload_to_hex(&[0x00, 0xA3, 0x95, 0xff]), "00a395ff");
        assert_eq!(payload_to_hex(&[]), "");
    }

    #[test]
    fn test_parse_byte_value() {
        assert_eq!(parse_byte_value("163").unwrap(), 0xA3);
        assert_eq!(parse_byte_value(" 0x95 ").unwrap(), 0x95);
        assert_eq!(parse_byte_value("0XA3").unwrap(), 0xA3);
        assert!(parse_byte_value("256").is_err());
        assert!(parse_byte_value("0xZZ").is_err());
    }

    #[test]
    fn test_parse_lists() {
        assert_eq!(parse_id_list("5, 0x80,,10").unwrap(), vec![5, 128, 10]);
        assert!(parse_id_list("5,x").is_err());
        assert_eq!(parse_name_list("ATT, GPS,"), vec!["ATT", "GPS"]);
    }
}
