#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Reserved type id of FMT records
pub const FMT_TYPE_ID: u8 = 128;

/// Bytes in a frame: two header bytes plus the type id
pub const FRAME_PREFIX_LEN: usize = 3;

/// Two-byte sync header that starts every record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FrameHeader(pub [u8; 2]);

impl FrameHeader {
    /// Header used by ArduPilot DataFlash logs
    pub const ARDUPILOT: FrameHeader = FrameHeader([0xA3, 0x95]);

    pub fn new(first: u8, second: u8) -> Self {
        Self([first, second])
    }

    pub fn bytes(&self) -> [u8; 2] {
        self.0
    }

    /// Frame prefix announcing a record of `type_id`
    pub fn frame_for(&self, type_id: u8) -> [u8; 3] {
        [self.0[0], self.0[1], type_id]
    }
}

impl Default for FrameHeader {
    fn default() -> Self {
        Self::ARDUPILOT
    }
}

impl std::fmt::Display for FrameHeader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{:02X},0x{:02X}", self.0[0], self.0[1])
    }
}
