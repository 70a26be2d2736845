use crate::types::FrameHeader;

/// Read-only view over a raw log buffer with frame matching helpers
#[derive(Debug, Clone, Copy)]
pub struct LogStream<'a> {
    data: &'a [u8],
    header: FrameHeader,
}

impl<'a> LogStream<'a> {
    pub fn new(data: &'a [u8], header: FrameHeader) -> Self {
        Self { data, header }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn header(&self) -> FrameHeader {
        self.header
    }

    pub fn byte_at(&self, pos: usize) -> Option<u8> {
        self.data.get(pos).copied()
    }

    /// Bytes `pos..pos + len`, or `None` if that runs past the end
    pub fn slice(&self, pos: usize, len: usize) -> Option<&'a [u8]> {
        let end = pos.checked_add(len)?;
        self.data.get(pos..end)
    }

    /// Bytes `pos..pos + len`, clipped to the end of the buffer
    pub fn slice_clipped(&self, pos: usize, len: usize) -> &'a [u8] {
        let start = pos.min(self.data.len());
        let end = pos.saturating_add(len).min(self.data.len());
        &self.data[start..end]
    }

    /// Both header bytes present at `pos`
    pub fn header_at(&self, pos: usize) -> bool {
        let [h0, h1] = self.header.bytes();
        matches!(self.slice(pos, 2), Some(&[a, b]) if a == h0 && b == h1)
    }

    /// Full 3-byte frame prefix for `type_id` present at `pos`
    pub fn frame_at(&self, pos: usize, type_id: u8) -> bool {
        self.slice(pos, 3)
            .map_or(false, |bytes| bytes == self.header.frame_for(type_id))
    }

    /// Whether a record of `record_length` bytes starting at `pos` is
    /// plausibly framed: it must fit in the buffer and be followed either by
    /// the end of the log or by another header.
    pub fn is_valid_frame(&self, pos: usize, record_length: usize) -> bool {
        let next_pos = match pos.checked_add(record_length) {
            Some(next) if next <= self.data.len() => next,
            _ => return false,
        };

        if next_pos >= self.data.len() {
            return true;
        }

        // A single trailing byte cannot hold a header, so it is not held against the record
        if next_pos + 1 < self.data.len() {
            return self.header_at(next_pos);
        }

        true
    }
}
