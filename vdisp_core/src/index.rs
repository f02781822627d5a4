use std::io::Read;

use crate::error::OpenError;
use crate::format::{VdispHeader, HEADER_SIZE, OFFSET_ENTRY_SIZE};

/// Parsed header plus frame offset table.
///
/// Read once when a file is opened and immutable afterwards, so shared
/// references can be used from multiple threads without locking.
///
/// Offsets are stored exactly as they appear on disk: a value ≤ 0 marks a
/// frame with no data. Offsets are not range-checked here — an offset that
/// points past the end of the file is only discovered when that frame is
/// loaded.
#[derive(Debug, Clone)]
pub struct FrameIndex {
    header: VdispHeader,
    offsets: Vec<i64>,
}

impl FrameIndex {
    /// Parse the header and offset table from the start of a VDISP stream.
    ///
    /// Consumes exactly `HEADER_SIZE + frame_count × OFFSET_ENTRY_SIZE`
    /// bytes on success.
    pub fn parse<R: Read>(reader: &mut R) -> Result<Self, OpenError> {
        let mut header_buf = [0u8; HEADER_SIZE as usize];
        reader.read_exact(&mut header_buf)?;
        let header = VdispHeader::from_bytes(&header_buf)?;

        let mut offsets = Vec::with_capacity(header.frame_count as usize);
        let mut entry_buf = [0u8; OFFSET_ENTRY_SIZE as usize];
        for _ in 0..header.frame_count {
            reader.read_exact(&mut entry_buf)?;
            offsets.push(i64::from_le_bytes(entry_buf));
        }

        Ok(Self { header, offsets })
    }

    /// Number of frames declared by the header.
    #[inline]
    pub fn frame_count(&self) -> u32 {
        self.header.frame_count as u32
    }

    /// Stored byte offset for `frame`, or `None` if the index is out of range.
    /// A returned offset ≤ 0 means the frame is present in the table but has
    /// no data.
    pub fn offset(&self, frame: u32) -> Option<i64> {
        self.offsets.get(frame as usize).copied()
    }

    pub fn header(&self) -> &VdispHeader {
        &self.header
    }

    /// The raw offset table (for inspection tooling).
    pub fn offsets(&self) -> &[i64] {
        &self.offsets
    }
}
