use crate::error::OpenError;

/// Magic bytes at the start of every VDISP file.
pub const MAGIC: &[u8; 5] = b"VDISP";

/// Fixed size of the VDISP file header in bytes.
///   magic[5] + version:i16 + base_frame:i32 + frame_start:i32
///   + frame_end:i32 + fps:i32 + frame_count:i32
///   = 5 + 2 + 4 + 4 + 4 + 4 + 4 = 27
pub const HEADER_SIZE: u64 = 27;

/// Size of each entry in the frame offset table (one i64 per frame).
pub const OFFSET_ENTRY_SIZE: u64 = 8;

/// Decoded representation of the 27-byte VDISP file header.
///
/// `base_frame`, `frame_start`, `frame_end`, and `fps` are animation
/// metadata only — decoding never consults them, but they occupy fixed
/// positions in the header and must be read to keep the cursor correct.
#[derive(Debug, Clone)]
pub struct VdispHeader {
    pub version: i16,
    pub base_frame: i32,
    pub frame_start: i32,
    pub frame_end: i32,
    pub fps: i32,
    /// Number of entries in the frame offset table. Always > 0 in a valid file.
    pub frame_count: i32,
}

fn le_i32(buf: &[u8; HEADER_SIZE as usize], at: usize) -> i32 {
    i32::from_le_bytes([buf[at], buf[at + 1], buf[at + 2], buf[at + 3]])
}

impl VdispHeader {
    /// Serialize to exactly `HEADER_SIZE` bytes.
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE as usize] {
        let mut buf = [0u8; HEADER_SIZE as usize];
        buf[..5].copy_from_slice(MAGIC);
        buf[5..7].copy_from_slice(&self.version.to_le_bytes());
        buf[7..11].copy_from_slice(&self.base_frame.to_le_bytes());
        buf[11..15].copy_from_slice(&self.frame_start.to_le_bytes());
        buf[15..19].copy_from_slice(&self.frame_end.to_le_bytes());
        buf[19..23].copy_from_slice(&self.fps.to_le_bytes());
        buf[23..27].copy_from_slice(&self.frame_count.to_le_bytes());
        buf
    }

    /// Deserialize from `HEADER_SIZE` bytes, checking the magic and the
    /// frame count.
    pub fn from_bytes(buf: &[u8; HEADER_SIZE as usize]) -> Result<Self, OpenError> {
        if &buf[..5] != MAGIC {
            let mut magic = [0u8; 5];
            magic.copy_from_slice(&buf[..5]);
            return Err(OpenError::BadMagic { magic });
        }
        let header = Self {
            version: i16::from_le_bytes([buf[5], buf[6]]),
            base_frame: le_i32(buf, 7),
            frame_start: le_i32(buf, 11),
            frame_end: le_i32(buf, 15),
            fps: le_i32(buf, 19),
            frame_count: le_i32(buf, 23),
        };
        if header.frame_count <= 0 {
            return Err(OpenError::InvalidFrameCount {
                count: header.frame_count,
            });
        }
        Ok(header)
    }
}
