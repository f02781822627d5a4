use thiserror::Error;

/// Errors that make the file unusable as a whole.
#[derive(Debug, Error)]
pub enum OpenError {
    /// Filesystem failure or truncated header/offset table.
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    /// The first 5 bytes were not the `VDISP` tag.
    #[error("not a VDISP file (magic={magic:?})")]
    BadMagic {
        /// First 5 bytes of the file.
        magic: [u8; 5],
    },
    /// The header declared a non-positive frame count.
    #[error("invalid frame count {count} (must be > 0)")]
    InvalidFrameCount {
        /// Parsed signed frame count.
        count: i32,
    },
}

/// Errors that abort loading a single frame; other frames may still be valid.
#[derive(Debug, Error)]
pub enum FrameError {
    /// Filesystem or decompression failure.
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    /// Requested frame index is outside the declared range.
    #[error("frame index {index} out of range (frame count {frame_count})")]
    IndexOutOfRange {
        /// Requested 0-based frame index.
        index: u32,
        /// Frame count declared by the header.
        frame_count: u32,
    },
    /// The offset table marks this frame as absent (offset ≤ 0).
    #[error("frame {index} has no data (stored offset {offset})")]
    InvalidOffset {
        /// Requested 0-based frame index.
        index: u32,
        /// Stored signed byte offset.
        offset: i64,
    },
    /// The decompressed stream ended inside a record rather than at a
    /// record boundary.
    #[error("frame data truncated while reading {what}")]
    Truncated {
        /// Which part of the record the stream ended in.
        what: &'static str,
    },
    /// An object record declared a negative name length.
    #[error("negative object name length {len}")]
    NegativeNameLength {
        /// Parsed signed name length.
        len: i32,
    },
    /// An object record declared a negative vertex count.
    #[error("negative vertex count {count}")]
    NegativeVertexCount {
        /// Parsed signed vertex count.
        count: i32,
    },
}
