use std::fs::File;
use std::io::{BufReader, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use flate2::read::ZlibDecoder;

use crate::decode::{self, FrameData, ObjectInfo};
use crate::error::{FrameError, OpenError};
use crate::format::VdispHeader;
use crate::index::FrameIndex;

/// Random-access reader for VDISP vertex-displacement cache files.
///
/// # Open sequence
/// 1. Read the 27-byte header (magic check, frame_count, animation metadata).
/// 2. Read the frame offset table: `frame_count` i64 byte offsets.
///
/// The file handle is closed again once the index is loaded — only the
/// resolved path is retained. Every [`load_frame`] call opens its own
/// handle, seeks straight to the frame's offset, and decodes only that
/// frame's compressed block; no other frame is touched. Because no handle
/// or mutable state is shared, different frames can be loaded concurrently
/// from plain `&self`.
///
/// [`load_frame`]: VdispReader::load_frame
#[derive(Debug)]
pub struct VdispReader {
    path: PathBuf,
    index: FrameIndex,
}

impl VdispReader {
    /// Open a VDISP file and parse its header and frame offset table.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, OpenError> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path)?;
        let mut reader = BufReader::new(file);
        let index = FrameIndex::parse(&mut reader)?;
        Ok(Self { path, index })
    }

    /// Number of frames declared by the header.
    #[inline]
    pub fn frame_count(&self) -> u32 {
        self.index.frame_count()
    }

    /// Header metadata (version, frame range, fps).
    pub fn header(&self) -> &VdispHeader {
        self.index.header()
    }

    /// The raw frame offset table (for inspection tooling).
    pub fn frame_offsets(&self) -> &[i64] {
        self.index.offsets()
    }

    /// Whether `frame` is in range and has a stored data block.
    pub fn has_frame(&self, frame: u32) -> bool {
        matches!(self.index.offset(frame), Some(offset) if offset > 0)
    }

    /// Load the displacements of `object_name` in `frame`.
    ///
    /// The result always holds exactly `target_vertex_count` vectors. An
    /// object missing from the frame is not an error: `found` is `false`
    /// and the array is all-zero. A stored vertex count that disagrees with
    /// the target is also not an error; see [`FrameData::stored_vertex_count`].
    pub fn load_frame(
        &self,
        frame: u32,
        object_name: &str,
        target_vertex_count: u32,
    ) -> Result<FrameData, FrameError> {
        let stream = self.open_frame(frame)?;
        decode::decode_frame(stream, object_name, target_vertex_count)
    }

    /// List every object record in `frame` without materializing payloads.
    pub fn frame_objects(&self, frame: u32) -> Result<Vec<ObjectInfo>, FrameError> {
        let stream = self.open_frame(frame)?;
        decode::list_objects(stream)
    }

    /// Validate `frame` against the index, then open a fresh handle, seek to
    /// the frame's block, and wrap it in a zlib decoder.
    ///
    /// The zlib stream is self-delimiting, so the decoder stops at the end
    /// of this frame's block even though later frames follow it in the file.
    fn open_frame(&self, frame: u32) -> Result<ZlibDecoder<BufReader<File>>, FrameError> {
        let offset = self
            .index
            .offset(frame)
            .ok_or(FrameError::IndexOutOfRange {
                index: frame,
                frame_count: self.frame_count(),
            })?;
        if offset <= 0 {
            return Err(FrameError::InvalidOffset {
                index: frame,
                offset,
            });
        }

        let mut file = File::open(&self.path)?;
        file.seek(SeekFrom::Start(offset as u64))?;
        Ok(ZlibDecoder::new(BufReader::new(file)))
    }
}
