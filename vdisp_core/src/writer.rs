use std::fs::File;
use std::io::{self, Seek, SeekFrom, Write};
use std::path::Path;

use flate2::write::ZlibEncoder;
use flate2::Compression;

use crate::format::{VdispHeader, HEADER_SIZE, OFFSET_ENTRY_SIZE};

/// One object's displacements for one frame, as handed to [`VdispWriter::write_frame`].
#[derive(Debug, Clone, Copy)]
pub struct ObjectData<'a> {
    /// ASCII object name, stored byte-for-byte.
    pub name: &'a str,
    /// One displacement vector per vertex.
    pub displacements: &'a [[f32; 3]],
}

/// Writer for VDISP files.
///
/// # Write contract
/// Call [`write_frame`] once per frame that has data, in any order. Each
/// call compresses that frame's record sequence as an independent zlib
/// block, appends it, and records its byte offset. Frames never written
/// keep offset 0, the table's marker for an absent frame. Call [`finish`]
/// to seek back and write the real header and offset table.
///
/// # File layout written
/// ```text
/// [HEADER: 27 bytes placeholder]
/// [OFFSET TABLE: 8 bytes × frame_count placeholder]
/// [FRAME BLOCK] [FRAME BLOCK] ...          ← independent zlib streams
/// ← seek back to 0, overwrite header + table with real values
/// ```
///
/// [`write_frame`]: VdispWriter::write_frame
/// [`finish`]: VdispWriter::finish
pub struct VdispWriter {
    file: File,
    header: VdispHeader,
    /// In-memory offset table, written back on `finish()`. Zero = absent.
    offsets: Vec<i64>,
    /// Current append position in the file (mirrors the file cursor).
    current_offset: u64,
    level: Compression,
}

impl VdispWriter {
    /// Create a new VDISP file at `path`, overwriting any existing file.
    ///
    /// `header.frame_count` fixes the offset table size up front and must
    /// be positive.
    pub fn create(path: impl AsRef<Path>, header: VdispHeader) -> io::Result<Self> {
        if header.frame_count <= 0 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("frame count must be > 0, got {}", header.frame_count),
            ));
        }
        let table_size = header.frame_count as u64 * OFFSET_ENTRY_SIZE;
        let mut file = File::create(path)?;
        // Placeholder header + table, overwritten in finish()
        file.write_all(&vec![0u8; (HEADER_SIZE + table_size) as usize])?;
        Ok(Self {
            file,
            offsets: vec![0; header.frame_count as usize],
            current_offset: HEADER_SIZE + table_size,
            header,
            level: Compression::default(),
        })
    }

    /// Compress and append the record sequence for `frame`.
    ///
    /// Records are packed exactly as the reader expects: name length (i32),
    /// vertex count (i32), name bytes, then vertex_count × 3 little-endian
    /// f32 values, with no padding and no trailing terminator.
    pub fn write_frame(&mut self, frame: u32, objects: &[ObjectData<'_>]) -> io::Result<()> {
        let slot = self
            .offsets
            .get_mut(frame as usize)
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("frame {frame} out of range"),
                )
            })?;

        let mut encoder = ZlibEncoder::new(Vec::new(), self.level);
        for object in objects {
            encoder.write_all(&(object.name.len() as i32).to_le_bytes())?;
            encoder.write_all(&(object.displacements.len() as i32).to_le_bytes())?;
            encoder.write_all(object.name.as_bytes())?;
            for vector in object.displacements {
                for component in vector {
                    encoder.write_all(&component.to_le_bytes())?;
                }
            }
        }
        let block = encoder.finish()?;

        *slot = self.current_offset as i64;
        self.file.write_all(&block)?;
        self.current_offset += block.len() as u64;
        Ok(())
    }

    /// Seal the file: seek back to the start and write the real header and
    /// offset table.
    pub fn finish(mut self) -> io::Result<()> {
        self.file.seek(SeekFrom::Start(0))?;
        self.file.write_all(&self.header.to_bytes())?;
        for offset in &self.offsets {
            self.file.write_all(&offset.to_le_bytes())?;
        }
        self.file.flush()
    }
}
