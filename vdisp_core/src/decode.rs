use std::io::{self, Read};

use crate::error::FrameError;
use crate::skip::skip_bytes;

/// Bytes per stored displacement vector: 3 × f32.
const VECTOR_SIZE: u64 = 12;

/// Result of decoding one frame for one object.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameData {
    /// One displacement per target vertex, zero for any slot the record did
    /// not cover.
    pub displacements: Vec<[f32; 3]>,
    /// Whether a record with the requested name existed in this frame.
    /// `false` is a valid outcome — the array is returned all-zero.
    pub found: bool,
    /// Vertex count declared by the matched record, when one was found.
    /// Differs from `displacements.len()` when the stored object and the
    /// target mesh disagree; callers decide whether that is worth a warning.
    pub stored_vertex_count: Option<u32>,
}

/// Name and declared vertex count of one object record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectInfo {
    pub name: String,
    pub vertex_count: u32,
}

/// The leading 8 bytes of an object record.
struct RecordHeader {
    name_len: i32,
    vertex_count: i32,
}

/// Read the next record header, or `None` on a clean end of frame.
///
/// The frame payload carries no record count or terminator; the stream
/// simply ends after the last record. A zero-byte read on the *first* byte
/// of a header is therefore the normal end-of-frame signal. Ending anywhere
/// later — a partial header, or inside a name, payload, or skip — means the
/// stream was cut mid-record and is reported as truncation, never silently
/// treated as the end.
fn read_record_header<R: Read>(reader: &mut R) -> Result<Option<RecordHeader>, FrameError> {
    let mut buf = [0u8; 8];
    let mut filled = 0usize;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) if filled == 0 => return Ok(None),
            Ok(0) => return Err(FrameError::Truncated { what: "record header" }),
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(FrameError::Io(e)),
        }
    }
    Ok(Some(RecordHeader {
        name_len: i32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]),
        vertex_count: i32::from_le_bytes([buf[4], buf[5], buf[6], buf[7]]),
    }))
}

fn validate(header: &RecordHeader) -> Result<(), FrameError> {
    if header.name_len < 0 {
        return Err(FrameError::NegativeNameLength { len: header.name_len });
    }
    if header.vertex_count < 0 {
        return Err(FrameError::NegativeVertexCount {
            count: header.vertex_count,
        });
    }
    Ok(())
}

fn read_name<R: Read>(reader: &mut R, name_len: i32) -> Result<Vec<u8>, FrameError> {
    let mut name = vec![0u8; name_len as usize];
    reader.read_exact(&mut name).map_err(|e| match e.kind() {
        io::ErrorKind::UnexpectedEof => FrameError::Truncated { what: "object name" },
        _ => FrameError::Io(e),
    })?;
    Ok(name)
}

fn map_skip_err(e: io::Error) -> FrameError {
    match e.kind() {
        io::ErrorKind::UnexpectedEof => FrameError::Truncated { what: "vertex data" },
        _ => FrameError::Io(e),
    }
}

/// Scan the decompressed record sequence of one frame and extract the
/// displacements of the record named `object_name`.
///
/// `stream` must yield the frame's decompressed bytes from the first record
/// onward (the facade hands in a zlib decoder positioned at the frame's
/// block). Records are packed back to back with no padding, so every byte
/// of a record's declared payload is either copied or skipped before the
/// next header is read — otherwise every subsequent record would be
/// misaligned.
///
/// The output always has exactly `target_vertex_count` entries. When the
/// matched record stores more vertices than the target, the surplus vectors
/// are consumed and discarded; when it stores fewer, the tail slots stay
/// zero. Name comparison is byte-exact and the first match wins; later
/// records with the same name are skipped like any other non-match.
pub fn decode_frame<R: Read>(
    mut stream: R,
    object_name: &str,
    target_vertex_count: u32,
) -> Result<FrameData, FrameError> {
    let mut displacements = vec![[0f32; 3]; target_vertex_count as usize];
    let mut found = false;
    let mut stored_vertex_count = None;

    while let Some(header) = read_record_header(&mut stream)? {
        validate(&header)?;
        let name = read_name(&mut stream, header.name_len)?;
        let vertex_count = header.vertex_count as u32;

        if !found && name == object_name.as_bytes() {
            found = true;
            stored_vertex_count = Some(vertex_count);

            let copied = vertex_count.min(target_vertex_count);
            let mut vec_buf = [0u8; VECTOR_SIZE as usize];
            for slot in displacements.iter_mut().take(copied as usize) {
                stream.read_exact(&mut vec_buf).map_err(map_skip_err)?;
                *slot = [
                    f32::from_le_bytes([vec_buf[0], vec_buf[1], vec_buf[2], vec_buf[3]]),
                    f32::from_le_bytes([vec_buf[4], vec_buf[5], vec_buf[6], vec_buf[7]]),
                    f32::from_le_bytes([vec_buf[8], vec_buf[9], vec_buf[10], vec_buf[11]]),
                ];
            }
            // Surplus vertices still have to be consumed so the cursor lands
            // on the next record header.
            let surplus = (vertex_count - copied) as u64 * VECTOR_SIZE;
            skip_bytes(&mut stream, surplus).map_err(map_skip_err)?;
        } else {
            skip_bytes(&mut stream, vertex_count as u64 * VECTOR_SIZE).map_err(map_skip_err)?;
        }
    }

    Ok(FrameData {
        displacements,
        found,
        stored_vertex_count,
    })
}

/// Scan a frame's record sequence and list every object it contains.
///
/// Payloads are skipped, never materialized. Names are stored as ASCII by
/// the writer; anything non-ASCII is replaced rather than rejected since
/// the listing is diagnostic.
pub fn list_objects<R: Read>(mut stream: R) -> Result<Vec<ObjectInfo>, FrameError> {
    let mut objects = Vec::new();
    while let Some(header) = read_record_header(&mut stream)? {
        validate(&header)?;
        let name = read_name(&mut stream, header.name_len)?;
        let vertex_count = header.vertex_count as u32;
        skip_bytes(&mut stream, vertex_count as u64 * VECTOR_SIZE).map_err(map_skip_err)?;
        objects.push(ObjectInfo {
            name: String::from_utf8_lossy(&name).into_owned(),
            vertex_count,
        });
    }
    Ok(objects)
}
