use std::io::{self, Read};

/// Scratch buffer size for discarding unwanted bytes.
const SKIP_CHUNK: usize = 4096;

/// Discard exactly `count` bytes from a forward-only stream.
///
/// Reads into a fixed stack buffer, so skipping an arbitrarily large
/// payload never allocates. A zero-length read before `count` bytes have
/// been consumed fails with `ErrorKind::UnexpectedEof` — a skip always
/// happens inside a record, so running dry here means the stream was
/// truncated mid-record.
pub fn skip_bytes<R: Read>(reader: &mut R, count: u64) -> io::Result<()> {
    let mut scratch = [0u8; SKIP_CHUNK];
    let mut remaining = count;
    while remaining > 0 {
        let want = remaining.min(SKIP_CHUNK as u64) as usize;
        match reader.read(&mut scratch[..want]) {
            Ok(0) => {
                return Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    format!("stream ended with {remaining} bytes left to skip"),
                ));
            }
            Ok(n) => remaining -= n as u64,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(())
}
