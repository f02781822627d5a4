pub mod decode;
pub mod error;
pub mod format;
pub mod index;
pub mod reader;
pub mod skip;
pub mod writer;

pub use decode::{FrameData, ObjectInfo};
pub use error::{FrameError, OpenError};
pub use format::{VdispHeader, HEADER_SIZE, MAGIC, OFFSET_ENTRY_SIZE};
pub use index::FrameIndex;
pub use reader::VdispReader;
pub use writer::{ObjectData, VdispWriter};
