pub mod capabilities;
pub mod format;

pub use capabilities::{
    Capabilities, Clock, FileSystem, Lcg64, LineReader, RngAlgorithm, StdFileSystem, StdinReader, SystemClock,
};
pub use format::format_number;
