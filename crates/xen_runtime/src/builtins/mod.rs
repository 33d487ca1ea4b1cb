pub(crate) mod core;
pub(crate) mod datetime;
pub(crate) mod io;
pub(crate) mod math;
pub(crate) mod os;

pub use self::core::*;
pub use datetime::*;
pub use io::*;
pub use math::*;
pub use os::*;
