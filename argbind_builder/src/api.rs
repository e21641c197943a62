mod capture;
mod core;
mod executor;
mod field;

pub use self::capture::*;
pub use self::core::*;
pub use self::executor::*;
pub use self::field::*;
