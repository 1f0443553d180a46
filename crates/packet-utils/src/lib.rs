pub mod cursor;
pub use cursor::{ByteCursor, CursorError};

pub mod util;
pub use util::{U24_MAX, u24_u32, u32_u24};
