#![doc = include_str!("../README.md")]

mod position;
pub use position::{Position, TAB_WIDTH};

mod cursor;
pub use cursor::Cursor;
