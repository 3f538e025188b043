#![doc = include_str!("../README.md")]

pub use stc_ini_cursor::{Cursor, Position, TAB_WIDTH};

mod section;
pub use section::Section;

mod error;
pub use error::{Diagnostic, DiagnosticList, ParseFileError, SinkError};

mod sink;
pub use sink::IniSink;

mod grammar;

mod parser;
pub use parser::{Parser, parse_contents, parse_file};
