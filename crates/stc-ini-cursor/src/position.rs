//! Line/column tracking for source locations.

/// Width of a tab stop, in columns.
pub const TAB_WIDTH: usize = 8;

/// A location in the source buffer.
///
/// `line` and `column` are 0-based; diagnostics report them 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "facet", derive(facet::Facet))]
pub struct Position {
    /// 0-based line number.
    pub line: usize,
    /// 0-based column, with tabs expanded to `TAB_WIDTH` stops.
    pub column: usize,
    /// Byte offset from the start of the buffer.
    pub offset: usize,
}

impl Position {
    /// Create a position at the start of a buffer.
    #[inline]
    pub fn start() -> Self {
        Self::default()
    }

    /// Advance past one byte.
    #[inline]
    pub fn advance(&mut self, byte: u8) {
        match byte {
            b'\n' => {
                self.line += 1;
                self.column = 0;
            }
            b'\t' => self.column += TAB_WIDTH - self.column % TAB_WIDTH,
            _ => self.column += 1,
        }
        self.offset += 1;
    }

    /// 1-based line number, as shown to users.
    #[inline]
    pub fn display_line(&self) -> usize {
        self.line + 1
    }

    /// 1-based column number, as shown to users.
    #[inline]
    pub fn display_column(&self) -> usize {
        self.column + 1
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.display_line(), self.display_column())
    }
}
