//! Position-aware cursor over a byte buffer.

use crate::Position;
use tracing::trace;

/// A cursor over the remaining bytes of an input buffer.
///
/// `skip` is the only method that moves the cursor; everything else is
/// built on top of it, so the tracked [`Position`] always matches the
/// number of bytes consumed.
#[derive(Clone)]
pub struct Cursor<'src> {
    /// The bytes not yet consumed (suffix of the input).
    remaining: &'src [u8],
    /// Position of the first byte of `remaining`.
    pos: Position,
}

impl<'src> Cursor<'src> {
    /// Create a cursor at the start of `input`.
    pub fn new(input: &'src [u8]) -> Self {
        Self {
            remaining: input,
            pos: Position::start(),
        }
    }

    /// Get the current position.
    #[inline]
    pub fn position(&self) -> Position {
        self.pos
    }

    /// The bytes not yet consumed.
    #[inline]
    pub fn remaining(&self) -> &'src [u8] {
        self.remaining
    }

    /// Check if we're at the end of input.
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.remaining.is_empty()
    }

    /// Peek at the next byte. `None` means end of input.
    #[inline]
    pub fn peek(&self) -> Option<u8> {
        self.remaining.first().copied()
    }

    /// Peek at the nth byte (0-indexed) without consuming.
    #[inline]
    pub fn peek_nth(&self, n: usize) -> Option<u8> {
        self.remaining.get(n).copied()
    }

    /// Consume up to `n` bytes. Never moves past the end of input.
    pub fn skip(&mut self, n: usize) {
        let n = n.min(self.remaining.len());
        for &b in &self.remaining[..n] {
            self.pos.advance(b);
        }
        self.remaining = &self.remaining[n..];
    }

    /// Consume up to `n` bytes and return them.
    pub fn take(&mut self, n: usize) -> &'src [u8] {
        let n = n.min(self.remaining.len());
        let taken = &self.remaining[..n];
        self.skip(n);
        taken
    }

    /// Consume `text` if the input starts with it.
    pub fn eat(&mut self, text: &[u8]) -> bool {
        if self.remaining.starts_with(text) {
            self.skip(text.len());
            true
        } else {
            false
        }
    }

    /// Consume bytes while `pred` holds. Returns whether anything was consumed.
    pub fn skip_while(&mut self, pred: impl Fn(u8) -> bool) -> bool {
        let n = self.count_while(pred);
        self.skip(n);
        n > 0
    }

    /// Consume and return the longest prefix whose bytes satisfy `pred`.
    pub fn take_while(&mut self, pred: impl Fn(u8) -> bool) -> &'src [u8] {
        let n = self.count_while(pred);
        self.take(n)
    }

    /// Move to the next occurrence of `byte`, leaving it unconsumed.
    ///
    /// If `byte` does not occur, consumes the rest of the input and returns
    /// `false`.
    pub fn skip_to(&mut self, byte: u8) -> bool {
        match self.remaining.iter().position(|&b| b == byte) {
            Some(i) => {
                self.skip(i);
                true
            }
            None => {
                self.skip(self.remaining.len());
                false
            }
        }
    }

    /// Skip horizontal whitespace (spaces and tabs).
    pub fn skip_ws(&mut self) -> bool {
        self.skip_while(|b| b == b' ' || b == b'\t')
    }

    /// Skip the rest of the current line, including its newline.
    pub fn skip_line(&mut self) {
        self.skip_to(b'\n');
        self.skip(1);
        trace!("Skipped to {}", self.pos);
    }

    fn count_while(&self, pred: impl Fn(u8) -> bool) -> usize {
        self.remaining.iter().take_while(|&&b| pred(b)).count()
    }
}


#[cfg(test)]
mod props {
    use super::*;
    use crate::TAB_WIDTH;
    use proptest::prelude::*;

    fn expected_column(indent: &[u8]) -> usize {
        indent.iter().fold(0, |col, &b| match b {
            b'\t' => (col / TAB_WIDTH + 1) * TAB_WIDTH,
            _ => col + 1,
        })
    }

    proptest! {
        #[test]
        fn prop_indent_column(indent in proptest::collection::vec(prop_oneof![Just(b' '), Just(b'\t')], 0..40)) {
            let mut input = indent.clone();
            input.push(b'x');
            let mut cursor = Cursor::new(&input);
            cursor.skip_ws();
            prop_assert_eq!(cursor.peek(), Some(b'x'));
            prop_assert_eq!(cursor.position().column, expected_column(&indent));
            prop_assert_eq!(cursor.position().offset, indent.len());
        }
    }
}
