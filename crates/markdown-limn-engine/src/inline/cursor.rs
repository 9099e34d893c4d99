/// A cursor for byte-by-byte inline scanning with position tracking.
///
/// Operates over a string slice while tracking the absolute byte position in
/// the document (via `base` offset). `before` carries the byte immediately
/// preceding the slice so recognizers can apply left-context rules at the
/// very start of the slice (e.g. `[[` preceded by `!` is an embed tail, not
/// a wikilink).
#[derive(Clone)]
pub struct Cursor<'a> {
    /// The string being scanned.
    pub s: &'a str,
    /// Base offset in the document (added to the local index).
    pub base: usize,
    /// Byte preceding `s` in the document, if any.
    pub before: Option<u8>,
    /// Current local index into `s`.
    pub i: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(s: &'a str, base: usize, before: Option<u8>) -> Self {
        Self {
            s,
            base,
            before,
            i: 0,
        }
    }

    /// Returns the current absolute byte position (base + local index).
    pub fn pos(&self) -> usize {
        self.base + self.i
    }

    pub fn eof(&self) -> bool {
        self.i >= self.s.len()
    }

    /// Peeks at the current byte without advancing.
    pub fn peek(&self) -> Option<u8> {
        self.s.as_bytes().get(self.i).copied()
    }

    /// The byte just before the current position (falls back to `before`
    /// at the start of the slice).
    pub fn prev(&self) -> Option<u8> {
        if self.i == 0 {
            self.before
        } else {
            self.s.as_bytes().get(self.i - 1).copied()
        }
    }

    /// Checks if the remaining input starts with the given byte pattern.
    pub fn starts_with(&self, pat: &[u8]) -> bool {
        self.s.as_bytes()[self.i..].starts_with(pat)
    }

    /// Advances by one byte, returning the consumed byte.
    pub fn bump(&mut self) -> Option<u8> {
        let b = self.s.as_bytes().get(self.i).copied()?;
        self.i += 1;
        Some(b)
    }

    /// Advances by `n` bytes.
    pub fn bump_n(&mut self, n: usize) {
        self.i += n;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_basics() {
        let mut cur = Cursor::new("hello", 10, None);
        assert_eq!(cur.pos(), 10);
        assert_eq!(cur.peek(), Some(b'h'));
        assert_eq!(cur.bump(), Some(b'h'));
        assert_eq!(cur.pos(), 11);
        assert_eq!(cur.prev(), Some(b'h'));
    }

    #[test]
    fn prev_at_start_uses_before_context() {
        let cur = Cursor::new("[[x]]", 5, Some(b'!'));
        assert_eq!(cur.prev(), Some(b'!'));
        let cur = Cursor::new("[[x]]", 0, None);
        assert_eq!(cur.prev(), None);
    }

    #[test]
    fn starts_with_pattern() {
        let cur = Cursor::new("==hi==", 0, None);
        assert!(cur.starts_with(b"=="));
        assert!(!cur.starts_with(b"==x"));
    }

    #[test]
    fn bump_at_eof_returns_none() {
        let mut cur = Cursor::new("x", 0, None);
        assert_eq!(cur.bump(), Some(b'x'));
        assert_eq!(cur.bump(), None);
        assert!(cur.eof());
    }
}
