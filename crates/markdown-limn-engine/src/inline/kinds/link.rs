/// Literal bracket-paren link `[text](url)` and image `![alt](url)`.
///
/// Scanned from the literal text shape; anything that does not match the
/// full `[..](..)` form on one line is no match and stays plain text.
pub struct Link;

impl Link {
    pub const BRACKET_OPEN: u8 = b'[';
    pub const BRACKET_CLOSE: u8 = b']';
    pub const PAREN_OPEN: u8 = b'(';
    pub const PAREN_CLOSE: u8 = b')';
    pub const IMAGE_SIGIL: u8 = b'!';
}
