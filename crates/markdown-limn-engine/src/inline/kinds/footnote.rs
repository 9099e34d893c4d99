/// Footnote reference `[^id]`.
///
/// The id must be non-empty and restricted to alphanumerics, `-`, `_`.
pub struct FootnoteRef;

impl FootnoteRef {
    pub const OPEN: &'static [u8; 2] = b"[^";
    pub const CLOSE: u8 = b']';

    pub fn is_id_byte(b: u8) -> bool {
        b.is_ascii_alphanumeric() || b == b'-' || b == b'_'
    }
}
