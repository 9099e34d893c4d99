/// Highlight span `==text==` with owned delimiter constant.
///
/// Requires a closing `==` on the same line; a zero-length interior between
/// the markers is no match.
pub struct Highlight;

impl Highlight {
    pub const MARK: &'static [u8; 2] = b"==";
}
