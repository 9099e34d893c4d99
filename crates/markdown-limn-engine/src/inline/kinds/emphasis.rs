/// Emphasis and strong emphasis delimiters.
///
/// A run of two marker characters opens strong, a single one opens emphasis.
/// The interior must be non-empty and must not begin or end with whitespace
/// (keeps `a * b * c` from becoming emphasis).
pub struct Emphasis;

impl Emphasis {
    pub const STAR: u8 = b'*';
    pub const UNDERSCORE: u8 = b'_';

    pub fn is_marker(b: u8) -> bool {
        b == Self::STAR || b == Self::UNDERSCORE
    }
}

/// Strikethrough `~~text~~`.
pub struct Strikethrough;

impl Strikethrough {
    pub const MARK: &'static [u8; 2] = b"~~";
}
