/// Inline math `$expr$`.
///
/// Must not match `$$` (reserved for block math). The content must not start
/// with a space or `$` (disambiguates currency-like `$5 $10`), a `\$` does
/// not close the span, and the closing `$` must not be preceded by a space.
pub struct InlineMath;

impl InlineMath {
    pub const DOLLAR: u8 = b'$';
    pub const ESCAPE: u8 = b'\\';
}
