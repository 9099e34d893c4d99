/// Wiki-style link `[[target]]` / `[[target|alias]]`.
///
/// Rejected when the `[[` is immediately preceded by `!` (that is an
/// [`Embed`]); must not cross a newline; requires a closing `]]`.
pub struct WikiLink;

impl WikiLink {
    pub const OPEN: &'static [u8; 2] = b"[[";
    pub const CLOSE: &'static [u8; 2] = b"]]";
    pub const ALIAS: u8 = b'|';
}

/// Embedded file reference `![[target]]`.
///
/// Same closing-bracket and no-newline rules as [`WikiLink`]; the interior
/// may carry a `|width` or `|widthxheight` sizing suffix for images.
pub struct Embed;

impl Embed {
    pub const OPEN: &'static [u8; 3] = b"![[";
    pub const CLOSE: &'static [u8; 2] = b"]]";
}
