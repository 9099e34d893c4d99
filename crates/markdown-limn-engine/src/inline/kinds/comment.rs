/// Hidden comment `%%text%%`, elided entirely when rendered.
///
/// Requires a closing `%%` on the same line; a `%%` left open at the end of
/// a line stays visible as plain text.
pub struct Comment;

impl Comment {
    pub const MARK: &'static [u8; 2] = b"%%";
}
