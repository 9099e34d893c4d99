/// Code span inline type with owned delimiter constant.
///
/// Code spans are raw zones: no other inline recognizer fires inside them.
/// Delimiters are runs of one or two backticks; the closing run must match
/// the opening run's length.
pub struct CodeSpan;

impl CodeSpan {
    /// The backtick character that delimits code spans.
    pub const TICK: u8 = b'`';
    /// Longest delimiter run recognized inline (triple backticks open a
    /// fenced block, which belongs to the block grammar).
    pub const MAX_RUN: usize = 2;
}
