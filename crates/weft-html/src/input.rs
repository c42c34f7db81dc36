//! Character input for the tokenizer.
//!
//! [§ 13.2.3.5 Preprocessing the input stream](https://html.spec.whatwg.org/multipage/parsing.html#preprocessing-the-input-stream)

/// A pull-based supplier of Unicode scalar values.
///
/// End of stream is `None` from [`InputSource::consume`], and stays `None` on
/// every further call.
pub trait InputSource {
    /// Up to `n` upcoming characters, without consuming them.
    fn peek(&self, n: usize) -> Vec<char>;

    /// The next character, or `None` at end of stream.
    fn consume(&mut self) -> Option<char>;

    /// Push `c` back so the next [`InputSource::consume`] returns it again.
    /// Only one character of pushback is required.
    fn reconsume(&mut self, c: char);

    /// Offset of the next character to be consumed.
    fn position(&self) -> usize;
}

/// In-memory input built from a string.
///
/// "U+000D CARRIAGE RETURN (CR) characters and U+000A LINE FEED (LF) characters
/// are treated specially. Any LF character that immediately follows a CR
/// character must be ignored, and all CR characters must then be converted
/// to LF characters."
#[derive(Debug, Clone)]
pub struct StrInput {
    chars: Vec<char>,
    pos: usize,
    pushed_back: Option<char>,
}

impl StrInput {
    /// Preprocess `text` into a fresh input.
    #[must_use]
    pub fn new(text: &str) -> Self {
        Self {
            chars: normalize_newlines(text),
            pos: 0,
            pushed_back: None,
        }
    }

    /// True once every character, including any pushed back, has been consumed.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.pushed_back.is_none() && self.pos >= self.chars.len()
    }
}

impl From<&str> for StrInput {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl InputSource for StrInput {
    fn peek(&self, n: usize) -> Vec<char> {
        self.pushed_back
            .into_iter()
            .chain(self.chars[self.pos..].iter().copied())
            .take(n)
            .collect()
    }

    fn consume(&mut self) -> Option<char> {
        if let Some(c) = self.pushed_back.take() {
            return Some(c);
        }
        let c = self.chars.get(self.pos).copied()?;
        self.pos += 1;
        Some(c)
    }

    fn reconsume(&mut self, c: char) {
        self.pushed_back = Some(c);
    }

    fn position(&self) -> usize {
        self.pos - usize::from(self.pushed_back.is_some())
    }
}

fn normalize_newlines(text: &str) -> Vec<char> {
    let mut out = Vec::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\r' {
            let _ = chars.next_if_eq(&'\n');
            out.push('\n');
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crlf_and_lone_cr_become_lf() {
        let mut input = StrInput::new("a\r\nb\rc");
        let collected: String = std::iter::from_fn(|| input.consume()).collect();
        assert_eq!(collected, "a\nb\nc");
    }

    #[test]
    fn end_of_stream_is_repeatable() {
        let mut input = StrInput::new("x");
        assert_eq!(input.consume(), Some('x'));
        assert_eq!(input.consume(), None);
        assert_eq!(input.consume(), None);
        assert!(input.is_exhausted());
    }

    #[test]
    fn reconsume_redelivers_and_peek_sees_it() {
        let mut input = StrInput::new("<!--");
        assert_eq!(input.consume(), Some('<'));
        assert_eq!(input.position(), 1);
        input.reconsume('<');
        assert_eq!(input.position(), 0);
        assert_eq!(input.peek(3), vec!['<', '!', '-']);
        assert_eq!(input.consume(), Some('<'));
        assert_eq!(input.peek(10), vec!['!', '-', '-']);
    }
}
