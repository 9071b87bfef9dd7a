use crate::analysis::WHITESPACE;

/// A whitespace-delimited word and the char offset it is reported at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub text: &'a str,
    pub start: usize,
    pub len: usize,
}

impl Token<'_> {
    pub fn end(&self) -> usize {
        self.start + self.len
    }
}

/// Split on whitespace runs and assume exactly one separator after every
/// token. Leading or trailing whitespace produces empty tokens, which still
/// advance the position by one. Offsets drift whenever the real spacing is
/// anything other than a single character.
pub fn approximate(text: &str) -> Vec<Token<'_>> {
    let mut position = 0;
    WHITESPACE
        .split(text)
        .map(|word| {
            let len = word.chars().count();
            let token = Token {
                text: word,
                start: position,
                len,
            };
            position += len + 1;
            token
        })
        .collect()
}

/// Single forward scan recording the true char offset of every token.
pub fn exact(text: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    // (byte offset, char offset) of the token being built
    let mut current: Option<(usize, usize)> = None;
    let mut char_pos = 0;

    for (byte_pos, ch) in text.char_indices() {
        if ch.is_whitespace() {
            if let Some((byte_start, char_start)) = current.take() {
                tokens.push(Token {
                    text: &text[byte_start..byte_pos],
                    start: char_start,
                    len: char_pos - char_start,
                });
            }
        } else if current.is_none() {
            current = Some((byte_pos, char_pos));
        }
        char_pos += 1;
    }

    if let Some((byte_start, char_start)) = current {
        tokens.push(Token {
            text: &text[byte_start..],
            start: char_start,
            len: char_pos - char_start,
        });
    }

    tokens
}
