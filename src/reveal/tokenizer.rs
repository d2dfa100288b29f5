//! Word splitting for the reveal animation.

/// A run of either word characters or whitespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub is_word: bool,
}

impl Token {
    fn new(text: &str, is_word: bool) -> Self {
        Self {
            text: text.to_string(),
            is_word,
        }
    }
}

/// Split text into alternating word and whitespace tokens.
///
/// Concatenating the tokens yields the input unchanged. Punctuation stays
/// attached to its word.
pub fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut start = 0;
    let mut in_word: Option<bool> = None;

    for (i, c) in text.char_indices() {
        let is_word = !c.is_whitespace();
        match in_word {
            Some(current) if current != is_word => {
                tokens.push(Token::new(&text[start..i], current));
                start = i;
            }
            _ => {}
        }
        in_word = Some(is_word);
    }

    if let Some(current) = in_word {
        tokens.push(Token::new(&text[start..], current));
    }
    tokens
}

/// Number of word tokens in `text`.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}
