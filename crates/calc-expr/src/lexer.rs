use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub pos: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Number,
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
    Eof,
}

impl TokenKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TokenKind::Number => "NUMBER",
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Star => "MULTIPLY",
            TokenKind::Slash => "DIVIDE",
            TokenKind::LParen => "LPAREN",
            TokenKind::RParen => "RPAREN",
            TokenKind::Eof => "EOF",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Token {
    /// Human-readable form used in error messages: the source text, or
    /// `end of input` for the trailing EOF token.
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::Eof => "end of input".to_string(),
            _ => format!("'{}'", self.text),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}' at {}", self.kind, self.text, self.pos)
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum LexError {
    #[error("unexpected character '{ch}' at position {pos}")]
    UnexpectedCharacter { ch: char, pos: usize },
}

/// Splits `input` into tokens. The result always ends with exactly one
/// `Eof` token positioned one past the last character.
#[tracing::instrument(level = "trace", skip(input), fields(len = input.len()))]
pub fn tokenize(input: &str) -> Result<Vec<Token>, LexError> {
    let chars: Vec<char> = input.chars().collect();
    let mut index = 0usize;
    let mut tokens = Vec::new();

    while index < chars.len() {
        let ch = chars[index];
        if ch.is_whitespace() {
            index += 1;
            continue;
        }

        if ch.is_ascii_digit() {
            tokens.push(consume_number(&chars, &mut index));
            continue;
        }

        let token = symbol(ch, index).ok_or(LexError::UnexpectedCharacter { ch, pos: index })?;
        tokens.push(token);
        index += 1;
    }

    tokens.push(Token {
        kind: TokenKind::Eof,
        text: String::new(),
        pos: chars.len(),
    });

    tracing::trace!(count = tokens.len(), "tokenized");
    Ok(tokens)
}

fn consume_number(chars: &[char], index: &mut usize) -> Token {
    let start = *index;
    *index += 1;
    while *index < chars.len() && chars[*index].is_ascii_digit() {
        *index += 1;
    }
    Token {
        kind: TokenKind::Number,
        text: chars[start..*index].iter().collect(),
        pos: start,
    }
}

fn symbol(ch: char, pos: usize) -> Option<Token> {
    let kind = match ch {
        '+' => TokenKind::Plus,
        '-' => TokenKind::Minus,
        '*' => TokenKind::Star,
        '/' => TokenKind::Slash,
        '(' => TokenKind::LParen,
        ')' => TokenKind::RParen,
        _ => return None,
    };
    Some(Token {
        kind,
        text: ch.to_string(),
        pos,
    })
}

#[cfg(test)]
#[path = "lexer_test.rs"]
mod tests;
