//! Lexical tokens - the output of the tokenizer.
//!
//! Tokens are zero-copy: `text` borrows from the original input and
//! `span` locates it there, so `&input[token.span.range()] == token.text`
//! always holds. Whitespace is never a token.

use crate::span::Span;

/// Token classification.
///
/// The kind is a lexical hint. The grammar still inspects the text, so a
/// capitalized `Word` may be read as an author and an `AuthorWord` may open
/// a new genus inside a hybrid formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Run of word characters: `Homo`, `sapiens`, `novae-angliae`, `123`
    Word,
    /// Word immediately followed by a dot: `L.`, `Mill.`, `sp.`, `cf.`
    Abbreviation,
    /// `×`, or a standalone `x` between two words
    HybridMarker,
    /// Infraspecific rank marker: `subsp.`, `var.`, `f.`, `forma`
    RankMarker,
    /// Any single non-word, non-space character: `(`, `,`, `&`, `$`
    Punctuation,
    /// Capitalized word or abbreviation following a lowercase epithet
    AuthorWord,
    /// Four-digit year between 1000 and 2099
    Year,
}

/// A lexical unit of the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub text: &'a str,
    pub kind: TokenKind,
    pub span: Span,
}

impl<'a> Token<'a> {
    #[inline]
    pub fn new(text: &'a str, kind: TokenKind, span: Span) -> Self {
        Self { text, kind, span }
    }

    /// Check if this token is the given punctuation character.
    #[inline]
    pub fn is_punct(&self, ch: char) -> bool {
        self.kind == TokenKind::Punctuation
            && self.text.starts_with(ch)
            && self.text.len() == ch.len_utf8()
    }

    /// First character is uppercase.
    pub fn is_capitalized(&self) -> bool {
        self.text.chars().next().map_or(false, char::is_uppercase)
    }

    /// Every letter is lowercase and there is at least one letter.
    pub fn is_lowercase_word(&self) -> bool {
        self.kind == TokenKind::Word
            && self.text.chars().any(char::is_alphabetic)
            && self.text.chars().all(|c| !c.is_alphabetic() || c.is_lowercase())
    }

    /// Word-like tokens may carry a name or an author.
    pub fn is_wordlike(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::Word
                | TokenKind::Abbreviation
                | TokenKind::AuthorWord
                | TokenKind::RankMarker
        )
    }

    /// Whether there is whitespace between this token and `next`.
    #[inline]
    pub fn separated_from(&self, next: &Token<'_>) -> bool {
        next.span.start > self.span.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_punct() {
        let t = Token::new("(", TokenKind::Punctuation, Span::new(0, 1));
        assert!(t.is_punct('('));
        assert!(!t.is_punct(')'));
        let w = Token::new("(", TokenKind::Word, Span::new(0, 1));
        assert!(!w.is_punct('('));
    }

    #[test]
    fn test_case_helpers() {
        let genus = Token::new("Homo", TokenKind::Word, Span::new(0, 4));
        let epithet = Token::new("novae-angliae", TokenKind::Word, Span::new(5, 18));
        let digits = Token::new("123", TokenKind::Word, Span::new(0, 3));
        assert!(genus.is_capitalized());
        assert!(!genus.is_lowercase_word());
        assert!(epithet.is_lowercase_word());
        assert!(!digits.is_lowercase_word());
    }
}
