//! Tokenizer: raw name string → ordered token stream.
//!
//! Tokenizing never fails. Characters that cannot start a word become
//! single-character `Punctuation` tokens and surface later as the
//! unparsed tail when no grammar rule consumes them.
//!
//! Two passes:
//!
//! 1. **Lexing** - whitespace-separated chunks (found with `memchr`) are
//!    split into words, abbreviations, years, hybrid signs and punctuation.
//! 2. **Classification** - context-dependent kinds are assigned: a
//!    standalone `x` between words becomes a hybrid marker, and capitalized
//!    words after a lowercase epithet become author words.

use memchr::memchr3;
use tracing::trace;
use unicode_xid::UnicodeXID;

use crate::span::Span;
use crate::tables::RANK_MARKERS;
use crate::token::{Token, TokenKind};

/// The multiplication sign used for hybrids.
pub const HYBRID_SIGN: char = '×';

/// Tokenize `input`.
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    Tokenizer::new(input).tokenize()
}

/// Splits a name string into tokens.
#[derive(Debug, Clone)]
pub struct Tokenizer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Consume the tokenizer and produce the full token stream.
    pub fn tokenize(mut self) -> Vec<Token<'a>> {
        let mut tokens = Vec::with_capacity(8);
        while let Some(chunk) = self.next_chunk() {
            self.lex_chunk(chunk, &mut tokens);
        }
        classify(&mut tokens);
        trace!(input = self.input, count = tokens.len(), "tokenized");
        tokens
    }

    /// Next run of input between ASCII separators.
    ///
    /// Other whitespace (NBSP, CR, ...) is still skipped inside the chunk
    /// by `lex_chunk`.
    fn next_chunk(&mut self) -> Option<Span> {
        let bytes = self.input.as_bytes();
        while self.pos < bytes.len() && matches!(bytes[self.pos], b' ' | b'\t' | b'\n') {
            self.pos += 1;
        }
        if self.pos >= bytes.len() {
            return None;
        }
        let start = self.pos;
        let end = memchr3(b' ', b'\t', b'\n', &bytes[start..]).map_or(bytes.len(), |i| start + i);
        self.pos = end;
        Some(Span::new(start, end))
    }

    fn lex_chunk(&self, chunk: Span, tokens: &mut Vec<Token<'a>>) {
        let text = &self.input[chunk.range()];
        let mut chars = text.char_indices().peekable();

        while let Some((offset, c)) = chars.next() {
            let start = chunk.start + offset;

            if c.is_whitespace() {
                continue;
            }

            if c == HYBRID_SIGN {
                tokens.push(self.token(start, start + c.len_utf8(), TokenKind::HybridMarker));
                continue;
            }

            if !is_word_char(c) {
                tokens.push(self.token(start, start + c.len_utf8(), TokenKind::Punctuation));
                continue;
            }

            // Word: word chars, with `-` and `'` allowed between word chars.
            let mut end = start + c.len_utf8();
            while let Some(&(next_offset, next)) = chars.peek() {
                if is_word_char(next) {
                    end = chunk.start + next_offset + next.len_utf8();
                    chars.next();
                } else if is_word_joiner(next) && followed_by_word_char(&text[next_offset..]) {
                    end = chunk.start + next_offset + next.len_utf8();
                    chars.next();
                } else {
                    break;
                }
            }

            let word = &self.input[start..end];
            if word.bytes().all(|b| b.is_ascii_digit()) {
                let kind = if is_year(word) { TokenKind::Year } else { TokenKind::Word };
                tokens.push(self.token(start, end, kind));
                continue;
            }

            // A dot glued to the word makes an abbreviation.
            if let Some(&(_, '.')) = chars.peek() {
                chars.next();
                end += 1;
                let kind = if RANK_MARKERS.contains_key(&self.input[start..end]) {
                    TokenKind::RankMarker
                } else {
                    TokenKind::Abbreviation
                };
                tokens.push(self.token(start, end, kind));
                continue;
            }

            let kind = if RANK_MARKERS.contains_key(word) {
                TokenKind::RankMarker
            } else {
                TokenKind::Word
            };
            tokens.push(self.token(start, end, kind));
        }
    }

    #[inline]
    fn token(&self, start: usize, end: usize, kind: TokenKind) -> Token<'a> {
        Token::new(&self.input[start..end], kind, Span::new(start, end))
    }
}

/// Assign context-dependent kinds.
fn classify(tokens: &mut [Token<'_>]) {
    // Standalone `x` between two words is a hybrid sign.
    for i in 0..tokens.len() {
        let tok = tokens[i];
        if tok.kind != TokenKind::Word || !(tok.text == "x" || tok.text == "X") {
            continue;
        }
        let prev_ok = i > 0 && tokens[i - 1].is_wordlike() && tokens[i - 1].separated_from(&tok);
        let next_ok = tokens
            .get(i + 1)
            .map_or(false, |next| next.kind == TokenKind::Word && tok.separated_from(next));
        if prev_ok && next_ok {
            tokens[i].kind = TokenKind::HybridMarker;
        }
    }

    // Capitalized words after a lowercase epithet are likely authors. A
    // hybrid sign starts a new name.
    let mut seen_epithet = false;
    for tok in tokens.iter_mut() {
        match tok.kind {
            TokenKind::HybridMarker => seen_epithet = false,
            TokenKind::Word if tok.is_lowercase_word() => seen_epithet = true,
            TokenKind::Word | TokenKind::Abbreviation if seen_epithet && tok.is_capitalized() => {
                tok.kind = TokenKind::AuthorWord;
            }
            _ => {}
        }
    }
}

#[inline]
fn is_word_char(c: char) -> bool {
    UnicodeXID::is_xid_continue(c) && c != '_'
}

#[inline]
fn is_word_joiner(c: char) -> bool {
    matches!(c, '-' | '\'' | '’')
}

/// `rest` starts with a joiner; check the char after it.
fn followed_by_word_char(rest: &str) -> bool {
    let mut it = rest.chars();
    it.next();
    it.next().map_or(false, is_word_char)
}

fn is_year(digits: &str) -> bool {
    digits.len() == 4 && matches!(digits.parse::<u16>(), Ok(1000..=2099))
}
