//! Token cursor and per-attempt scratch state.
//!
//! The cursor is `Copy`: a rule that fails simply drops its advanced copy
//! and the caller continues from the one it still holds. Warnings are the
//! only mutable state of an attempt; they live in a [`Scratch`] owned by
//! that attempt and are rolled back to a checkpoint on backtrack.

use crate::quality::Warning;
use crate::span::Span;
use crate::token::{Token, TokenKind};

#[derive(Debug, Clone, Copy)]
pub struct Cursor<'t, 'a> {
    tokens: &'t [Token<'a>],
    pos: usize,
}

impl<'t, 'a> Cursor<'t, 'a> {
    pub fn new(tokens: &'t [Token<'a>]) -> Self {
        Self { tokens, pos: 0 }
    }

    /// Number of tokens consumed so far.
    #[inline]
    pub fn pos(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn peek(&self) -> Option<&'t Token<'a>> {
        self.tokens.get(self.pos)
    }

    /// The token just before the cursor.
    #[inline]
    pub fn prev(&self) -> Option<&'t Token<'a>> {
        self.pos.checked_sub(1).and_then(|i| self.tokens.get(i))
    }

    /// Take the next token.
    #[inline]
    pub fn bump(self) -> Option<(&'t Token<'a>, Self)> {
        let tok = self.tokens.get(self.pos)?;
        Some((tok, Self { tokens: self.tokens, pos: self.pos + 1 }))
    }

    /// Take the next token if `pred` accepts it.
    #[inline]
    pub fn bump_if(self, pred: impl FnOnce(&Token<'a>) -> bool) -> Option<(&'t Token<'a>, Self)> {
        let tok = self.peek()?;
        if pred(tok) {
            self.bump()
        } else {
            None
        }
    }

    /// Take the next token if it is the punctuation `ch`.
    #[inline]
    pub fn punct(self, ch: char) -> Option<(&'t Token<'a>, Self)> {
        self.bump_if(|t| t.is_punct(ch))
    }

    /// Take the next token if it is a hybrid marker.
    #[inline]
    pub fn hybrid_sign(self) -> Option<(Span, Self)> {
        self.bump_if(|t| t.kind == TokenKind::HybridMarker)
            .map(|(t, next)| (t.span, next))
    }

    /// Span from the token at `from` up to the last consumed token.
    pub fn span_since(&self, from: Cursor<'t, 'a>) -> Option<Span> {
        let first = self.tokens.get(from.pos)?;
        let last = self.prev()?;
        (self.pos > from.pos).then(|| first.span.join(last.span))
    }

    /// Tokens between `from` and the cursor.
    pub fn tokens_since(&self, from: Cursor<'t, 'a>) -> &'t [Token<'a>] {
        &self.tokens[from.pos.min(self.pos)..self.pos]
    }
}

/// Mutable state of a single production attempt.
#[derive(Debug, Default, Clone)]
pub struct Scratch {
    warnings: Vec<Warning>,
}

impl Scratch {
    pub fn warn(&mut self, warning: Warning) {
        self.warnings.push(warning);
    }

    pub fn checkpoint(&self) -> usize {
        self.warnings.len()
    }

    /// Discard warnings recorded after `checkpoint`.
    pub fn rollback(&mut self, checkpoint: usize) {
        self.warnings.truncate(checkpoint);
    }

    pub fn into_warnings(self) -> Vec<Warning> {
        self.warnings
    }
}
