//! Authorship productions.
//!
//! ```text
//! authorship := [ "(" team ( ")" | <end of team> ) ] [ team ]
//! team       := authors [ ("ex" | "ex.") authors ] [ "in" authors ] [ [","] year ]
//! authors    := author ( ("," | "&" | "et" | "and") author )* [ "et" "al." ]
//! author     := particle* author-word+ [ filius ]
//! year       := YEAR [ "?" ] | "[" YEAR "]" | "(" YEAR ")"
//! ```
//!
//! An opening parenthesis that is never closed is accepted with an
//! `UnbalancedParenthesis` warning so the rest of the name still parses.

use crate::quality::Warning;
use crate::tables::{AUTHOR_JOINERS, AUTHOR_PARTICLES, EX_MARKERS, FILIUS, IN_MARKERS};
use crate::token::{Token, TokenKind};

use super::cursor::{Cursor, Scratch};
use super::node::{AuthorNode, AuthorshipNode, TeamNode, YearNode};

/// Match a full authorship at the cursor.
pub(crate) fn authorship<'t, 'a>(
    start: Cursor<'t, 'a>,
    scratch: &mut Scratch,
) -> Option<(AuthorshipNode, Cursor<'t, 'a>)> {
    let mut cur = start;
    let mut basionym = None;

    if let Some((_, after_open)) = cur.punct('(') {
        let (team, after_team) = team(after_open, scratch)?;
        match after_team.punct(')') {
            Some((_, after_close)) => cur = after_close,
            None => {
                scratch.warn(Warning::UnbalancedParenthesis);
                cur = after_team;
            }
        }
        basionym = Some(team);
    }

    let checkpoint = scratch.checkpoint();
    let combination = match team(cur, scratch) {
        Some((team, next)) => {
            cur = next;
            Some(team)
        }
        None => {
            scratch.rollback(checkpoint);
            None
        }
    };

    if basionym.is_none() && combination.is_none() {
        return None;
    }
    let span = cur.span_since(start)?;
    Some((AuthorshipNode { basionym, combination, span }, cur))
}

fn team<'t, 'a>(cur: Cursor<'t, 'a>, scratch: &mut Scratch) -> Option<(TeamNode, Cursor<'t, 'a>)> {
    let (authors, mut cur) = author_list(cur)?;
    let mut team = TeamNode { authors, ..TeamNode::default() };

    if let Some((_, after_ex)) = cur.bump_if(|t| is_marker(t, |s| EX_MARKERS.contains(s))) {
        if let Some((ex_authors, next)) = author_list(after_ex) {
            team.ex_authors = ex_authors;
            cur = next;
        }
    }

    if let Some((_, after_in)) = cur.bump_if(|t| is_marker(t, |s| IN_MARKERS.contains(s))) {
        if let Some((in_authors, next)) = author_list(after_in) {
            team.in_authors = in_authors;
            cur = next;
        }
    }

    let after_comma = cur.punct(',').map_or(cur, |(_, next)| next);
    if let Some((year, next)) = year(after_comma, scratch) {
        team.year = Some(year);
        cur = next;
    }

    Some((team, cur))
}

fn author_list<'t, 'a>(cur: Cursor<'t, 'a>) -> Option<(Vec<AuthorNode>, Cursor<'t, 'a>)> {
    let (first, mut cur) = author(cur)?;
    let mut authors = vec![first];

    loop {
        let Some((sep, after_sep)) = cur.bump_if(|t| {
            t.is_punct(',') || t.is_punct('&') || is_marker(t, |s| AUTHOR_JOINERS.contains(s))
        }) else {
            break;
        };

        if sep.text == "et" {
            if let Some((al, next)) = after_sep.bump_if(|t| t.text == "al.") {
                authors.push(AuthorNode {
                    name: "et al.".to_string(),
                    words: vec![sep.span, al.span],
                    filius: None,
                });
                cur = next;
                break;
            }
        }

        match author(after_sep) {
            Some((next_author, next)) => {
                authors.push(next_author);
                cur = next;
            }
            // leave the separator unconsumed: `, 1758` belongs to the year
            None => break,
        }
    }

    Some((authors, cur))
}

fn author<'t, 'a>(start: Cursor<'t, 'a>) -> Option<(AuthorNode, Cursor<'t, 'a>)> {
    let mut cur = start;
    while let Some((_, next)) =
        cur.bump_if(|t| t.kind == TokenKind::Word && AUTHOR_PARTICLES.contains(t.text))
    {
        cur = next;
    }

    let core = cur;
    while let Some((_, next)) = cur.bump_if(is_author_word) {
        cur = next;
    }
    if cur.pos() == core.pos() {
        return None;
    }

    let words = cur.tokens_since(start).iter().map(|t| t.span).collect();

    // `Hook. f.` unless the `f.` is a rank marker before an epithet
    let mut filius = None;
    if let Some((f, next)) = cur.bump_if(|t| FILIUS.contains(t.text)) {
        if !next.peek().map_or(false, |t| t.is_lowercase_word() && !is_team_marker(t)) {
            filius = Some(f.span);
            cur = next;
        }
    }

    let tokens = cur.tokens_since(start);
    let mut name = String::new();
    for (i, tok) in tokens.iter().enumerate() {
        if i > 0 && tokens[i - 1].separated_from(tok) {
            name.push(' ');
        }
        name.push_str(tok.text);
    }
    Some((AuthorNode { name, words, filius }, cur))
}

fn year<'t, 'a>(cur: Cursor<'t, 'a>, scratch: &mut Scratch) -> Option<(YearNode, Cursor<'t, 'a>)> {
    // `(1758)` and `[1758]`
    for (open, close) in [('(', ')'), ('[', ']')] {
        if let Some((_, inner)) = cur.punct(open) {
            if let Some((tok, after)) = inner.bump_if(|t| t.kind == TokenKind::Year) {
                if let Some((_, after_close)) = after.punct(close) {
                    let value = year_value(tok)?;
                    scratch.warn(Warning::ApproximateYear);
                    let node = YearNode { value, approximate: true, span: tok.span };
                    return Some((node, after_close));
                }
            }
            return None;
        }
    }

    let (tok, mut after) = cur.bump_if(|t| t.kind == TokenKind::Year)?;
    let value = year_value(tok)?;
    let mut approximate = false;
    if let Some((q, next)) = after.punct('?') {
        if !tok.separated_from(q) {
            approximate = true;
            after = next;
            scratch.warn(Warning::ApproximateYear);
        }
    }
    Some((YearNode { value, approximate, span: tok.span }, after))
}

fn year_value(tok: &Token<'_>) -> Option<u16> {
    tok.text.parse().ok()
}

/// A word or abbreviation that may be (part of) an author name.
pub(crate) fn is_author_word(tok: &Token<'_>) -> bool {
    if !matches!(
        tok.kind,
        TokenKind::Word | TokenKind::AuthorWord | TokenKind::Abbreviation
    ) {
        return false;
    }
    if tok.is_capitalized() {
        return true;
    }
    // d'Urville, d’Orbigny
    let mut chars = tok.text.chars();
    matches!(
        (chars.next(), chars.next(), chars.next()),
        (Some('d'), Some('\'' | '’'), Some(c)) if c.is_uppercase()
    )
}

fn is_marker(tok: &Token<'_>, contains: impl Fn(&str) -> bool) -> bool {
    matches!(tok.kind, TokenKind::Word | TokenKind::Abbreviation) && contains(tok.text)
}

/// `et`, `and`, `ex`, `in`
fn is_team_marker(tok: &Token<'_>) -> bool {
    is_marker(tok, |s| {
        AUTHOR_JOINERS.contains(s) || EX_MARKERS.contains(s) || IN_MARKERS.contains(s)
    })
}
