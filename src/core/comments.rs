//! Comment regions of Dart source lines.
//!
//! Lines are lexed one at a time. String literals are skipped, so `'image/*'`
//! or `"https://…"` never open a comment. [`LexState`] carries an open block
//! comment or triple-quoted string over to the next line.

use std::ops::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LexState {
    #[default]
    Code,
    BlockComment,
    /// Inside a `'''` or `"""` string, `raw` for `r'''`.
    TripleString { quote: u8, raw: bool },
}

/// Byte ranges of `line` covered by comments, and the state after the line.
pub fn comment_spans(line: &str, start: LexState) -> (Vec<Range<usize>>, LexState) {
    let bytes = line.as_bytes();
    let mut spans = Vec::new();
    let mut state = start;
    let mut comment_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match state {
            LexState::BlockComment => match line[i..].find("*/") {
                Some(end) => {
                    i += end + 2;
                    spans.push(comment_start..i);
                    state = LexState::Code;
                }
                None => break,
            },
            LexState::TripleString { quote, raw } => {
                if !raw && bytes[i] == b'\\' {
                    i += 2;
                } else if is_triple_quote(bytes, i, quote) {
                    i += 3;
                    state = LexState::Code;
                } else {
                    i += 1;
                }
            }
            LexState::Code => {
                if bytes[i..].starts_with(b"//") {
                    spans.push(i..bytes.len());
                    return (spans, LexState::Code);
                }
                if bytes[i..].starts_with(b"/*") {
                    comment_start = i;
                    state = LexState::BlockComment;
                    i += 2;
                } else if let Some((quote, raw, open)) = string_start(bytes, i) {
                    if is_triple_quote(bytes, open, quote) {
                        state = LexState::TripleString { quote, raw };
                        i = open + 3;
                    } else {
                        i = skip_string(bytes, open + 1, quote, raw);
                    }
                } else {
                    i += 1;
                }
            }
        }
    }

    if state == LexState::BlockComment {
        spans.push(comment_start..bytes.len());
    }
    (spans, state)
}

/// State at the start of every line.
pub fn line_states<S: AsRef<str>>(lines: &[S]) -> Vec<LexState> {
    let mut state = LexState::Code;
    lines
        .iter()
        .map(|line| {
            let start = state;
            state = comment_spans(line.as_ref(), start).1;
            start
        })
        .collect()
}

/// Whether byte `offset` of `line` falls inside a comment.
///
/// `state` is the lexer state at the start of the line. Lines starting with
/// `*` are treated as doc-comment bodies.
pub fn is_comment_at(line: &str, offset: usize, state: LexState) -> bool {
    let trimmed = line.trim_start();
    let in_string = matches!(state, LexState::TripleString { .. });
    if !in_string && trimmed.starts_with('*') && !trimmed.starts_with("*/") {
        return true;
    }

    comment_spans(line, state)
        .0
        .iter()
        .any(|span| span.contains(&offset))
}

/// Quote byte, raw flag and quote position of a string opening at `i`.
fn string_start(bytes: &[u8], i: usize) -> Option<(u8, bool, usize)> {
    match bytes[i] {
        quote @ (b'\'' | b'"') => Some((quote, false, i)),
        b'r' if !follows_identifier(bytes, i) => match bytes.get(i + 1) {
            Some(&quote) if quote == b'\'' || quote == b'"' => Some((quote, true, i + 1)),
            _ => None,
        },
        _ => None,
    }
}

fn follows_identifier(bytes: &[u8], i: usize) -> bool {
    i > 0 && matches!(bytes[i - 1], b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'_' | b'$')
}

fn is_triple_quote(bytes: &[u8], i: usize, quote: u8) -> bool {
    bytes[i..].starts_with(&[quote; 3])
}

/// Position just past the closing quote. Unterminated strings run to the end
/// of the line.
fn skip_string(bytes: &[u8], mut i: usize, quote: u8, raw: bool) -> usize {
    while i < bytes.len() {
        match bytes[i] {
            b'\\' if !raw => i += 2,
            b if b == quote => return i + 1,
            _ => i += 1,
        }
    }
    bytes.len()
}
