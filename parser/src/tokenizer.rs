// Copyright (c) 2024-2026 jslcore contributors
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to
// deal in the Software without restriction, including without limitation the
// rights to use, copy, modify, merge, publish, distribute, sublicense, and/or
// sell copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN
// THE SOFTWARE.

//! Pulls characters from a [`CharStream`] and emits a stream of
//! [`Token`]s, handling whitespace, comments, string/numeric literals, and
//! the regular-expression/division disambiguation that needs the parser's
//! cooperation (see [`Tokenizer::advance_with_regexp`]).

use crate::char_stream::CharStream;
use crate::token::{keyword_lookup, Token, TokenKind, PUNCTUATORS};
use jslcore_errors::{ErrorCode, ParserError, Result};
use jslcore_span::Offset;
use std::collections::VecDeque;

fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

fn is_ident_start(c: char) -> bool {
    c == '_' || c == '$' || c.is_ascii_alphabetic()
}

fn is_ident_continue(c: char) -> bool {
    is_ident_start(c) || c.is_ascii_digit()
}

/// Marker used to encode a lexical failure as a `TokenKind::Error` token so
/// that [`Tokenizer::peek`] can observe it before [`Tokenizer::advance`]
/// turns it into a first-class [`ParserError`].
fn error_token(start: Offset, end: Offset, code: ErrorCode) -> Token {
    let encoded = match code {
        ErrorCode::UnexpectedChar { ch } => format!("unexpected_char:{ch}"),
        ErrorCode::UnexpectedEof => "unexpected_eof".to_string(),
        ErrorCode::UnterminatedComment => "unterminated_comment".to_string(),
        other => other.name().to_string(),
    };
    Token::new(TokenKind::Error, Some(encoded), start, end)
}

fn decode_error_atom(atom: &str) -> ErrorCode {
    if let Some(ch) = atom.strip_prefix("unexpected_char:") {
        return ErrorCode::UnexpectedChar { ch: ch.chars().next().unwrap_or('\u{0}') };
    }
    match atom {
        "unexpected_eof" => ErrorCode::UnexpectedEof,
        "unterminated_comment" => ErrorCode::UnterminatedComment,
        _ => ErrorCode::SyntaxError,
    }
}

/// Pull-based tokenizer over a [`CharStream`], with a small look-behind
/// ring buffer so [`Tokenizer::peek_same_line`] can report an intervening
/// `EOL` to implement automatic semicolon insertion.
pub struct Tokenizer<'a> {
    text: &'a str,
    base_offset: usize,
    stream: CharStream<'a>,
    /// Buffered raw tokens, in source order, including whitespace and
    /// comments -- the parser only ever sees the significant ones, but ASI
    /// needs to know whether an `EOL` separates two of them.
    raw: VecDeque<Token>,
    /// Set once a `TokenKind::Error` token has been consumed past; from
    /// then on every call fails with the same error.
    errored: Option<ParserError>,
    /// When set, the next scan starting exactly at this offset should be
    /// read as a regular-expression literal rather than re-applying the
    /// punctuator trie to its leading `/`.
    force_regexp_at: Option<Offset>,
}

impl<'a> Tokenizer<'a> {
    pub fn new(text: &'a str, base_offset: usize) -> Self {
        Self {
            text,
            base_offset,
            stream: CharStream::new(text, base_offset),
            raw: VecDeque::new(),
            errored: None,
            force_regexp_at: None,
        }
    }

    /// Returns the next significant token without consuming it.
    pub fn peek(&mut self) -> Result<Token> {
        self.fill_significant(1)?;
        Ok(self.raw.iter().find(|t| t.kind.is_significant()).cloned().expect("fill_significant(1) guarantees one"))
    }

    /// Returns the second significant token without consuming either it or
    /// the first. Used only where the grammar needs to distinguish a
    /// labelled statement (`NAME :`) from an expression statement starting
    /// with a bare name, without having to un-consume the name.
    pub fn peek2(&mut self) -> Result<Token> {
        self.fill_significant(2)?;
        if let Some(t) = self.raw.iter().filter(|t| t.kind.is_significant()).nth(1) {
            return Ok(t.clone());
        }
        Ok(self
            .raw
            .iter()
            .rev()
            .find(|t| t.kind == TokenKind::Eof)
            .cloned()
            .expect("fill_significant buffers an EOF token once the stream is exhausted"))
    }

    /// Returns the next `EOL` if one lies before the next significant
    /// token, else the next significant token itself. Used to implement
    /// automatic semicolon insertion and the same-line restrictions on
    /// postfix `++`/`--` and `return`/`throw`/`break`/`continue` operands.
    pub fn peek_same_line(&mut self) -> Result<Token> {
        self.fill_significant(1)?;
        for t in self.raw.iter() {
            if t.kind == TokenKind::Eol || t.kind.is_significant() {
                return Ok(t.clone());
            }
        }
        unreachable!("fill_significant(1) guarantees a significant token or an intervening EOL")
    }

    /// Consumes and returns the next significant token (along with any
    /// whitespace/comments preceding it). Fails if that token is an
    /// `ERROR` token, or if the tokenizer has already errored.
    pub fn advance(&mut self) -> Result<Token> {
        if let Some(e) = &self.errored {
            return Err(e.clone());
        }
        if let Err(e) = self.fill_significant(1) {
            self.errored = Some(e.clone());
            return Err(e);
        }
        loop {
            let tok = self.raw.pop_front().expect("fill_significant(1) guarantees a token");
            if !tok.kind.is_significant() {
                continue;
            }
            if tok.kind == TokenKind::Error {
                let code = decode_error_atom(tok.atom.as_deref().unwrap_or(""));
                let err = ParserError::new(tok.start, code);
                self.errored = Some(err.clone());
                return Err(err);
            }
            return Ok(tok);
        }
    }

    /// Like [`Tokenizer::advance`], but if the pending token is `/` or
    /// `/=`, rewinds to the slash and rescans it as a `REGEXP` literal
    /// first. Called by the parser only where a regular expression is
    /// grammatically possible (primary-expression position).
    pub fn advance_with_regexp(&mut self) -> Result<Token> {
        let tok = self.peek()?;
        if matches!(tok.kind, TokenKind::Slash | TokenKind::DivAssign) {
            self.rescan_as_regexp(tok.start);
        }
        self.advance()
    }

    fn rescan_as_regexp(&mut self, start: Offset) {
        while let Some(back) = self.raw.back() {
            if back.start.to_usize() >= start.to_usize() {
                self.raw.pop_back();
            } else {
                break;
            }
        }
        let rel = start.to_usize() - self.base_offset;
        self.stream = CharStream::new(&self.text[rel..], start.to_usize());
        self.force_regexp_at = Some(start);
    }

    /// Ensures at least `count` significant tokens are buffered (or the
    /// stream has reached `EOF`).
    fn fill_significant(&mut self, count: usize) -> Result<()> {
        let mut significant = self.raw.iter().filter(|t| t.kind.is_significant()).count();
        loop {
            if significant >= count {
                return Ok(());
            }
            if matches!(self.raw.back(), Some(t) if t.kind == TokenKind::Eof) {
                return Ok(());
            }
            let tok = self.scan_raw();
            let is_eof = tok.kind == TokenKind::Eof;
            if tok.kind.is_significant() {
                significant += 1;
            }
            self.raw.push_back(tok);
            if is_eof {
                return Ok(());
            }
        }
    }

    /// Scans exactly one raw token (possibly whitespace or a comment) from
    /// the underlying character stream. Never fails: lexical problems are
    /// reported as a `TokenKind::Error` token instead, so that `peek` can
    /// observe them before they're "advanced past" (see the tokenizer
    /// state machine in the spec).
    fn scan_raw(&mut self) -> Token {
        let start = self.stream.current_offset();

        if self.force_regexp_at == Some(start) {
            self.force_regexp_at = None;
            return self.scan_regexp(start);
        }

        if self.stream.eof() {
            return Token::new(TokenKind::Eof, None, start, start);
        }

        let c0 = self.stream.peek().expect("not eof");

        if c0.is_whitespace() {
            return self.scan_whitespace(start);
        }
        if c0 == '/' || c0 == '<' {
            if let Some(tok) = self.try_scan_comment(start) {
                return tok;
            }
        }
        if c0 == '\'' || c0 == '"' {
            return self.scan_string(start, c0);
        }
        if c0.is_ascii_digit() || (c0 == '.' && self.stream_peek2_is_digit()) {
            return self.scan_number(start);
        }
        if is_ident_start(c0) {
            return self.scan_name(start);
        }

        let rest = &self.text[start.to_usize() - self.base_offset..];
        if let Some((kind, len)) = PUNCTUATORS.longest_match(rest) {
            for _ in 0..len {
                self.stream.read().expect("matched text must be consumable");
            }
            let end = Offset::new(self.stream.current_offset().0 - 1);
            return Token::new(kind, None, start, end);
        }

        // Not whitespace, not a literal, not a known punctuator prefix.
        let bad = self.stream.read().expect("not eof");
        error_token(start, start, ErrorCode::UnexpectedChar { ch: bad })
    }

    fn stream_peek2_is_digit(&self) -> bool {
        let rel = self.stream.current_offset().to_usize() - self.base_offset;
        self.text[rel..].chars().nth(1).is_some_and(|c| c.is_ascii_digit())
    }

    fn scan_whitespace(&mut self, start: Offset) -> Token {
        let mut saw_eol = false;
        while let Some(c) = self.stream.peek() {
            if !c.is_whitespace() {
                break;
            }
            if is_line_terminator(c) {
                saw_eol = true;
            }
            self.stream.read().expect("peeked");
        }
        let end = Offset::new(self.stream.current_offset().0 - 1);
        let kind = if saw_eol { TokenKind::Eol } else { TokenKind::Space };
        Token::new(kind, None, start, end)
    }

    /// If the stream is positioned at the start of a comment, consumes and
    /// returns it. Otherwise leaves the stream untouched and returns
    /// `None`, letting the caller fall through to punctuator scanning (a
    /// bare `/` or `/=`).
    fn try_scan_comment(&mut self, start: Offset) -> Option<Token> {
        if self.stream.read_text_if("//") {
            while let Some(c) = self.stream.peek() {
                if is_line_terminator(c) {
                    break;
                }
                self.stream.read().expect("peeked");
            }
            let end = Offset::new(self.stream.current_offset().0 - 1);
            return Some(Token::new(TokenKind::CppComment, None, start, end));
        }
        if self.stream.read_text_if("/*") {
            loop {
                if self.stream.eof() {
                    return Some(error_token(start, self.stream.current_offset(), ErrorCode::UnterminatedComment));
                }
                if self.stream.read_text_if("*/") {
                    break;
                }
                self.stream.read().expect("not eof");
            }
            let end = Offset::new(self.stream.current_offset().0 - 1);
            return Some(Token::new(TokenKind::CComment, None, start, end));
        }
        if self.stream.read_text_if("<!--") {
            while let Some(c) = self.stream.peek() {
                if is_line_terminator(c) {
                    break;
                }
                self.stream.read().expect("peeked");
            }
            let end = Offset::new(self.stream.current_offset().0 - 1);
            return Some(Token::new(TokenKind::HtmlComment, None, start, end));
        }
        None
    }

    fn scan_string(&mut self, start: Offset, quote: char) -> Token {
        self.stream.read().expect("peeked");
        self.stream.watch_begin();
        loop {
            match self.stream.peek() {
                None => {
                    return error_token(start, self.stream.current_offset(), ErrorCode::UnexpectedEof);
                }
                Some(c) if c == quote => {
                    let body = self.stream.watch_end().to_string();
                    self.stream.read().expect("peeked");
                    let end = Offset::new(self.stream.current_offset().0 - 1);
                    return Token::new(TokenKind::String, Some(body), start, end);
                }
                Some(c) if is_line_terminator(c) => {
                    return error_token(start, self.stream.current_offset(), ErrorCode::UnexpectedChar { ch: c });
                }
                Some('\\') => {
                    self.stream.read().expect("peeked");
                    if self.stream.read().is_err() {
                        return error_token(start, self.stream.current_offset(), ErrorCode::UnexpectedEof);
                    }
                }
                Some(_) => {
                    self.stream.read().expect("peeked");
                }
            }
        }
    }

    fn scan_number(&mut self, start: Offset) -> Token {
        if self.stream.peek() == Some('0') {
            self.stream.read().expect("peeked");
            if matches!(self.stream.peek(), Some('x') | Some('X')) {
                self.stream.read().expect("peeked");
                while self.stream.read_in("0123456789abcdefABCDEF").is_some() {}
                return self.finish_literal_number(start);
            }
            // Possibly a legacy octal literal: 0 followed only by digits,
            // no fraction and no exponent.
            let mut digits = String::new();
            while let Some(c) = self.stream.peek() {
                if c.is_ascii_digit() {
                    digits.push(c);
                    self.stream.read().expect("peeked");
                } else {
                    break;
                }
            }
            if matches!(self.stream.peek(), Some('.') | Some('e') | Some('E')) || digits.is_empty() {
                return self.scan_decimal_tail(start, format!("0{digits}"));
            }
            if digits.chars().all(|c| ('0'..='7').contains(&c)) {
                return self.finish_literal_number(start);
            }
            return self.scan_decimal_tail(start, format!("0{digits}"));
        }

        let mut text = String::new();
        while let Some(c) = self.stream.peek() {
            if c.is_ascii_digit() {
                text.push(c);
                self.stream.read().expect("peeked");
            } else {
                break;
            }
        }
        self.scan_decimal_tail(start, text)
    }

    fn scan_decimal_tail(&mut self, start: Offset, mut text: String) -> Token {
        if self.stream.peek() == Some('.') {
            text.push('.');
            self.stream.read().expect("peeked");
            while let Some(c) = self.stream.peek() {
                if c.is_ascii_digit() {
                    text.push(c);
                    self.stream.read().expect("peeked");
                } else {
                    break;
                }
            }
        }
        if matches!(self.stream.peek(), Some('e') | Some('E')) {
            let exp_marker = self.stream.read().expect("peeked");
            text.push(exp_marker);
            if let Some(sign) = self.stream.read_in("+-") {
                text.push(sign);
            }
            let mut exp_digits = 0;
            while let Some(c) = self.stream.peek() {
                if c.is_ascii_digit() {
                    text.push(c);
                    self.stream.read().expect("peeked");
                    exp_digits += 1;
                } else {
                    break;
                }
            }
            if exp_digits == 0 {
                return error_token(start, self.stream.current_offset(), ErrorCode::SyntaxError);
            }
        }
        if let Some(c) = self.stream.peek() {
            if is_ident_start(c) {
                return error_token(start, self.stream.current_offset(), ErrorCode::SyntaxError);
            }
        }
        let end = Offset::new(self.stream.current_offset().0 - 1);
        Token::new(TokenKind::Number, Some(text), start, end)
    }

    /// Finishes a hex or legacy-octal literal: checks for a trailing
    /// identifier-start character, then slices the token text directly
    /// from the source rather than rebuilding it digit by digit.
    fn finish_literal_number(&mut self, start: Offset) -> Token {
        if let Some(c) = self.stream.peek() {
            if is_ident_start(c) {
                return error_token(start, self.stream.current_offset(), ErrorCode::SyntaxError);
            }
        }
        let end = Offset::new(self.stream.current_offset().0 - 1);
        let text = self.text[start.to_usize() - self.base_offset..=end.to_usize() - self.base_offset].to_string();
        Token::new(TokenKind::Number, Some(text), start, end)
    }

    fn scan_name(&mut self, start: Offset) -> Token {
        let mut text = String::new();
        while let Some(c) = self.stream.peek() {
            if is_ident_continue(c) {
                text.push(c);
                self.stream.read().expect("peeked");
            } else {
                break;
            }
        }
        let end = Offset::new(self.stream.current_offset().0 - 1);
        match keyword_lookup(&text) {
            Some(kind) => Token::new(kind, None, start, end),
            None => Token::new(TokenKind::Name, Some(text), start, end),
        }
    }

    fn scan_regexp(&mut self, start: Offset) -> Token {
        self.stream.read().expect("leading '/' guaranteed by caller");
        let mut in_class = false;
        loop {
            match self.stream.peek() {
                None => return error_token(start, self.stream.current_offset(), ErrorCode::UnexpectedEof),
                Some(c) if is_line_terminator(c) => {
                    return error_token(start, self.stream.current_offset(), ErrorCode::UnexpectedChar { ch: c });
                }
                Some('\\') => {
                    self.stream.read().expect("peeked");
                    if self.stream.read().is_err() {
                        return error_token(start, self.stream.current_offset(), ErrorCode::UnexpectedEof);
                    }
                }
                Some('[') => {
                    in_class = true;
                    self.stream.read().expect("peeked");
                }
                Some(']') if in_class => {
                    in_class = false;
                    self.stream.read().expect("peeked");
                }
                Some('/') if !in_class => {
                    self.stream.read().expect("peeked");
                    break;
                }
                Some(_) => {
                    self.stream.read().expect("peeked");
                }
            }
        }
        while let Some(c) = self.stream.peek() {
            if is_ident_continue(c) {
                self.stream.read().expect("peeked");
            } else {
                break;
            }
        }
        let end = Offset::new(self.stream.current_offset().0 - 1);
        let text = self.text[start.to_usize() - self.base_offset..=end.to_usize() - self.base_offset].to_string();
        Token::new(TokenKind::Regexp, Some(text), start, end)
    }
}
