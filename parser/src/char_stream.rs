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

//! Random-access-free, single-direction character input with offset
//! tracking, so the tokenizer never has to think about UTF-8 boundaries
//! or where in the enclosing document the current fragment starts.

use jslcore_errors::{ErrorCode, ParserError, Result};
use jslcore_span::Offset;

pub struct CharStream<'a> {
    text: &'a str,
    /// Byte cursor into `text`.
    cursor: usize,
    base_offset: usize,
    watched_start: Option<usize>,
}

impl<'a> CharStream<'a> {
    pub fn new(text: &'a str, base_offset: usize) -> Self {
        Self { text, cursor: 0, base_offset, watched_start: None }
    }

    pub fn peek(&self) -> Option<char> {
        self.text[self.cursor..].chars().next()
    }

    pub fn eof(&self) -> bool {
        self.cursor >= self.text.len()
    }

    pub fn current_offset(&self) -> Offset {
        Offset::new((self.base_offset + self.cursor) as u32)
    }

    /// Consumes and returns the next character, failing with
    /// `unexpected_eof` if the stream is exhausted.
    pub fn read(&mut self) -> Result<char> {
        match self.peek() {
            Some(c) => {
                self.cursor += c.len_utf8();
                Ok(c)
            }
            None => Err(ParserError::new(self.current_offset(), ErrorCode::UnexpectedEof)),
        }
    }

    /// Consumes the current character if it equals `expected`.
    pub fn read_if(&mut self, expected: char) -> Option<char> {
        if self.peek() == Some(expected) {
            self.cursor += expected.len_utf8();
            Some(expected)
        } else {
            None
        }
    }

    /// Consumes the current character if it appears in `set`.
    pub fn read_in(&mut self, set: &str) -> Option<char> {
        let c = self.peek()?;
        if set.contains(c) {
            self.cursor += c.len_utf8();
            Some(c)
        } else {
            None
        }
    }

    /// Consumes `s` in full if it appears starting at the cursor.
    pub fn read_text_if(&mut self, s: &str) -> bool {
        if self.text[self.cursor..].starts_with(s) {
            self.cursor += s.len();
            true
        } else {
            false
        }
    }

    pub fn watch_begin(&mut self) {
        self.watched_start = Some(self.cursor);
    }

    /// Returns the substring consumed since the matching `watch_begin`.
    pub fn watch_end(&mut self) -> &'a str {
        let start = self.watched_start.take().expect("watch_end without a matching watch_begin");
        &self.text[start..self.cursor]
    }
}
