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

use std::fmt;

/// A byte offset into a document, absolute even when the parsed text is a
/// fragment embedded inside a larger enclosing document.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Offset(pub u32);

impl Offset {
    pub const ZERO: Offset = Offset(0);

    pub fn new(n: u32) -> Self {
        Offset(n)
    }

    pub fn to_usize(self) -> usize {
        self.0 as usize
    }
}

impl From<usize> for Offset {
    fn from(n: usize) -> Self {
        Offset(n as u32)
    }
}

impl From<Offset> for usize {
    fn from(o: Offset) -> Self {
        o.to_usize()
    }
}

impl std::ops::Add<u32> for Offset {
    type Output = Offset;
    fn add(self, rhs: u32) -> Offset {
        Offset(self.0 + rhs)
    }
}

impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A zero-based `(line, column)` pair. Rendered one-based via [`Position::fmt`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: u32,
    pub col: u32,
}

impl Position {
    pub fn new(line: u32, col: u32) -> Self {
        Self { line, col }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(line {}, col {})", self.line + 1, self.col + 1)
    }
}

const LINE_TERMINATORS: [char; 4] = ['\n', '\r', '\u{2028}', '\u{2029}'];

/// Splits `text` into line lengths (in bytes), each including its trailing
/// terminator. `\r\n` counts as a single terminator; a final, unterminated
/// line (if non-empty) is included without one.
fn line_lengths(text: &str) -> Vec<usize> {
    let mut lens = Vec::new();
    let mut line_start = 0;
    let mut chars = text.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        if LINE_TERMINATORS.contains(&c) {
            let mut end = i + c.len_utf8();
            if c == '\r' {
                if let Some(&(j, '\n')) = chars.peek() {
                    end = j + 1;
                    chars.next();
                }
            }
            lens.push(end - line_start);
            line_start = end;
        }
    }
    if line_start < text.len() {
        lens.push(text.len() - line_start);
    }
    lens
}

/// Translates between absolute byte offsets and `(line, column)` positions.
///
/// Built once per source text from a prefix sum over line lengths, so both
/// directions are logarithmic in the number of lines. An optional base
/// position lets embedded fragments report positions relative to their
/// enclosing document: the shift only ever touches line 0, since every
/// later line already starts at column 0 of its own line.
pub struct PositionMap<'a> {
    text: &'a str,
    /// `line_offsets[i]` is the byte offset at which line `i` begins;
    /// the final entry is the text's total length.
    line_offsets: Vec<usize>,
    base: Option<Position>,
}

impl<'a> PositionMap<'a> {
    pub fn new(text: &'a str, base: Option<Position>) -> Self {
        let mut line_offsets = vec![0usize];
        let mut acc = 0usize;
        for len in line_lengths(text) {
            acc += len;
            line_offsets.push(acc);
        }
        Self { text, line_offsets, base }
    }

    /// Converts an absolute byte offset to a `(line, col)` position.
    pub fn from_offset(&self, offset: usize) -> Position {
        let idx = self.line_offsets.partition_point(|&start| start <= offset);
        let line = idx.saturating_sub(1);
        let mut col = (offset - self.line_offsets[line]) as u32;
        let mut line = line as u32;
        if let Some(base) = self.base {
            if line == 0 {
                col += base.col;
            }
            line += base.line;
        }
        Position::new(line, col)
    }

    /// Converts a `(line, col)` position back to an absolute byte offset.
    /// Returns `None` if the column exceeds the line's length.
    pub fn to_offset(&self, pos: Position) -> Option<usize> {
        let rel = self.to_rel_pos(pos)?;
        let line = rel.line as usize;
        let start = *self.line_offsets.get(line)?;
        let next = *self.line_offsets.get(line + 1)?;
        let offset = start + rel.col as usize;
        if offset > next {
            return None;
        }
        Some(offset)
    }

    /// Returns the inclusive-inclusive substring spanning `start` to `end`.
    pub fn slice(&self, start: Position, end: Position) -> Option<&'a str> {
        let start_off = self.to_offset(start)?;
        let end_off = self.to_offset(end)?;
        // `end` is inclusive, so the slice runs one byte past it.
        let end_off = self.text[end_off..].chars().next().map_or(end_off, |c| end_off + c.len_utf8());
        self.text.get(start_off..end_off)
    }

    fn to_rel_pos(&self, pos: Position) -> Option<Position> {
        match self.base {
            None => Some(pos),
            Some(base) => {
                if pos.line < base.line {
                    return None;
                }
                let line = pos.line - base.line;
                let col = if line == 0 {
                    if pos.col < base.col {
                        return None;
                    }
                    pos.col - base.col
                } else {
                    pos.col
                };
                Some(Position::new(line, col))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn per_character_positions() {
        let text = "abc\r\ndef\nghi\n\nj";
        let map = PositionMap::new(text, None);
        let expected = [
            (0, 0), (0, 1), (0, 2), (0, 3), (0, 4),
            (1, 0), (1, 1), (1, 2), (1, 3),
            (2, 0), (2, 1), (2, 2), (2, 3),
            (3, 0),
            (4, 0),
        ];
        for (offset, &(line, col)) in expected.iter().enumerate() {
            let pos = map.from_offset(offset);
            assert_eq!((pos.line, pos.col), (line, col), "offset {offset}");
        }
    }

    #[test]
    fn carriage_return_only_line() {
        let map = PositionMap::new("\rabc", None);
        assert_eq!(map.from_offset(0), Position::new(0, 0));
        assert_eq!(map.from_offset(1), Position::new(1, 0));
        assert_eq!(map.from_offset(2), Position::new(1, 1));
        assert_eq!(map.from_offset(3), Position::new(1, 2));
    }

    #[test]
    fn text_slices() {
        let map = PositionMap::new("abc\r\ndef\n\nghi", None);
        assert_eq!(map.slice(Position::new(0, 0), Position::new(0, 0)), Some("a"));
        assert_eq!(map.slice(Position::new(0, 0), Position::new(0, 2)), Some("abc"));
        assert_eq!(map.slice(Position::new(0, 2), Position::new(1, 2)), Some("c\r\ndef"));
    }

    #[test]
    fn offset_round_trip() {
        let map = PositionMap::new("abc\r\ndef\n\nghi", None);
        assert_eq!(map.to_offset(Position::new(0, 2)), Some(2));
        assert_eq!(map.to_offset(Position::new(1, 0)), Some(5));
        assert_eq!(map.to_offset(Position::new(3, 1)), Some(11));
    }

    #[test]
    fn base_position_shifts_only_line_zero() {
        let map = PositionMap::new("abc\r\ndef\n\nghi", Some(Position::new(3, 4)));
        assert_eq!(map.to_offset(Position::new(3, 4)), Some(0));
        assert_eq!(map.to_offset(Position::new(3, 5)), Some(1));
        assert_eq!(map.from_offset(0), Position::new(3, 4));
        assert_eq!(map.slice(Position::new(3, 4), Position::new(3, 4)), Some("a"));
        assert_eq!(map.slice(Position::new(3, 4), Position::new(3, 6)), Some("abc"));
        assert_eq!(map.slice(Position::new(3, 6), Position::new(4, 2)), Some("c\r\ndef"));
    }
}
