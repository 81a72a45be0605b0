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

//! A sorted set of non-overlapping, half-open-by-construction intervals,
//! used by the comment extractor to mask out comment-like text that
//! actually lies inside a string or regular-expression literal.
//!
//! Stored as a flat, sorted list `[s0, e0, s1, e1, ...]` where odd parity
//! of a binary search means "inside a range". `add` merges the new
//! interval with anything it overlaps or touches.

#[derive(Default, Debug)]
pub struct NodeRanges {
    offsets: Vec<usize>,
}

impl NodeRanges {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts the closed interval `[start, end]`, merging with any
    /// existing interval it overlaps or is adjacent to.
    pub fn add(&mut self, start: usize, end: usize) {
        let mut i = self.offsets.partition_point(|&x| x < start);
        let mut start = start;
        if i % 2 == 1 {
            i -= 1;
            start = self.offsets[i];
        }

        let mut end = end + 1;
        let mut j = self.offsets.partition_point(|&x| x < end);
        if j % 2 == 1 {
            end = self.offsets[j];
            j += 1;
        }

        self.offsets.splice(i..j, [start, end]);
    }

    /// Returns whether `pos` falls inside any inserted interval.
    pub fn has(&self, pos: usize) -> bool {
        self.offsets.partition_point(|&x| x <= pos) % 2 == 1
    }

    /// The raw flat offset list, exposed for tests that assert on its
    /// exact shape after a sequence of insertions.
    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_merges_overlapping_and_adjacent_intervals() {
        let mut r = NodeRanges::new();
        r.add(5, 10);
        assert_eq!(r.offsets(), &[5, 11]);
        r.add(15, 20);
        assert_eq!(r.offsets(), &[5, 11, 15, 21]);
        r.add(21, 22);
        assert_eq!(r.offsets(), &[5, 11, 15, 23]);
        r.add(4, 5);
        assert_eq!(r.offsets(), &[4, 11, 15, 23]);
        r.add(9, 11);
        assert_eq!(r.offsets(), &[4, 12, 15, 23]);
        r.add(10, 20);
        assert_eq!(r.offsets(), &[4, 23]);
        r.add(4, 22);
        assert_eq!(r.offsets(), &[4, 23]);
        r.add(30, 30);
        assert_eq!(r.offsets(), &[4, 23, 30, 31]);
    }

    #[test]
    fn has_tests_point_membership() {
        let mut r = NodeRanges::new();
        r.add(5, 10);
        r.add(15, 15);
        assert!(!r.has(4));
        assert!(r.has(5));
        assert!(r.has(6));
        assert!(r.has(9));
        assert!(r.has(10));
        assert!(!r.has(14));
        assert!(r.has(15));
        assert!(!r.has(16));
    }
}
