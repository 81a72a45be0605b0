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

//! The comment extractor: §4.5's two-pass scan over the raw text,
//! filtered against the string/regexp-literal offsets recorded in a
//! completed parse tree.
//!
//! Kept as a second pass over the text, rather than surfaced by the
//! tokenizer directly, because the tokenizer discards comments as
//! insignificant whitespace -- reusing its state machine here would mean
//! threading comment text through every `peek`/`advance` call for a
//! feature only the lint driver needs.

use crate::kind::NodeKind;
use crate::node::{NodeId, Tree};
use crate::ranges::NodeRanges;
use once_cell::sync::Lazy;
use regex::Regex;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommentKind {
    Line,
    Block,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Comment {
    pub kind: CommentKind,
    pub start: usize,
    pub end: usize,
    /// The comment's body, with its delimiters (`//`, `/*`/`*/`) stripped.
    pub text: String,
}

static COMMENT_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"//[^\r\n]*|(?s:/\*.*?\*/)").expect("static pattern"));

/// Collects the offset intervals of every string and regular-expression
/// literal in `tree`, rooted at `root`, into a mask the extractor uses to
/// reject comment-shaped text that's actually inside one of those.
fn mask_literals(tree: &Tree, root: NodeId) -> NodeRanges {
    let mut ranges = NodeRanges::new();
    let mut stack = vec![root];
    while let Some(id) = stack.pop() {
        let node = tree.get(id);
        if matches!(node.kind, NodeKind::String | NodeKind::Regexp) {
            if let (Some(start), Some(end)) = (node.start_offset, node.end_offset) {
                ranges.add(start, end);
            }
        }
        stack.extend(node.children.iter().flatten());
    }
    ranges
}

/// Finds every line/block comment in `text` (whose first byte is absolute
/// offset `base_offset`) that doesn't fall inside a string or
/// regular-expression literal of `tree`/`root`.
pub fn find_comments(text: &str, base_offset: usize, tree: &Tree, root: NodeId) -> Vec<Comment> {
    let mut mask = mask_literals(tree, root);
    let mut out = Vec::new();
    for m in COMMENT_PATTERN.find_iter(text) {
        let start = base_offset + m.start();
        let end = base_offset + m.end() - 1;
        if mask.has(start) {
            continue;
        }
        mask.add(start, end);
        let raw = m.as_str();
        let (kind, text) = if let Some(body) = raw.strip_prefix("//") {
            (CommentKind::Line, body.to_string())
        } else {
            (CommentKind::Block, raw.strip_prefix("/*").and_then(|s| s.strip_suffix("*/")).unwrap_or(raw).to_string())
        };
        out.push(Comment { kind, start, end, text });
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{NewNode, Tree};

    fn tree_with_string(start: usize, end: usize) -> (Tree, NodeId) {
        let mut tree = Tree::new();
        let string_node = tree.push(NewNode::leaf(NodeKind::String, None, start, end));
        let root = tree.push(NewNode::with_children(NodeKind::Lc, None, 0, end, vec![Some(string_node)]));
        (tree, root)
    }

    #[test]
    fn comment_inside_string_is_masked() {
        let (tree, root) = tree_with_string(0, 7);
        let comments = find_comments(r#""a/*//*/;" "#, 0, &tree, root);
        assert!(comments.is_empty());
    }

    #[test]
    fn nested_comment_delimiters_resolve_lazily() {
        let mut tree = Tree::new();
        let root = tree.push(NewNode::leaf(NodeKind::Lc, None, 0, 0));
        let comments = find_comments("a/*//*/;", 0, &tree, root);
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].kind, CommentKind::Block);
        assert_eq!(comments[0].text, "//");
    }

    #[test]
    fn line_comment_keeps_trailing_comment_like_text() {
        let mut tree = Tree::new();
        let root = tree.push(NewNode::leaf(NodeKind::Lc, None, 0, 0));
        let comments = find_comments("a//*b*/c", 0, &tree, root);
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].kind, CommentKind::Line);
        assert_eq!(comments[0].text, "*b*/c");
    }
}
