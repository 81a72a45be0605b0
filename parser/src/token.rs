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

//! The closed token-kind enumeration, the punctuator prefix trie, and the
//! keyword table. Built once, read-only thereafter -- see the
//! concurrency notes in `crate`'s top-level docs.

use jslcore_span::{sym, Offset, Symbol};
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// The closed set of token categories the tokenizer can produce.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Punctuators, longest-match first in the source table below.
    UnsignedLshAssign, // `<<<=` -- see DESIGN.md: kept for fidelity to the closed set, unused by the grammar.
    UrshAssign,        // `>>>=`
    StrictEq,          // `===`
    StrictNe,          // `!==`
    Ursh,              // `>>>`
    LshAssign,         // `<<=`
    RshAssign,         // `>>=`
    Le,
    Ge,
    Eq,
    Ne,
    Inc,
    Dec,
    Lsh,
    Rsh,
    AndAnd,
    OrOr,
    AddAssign,
    SubAssign,
    MulAssign,
    ModAssign,
    BitAndAssign,
    BitOrAssign,
    BitXorAssign,
    DivAssign,
    LBrace,
    RBrace,
    LParen,
    RParen,
    LBracket,
    RBracket,
    Dot,
    Semi,
    Comma,
    Lt,
    Gt,
    Plus,
    Minus,
    Star,
    Percent,
    Pipe,
    Amp,
    Caret,
    Bang,
    Tilde,
    Question,
    Colon,
    Assign,
    Slash,

    // Keywords.
    Break,
    Case,
    Catch,
    Continue,
    Default,
    Delete,
    Do,
    Else,
    False,
    Finally,
    For,
    Function,
    If,
    In,
    InstanceOf,
    New,
    Null,
    Return,
    Switch,
    This,
    Throw,
    True,
    TypeOf,
    Try,
    Var,
    Void,
    While,
    With,

    // Specials.
    Eof,
    Eol,
    Space,
    CComment,
    CppComment,
    HtmlComment,
    Name,
    Number,
    String,
    Regexp,
    Error,
}

impl TokenKind {
    /// A short human label for `expected_tok` diagnostics.
    pub fn label(self) -> &'static str {
        for (text, kind) in PUNCTUATOR_ENTRIES.iter() {
            if *kind == self {
                return text;
            }
        }
        for (text, kind) in KEYWORD_ENTRIES.iter() {
            if *kind == self {
                return text;
            }
        }
        match self {
            TokenKind::Eof => "end of input",
            TokenKind::Eol => "line terminator",
            TokenKind::Space => "whitespace",
            TokenKind::CComment => "block comment",
            TokenKind::CppComment => "line comment",
            TokenKind::HtmlComment => "html comment",
            TokenKind::Name => "identifier",
            TokenKind::Number => "number",
            TokenKind::String => "string",
            TokenKind::Regexp => "regular expression",
            TokenKind::Error => "error",
            _ => "token",
        }
    }

    pub fn is_significant(self) -> bool {
        !matches!(
            self,
            TokenKind::Space | TokenKind::Eol | TokenKind::CComment | TokenKind::CppComment | TokenKind::HtmlComment
        )
    }

    /// Whether this kind is one of the reserved keywords -- used to accept
    /// a keyword as an object-literal property name, as legacy engines do.
    pub fn is_keyword(self) -> bool {
        KEYWORD_ENTRIES.iter().any(|(_, k)| *k == self)
    }
}

/// A single lexeme: its category, its literal text if any, and its
/// absolute, inclusive-inclusive byte offsets.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub atom: Option<String>,
    pub start: Offset,
    pub end: Offset,
}

impl Token {
    pub fn new(kind: TokenKind, atom: Option<String>, start: Offset, end: Offset) -> Self {
        Self { kind, atom, start, end }
    }
}

const PUNCTUATOR_ENTRIES: &[(&str, TokenKind)] = &[
    ("<<<=", TokenKind::UnsignedLshAssign),
    (">>>=", TokenKind::UrshAssign),
    ("===", TokenKind::StrictEq),
    ("!==", TokenKind::StrictNe),
    (">>>", TokenKind::Ursh),
    ("<<=", TokenKind::LshAssign),
    (">>=", TokenKind::RshAssign),
    ("<=", TokenKind::Le),
    (">=", TokenKind::Ge),
    ("==", TokenKind::Eq),
    ("!=", TokenKind::Ne),
    ("++", TokenKind::Inc),
    ("--", TokenKind::Dec),
    ("<<", TokenKind::Lsh),
    (">>", TokenKind::Rsh),
    ("&&", TokenKind::AndAnd),
    ("||", TokenKind::OrOr),
    ("+=", TokenKind::AddAssign),
    ("-=", TokenKind::SubAssign),
    ("*=", TokenKind::MulAssign),
    ("%=", TokenKind::ModAssign),
    ("&=", TokenKind::BitAndAssign),
    ("|=", TokenKind::BitOrAssign),
    ("^=", TokenKind::BitXorAssign),
    ("/=", TokenKind::DivAssign),
    ("{", TokenKind::LBrace),
    ("}", TokenKind::RBrace),
    ("(", TokenKind::LParen),
    (")", TokenKind::RParen),
    ("[", TokenKind::LBracket),
    ("]", TokenKind::RBracket),
    (".", TokenKind::Dot),
    (";", TokenKind::Semi),
    (",", TokenKind::Comma),
    ("<", TokenKind::Lt),
    (">", TokenKind::Gt),
    ("+", TokenKind::Plus),
    ("-", TokenKind::Minus),
    ("*", TokenKind::Star),
    ("%", TokenKind::Percent),
    ("|", TokenKind::Pipe),
    ("&", TokenKind::Amp),
    ("^", TokenKind::Caret),
    ("!", TokenKind::Bang),
    ("~", TokenKind::Tilde),
    ("?", TokenKind::Question),
    (":", TokenKind::Colon),
    ("=", TokenKind::Assign),
    ("/", TokenKind::Slash),
];

const KEYWORD_ENTRIES: &[(&str, TokenKind)] = &[
    ("break", TokenKind::Break),
    ("case", TokenKind::Case),
    ("catch", TokenKind::Catch),
    ("continue", TokenKind::Continue),
    ("default", TokenKind::Default),
    ("delete", TokenKind::Delete),
    ("do", TokenKind::Do),
    ("else", TokenKind::Else),
    ("false", TokenKind::False),
    ("finally", TokenKind::Finally),
    ("for", TokenKind::For),
    ("function", TokenKind::Function),
    ("if", TokenKind::If),
    ("in", TokenKind::In),
    ("instanceof", TokenKind::InstanceOf),
    ("new", TokenKind::New),
    ("null", TokenKind::Null),
    ("return", TokenKind::Return),
    ("switch", TokenKind::Switch),
    ("this", TokenKind::This),
    ("throw", TokenKind::Throw),
    ("true", TokenKind::True),
    ("typeof", TokenKind::TypeOf),
    ("try", TokenKind::Try),
    ("var", TokenKind::Var),
    ("void", TokenKind::Void),
    ("while", TokenKind::While),
    ("with", TokenKind::With),
];

/// Keys on [`Symbol`] rather than `&str`: every keyword is interned once
/// when the table is built, and the word under test is interned the same
/// way, so the lookup itself is a `Symbol` comparison rather than a string
/// comparison.
pub fn keyword_lookup(word: &str) -> Option<TokenKind> {
    static TABLE: Lazy<HashMap<Symbol, TokenKind>> =
        Lazy::new(|| KEYWORD_ENTRIES.iter().map(|(text, kind)| (sym(text), *kind)).collect());
    TABLE.get(&sym(word)).copied()
}

/// A node in the punctuator prefix trie.
#[derive(Default)]
struct TrieNode {
    kind: Option<TokenKind>,
    children: HashMap<char, TrieNode>,
}

/// The punctuator prefix trie, supporting longest-match lookup so e.g.
/// `>>>=` is preferred over `>>>` which is preferred over `>>`.
pub struct PunctuatorTrie {
    root: TrieNode,
}

impl PunctuatorTrie {
    fn build(entries: &[(&str, TokenKind)]) -> Self {
        let mut root = TrieNode::default();
        for (text, kind) in entries {
            let mut node = &mut root;
            for c in text.chars() {
                node = node.children.entry(c).or_default();
            }
            node.kind = Some(*kind);
        }
        Self { root }
    }

    /// Returns the longest punctuator matching a prefix of `text`, and its
    /// byte length, or `None` if `text` doesn't start with one at all.
    pub fn longest_match(&self, text: &str) -> Option<(TokenKind, usize)> {
        let mut node = &self.root;
        let mut best = None;
        let mut len = 0usize;
        for c in text.chars() {
            match node.children.get(&c) {
                Some(next) => {
                    len += c.len_utf8();
                    node = next;
                    if let Some(kind) = node.kind {
                        best = Some((kind, len));
                    }
                }
                None => break,
            }
        }
        best
    }
}

pub static PUNCTUATORS: Lazy<PunctuatorTrie> = Lazy::new(|| PunctuatorTrie::build(PUNCTUATOR_ENTRIES));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn longest_match_prefers_longer_punctuators() {
        assert_eq!(PUNCTUATORS.longest_match(">>>=x"), Some((TokenKind::UrshAssign, 4)));
        assert_eq!(PUNCTUATORS.longest_match(">>>x"), Some((TokenKind::Ursh, 3)));
        assert_eq!(PUNCTUATORS.longest_match(">>x"), Some((TokenKind::Rsh, 2)));
        assert_eq!(PUNCTUATORS.longest_match(">x"), Some((TokenKind::Gt, 1)));
        assert_eq!(PUNCTUATORS.longest_match("xyz"), None);
    }

    #[test]
    fn keyword_lookup_matches_and_rejects() {
        assert_eq!(keyword_lookup("instanceof"), Some(TokenKind::InstanceOf));
        assert_eq!(keyword_lookup("instance"), None);
    }
}
