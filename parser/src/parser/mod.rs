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

//! The recursive-descent parser: one routine per grammar nonterminal,
//! built on top of [`crate::tokenizer::Tokenizer`] and assembling a
//! [`crate::node::Tree`].
//!
//! Mirrors the shape of `leo_parser::ParserContext` -- a thin struct
//! wrapping the token source with `bump`/`check`/`eat`/`expect` helpers --
//! but the helpers return [`Result`] directly rather than panicking or
//! going through a side-channel, since the propagation policy here is
//! "first error aborts the parse" rather than Leo's error-recovery model.

mod expression;
mod statement;

use crate::kind::NodeKind;
use crate::node::{NewNode, NodeId, Tree};
use crate::token::{Token, TokenKind};
use crate::tokenizer::Tokenizer;
use crate::version::Version;
use jslcore_errors::emitter::Handler;
use jslcore_errors::{ErrorCode, ParserError, Result};
use jslcore_span::Offset;

/// The root of a completed parse, along with the arena that owns every
/// node in it.
pub struct Parsed {
    pub tree: Tree,
    pub root: NodeId,
}

/// Parses `text` (a fragment whose first byte is absolute offset
/// `base_offset` in some enclosing document) under the given language
/// `version`. On any lexical or syntactic error, `on_error` is invoked
/// exactly once with the offending offset and diagnostic code, and `None`
/// is returned. `version`-gated E4X deprecation, if applicable, is
/// reported through the same callback before parsing begins and does not
/// prevent a parse from succeeding.
pub fn parse(text: &str, version: Version, on_error: impl FnMut(Offset, ErrorCode), base_offset: usize) -> Option<Parsed> {
    let handler = Handler::new(on_error);
    if version.supports_e4x() {
        handler.warn(Offset::new(base_offset as u32), ErrorCode::E4xDeprecated);
    }
    let mut parser = Parser::new(text, base_offset);
    match parser.parse_program() {
        Ok(root) => Some(Parsed { tree: parser.tree, root }),
        Err(e) => {
            handler.emit_once(e.offset, e.code);
            None
        }
    }
}

pub(crate) struct Parser<'a> {
    tokens: Tokenizer<'a>,
    tree: Tree,
    /// Suppresses recognition of the `in` relational operator; cleared
    /// while parsing the init/test/update clauses of a classical `for`
    /// header so that `in` there can only mean `for (x in y)`.
    allow_in: bool,
    /// True at the top of the program and at the top of a function body,
    /// where a function declaration is the ordinary case. Cleared while
    /// parsing any nested statement, so a `function` declaration found
    /// there is recorded as a non-standard hoisted closure (see
    /// [`Opcode::NestedClosure`]).
    top_level: bool,
}

impl<'a> Parser<'a> {
    fn new(text: &'a str, base_offset: usize) -> Self {
        Self { tokens: Tokenizer::new(text, base_offset), tree: Tree::new(), allow_in: true, top_level: true }
    }

    fn push(&mut self, node: NewNode) -> NodeId {
        self.tree.push(node)
    }

    fn peek(&mut self) -> Result<Token> {
        self.tokens.peek()
    }

    fn peek2(&mut self) -> Result<Token> {
        self.tokens.peek2()
    }

    fn peek_same_line(&mut self) -> Result<Token> {
        self.tokens.peek_same_line()
    }

    fn check(&mut self, kind: TokenKind) -> Result<bool> {
        Ok(self.peek()?.kind == kind)
    }

    /// Consumes and returns the next significant token, without regular-
    /// expression rescanning.
    fn bump(&mut self) -> Result<Token> {
        self.tokens.advance()
    }

    /// Like [`Parser::bump`], but if the pending token is `/` or `/=`,
    /// rescans it as a `REGEXP` literal first. Called only from primary-
    /// expression position, the one place a regular expression can start.
    fn bump_regexp(&mut self) -> Result<Token> {
        self.tokens.advance_with_regexp()
    }

    fn eat(&mut self, kind: TokenKind) -> Result<Option<Token>> {
        if self.check(kind)? { Ok(Some(self.bump()?)) } else { Ok(None) }
    }

    /// Eats the expected `kind`, or fails at the offset of whatever token
    /// actually showed up: `unexpected_eof` if the input simply ran out
    /// (the "more text might fix this" case the compilability probe
    /// looks for), `expected_tok` otherwise.
    fn expect(&mut self, kind: TokenKind) -> Result<Token> {
        match self.eat(kind)? {
            Some(tok) => Ok(tok),
            None => {
                let found = self.peek()?;
                if found.kind == TokenKind::Eof {
                    return Err(ParserError::new(found.start, ErrorCode::UnexpectedEof));
                }
                Err(ParserError::new(found.start, ErrorCode::ExpectedTok { token: kind.label().to_string() }))
            }
        }
    }

    /// Implements §4.3.1: called at every statement-termination site with
    /// the tentative end offset of the statement so far. Returns the
    /// actual end offset and whether ASI applied (`no_semi`).
    fn auto_semicolon(&mut self, tentative_end: Offset) -> Result<(Offset, bool)> {
        let next = self.peek_same_line()?;
        match next.kind {
            TokenKind::Eof | TokenKind::Eol | TokenKind::RBrace => Ok((tentative_end, true)),
            TokenKind::Semi => {
                let semi = self.bump()?;
                Ok((semi.end, false))
            }
            _ => Err(ParserError::new(next.start, ErrorCode::SemiBeforeStmnt)),
        }
    }

    fn parse_program(&mut self) -> Result<NodeId> {
        let start = Offset::ZERO;
        let mut children = Vec::new();
        loop {
            if self.peek()?.kind == TokenKind::Eof {
                break;
            }
            children.push(Some(self.parse_statement()?));
        }
        let end = children.last().map(|c| self.tree.get(c.unwrap()).end_offset.unwrap_or(0)).unwrap_or(0);
        let node = NewNode::with_children(NodeKind::Lc, None, start.to_usize(), end, children);
        let root = self.push(node);
        self.tree.set_root(root);
        Ok(root)
    }
}
