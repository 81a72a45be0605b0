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

//! The statement grammar: §4.3.3's dispatch over block/declaration/
//! control-flow forms, plus the function-declaration/expression tail
//! shared with `expression.rs`'s primary-expression dispatch.

use super::Parser;
use crate::kind::NodeKind;
use crate::node::{NewNode, NodeId};
use crate::opcode::Opcode;
use crate::token::{Token, TokenKind};
use jslcore_errors::{ErrorCode, ParserError, Result};
use jslcore_span::Offset;

/// Where a `function` keyword was found, which determines the opcode its
/// node carries -- see `Parser::top_level` for the nested/top-level split.
#[derive(Clone, Copy, PartialEq, Eq)]
pub(super) enum FunctionPosition {
    Expression,
    TopLevelDeclaration,
    NestedDeclaration,
}

impl<'a> Parser<'a> {
    /// Runs `body` with `top_level` set to `value`, restoring the previous
    /// value afterward regardless of how `body` returns.
    fn with_top_level<T>(&mut self, value: bool, body: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        let prior = self.top_level;
        self.top_level = value;
        let result = body(self);
        self.top_level = prior;
        result
    }

    pub(super) fn parse_statement(&mut self) -> Result<NodeId> {
        let tok = self.peek()?;
        match tok.kind {
            TokenKind::LBrace => self.with_top_level(false, Self::parse_block),
            TokenKind::Semi => {
                self.bump()?;
                Ok(self.push(NewNode::leaf(NodeKind::Semi, None, tok.start.to_usize(), tok.end.to_usize())))
            }
            TokenKind::Var => self.parse_var_statement(),
            TokenKind::If => self.parse_if_statement(),
            TokenKind::Do => self.parse_do_while_statement(),
            TokenKind::While => self.parse_while_statement(),
            TokenKind::For => self.parse_for_statement(),
            TokenKind::Continue => self.parse_continue_statement(),
            TokenKind::Break => self.parse_break_statement(),
            TokenKind::Return => self.parse_return_statement(),
            TokenKind::With => self.parse_with_statement(),
            TokenKind::Switch => self.parse_switch_statement(),
            TokenKind::Throw => self.parse_throw_statement(),
            TokenKind::Try => self.parse_try_statement(),
            TokenKind::Function => {
                let position = if self.top_level { FunctionPosition::TopLevelDeclaration } else { FunctionPosition::NestedDeclaration };
                self.bump()?;
                self.parse_function_tail(tok, position)
            }
            TokenKind::Name => {
                if self.peek2()?.kind == TokenKind::Colon {
                    self.parse_labelled_statement()
                } else {
                    self.parse_expression_statement()
                }
            }
            _ => self.parse_expression_statement(),
        }
    }

    /// A `{ ... }` block statement. Does not itself touch `top_level` --
    /// callers that need the nested semantics wrap this with
    /// [`Parser::with_top_level`].
    fn parse_block(&mut self) -> Result<NodeId> {
        let lb = self.expect(TokenKind::LBrace)?;
        let mut children = Vec::new();
        while !self.check(TokenKind::RBrace)? {
            children.push(Some(self.parse_statement()?));
        }
        let rb = self.expect(TokenKind::RBrace)?;
        Ok(self.push(NewNode::with_children(NodeKind::Lc, None, lb.start.to_usize(), rb.end.to_usize(), children)))
    }

    /// A statement appearing nested inside another statement's body
    /// (the `then`/`else` of an `if`, a loop body, `with`'s body, a `case`
    /// arm, ...). Always clears `top_level`, whether or not it's a block.
    fn parse_nested_statement(&mut self) -> Result<NodeId> {
        self.with_top_level(false, Self::parse_statement)
    }

    fn parse_var_statement(&mut self) -> Result<NodeId> {
        let var_tok = self.expect(TokenKind::Var)?;
        let mut children = Vec::new();
        loop {
            let name_tok = self.expect(TokenKind::Name)?;
            let mut name_node = NewNode::leaf(NodeKind::Name, Some(Opcode::Name), name_tok.start.to_usize(), name_tok.end.to_usize());
            name_node.atom = name_tok.atom;
            let mut end = name_tok.end.to_usize();
            let decl = if self.eat(TokenKind::Assign)?.is_some() {
                let init = self.parse_assignment_expression()?;
                end = self.tree.get(init).end_offset.unwrap();
                let name_id = self.push(name_node);
                self.push(NewNode::with_children(NodeKind::Assign, Some(Opcode::Assign), name_tok.start.to_usize(), end, vec![Some(name_id), Some(init)]))
            } else {
                self.push(name_node)
            };
            children.push(Some(decl));
            if self.eat(TokenKind::Comma)?.is_none() {
                break;
            }
        }
        let tentative_end = Offset::new(self.tree.get(*children.last().unwrap().as_ref().unwrap()).end_offset.unwrap() as u32);
        let (end, no_semi) = self.auto_semicolon(tentative_end)?;
        let mut node = NewNode::with_children(NodeKind::Var, None, var_tok.start.to_usize(), end.to_usize(), children);
        node.no_semi = no_semi;
        Ok(self.push(node))
    }

    fn parse_if_statement(&mut self) -> Result<NodeId> {
        let if_tok = self.expect(TokenKind::If)?;
        self.expect(TokenKind::LParen)?;
        let cond = self.parse_expression()?;
        self.expect(TokenKind::RParen)?;
        let then_branch = self.parse_nested_statement()?;
        let mut end = self.tree.get(then_branch).end_offset.unwrap();
        let mut children = vec![Some(cond), Some(then_branch)];
        if self.eat(TokenKind::Else)?.is_some() {
            let else_branch = self.parse_nested_statement()?;
            end = self.tree.get(else_branch).end_offset.unwrap();
            children.push(Some(else_branch));
        }
        Ok(self.push(NewNode::with_children(NodeKind::If, None, if_tok.start.to_usize(), end, children)))
    }

    fn parse_do_while_statement(&mut self) -> Result<NodeId> {
        let do_tok = self.expect(TokenKind::Do)?;
        let body = self.parse_nested_statement()?;
        self.expect(TokenKind::While)?;
        self.expect(TokenKind::LParen)?;
        let cond = self.parse_expression()?;
        let rp = self.expect(TokenKind::RParen)?;
        let (end, no_semi) = self.auto_semicolon(rp.end)?;
        let mut node = NewNode::with_children(NodeKind::Do, None, do_tok.start.to_usize(), end.to_usize(), vec![Some(body), Some(cond)]);
        node.no_semi = no_semi;
        Ok(self.push(node))
    }

    fn parse_while_statement(&mut self) -> Result<NodeId> {
        let while_tok = self.expect(TokenKind::While)?;
        self.expect(TokenKind::LParen)?;
        let cond = self.parse_expression()?;
        self.expect(TokenKind::RParen)?;
        let body = self.parse_nested_statement()?;
        let end = self.tree.get(body).end_offset.unwrap();
        Ok(self.push(NewNode::with_children(NodeKind::While, None, while_tok.start.to_usize(), end, vec![Some(cond), Some(body)])))
    }

    /// Classical and `for-in` loops share a leading `for (` and diverge on
    /// whether `in` follows the first clause. Both clear `allow_in` while
    /// parsing that first clause so a nested `in` can only be the loop's
    /// own, restoring it on every return path -- a header clause can
    /// itself contain a fully nested `for` statement, which must not
    /// inherit a stuck `allow_in = false`.
    ///
    /// The first clause -- a `var` declarator list or a bare expression --
    /// is always parsed in full before checking for a following `in`,
    /// rather than peeking ahead for a bare `NAME`: the left-hand side of
    /// a `for-in` can be any assignment target (`for (a.b in obj)`,
    /// `for (a[i] in obj)`, `for ((x) in obj)`), not just a name.
    fn parse_for_statement(&mut self) -> Result<NodeId> {
        let for_tok = self.expect(TokenKind::For)?;
        self.expect(TokenKind::LParen)?;
        let prior_allow_in = self.allow_in;
        self.allow_in = false;
        let result = self.parse_for_header_and_body(for_tok);
        self.allow_in = prior_allow_in;
        result
    }

    fn parse_for_header_and_body(&mut self, for_tok: Token) -> Result<NodeId> {
        if self.check(TokenKind::Var)? {
            let var_tok = self.bump()?;
            let mut decls = vec![Some(self.parse_var_declarator()?)];
            while self.eat(TokenKind::Comma)?.is_some() {
                decls.push(Some(self.parse_var_declarator()?));
            }
            let end = self.tree.get(*decls.last().unwrap().as_ref().unwrap()).end_offset.unwrap();
            let left = self.push(NewNode::with_children(NodeKind::Var, None, var_tok.start.to_usize(), end, decls));
            if self.check(TokenKind::In)? {
                return self.finish_for_in(for_tok, left);
            }
            return self.finish_classical_for(for_tok, Some(left));
        }

        if self.check(TokenKind::Semi)? {
            return self.finish_classical_for(for_tok, None);
        }

        let left = self.parse_expression()?;
        if self.check(TokenKind::In)? {
            return self.finish_for_in(for_tok, left);
        }
        self.finish_classical_for(for_tok, Some(left))
    }

    fn finish_for_in(&mut self, for_tok: Token, left: NodeId) -> Result<NodeId> {
        self.bump()?; // `in`
        self.tree.mark_left_hand_side(left);
        self.allow_in = true;
        let obj = self.parse_expression()?;
        self.expect(TokenKind::RParen)?;
        let body = self.parse_nested_statement()?;
        let end = self.tree.get(body).end_offset.unwrap();
        Ok(self.push(NewNode::with_children(NodeKind::For, Some(Opcode::ForIn), for_tok.start.to_usize(), end, vec![Some(left), Some(obj), Some(body)])))
    }

    /// Only the init clause is parsed with `in` suppressed (by the caller,
    /// before `self.allow_in` is restored on the way in); the condition and
    /// update clauses allow it like any other expression, since only the
    /// init clause can be confused with a `for-in` header.
    fn finish_classical_for(&mut self, for_tok: Token, init: Option<NodeId>) -> Result<NodeId> {
        self.expect(TokenKind::Semi)?;
        self.allow_in = true;
        let cond = if self.check(TokenKind::Semi)? { None } else { Some(self.parse_expression()?) };
        self.expect(TokenKind::Semi)?;
        let update = if self.check(TokenKind::RParen)? { None } else { Some(self.parse_expression()?) };
        self.expect(TokenKind::RParen)?;
        let header = self.push(NewNode::reserved(Some(Opcode::LeaveBlock), vec![init, cond, update]));
        let body = self.parse_nested_statement()?;
        let end = self.tree.get(body).end_offset.unwrap();
        Ok(self.push(NewNode::with_children(NodeKind::For, None, for_tok.start.to_usize(), end, vec![Some(header), Some(body)])))
    }

    fn parse_var_declarator(&mut self) -> Result<NodeId> {
        let name_tok = self.expect(TokenKind::Name)?;
        let mut name_node = NewNode::leaf(NodeKind::Name, Some(Opcode::Name), name_tok.start.to_usize(), name_tok.end.to_usize());
        name_node.atom = name_tok.atom;
        if self.eat(TokenKind::Assign)?.is_some() {
            let value = self.parse_assignment_expression()?;
            let end = self.tree.get(value).end_offset.unwrap();
            let name_id = self.push(name_node);
            Ok(self.push(NewNode::with_children(NodeKind::Assign, Some(Opcode::Assign), name_tok.start.to_usize(), end, vec![Some(name_id), Some(value)])))
        } else {
            Ok(self.push(name_node))
        }
    }

    /// Shared by `continue`/`break`: an optional label, restricted to the
    /// same source line as the keyword.
    fn parse_optional_same_line_label(&mut self) -> Result<Option<Token>> {
        let next = self.peek_same_line()?;
        if next.kind == TokenKind::Name {
            Ok(Some(self.bump()?))
        } else {
            Ok(None)
        }
    }

    fn parse_continue_statement(&mut self) -> Result<NodeId> {
        let tok = self.expect(TokenKind::Continue)?;
        let label = self.parse_optional_same_line_label()?;
        let tentative_end = label.as_ref().map(|l| l.end).unwrap_or(tok.end);
        let (end, no_semi) = self.auto_semicolon(tentative_end)?;
        let mut node = NewNode::leaf(NodeKind::Continue, None, tok.start.to_usize(), end.to_usize());
        node.atom = label.and_then(|l| l.atom);
        node.no_semi = no_semi;
        Ok(self.push(node))
    }

    fn parse_break_statement(&mut self) -> Result<NodeId> {
        let tok = self.expect(TokenKind::Break)?;
        let label = self.parse_optional_same_line_label()?;
        let tentative_end = label.as_ref().map(|l| l.end).unwrap_or(tok.end);
        let (end, no_semi) = self.auto_semicolon(tentative_end)?;
        let mut node = NewNode::leaf(NodeKind::Break, None, tok.start.to_usize(), end.to_usize());
        node.atom = label.and_then(|l| l.atom);
        node.no_semi = no_semi;
        Ok(self.push(node))
    }

    fn parse_return_statement(&mut self) -> Result<NodeId> {
        let tok = self.expect(TokenKind::Return)?;
        let next = self.peek_same_line()?;
        let (value, tentative_end) = if matches!(next.kind, TokenKind::Eol | TokenKind::Semi | TokenKind::RBrace | TokenKind::Eof) {
            (None, tok.end)
        } else {
            let expr = self.parse_expression()?;
            let end = Offset::new(self.tree.get(expr).end_offset.unwrap() as u32);
            (Some(expr), end)
        };
        let (end, no_semi) = self.auto_semicolon(tentative_end)?;
        let mut node = NewNode::with_children(NodeKind::Return, None, tok.start.to_usize(), end.to_usize(), vec![value]);
        node.no_semi = no_semi;
        Ok(self.push(node))
    }

    fn parse_with_statement(&mut self) -> Result<NodeId> {
        let tok = self.expect(TokenKind::With)?;
        self.expect(TokenKind::LParen)?;
        let obj = self.parse_expression()?;
        self.expect(TokenKind::RParen)?;
        let body = self.parse_nested_statement()?;
        let end = self.tree.get(body).end_offset.unwrap();
        Ok(self.push(NewNode::with_children(NodeKind::With, None, tok.start.to_usize(), end, vec![Some(obj), Some(body)])))
    }

    fn parse_switch_statement(&mut self) -> Result<NodeId> {
        let tok = self.expect(TokenKind::Switch)?;
        self.expect(TokenKind::LParen)?;
        let disc = self.parse_expression()?;
        self.expect(TokenKind::RParen)?;
        self.expect(TokenKind::LBrace)?;
        let mut children = vec![Some(disc)];
        let mut seen_default = false;
        while !self.check(TokenKind::RBrace)? {
            children.push(Some(self.parse_case_clause(&mut seen_default)?));
        }
        let rb = self.expect(TokenKind::RBrace)?;
        Ok(self.push(NewNode::with_children(NodeKind::Switch, None, tok.start.to_usize(), rb.end.to_usize(), children)))
    }

    /// One `case expr:`/`default:` arm. The arm's statement list (possibly
    /// empty) is bundled into a synthetic block so each arm carries
    /// exactly one body child, the way the rest of the grammar's block
    /// constructs do.
    fn parse_case_clause(&mut self, seen_default: &mut bool) -> Result<NodeId> {
        let is_default = self.check(TokenKind::Default)?;
        if is_default {
            if *seen_default {
                let tok = self.peek()?;
                return Err(ParserError::new(tok.start, ErrorCode::InvalidCase));
            }
            *seen_default = true;
        }
        let start_tok = self.bump()?; // `case` or `default`
        let test = if is_default { None } else { Some(self.parse_expression()?) };
        let colon = self.expect(TokenKind::Colon)?;
        let mut stmts = Vec::new();
        while !matches!(self.peek()?.kind, TokenKind::Case | TokenKind::Default | TokenKind::RBrace) {
            stmts.push(Some(self.with_top_level(false, Self::parse_statement)?));
        }
        let (block_start, block_end) = match (stmts.first(), stmts.last()) {
            (Some(first), Some(last)) => (self.tree.get(first.unwrap()).start_offset.unwrap(), self.tree.get(last.unwrap()).end_offset.unwrap()),
            _ => (colon.end.to_usize(), colon.end.to_usize()),
        };
        let block = self.push(NewNode::with_children(NodeKind::Lc, None, block_start, block_end, stmts));
        if is_default {
            Ok(self.push(NewNode::with_children(NodeKind::Default, None, start_tok.start.to_usize(), block_end, vec![Some(block)])))
        } else {
            Ok(self.push(NewNode::with_children(NodeKind::Case, None, start_tok.start.to_usize(), block_end, vec![test, Some(block)])))
        }
    }

    fn parse_throw_statement(&mut self) -> Result<NodeId> {
        let tok = self.expect(TokenKind::Throw)?;
        let next = self.peek_same_line()?;
        if matches!(next.kind, TokenKind::Eol | TokenKind::Semi | TokenKind::RBrace | TokenKind::Eof) {
            return Err(ParserError::new(next.start, ErrorCode::ExpectedStatement));
        }
        let expr = self.parse_expression()?;
        let tentative_end = Offset::new(self.tree.get(expr).end_offset.unwrap() as u32);
        let (end, no_semi) = self.auto_semicolon(tentative_end)?;
        let mut node = NewNode::with_children(NodeKind::Throw, None, tok.start.to_usize(), end.to_usize(), vec![Some(expr)]);
        node.no_semi = no_semi;
        Ok(self.push(node))
    }

    /// `try` requires at least one of `catch`/`finally`. The `catch`
    /// clause's bound name is wrapped in a [`NodeKind::LexicalScope`] so
    /// downstream scope tracking can see it's block-local to the handler.
    fn parse_try_statement(&mut self) -> Result<NodeId> {
        let tok = self.expect(TokenKind::Try)?;
        let try_block = self.with_top_level(false, Self::parse_block)?;
        let mut end = self.tree.get(try_block).end_offset.unwrap();

        let catch_scope = if self.check(TokenKind::Catch)? {
            let catch_tok = self.bump()?;
            self.expect(TokenKind::LParen)?;
            let name_tok = self.expect(TokenKind::Name)?;
            self.expect(TokenKind::RParen)?;
            let body = self.with_top_level(false, Self::parse_block)?;
            let body_end = self.tree.get(body).end_offset.unwrap();
            let mut name_node = NewNode::leaf(NodeKind::Name, Some(Opcode::Name), name_tok.start.to_usize(), name_tok.end.to_usize());
            name_node.atom = name_tok.atom;
            let name_id = self.push(name_node);
            let catch = self.push(NewNode::with_children(NodeKind::Catch, None, catch_tok.start.to_usize(), body_end, vec![Some(name_id), Some(body)]));
            end = body_end;
            Some(self.push(NewNode::with_children(NodeKind::LexicalScope, None, catch_tok.start.to_usize(), body_end, vec![Some(catch)])))
        } else {
            None
        };

        let finally_block = if self.eat(TokenKind::Finally)?.is_some() {
            let body = self.with_top_level(false, Self::parse_block)?;
            end = self.tree.get(body).end_offset.unwrap();
            Some(body)
        } else {
            None
        };

        if catch_scope.is_none() && finally_block.is_none() {
            return Err(ParserError::new(tok.start, ErrorCode::InvalidCatch));
        }

        Ok(self.push(NewNode::with_children(NodeKind::Try, None, tok.start.to_usize(), end, vec![Some(try_block), catch_scope, finally_block])))
    }

    fn parse_labelled_statement(&mut self) -> Result<NodeId> {
        let name_tok = self.expect(TokenKind::Name)?;
        self.expect(TokenKind::Colon)?;
        let body = self.parse_nested_statement()?;
        let end = self.tree.get(body).end_offset.unwrap();
        let mut node = NewNode::with_children(NodeKind::Label, None, name_tok.start.to_usize(), end, vec![Some(body)]);
        node.atom = name_tok.atom;
        Ok(self.push(node))
    }

    fn parse_expression_statement(&mut self) -> Result<NodeId> {
        let expr = self.parse_expression()?;
        let tentative_end = Offset::new(self.tree.get(expr).end_offset.unwrap() as u32);
        let (end, no_semi) = self.auto_semicolon(tentative_end)?;
        let mut node = NewNode::with_children(NodeKind::Semi, None, self.tree.get(expr).start_offset.unwrap(), end.to_usize(), vec![Some(expr)]);
        node.no_semi = no_semi;
        Ok(self.push(node))
    }

    /// The shared tail of a `function` keyword already consumed up through
    /// (but not including) the optional name: formal parameters and body.
    /// Used both for declarations (`parse_statement`) and expressions
    /// (`expression.rs`'s primary-expression dispatch, which bumps the
    /// `function` token via `bump_regexp` before calling in).
    pub(super) fn parse_function_tail(&mut self, fn_tok: Token, position: FunctionPosition) -> Result<NodeId> {
        let name = if self.check(TokenKind::Name)? { Some(self.bump()?) } else { None };
        let params = self.parse_formal_parameters()?;
        let body = self.with_top_level(true, Self::parse_block)?;
        let end = self.tree.get(body).end_offset.unwrap();
        let opcode = match (position, &name) {
            (FunctionPosition::Expression, Some(_)) => Opcode::NamedFunObj,
            (FunctionPosition::Expression, None) => Opcode::AnonFunObj,
            (FunctionPosition::TopLevelDeclaration, _) => Opcode::Closure,
            (FunctionPosition::NestedDeclaration, _) => Opcode::NestedClosure,
        };
        let mut node = NewNode::with_children(NodeKind::Function, Some(opcode), fn_tok.start.to_usize(), end, vec![Some(body)]);
        node.atom = name.and_then(|t| t.atom);
        node.fn_args = Some(params);
        Ok(self.push(node))
    }

    fn parse_formal_parameters(&mut self) -> Result<Vec<NodeId>> {
        self.expect(TokenKind::LParen)?;
        let mut params = Vec::new();
        if !self.check(TokenKind::RParen)? {
            loop {
                let tok = self.expect(TokenKind::Name)?;
                let mut node = NewNode::leaf(NodeKind::Name, Some(Opcode::Name), tok.start.to_usize(), tok.end.to_usize());
                node.atom = tok.atom;
                params.push(self.push(node));
                if self.eat(TokenKind::Comma)?.is_none() {
                    break;
                }
            }
        }
        self.expect(TokenKind::RParen)?;
        Ok(params)
    }
}
