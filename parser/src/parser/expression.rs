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

//! The expression grammar: §4.3.2's precedence ladder, primary
//! expressions (literals, array/object literals, function expressions,
//! parenthesized groups), and the `new`/member/call trailer chain.

use super::Parser;
use crate::kind::NodeKind;
use crate::node::{NewNode, NodeId};
use crate::opcode::Opcode;
use crate::token::{Token, TokenKind};
use jslcore_errors::{ErrorCode, ParserError, Result};

/// Parses the numeric text a `NUMBER` token carries into its value, per
/// §3's invariant: base-16 for a `0x`/`0X` prefix, legacy base-8 for a
/// leading `0` followed only by octal digits, decimal otherwise.
fn parse_numeric_literal(text: &str) -> f64 {
    if let Some(hex) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        return u64::from_str_radix(hex, 16).map(|v| v as f64).unwrap_or(f64::NAN);
    }
    if text.len() > 1 && text.starts_with('0') && text[1..].chars().all(|c| ('0'..='7').contains(&c)) {
        return u64::from_str_radix(&text[1..], 8).map(|v| v as f64).unwrap_or(f64::NAN);
    }
    text.parse::<f64>().unwrap_or(f64::NAN)
}

const ASSIGN_OPS: &[(TokenKind, Opcode)] = &[
    (TokenKind::Assign, Opcode::Assign),
    (TokenKind::AddAssign, Opcode::AddAssign),
    (TokenKind::SubAssign, Opcode::SubAssign),
    (TokenKind::MulAssign, Opcode::MulAssign),
    (TokenKind::DivAssign, Opcode::DivAssign),
    (TokenKind::ModAssign, Opcode::ModAssign),
    (TokenKind::LshAssign, Opcode::LshAssign),
    (TokenKind::RshAssign, Opcode::RshAssign),
    (TokenKind::UrshAssign, Opcode::UrshAssign),
    (TokenKind::BitAndAssign, Opcode::BitAndAssign),
    (TokenKind::BitOrAssign, Opcode::BitOrAssign),
    (TokenKind::BitXorAssign, Opcode::BitXorAssign),
];

impl<'a> Parser<'a> {
    /// The full expression grammar, including the top-level comma
    /// operator. Used at statement level and wherever a comma can't be
    /// confused with an argument or element separator.
    pub(super) fn parse_expression(&mut self) -> Result<NodeId> {
        let mut left = self.parse_assignment_expression()?;
        while self.eat(TokenKind::Comma)?.is_some() {
            let right = self.parse_assignment_expression()?;
            let start = self.tree.get(left).start_offset.unwrap();
            let end = self.tree.get(right).end_offset.unwrap();
            left = self.push(NewNode::with_children(NodeKind::Comma, None, start, end, vec![Some(left), Some(right)]));
        }
        Ok(left)
    }

    /// `AssignmentExpression`: the grammar level used for array elements,
    /// call arguments, object-literal values, and anywhere else a comma
    /// would otherwise be ambiguous with a separator.
    pub(super) fn parse_assignment_expression(&mut self) -> Result<NodeId> {
        let left = self.parse_conditional_expression()?;
        if let Some(opcode) = self.eat_assign_op()? {
            self.validate_assignment_target(left)?;
            let right = self.parse_assignment_expression()?;
            let start = self.tree.get(left).start_offset.unwrap();
            let end = self.tree.get(right).end_offset.unwrap();
            return Ok(self.push(NewNode::with_children(NodeKind::Assign, Some(opcode), start, end, vec![Some(left), Some(right)])));
        }
        Ok(left)
    }

    fn eat_assign_op(&mut self) -> Result<Option<Opcode>> {
        let kind = self.peek()?.kind;
        match ASSIGN_OPS.iter().find(|(k, _)| *k == kind) {
            Some(&(_, op)) => {
                self.bump()?;
                Ok(Some(op))
            }
            None => Ok(None),
        }
    }

    /// Unwraps `left` through any [`NodeKind::Group`] wrappers and checks
    /// the result is one of `{NAME, dotted-access, indexed-access, call}`,
    /// rewriting its opcode to the "set" form in place. Fails
    /// `invalid_assign` otherwise.
    fn validate_assignment_target(&mut self, mut id: NodeId) -> Result<()> {
        loop {
            let node = self.tree.get(id);
            if node.kind != NodeKind::Group {
                break;
            }
            id = node.children[0].expect("Group always wraps exactly one expression");
        }
        let node = self.tree.get(id);
        if !matches!(node.kind, NodeKind::Name | NodeKind::Dot | NodeKind::Index | NodeKind::Call) {
            let start = node.start_offset.unwrap_or(0) as u32;
            return Err(ParserError::new(start.into(), ErrorCode::InvalidAssign));
        }
        self.tree.mark_left_hand_side(id);
        self.tree.rewrite_to_set_form(id);
        Ok(())
    }

    fn parse_conditional_expression(&mut self) -> Result<NodeId> {
        let cond = self.parse_logical_or_expression()?;
        if self.eat(TokenKind::Question)?.is_some() {
            let then_branch = self.parse_assignment_expression()?;
            self.expect(TokenKind::Colon)?;
            let else_branch = self.parse_assignment_expression()?;
            let start = self.tree.get(cond).start_offset.unwrap();
            let end = self.tree.get(else_branch).end_offset.unwrap();
            return Ok(self.push(NewNode::with_children(NodeKind::Hook, None, start, end, vec![Some(cond), Some(then_branch), Some(else_branch)])));
        }
        Ok(cond)
    }

    /// Parses a left-associative binary-operator chain: `next` parses one
    /// operand, `ops` maps the punctuator/keyword that may follow to the
    /// node kind and opcode of the binary node it builds.
    fn parse_left_assoc(&mut self, next: fn(&mut Self) -> Result<NodeId>, ops: &[(TokenKind, NodeKind, Opcode)]) -> Result<NodeId> {
        let mut left = next(self)?;
        loop {
            let kind = self.peek()?.kind;
            let Some(&(_, node_kind, opcode)) = ops.iter().find(|(k, _, _)| *k == kind) else { break };
            self.bump()?;
            let right = next(self)?;
            let start = self.tree.get(left).start_offset.unwrap();
            let end = self.tree.get(right).end_offset.unwrap();
            left = self.push(NewNode::with_children(node_kind, Some(opcode), start, end, vec![Some(left), Some(right)]));
        }
        Ok(left)
    }

    fn parse_logical_or_expression(&mut self) -> Result<NodeId> {
        self.parse_left_assoc(Self::parse_logical_and_expression, &[(TokenKind::OrOr, NodeKind::Or, Opcode::Or)])
    }

    fn parse_logical_and_expression(&mut self) -> Result<NodeId> {
        self.parse_left_assoc(Self::parse_bitor_expression, &[(TokenKind::AndAnd, NodeKind::And, Opcode::And)])
    }

    fn parse_bitor_expression(&mut self) -> Result<NodeId> {
        self.parse_left_assoc(Self::parse_bitxor_expression, &[(TokenKind::Pipe, NodeKind::BitOr, Opcode::BitOr)])
    }

    fn parse_bitxor_expression(&mut self) -> Result<NodeId> {
        self.parse_left_assoc(Self::parse_bitand_expression, &[(TokenKind::Caret, NodeKind::BitXor, Opcode::BitXor)])
    }

    fn parse_bitand_expression(&mut self) -> Result<NodeId> {
        self.parse_left_assoc(Self::parse_equality_expression, &[(TokenKind::Amp, NodeKind::BitAnd, Opcode::BitAnd)])
    }

    fn parse_equality_expression(&mut self) -> Result<NodeId> {
        self.parse_left_assoc(
            Self::parse_relational_expression,
            &[
                (TokenKind::Eq, NodeKind::EqOp, Opcode::Eq),
                (TokenKind::Ne, NodeKind::EqOp, Opcode::Ne),
                (TokenKind::StrictEq, NodeKind::EqOp, Opcode::NewEq),
                (TokenKind::StrictNe, NodeKind::EqOp, Opcode::NewNe),
            ],
        )
    }

    /// Handled by hand rather than through [`Parser::parse_left_assoc`]:
    /// `in` only counts as an operator here when `allow_in` is set (it's
    /// suppressed inside a classical `for` header).
    fn parse_relational_expression(&mut self) -> Result<NodeId> {
        let mut left = self.parse_shift_expression()?;
        loop {
            let kind = self.peek()?.kind;
            let opcode = match kind {
                TokenKind::Lt => Opcode::Lt,
                TokenKind::Gt => Opcode::Gt,
                TokenKind::Le => Opcode::Le,
                TokenKind::Ge => Opcode::Ge,
                TokenKind::InstanceOf => Opcode::InstanceOf,
                TokenKind::In if self.allow_in => Opcode::In,
                _ => break,
            };
            self.bump()?;
            let right = self.parse_shift_expression()?;
            let start = self.tree.get(left).start_offset.unwrap();
            let end = self.tree.get(right).end_offset.unwrap();
            left = self.push(NewNode::with_children(NodeKind::RelOp, Some(opcode), start, end, vec![Some(left), Some(right)]));
        }
        Ok(left)
    }

    fn parse_shift_expression(&mut self) -> Result<NodeId> {
        self.parse_left_assoc(
            Self::parse_additive_expression,
            &[(TokenKind::Lsh, NodeKind::ShOp, Opcode::Lsh), (TokenKind::Rsh, NodeKind::ShOp, Opcode::Rsh), (TokenKind::Ursh, NodeKind::ShOp, Opcode::Ursh)],
        )
    }

    fn parse_additive_expression(&mut self) -> Result<NodeId> {
        self.parse_left_assoc(Self::parse_multiplicative_expression, &[(TokenKind::Plus, NodeKind::Plus, Opcode::Add), (TokenKind::Minus, NodeKind::Plus, Opcode::Sub)])
    }

    fn parse_multiplicative_expression(&mut self) -> Result<NodeId> {
        self.parse_left_assoc(
            Self::parse_unary_expression,
            &[(TokenKind::Star, NodeKind::Star, Opcode::Mul), (TokenKind::Slash, NodeKind::Star, Opcode::Div), (TokenKind::Percent, NodeKind::Star, Opcode::Mod)],
        )
    }

    fn parse_unary_expression(&mut self) -> Result<NodeId> {
        let tok = self.peek()?;
        match tok.kind {
            TokenKind::Delete => {
                self.bump()?;
                let expr = self.parse_unary_expression()?;
                let end = self.tree.get(expr).end_offset.unwrap();
                Ok(self.push(NewNode::with_children(NodeKind::Delete, None, tok.start.to_usize(), end, vec![Some(expr)])))
            }
            TokenKind::Void | TokenKind::TypeOf | TokenKind::Plus | TokenKind::Minus | TokenKind::Tilde | TokenKind::Bang => {
                self.bump()?;
                let opcode = match tok.kind {
                    TokenKind::Void => Opcode::Void,
                    TokenKind::TypeOf => Opcode::TypeOf,
                    TokenKind::Plus => Opcode::Pos,
                    TokenKind::Minus => Opcode::Neg,
                    TokenKind::Tilde => Opcode::BitNot,
                    TokenKind::Bang => Opcode::Not,
                    _ => unreachable!(),
                };
                let expr = self.parse_unary_expression()?;
                let end = self.tree.get(expr).end_offset.unwrap();
                Ok(self.push(NewNode::with_children(NodeKind::UnaryOp, Some(opcode), tok.start.to_usize(), end, vec![Some(expr)])))
            }
            TokenKind::Inc | TokenKind::Dec => {
                self.bump()?;
                let kind = if tok.kind == TokenKind::Inc { NodeKind::Inc } else { NodeKind::Dec };
                let expr = self.parse_unary_expression()?;
                let end = self.tree.get(expr).end_offset.unwrap();
                Ok(self.push(NewNode::with_children(kind, Some(Opcode::Prefix), tok.start.to_usize(), end, vec![Some(expr)])))
            }
            _ => self.parse_postfix_expression(),
        }
    }

    /// Postfix `++`/`--` are restricted to the same source line as their
    /// operand -- if a line terminator intervenes, it's a separate
    /// statement (or the start of a prefix operator on the next one).
    fn parse_postfix_expression(&mut self) -> Result<NodeId> {
        let expr = self.parse_lhs_expression()?;
        let next = self.peek_same_line()?;
        match next.kind {
            TokenKind::Inc | TokenKind::Dec => {
                self.bump()?;
                let kind = if next.kind == TokenKind::Inc { NodeKind::Inc } else { NodeKind::Dec };
                let start = self.tree.get(expr).start_offset.unwrap();
                Ok(self.push(NewNode::with_children(kind, Some(Opcode::Postfix), start, next.end.to_usize(), vec![Some(expr)])))
            }
            _ => Ok(expr),
        }
    }

    /// The combined `new`/member/call chain: `new X`, `new X(...)`,
    /// `.ident`, `[expr]`, and `(args)`, in whatever order the source
    /// presents them.
    fn parse_lhs_expression(&mut self) -> Result<NodeId> {
        let mut expr = if self.check(TokenKind::New)? { self.parse_new_expression()? } else { self.parse_primary_expression()? };
        loop {
            let tok = self.peek()?;
            match tok.kind {
                TokenKind::Dot => expr = self.parse_dot_trailer(expr)?,
                TokenKind::LBracket => expr = self.parse_index_trailer(expr)?,
                TokenKind::LParen => {
                    let (args, end) = self.parse_arguments()?;
                    let start = self.tree.get(expr).start_offset.unwrap();
                    let mut children = vec![Some(expr)];
                    children.extend(args.into_iter().map(Some));
                    expr = self.push(NewNode::with_children(NodeKind::Call, Some(Opcode::Call), start, end, children));
                }
                _ => break,
            }
        }
        Ok(expr)
    }

    fn parse_dot_trailer(&mut self, base: NodeId) -> Result<NodeId> {
        self.bump()?;
        let name = self.expect(TokenKind::Name)?;
        let start = self.tree.get(base).start_offset.unwrap();
        let mut node = NewNode::with_children(NodeKind::Dot, Some(Opcode::GetProp), start, name.end.to_usize(), vec![Some(base)]);
        node.atom = name.atom;
        Ok(self.push(node))
    }

    fn parse_index_trailer(&mut self, base: NodeId) -> Result<NodeId> {
        self.bump()?;
        let index = self.parse_expression()?;
        let rb = self.expect(TokenKind::RBracket)?;
        let start = self.tree.get(base).start_offset.unwrap();
        Ok(self.push(NewNode::with_children(NodeKind::Index, Some(Opcode::GetElem), start, rb.end.to_usize(), vec![Some(base), Some(index)])))
    }

    /// `new` may itself chain (`new new X`) and its callee may carry
    /// `.ident`/`[expr]` trailers before its own `(args)` -- or have no
    /// argument list at all (`new Ctor`), which is still valid.
    fn parse_new_expression(&mut self) -> Result<NodeId> {
        let new_tok = self.expect(TokenKind::New)?;
        let mut callee = if self.check(TokenKind::New)? { self.parse_new_expression()? } else { self.parse_primary_expression()? };
        loop {
            match self.peek()?.kind {
                TokenKind::Dot => callee = self.parse_dot_trailer(callee)?,
                TokenKind::LBracket => callee = self.parse_index_trailer(callee)?,
                _ => break,
            }
        }
        let start = new_tok.start.to_usize();
        if self.check(TokenKind::LParen)? {
            let (args, end) = self.parse_arguments()?;
            let mut children = vec![Some(callee)];
            children.extend(args.into_iter().map(Some));
            Ok(self.push(NewNode::with_children(NodeKind::New, Some(Opcode::New), start, end, children)))
        } else {
            let end = self.tree.get(callee).end_offset.unwrap();
            Ok(self.push(NewNode::with_children(NodeKind::New, Some(Opcode::New), start, end, vec![Some(callee)])))
        }
    }

    fn parse_arguments(&mut self) -> Result<(Vec<NodeId>, usize)> {
        self.expect(TokenKind::LParen)?;
        let mut args = Vec::new();
        if !self.check(TokenKind::RParen)? {
            loop {
                args.push(self.parse_assignment_expression()?);
                if self.eat(TokenKind::Comma)?.is_none() {
                    break;
                }
            }
        }
        let rp = self.expect(TokenKind::RParen)?;
        Ok((args, rp.end.to_usize()))
    }

    fn parse_primary_expression(&mut self) -> Result<NodeId> {
        let tok = self.bump_regexp()?;
        match tok.kind {
            TokenKind::This => Ok(self.push(NewNode::leaf(NodeKind::Primary, Some(Opcode::This), tok.start.to_usize(), tok.end.to_usize()))),
            TokenKind::True => Ok(self.push(NewNode::leaf(NodeKind::Primary, Some(Opcode::True), tok.start.to_usize(), tok.end.to_usize()))),
            TokenKind::False => Ok(self.push(NewNode::leaf(NodeKind::Primary, Some(Opcode::False), tok.start.to_usize(), tok.end.to_usize()))),
            TokenKind::Null => Ok(self.push(NewNode::leaf(NodeKind::Primary, Some(Opcode::Null), tok.start.to_usize(), tok.end.to_usize()))),
            TokenKind::Name => {
                let mut node = NewNode::leaf(NodeKind::Name, Some(Opcode::Name), tok.start.to_usize(), tok.end.to_usize());
                node.atom = tok.atom;
                Ok(self.push(node))
            }
            TokenKind::Number => {
                let value = parse_numeric_literal(tok.atom.as_deref().unwrap_or("0"));
                let mut node = NewNode::leaf(NodeKind::Number, None, tok.start.to_usize(), tok.end.to_usize());
                node.atom = tok.atom;
                node.numeric_value = Some(value);
                Ok(self.push(node))
            }
            TokenKind::String => {
                let mut node = NewNode::leaf(NodeKind::String, None, tok.start.to_usize(), tok.end.to_usize());
                node.atom = tok.atom;
                Ok(self.push(node))
            }
            TokenKind::Regexp => {
                let mut node = NewNode::leaf(NodeKind::Regexp, None, tok.start.to_usize(), tok.end.to_usize());
                node.atom = tok.atom;
                Ok(self.push(node))
            }
            TokenKind::LParen => {
                let inner = self.parse_expression()?;
                let rp = self.expect(TokenKind::RParen)?;
                Ok(self.push(NewNode::with_children(NodeKind::Group, None, tok.start.to_usize(), rp.end.to_usize(), vec![Some(inner)])))
            }
            TokenKind::LBracket => self.parse_array_literal(tok),
            TokenKind::LBrace => self.parse_object_literal(tok),
            TokenKind::Function => self.parse_function_tail(tok, super::statement::FunctionPosition::Expression),
            TokenKind::Eof => Err(ParserError::new(tok.start, ErrorCode::UnexpectedEof)),
            _ => Err(ParserError::new(tok.start, ErrorCode::SyntaxError)),
        }
    }

    /// Array literals track sparse holes (a bare `,` produces a `null`
    /// child) and whether the last separator was a trailing comma before
    /// the closing `]` (`end_comma`).
    fn parse_array_literal(&mut self, lbracket: Token) -> Result<NodeId> {
        let mut children: Vec<Option<NodeId>> = Vec::new();
        let mut end_comma = None;
        loop {
            if self.check(TokenKind::RBracket)? {
                break;
            }
            if self.check(TokenKind::Comma)? {
                let comma = self.bump()?;
                children.push(None);
                end_comma = Some(self.push(NewNode::leaf(NodeKind::Colon, None, comma.start.to_usize(), comma.end.to_usize())));
                continue;
            }
            let elem = self.parse_assignment_expression()?;
            children.push(Some(elem));
            end_comma = None;
            match self.eat(TokenKind::Comma)? {
                Some(comma) => end_comma = Some(self.push(NewNode::leaf(NodeKind::Colon, None, comma.start.to_usize(), comma.end.to_usize()))),
                None => break,
            }
        }
        let rb = self.expect(TokenKind::RBracket)?;
        let mut node = NewNode::with_children(NodeKind::Lb, None, lbracket.start.to_usize(), rb.end.to_usize(), children);
        node.end_comma = end_comma;
        Ok(self.push(node))
    }

    /// Object-literal properties are bundled as `NodeKind::Colon` nodes
    /// with children `[key, value]`; trailing-comma tracking mirrors the
    /// array literal above.
    fn parse_object_literal(&mut self, lbrace: Token) -> Result<NodeId> {
        let mut children = Vec::new();
        let mut end_comma = None;
        loop {
            if self.check(TokenKind::RBrace)? {
                break;
            }
            let key = self.parse_property_name()?;
            self.expect(TokenKind::Colon)?;
            let value = self.parse_assignment_expression()?;
            let key_start = self.tree.get(key).start_offset.unwrap();
            let value_end = self.tree.get(value).end_offset.unwrap();
            let prop = self.push(NewNode::with_children(NodeKind::Colon, None, key_start, value_end, vec![Some(key), Some(value)]));
            children.push(Some(prop));
            end_comma = None;
            match self.eat(TokenKind::Comma)? {
                Some(comma) => end_comma = Some(self.push(NewNode::leaf(NodeKind::Colon, None, comma.start.to_usize(), comma.end.to_usize()))),
                None => break,
            }
        }
        let rb = self.expect(TokenKind::RBrace)?;
        let mut node = NewNode::with_children(NodeKind::Object, None, lbrace.start.to_usize(), rb.end.to_usize(), children);
        node.end_comma = end_comma;
        Ok(self.push(node))
    }

    /// A property key is a `NAME`, a `STRING`, a `NUMBER`, or -- as legacy
    /// engines allow -- a reserved keyword spelled out as a plain name.
    fn parse_property_name(&mut self) -> Result<NodeId> {
        let tok = self.bump()?;
        match tok.kind {
            TokenKind::Name => {
                let mut node = NewNode::leaf(NodeKind::Name, Some(Opcode::Name), tok.start.to_usize(), tok.end.to_usize());
                node.atom = tok.atom;
                Ok(self.push(node))
            }
            TokenKind::String => {
                let mut node = NewNode::leaf(NodeKind::String, None, tok.start.to_usize(), tok.end.to_usize());
                node.atom = tok.atom;
                Ok(self.push(node))
            }
            TokenKind::Number => {
                let value = parse_numeric_literal(tok.atom.as_deref().unwrap_or("0"));
                let mut node = NewNode::leaf(NodeKind::Number, None, tok.start.to_usize(), tok.end.to_usize());
                node.atom = tok.atom;
                node.numeric_value = Some(value);
                Ok(self.push(node))
            }
            _ if tok.kind.is_keyword() => {
                let mut node = NewNode::leaf(NodeKind::Name, Some(Opcode::Name), tok.start.to_usize(), tok.end.to_usize());
                node.atom = Some(tok.kind.label().to_string());
                Ok(self.push(node))
            }
            _ => Err(ParserError::new(tok.start, ErrorCode::SyntaxError)),
        }
    }
}
