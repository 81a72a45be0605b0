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

//! The closed set of parse-node kinds.
//!
//! The historical sources carry this list in several variant copies with
//! slight drift (duplicate entries, one variant adding `Whitespace`). This
//! is the canonical, deduplicated superset, consistent with the tokenizer
//! and parser actually wired up here (see DESIGN.md for the couple of
//! spots where the variants disagreed and how this build resolves them).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// `&&`.
    And,
    /// `&` (binary).
    BitAnd,
    /// `|` (binary).
    BitOr,
    /// `^` (binary).
    BitXor,
    /// A `catch (name) { ... }` clause, nested inside a [`NodeKind::LexicalScope`].
    Catch,
    /// `break`, with the label (if any) in `atom`.
    Break,
    /// A `case expr:` arm of a `switch`; children are `[test, block]`.
    Case,
    /// `continue`, with the label (if any) in `atom`.
    Continue,
    /// A function/method call: children are `[callee, arg0, arg1, ...]`.
    Call,
    /// `default:` arm of a `switch`; children are `[block]`.
    Default,
    /// A comma expression at the top of the expression grammar.
    Comma,
    /// `delete expr`.
    Delete,
    /// `.ident` property access or assignment; the property name is
    /// `atom`, and the single child is the base expression.
    Dot,
    /// `do { ... } while ( ... )`; children are `[body, cond]`.
    Do,
    /// Relational/equality comparison narrowed by [`crate::opcode::Opcode::EqOp`]'s siblings.
    EqOp,
    /// `finally { ... }` block attached to a `try`.
    Finally,
    /// A classical or `for-in` loop; see the opcode for which shape applies.
    For,
    /// A function declaration or expression. `atom` holds the name (absent
    /// for anonymous function expressions); `fn_args` holds the formal
    /// parameter list; the single child is the body block.
    Function,
    /// `( expr )`, a parenthesized grouping. The single child is the inner
    /// expression; assignment-target classification unwraps through these.
    Group,
    /// `cond ? then : else`.
    Hook,
    /// `if (...) then else? `; children are `[cond, then, else]`.
    If,
    /// `[expr]` indexed member access or assignment; children are
    /// `[object, index]`.
    Index,
    /// `{ ... }` block statement; children are the statement list.
    Lc,
    /// Synthetic wrapper introduced around a `catch` clause's binding, so
    /// downstream scope-tracking passes can see where the name is live.
    LexicalScope,
    /// An identifier, reference or declaration. `atom` holds the spelling.
    Name,
    /// A numeric literal; `numeric_value` holds the parsed value.
    Number,
    /// `new Ctor(...)`; children are `[ctor, arg0, arg1, ...]`. A bare
    /// `new Ctor` with no parameter list has exactly one child.
    New,
    /// An object literal; children are `[property0, property1, ...]`,
    /// each itself a [`NodeKind::Colon`] node.
    Object,
    /// `||`.
    Or,
    /// Array literal. Children are the (possibly-`None`, for sparse holes)
    /// element expressions.
    Lb,
    /// `this`, `true`, `false`, or `null` -- see the opcode.
    Primary,
    /// A relational comparison (`<`, `>`, `<=`, `>=`, `instanceof`, `in`).
    RelOp,
    /// An offsetless internal grouping node with no source span of its
    /// own: the classical `for`-header bundle (`children = [init, cond,
    /// update]`). Transparent to offset-walking consumers.
    Reserved,
    /// A regular-expression literal; `atom` holds the full `/pattern/flags` text.
    Regexp,
    /// A bitwise/arithmetic shift (`<<`, `>>`, `>>>`).
    ShOp,
    /// A multiplicative operator (`*`, `/`, `%`).
    Star,
    /// An additive operator (`+`, `-`), binary form.
    Plus,
    /// An empty statement (`;`) or an expression statement; the single
    /// child is the expression, or `None` for the empty statement.
    Semi,
    /// `switch (disc) { case ... }`; children are `[disc, case0, ...]`.
    Switch,
    /// `throw expr`.
    Throw,
    /// `try { ... } catch? finally?`; children are
    /// `[try_block, catch_scope, finally_block]`.
    Try,
    /// A labelled statement (`label: stmt`); `atom` holds the label.
    Label,
    /// A prefix or postfix `++`.
    Inc,
    /// A prefix or postfix `--`.
    Dec,
    /// `return expr?`.
    Return,
    /// A string literal; `atom` holds the raw (still-escaped) body text.
    String,
    /// An assignment, simple or compound; see the opcode for which.
    Assign,
    /// One of `delete`, `void`, `typeof`, unary `+`/`-`, `~`, `!`.
    UnaryOp,
    /// `var` declaration list; children are the declarator [`NodeKind::Name`] nodes.
    Var,
    /// `while (cond) body`.
    While,
    /// `with (obj) body`.
    With,
    /// A property-or-element entry inside an object literal; children are
    /// `[key, value]`. Also used as a bare leaf to record the offset of a
    /// trailing comma (`end_comma`).
    Colon,
}
