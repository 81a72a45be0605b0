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

//! The closed set of opcodes. An opcode narrows a [`crate::kind::NodeKind`]
//! to a specific operator or construct; several kinds accept more than one
//! opcode (e.g. `NodeKind::Primary` is `this`, `true`, `false`, or `null`
//! depending on which opcode it carries).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Opcode {
    Add,
    AddAssign,
    And,
    AnonFunObj,
    Assign,
    BitAnd,
    BitAndAssign,
    BitNot,
    BitOr,
    BitOrAssign,
    BitXor,
    BitXorAssign,
    Call,
    Closure,
    DefVar,
    Div,
    DivAssign,
    Eq,
    False,
    ForIn,
    Ge,
    GetElem,
    GetProp,
    Gt,
    In,
    InstanceOf,
    /// The grouping bundle for a classical `for` header:
    /// `NodeKind::Reserved { opcode: Some(LeaveBlock), children: [init, cond, update] }`.
    LeaveBlock,
    Le,
    Lsh,
    LshAssign,
    Lt,
    Mod,
    ModAssign,
    Mul,
    MulAssign,
    Name,
    NamedFunObj,
    Neg,
    /// A function declared in a non-top-level statement position --
    /// syntactically accepted, flagged for downstream lints.
    NestedClosure,
    Ne,
    New,
    /// Strict equality (`===`).
    NewEq,
    /// Strict inequality (`!==`).
    NewNe,
    Not,
    Null,
    /// Prefix form of `++`/`--`.
    Prefix,
    /// Postfix form of `++`/`--` (restricted to the same source line).
    Postfix,
    Or,
    Pos,
    Rsh,
    RshAssign,
    SetCall,
    SetElem,
    SetName,
    SetProp,
    String,
    Sub,
    SubAssign,
    This,
    True,
    Throw,
    TypeOf,
    Ursh,
    UrshAssign,
    Void,
}

impl Opcode {
    /// The "set" counterpart of a "get" opcode, used when the parser
    /// rewrites an assignment target in place.
    pub fn to_set_form(self) -> Option<Opcode> {
        match self {
            Opcode::Name => Some(Opcode::SetName),
            Opcode::GetProp => Some(Opcode::SetProp),
            Opcode::GetElem => Some(Opcode::SetElem),
            Opcode::Call => Some(Opcode::SetCall),
            _ => None,
        }
    }
}
