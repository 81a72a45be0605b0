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

//! Error codes and the emitter side-channel used by the tokenizer and
//! parser in [`jslcore`](../jslcore/index.html).
//!
//! The propagation policy is deliberately unforgiving: a lexical or
//! syntactic error aborts the current parse with no recovery attempted,
//! which in Rust terms just means every fallible routine returns
//! [`Result`] and lets `?` do the unwinding. [`emitter::Handler`] exists
//! only as the single point where that terminal `Result::Err` is turned
//! into the caller-supplied `on_error` callback, and as the side channel
//! for the one non-fatal diagnosis (`e4x_deprecated`) that fires without
//! aborting anything.

pub mod emitter;

use jslcore_span::Offset;
use thiserror::Error;

/// The closed set of diagnostic codes the tokenizer and parser can raise.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ErrorCode {
    #[error("unexpected end of input")]
    UnexpectedEof,
    #[error("missing semicolon before statement")]
    SemiBeforeStmnt,
    #[error("syntax error")]
    SyntaxError,
    #[error("unterminated comment")]
    UnterminatedComment,
    #[error("expected '{token}'")]
    ExpectedTok { token: String },
    #[error("unexpected character '{ch}'")]
    UnexpectedChar { ch: char },
    #[error("invalid assignment target")]
    InvalidAssign,
    #[error("invalid case label")]
    InvalidCase,
    #[error("try without catch or finally")]
    InvalidCatch,
    #[error("expected a statement")]
    ExpectedStatement,
    #[error("the E4X XML-literal extension is deprecated")]
    E4xDeprecated,
}

impl ErrorCode {
    /// The wire-level name the Python original used for this code. Callers
    /// that key off the string (rather than matching the enum) get the
    /// exact historical spelling.
    pub fn name(&self) -> &'static str {
        match self {
            ErrorCode::UnexpectedEof => "unexpected_eof",
            ErrorCode::SemiBeforeStmnt => "semi_before_stmnt",
            ErrorCode::SyntaxError => "syntax_error",
            ErrorCode::UnterminatedComment => "unterminated_comment",
            ErrorCode::ExpectedTok { .. } => "expected_tok",
            ErrorCode::UnexpectedChar { .. } => "unexpected_char",
            ErrorCode::InvalidAssign => "invalid_assign",
            ErrorCode::InvalidCase => "invalid_case",
            ErrorCode::InvalidCatch => "invalid_catch",
            ErrorCode::ExpectedStatement => "expected_statement",
            ErrorCode::E4xDeprecated => "e4x_deprecated",
        }
    }

    /// The two codes the compilability probe treats as "more input might
    /// fix this", as opposed to a definitive syntax error.
    pub fn is_incomplete_input(&self) -> bool {
        matches!(self, ErrorCode::UnexpectedEof | ErrorCode::UnterminatedComment)
    }
}

/// A lexical or syntactic error, anchored at the offset of the offending
/// character or token.
#[derive(Clone, Debug, PartialEq, Error)]
#[error("{code} at offset {offset}")]
pub struct ParserError {
    pub offset: Offset,
    pub code: ErrorCode,
}

impl ParserError {
    pub fn new(offset: Offset, code: ErrorCode) -> Self {
        Self { offset, code }
    }
}

pub type Result<T> = std::result::Result<T, ParserError>;
