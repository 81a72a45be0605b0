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

//! `jslcore`: scanner, recursive-descent parser, and source-position
//! machinery for a legacy C-family scripting dialect (language versions
//! 1.0-1.7, including the optional E4X XML-literal extension).
//!
//! This crate is THE CORE of a static-analysis toolchain -- it builds a
//! parse tree and the position/comment machinery a lint driver consumes,
//! but does not itself evaluate any lint rule. See [`parser::parse`] for
//! the entry point, [`probe::is_compilable_unit`] for REPL/editor-buffer
//! use, and [`comments::find_comments`] for comment extraction.
//!
//! Everything here assumes a single input parsed on a single thread; the
//! only process-wide state is the read-only keyword table and punctuator
//! trie in [`token`], built once via `once_cell`.

pub mod char_stream;
pub mod comments;
pub mod kind;
pub mod node;
pub mod opcode;
pub mod parser;
pub mod probe;
pub mod ranges;
pub mod token;
pub mod tokenizer;
pub mod version;

pub use comments::{find_comments, Comment, CommentKind};
pub use kind::NodeKind;
pub use node::{Node, NodeId, Tree};
pub use opcode::Opcode;
pub use parser::{parse, Parsed};
pub use probe::is_compilable_unit;
pub use ranges::NodeRanges;
pub use token::{Token, TokenKind};
pub use version::Version;
