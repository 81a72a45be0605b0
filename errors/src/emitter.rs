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

//! The single side-channel through which the parser reports diagnostics
//! back to its caller, mirroring `leo_errors::emitter::Handler` but pared
//! down to the propagation policy this toolchain actually wants: one
//! fatal diagnostic per parse, plus any number of non-fatal warnings
//! (today, just `e4x_deprecated`) that fire without aborting anything.

use crate::ErrorCode;
use colored::Colorize;
use jslcore_span::Offset;
use std::cell::{Cell, RefCell};

/// Receives `(offset, code)` pairs from the tokenizer and parser and
/// forwards them to a caller-supplied callback.
///
/// A `Handler` is constructed once per call to [`crate`]'s top-level
/// `parse` entry point and threaded by reference through the character
/// stream, tokenizer, and parser -- none of them need to own it, so
/// interior mutability here stands in for what would otherwise be a
/// `&mut` passed through every recursive-descent routine.
pub struct Handler<'a> {
    callback: RefCell<Box<dyn FnMut(Offset, ErrorCode) + 'a>>,
    errored: Cell<bool>,
}

impl<'a> Handler<'a> {
    pub fn new(callback: impl FnMut(Offset, ErrorCode) + 'a) -> Self {
        Self { callback: RefCell::new(Box::new(callback)), errored: Cell::new(false) }
    }

    /// Reports a non-fatal diagnosis, such as `e4x_deprecated`. May be
    /// called any number of times and does not affect [`Handler::has_errored`].
    pub fn warn(&self, offset: Offset, code: ErrorCode) {
        tracing::debug!(offset = %offset, code = code.name(), "emitting warning");
        (self.callback.borrow_mut())(offset, code);
    }

    /// Reports the single fatal diagnostic that aborted a parse. Calling
    /// this more than once for the same `Handler` indicates a bug in the
    /// caller (the parser should have already unwound via `?` on the
    /// first error), so only the first call reaches the callback.
    pub fn emit_once(&self, offset: Offset, code: ErrorCode) {
        if self.errored.replace(true) {
            tracing::warn!("emit_once called again after an error was already reported; ignoring");
            return;
        }
        tracing::debug!(offset = %offset, code = code.name(), "emitting error");
        (self.callback.borrow_mut())(offset, code);
    }

    pub fn has_errored(&self) -> bool {
        self.errored.get()
    }
}

/// Renders `(offset, code)` the way a terminal-facing caller typically
/// wants it, for callers that don't have their own formatting.
pub fn format_diagnostic(offset: Offset, code: &ErrorCode) -> String {
    format!("{} at offset {}: {}", "error".red().bold(), offset, code)
}
