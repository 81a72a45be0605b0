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

//! §4.6's compilability probe: a thin wrapper over [`crate::parser::parse`]
//! that turns "parse failed because the input just isn't finished yet"
//! into a distinct answer from "parse failed because the input is wrong."
//! Interactive hosts (a REPL, an editor buffer) use this to decide
//! whether to wait for more text or flag an error immediately.

use crate::parser::parse;
use crate::version::Version;
use jslcore_errors::ErrorCode;

/// Returns `true` if `text` parses successfully, or fails with anything
/// other than an incomplete-input code (`unexpected_eof`,
/// `unterminated_comment`). Those two mean "more input might still make
/// this valid"; everything else -- including a definitive `syntax_error`
/// on a stray character -- counts as a complete, if invalid, unit.
pub fn is_compilable_unit(text: &str, version: Version) -> bool {
    let mut incomplete = false;
    let result = parse(text, version, |_offset, code| incomplete = code.is_incomplete_input(), 0);
    result.is_some() || !incomplete
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn incomplete_inputs_are_not_compilable() {
        assert!(!is_compilable_unit(r#"var s = ""#, Version::Default));
        assert!(!is_compilable_unit("a /* b", Version::Default));
        assert!(!is_compilable_unit("re = /.*", Version::Default));
        assert!(!is_compilable_unit("{ // missing curly", Version::Default));
    }

    #[test]
    fn definitive_syntax_and_valid_units_are_compilable() {
        assert!(is_compilable_unit("bogon()", Version::Default));
        assert!(is_compilable_unit("int syntax_error;", Version::Default));
    }
}
