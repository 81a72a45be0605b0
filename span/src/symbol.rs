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

//! Global symbol interning.
//!
//! The original toolchain keeps one interner per parsing session (a
//! thread-local "session globals" table that the caller pushes before
//! parsing). Nothing here ever needs more than one interner alive at a
//! time -- atoms are never torn down mid-parse and identifiers are
//! reused heavily across a single source file -- so this crate collapses
//! that to a single process-wide table behind a `Mutex`, built lazily on
//! first use via `once_cell`.

use fxhash::FxHashMap;
use once_cell::sync::Lazy;
use std::fmt;
use std::sync::Mutex;

static INTERNER: Lazy<Mutex<Interner>> = Lazy::new(|| Mutex::new(Interner::new()));

struct Interner {
    strings: Vec<&'static str>,
    names: FxHashMap<&'static str, Symbol>,
}

impl Interner {
    fn new() -> Self {
        Self { strings: Vec::new(), names: FxHashMap::default() }
    }

    fn intern(&mut self, string: &str) -> Symbol {
        if let Some(&sym) = self.names.get(string) {
            return sym;
        }
        // Strings are never released for the life of the process, so leaking
        // here is the only way to hand back a `&'static str` cheaply.
        let leaked: &'static str = Box::leak(string.to_owned().into_boxed_str());
        let sym = Symbol(self.strings.len() as u32);
        self.strings.push(leaked);
        self.names.insert(leaked, sym);
        sym
    }

    fn resolve(&self, sym: Symbol) -> &'static str {
        self.strings[sym.0 as usize]
    }
}

/// An interned string. Cheap to copy and compare; resolves back to its
/// text via [`Symbol::as_str`].
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol(u32);

impl Symbol {
    pub fn intern(string: &str) -> Self {
        INTERNER.lock().unwrap().intern(string)
    }

    pub fn as_str(self) -> &'static str {
        INTERNER.lock().unwrap().resolve(self)
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.as_str())
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Interns a keyword literal at first use. Used by the keyword table so
/// that keyword lookups compare `Symbol`s rather than strings.
pub fn sym(s: &str) -> Symbol {
    Symbol::intern(s)
}
