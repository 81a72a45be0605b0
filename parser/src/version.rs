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

//! The closed set of language versions the parser accepts, and the one
//! behavior gated on it: whether the E4X XML-literal extension is
//! available (and therefore worth a deprecation warning) at all.

/// A language version selector, per §4.3.4. `Default` means "no version
/// pinned" -- the most permissive setting, equivalent to the newest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Version {
    Default,
    V1_0,
    V1_1,
    V1_2,
    V1_3,
    V1_4,
    V1_5,
    V1_6,
    V1_7,
}

impl Version {
    /// Parses one of the closed set of version strings. Unknown versions
    /// are rejected by returning `None`; the caller should reject the
    /// configuration before parsing begins rather than guess.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "default" => Some(Version::Default),
            "1.0" => Some(Version::V1_0),
            "1.1" => Some(Version::V1_1),
            "1.2" => Some(Version::V1_2),
            "1.3" => Some(Version::V1_3),
            "1.4" => Some(Version::V1_4),
            "1.5" => Some(Version::V1_5),
            "1.6" => Some(Version::V1_6),
            "1.7" => Some(Version::V1_7),
            _ => None,
        }
    }

    /// Whether this version makes the E4X XML-literal extension
    /// available at all. E4X shipped in 1.6 and was deprecated by 1.7;
    /// `Default` tracks the newest version and so also supports it.
    pub fn supports_e4x(self) -> bool {
        matches!(self, Version::Default | Version::V1_6 | Version::V1_7)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_the_closed_set_and_rejects_everything_else() {
        assert_eq!(Version::parse("default"), Some(Version::Default));
        assert_eq!(Version::parse("1.7"), Some(Version::V1_7));
        assert_eq!(Version::parse("2.0"), None);
        assert_eq!(Version::parse(""), None);
    }

    #[test]
    fn e4x_gate_matches_1_6_and_1_7() {
        assert!(Version::V1_6.supports_e4x());
        assert!(Version::V1_7.supports_e4x());
        assert!(!Version::V1_5.supports_e4x());
        assert!(Version::Default.supports_e4x());
    }
}
