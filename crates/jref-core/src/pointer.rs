//! # Pointer Tokenizer
//!
//! Parses a pointer string into its decoded reference tokens.
//!
//! The grammar is deliberately more lenient than RFC 6901:
//!
//! 1. The string is split on `/`.
//! 2. Every empty segment is discarded, wherever it occurs. `""`, `"/"` and
//!    `"//"` all name the document root, and `"//test//"` is the same
//!    pointer as `"/test"`.
//! 3. Each remaining segment is decoded by replacing `~1` with `/` and then
//!    `~0` with `~`. The order matters: `~01` decodes to `~1`, not `/`.
//!
//! Tokenization never fails. Whether a token makes sense for the node it is
//! applied to is decided by the resolver.

use std::borrow::Cow;
use std::convert::Infallible;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// Separator between reference tokens.
pub const SEPARATOR: char = '/';

/// A parsed pointer: the source text plus its decoded tokens.
///
/// Equality and hashing use the decoded tokens only, so `"/a/"` and `"/a"`
/// compare equal.
#[derive(Debug, Clone, Default)]
pub struct JsonPointer {
    source: String,
    tokens: Vec<String>,
}

impl JsonPointer {
    /// Parse a pointer string.
    pub fn parse(pointer: &str) -> Self {
        Self {
            source: pointer.to_string(),
            tokens: tokenize(pointer),
        }
    }

    /// The pointer that names the document root.
    pub fn root() -> Self {
        Self::default()
    }

    /// The pointer exactly as written.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Decoded reference tokens, in order.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// True when the pointer has no tokens and therefore names the root.
    pub fn is_root(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Number of decoded tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Same as [`is_root`](Self::is_root).
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl PartialEq for JsonPointer {
    fn eq(&self, other: &Self) -> bool {
        self.tokens == other.tokens
    }
}

impl Eq for JsonPointer {}

impl Hash for JsonPointer {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.tokens.hash(state);
    }
}

impl fmt::Display for JsonPointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl FromStr for JsonPointer {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<&str> for JsonPointer {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

/// Split a pointer into decoded tokens, dropping empty segments.
pub fn tokenize(pointer: &str) -> Vec<String> {
    pointer
        .split(SEPARATOR)
        .filter(|segment| !segment.is_empty())
        .map(|segment| decode_token(segment).into_owned())
        .collect()
}

/// Decode `~1` then `~0` in a single segment.
pub fn decode_token(segment: &str) -> Cow<'_, str> {
    if !segment.contains('~') {
        return Cow::Borrowed(segment);
    }
    Cow::Owned(segment.replace("~1", "/").replace("~0", "~"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn separators_only_collapse_to_root() {
        for p in ["", "/", "//", "///"] {
            assert!(JsonPointer::parse(p).is_root(), "{p:?} should name the root");
        }
    }

    #[test]
    fn leading_and_trailing_separators_are_ignored() {
        assert_eq!(tokenize("/test"), vec!["test"]);
        assert_eq!(tokenize("/test/"), vec!["test"]);
        assert_eq!(tokenize("//test//"), vec!["test"]);
        assert_eq!(tokenize("test"), vec!["test"]);
    }

    // Extrapolated from the discard-every-empty-segment rule; the reference
    // behaviour only covers leading, trailing and separator-only pointers.
    #[test]
    fn interior_double_separator_is_dropped() {
        assert_eq!(tokenize("/a//b"), vec!["a", "b"]);
    }

    #[test]
    fn escapes_decode_tilde_one_before_tilde_zero() {
        assert_eq!(decode_token("hello~1world"), "hello/world");
        assert_eq!(decode_token("hello~0world"), "hello~world");
        assert_eq!(decode_token("hello~01world"), "hello~1world");
        assert_eq!(decode_token("~10"), "/0");
    }

    #[test]
    fn unknown_escapes_pass_through() {
        assert_eq!(decode_token("a~2b"), "a~2b");
        assert_eq!(decode_token("trailing~"), "trailing~");
    }

    #[test]
    fn plain_segment_is_borrowed() {
        assert!(matches!(decode_token("plain"), Cow::Borrowed("plain")));
    }

    #[test]
    fn hash_and_fragment_characters_are_ordinary() {
        assert_eq!(tokenize("#"), vec!["#"]);
        assert_eq!(tokenize("/a#b"), vec!["a#b"]);
    }

    #[test]
    fn equality_ignores_source_text() {
        let a = JsonPointer::parse("/a/b");
        let b = JsonPointer::parse("//a//b/");
        assert_eq!(a, b);
        assert_ne!(a.as_str(), b.as_str());
        assert_ne!(a, JsonPointer::parse("/a"));
    }

    #[test]
    fn display_preserves_source() {
        let p: JsonPointer = "/x~1y/".parse().unwrap();
        assert_eq!(p.to_string(), "/x~1y/");
        assert_eq!(p.tokens(), ["x/y"]);
    }

    proptest! {
        /// No decoded token is ever empty.
        #[test]
        fn tokens_are_never_empty(s in "[a-z/~01]{0,40}") {
            prop_assert!(tokenize(&s).iter().all(|t| !t.is_empty()));
        }

        /// Adding separators around and between segments changes nothing.
        #[test]
        fn extra_separators_are_transparent(
            segments in prop::collection::vec("[a-z0-9]{1,6}", 0..6)
        ) {
            let tight = format!("/{}", segments.join("/"));
            let loose = format!("//{}//", segments.join("///"));
            prop_assert_eq!(tokenize(&tight), tokenize(&loose));
            prop_assert_eq!(tokenize(&tight), segments);
        }

        /// Encoding `~` as `~0` and `/` as `~1` is undone by decoding.
        #[test]
        fn escaped_segments_decode_to_original(raw in "[a-z~/]{1,12}") {
            let encoded = raw.replace('~', "~0").replace('/', "~1");
            prop_assert_eq!(decode_token(&encoded).into_owned(), raw);
        }
    }
}
