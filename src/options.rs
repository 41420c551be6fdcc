//! Configuration options for decoding.
//!
//! ## Examples
//!
//! ```rust
//! use serde_yamlite::{Decoder, Options};
//!
//! let options = Options::new().with_max_depth(8);
//! let mut decoder = Decoder::with_options("a:\n  b: 1\n".as_bytes(), options);
//! let doc = decoder.decode_document().unwrap();
//! assert_eq!(doc.len(), 1);
//! ```

/// Default bound on collection nesting while decoding.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Configuration options for the decoder.
///
/// The decoder walks nested collections recursively, so input nested deeper than
/// `max_depth` is rejected with [`Error::RecursionLimitExceeded`](crate::Error)
/// instead of exhausting the stack.
///
/// # Examples
///
/// ```rust
/// use serde_yamlite::Options;
///
/// let options = Options::new();
/// assert_eq!(options.max_depth, 128);
///
/// let options = Options::new().with_max_depth(16);
/// assert_eq!(options.max_depth, 16);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Options {
    pub max_depth: usize,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl Options {
    /// Creates default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum collection nesting depth.
    ///
    /// The top-level mapping counts as depth 1.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}
