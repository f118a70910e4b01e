use core::ops::Range;

/// A byte range within the text of a [`Uri`](crate::Uri).
///
/// A `Span` is a view into a buffer; it never owns or copies text.
/// An absent component is represented by `None` rather than by a span,
/// so an empty span (`start == end`) always denotes a component that is
/// present but zero-length, such as the query of `"http://example.com/?"`.
///
/// # Examples
///
/// ```
/// use uriref::{Span, Uri};
///
/// let s = "http://example.com/?";
/// let uri = Uri::parse(s)?;
///
/// let query = uri.query_span().unwrap();
/// assert!(query.is_empty());
/// assert_eq!(query.slice(s), "");
/// assert_eq!(uri.fragment_span(), None);
///
/// assert_eq!(uri.path_span(), Span::new(18, 19));
/// # Ok::<_, uriref::ParseError>(())
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Span {
    start: usize,
    end: usize,
}

impl Span {
    /// Creates a new `Span`.
    ///
    /// # Panics
    ///
    /// Panics if `start > end`.
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        assert!(start <= end, "span starts after it ends");
        Self { start, end }
    }

    /// Creates an empty `Span` at the given index.
    #[must_use]
    pub const fn empty(at: usize) -> Self {
        Self { start: at, end: at }
    }

    /// Returns the start index.
    #[must_use]
    pub const fn start(self) -> usize {
        self.start
    }

    /// Returns the end index (exclusive).
    #[must_use]
    pub const fn end(self) -> usize {
        self.end
    }

    /// Returns the length in bytes.
    #[must_use]
    pub const fn len(self) -> usize {
        self.end - self.start
    }

    /// Checks whether the span is empty.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.start == self.end
    }

    /// Returns the span as a range.
    #[must_use]
    pub const fn range(self) -> Range<usize> {
        self.start..self.end
    }

    /// Returns the text the span denotes within `s`.
    ///
    /// # Panics
    ///
    /// Panics if the span is out of bounds of `s` or not on
    /// character boundaries.
    #[must_use]
    pub fn slice(self, s: &str) -> &str {
        &s[self.start..self.end]
    }
}

impl From<Span> for Range<usize> {
    fn from(span: Span) -> Self {
        span.range()
    }
}
