//! Typed payloads returned by paged reads.

use serde::Deserialize;

/// One page of results, as returned when paging metadata is requested.
///
/// ```rust
/// use most_client::ResultPage;
///
/// let page: ResultPage<u32> =
///     serde_json::from_str(r#"{"total": 42, "skip": 10, "value": [1, 2]}"#).unwrap();
/// assert_eq!(page.total, 42);
/// assert_eq!(page.value, vec![1, 2]);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ResultPage<T> {
    /// Total number of matching items across all pages.
    #[serde(default)]
    pub total: u64,
    /// Offset of this page.
    #[serde(default)]
    pub skip: u64,
    /// Items of this page.
    #[serde(default = "Vec::new")]
    pub value: Vec<T>,
}

impl<T> ResultPage<T> {
    /// Number of items in this page.
    pub fn len(&self) -> usize {
        self.value.len()
    }

    /// Returns true if this page holds no items.
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Returns true if items remain after this page.
    pub fn has_more(&self) -> bool {
        self.skip.saturating_add(self.value.len() as u64) < self.total
    }
}
