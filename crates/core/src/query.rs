//! Enumeration filters and options
//!
//! A `get_many` call takes exactly one [`GetManyFilter`]: a prefix of key
//! parts that must match exactly, or a per-position inclusive range.

use crate::value::KeyPart;

/// Which entries a `get_many` enumeration yields
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GetManyFilter {
    /// Keys whose leading parts equal these parts
    Prefix(Vec<KeyPart>),
    /// Keys where every part `i` satisfies `start[i] <= key[i] <= end[i]`
    Range {
        /// Inclusive lower bounds, one per position
        start: Vec<KeyPart>,
        /// Inclusive upper bounds, one per position
        end: Vec<KeyPart>,
    },
}

impl GetManyFilter {
    /// Prefix filter
    pub fn prefix(parts: impl Into<Vec<KeyPart>>) -> Self {
        GetManyFilter::Prefix(parts.into())
    }

    /// Inclusive per-position range filter
    pub fn range(start: impl Into<Vec<KeyPart>>, end: impl Into<Vec<KeyPart>>) -> Self {
        GetManyFilter::Range {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Whether a decoded key satisfies this filter
    ///
    /// Prefix: trailing key parts are unconstrained, but a key shorter than
    /// the prefix never matches.
    ///
    /// Range: positions are checked independently, not as one tuple range.
    /// A position the key has but a bound lacks fails the match. Bound
    /// positions past the end of the key are ignored.
    pub fn matches(&self, key: &[KeyPart]) -> bool {
        match self {
            GetManyFilter::Prefix(prefix) => {
                prefix.len() <= key.len() && prefix.iter().zip(key).all(|(p, k)| p == k)
            }
            GetManyFilter::Range { start, end } => {
                key.iter()
                    .enumerate()
                    .all(|(i, part)| match (start.get(i), end.get(i)) {
                        (Some(lo), Some(hi)) => lo <= part && part <= hi,
                        _ => false,
                    })
            }
        }
    }
}

/// Options for a `get_many` enumeration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GetManyOptions {
    /// Maximum number of yielded pairs; `Some(n)` with `n <= 0` means 1
    pub limit: Option<i64>,
    /// Walk the sorted keys from the end
    pub reverse: bool,
}

impl GetManyOptions {
    /// No limit, ascending order
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the limit
    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Set descending order
    pub fn reversed(mut self) -> Self {
        self.reverse = true;
        self
    }

    /// Limit after applying the floor of one
    pub fn effective_limit(&self) -> Option<usize> {
        self.limit
            .map(|limit| usize::try_from(limit.max(1)).unwrap_or(usize::MAX))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key;

    #[test]
    fn test_prefix_matches_leading_parts() {
        let filter = GetManyFilter::prefix(key!["a"]);
        assert!(filter.matches(&key!["a", 1]));
        assert!(filter.matches(&key!["a"]));
        assert!(!filter.matches(&key!["b", 1]));
        assert!(!filter.matches(&key![]));
    }

    #[test]
    fn test_prefix_is_type_sensitive() {
        let filter = GetManyFilter::prefix(key![1]);
        assert!(!filter.matches(&key!["1"]));
        assert!(!filter.matches(&key![true]));
    }

    #[test]
    fn test_empty_prefix_matches_everything() {
        let filter = GetManyFilter::prefix(key![]);
        assert!(filter.matches(&key![]));
        assert!(filter.matches(&key!["x", 2]));
    }

    #[test]
    fn test_range_is_inclusive() {
        let filter = GetManyFilter::range(key![1], key![3]);
        assert!(!filter.matches(&key![0]));
        assert!(filter.matches(&key![1]));
        assert!(filter.matches(&key![2.5]));
        assert!(filter.matches(&key![3]));
        assert!(!filter.matches(&key![3.0001]));
    }

    #[test]
    fn test_range_is_positional() {
        let filter = GetManyFilter::range(key![1, 10], key![3, 20]);
        assert!(filter.matches(&key![2, 15]));
        // Tuple-wise [1, 10] <= [2, 5] <= [3, 20], but position 1 is out of bounds.
        assert!(!filter.matches(&key![2, 5]));
    }

    #[test]
    fn test_range_missing_bound_fails() {
        let filter = GetManyFilter::range(key![1], key![3]);
        assert!(!filter.matches(&key![2, 0]));

        let lopsided = GetManyFilter::range(key![1, 1], key![3]);
        assert!(!lopsided.matches(&key![2, 2]));
    }

    #[test]
    fn test_range_extra_bounds_ignored() {
        let filter = GetManyFilter::range(key![1, 1], key![3, 3]);
        assert!(filter.matches(&key![2]));
    }

    #[test]
    fn test_range_across_types_uses_rank() {
        let filter = GetManyFilter::range(key![0], key!["z"]);
        assert!(filter.matches(&key![1000]));
        assert!(filter.matches(&key!["a"]));
        assert!(!filter.matches(&key![true]));
    }

    #[test]
    fn test_string_range_follows_encoded_order() {
        let filter = GetManyFilter::range(key!["a"], key!["c"]);
        assert!(filter.matches(&key!["b"]));
        // "$2:ab" sorts after "$1:c" in the backend, so it is out of range here too.
        assert!(!filter.matches(&key!["ab"]));
    }

    #[test]
    fn test_effective_limit_floor() {
        assert_eq!(GetManyOptions::new().effective_limit(), None);
        assert_eq!(GetManyOptions::new().with_limit(0).effective_limit(), Some(1));
        assert_eq!(GetManyOptions::new().with_limit(-5).effective_limit(), Some(1));
        assert_eq!(GetManyOptions::new().with_limit(7).effective_limit(), Some(7));
    }

    #[test]
    fn test_options_builder() {
        let opts = GetManyOptions::new().with_limit(2).reversed();
        assert_eq!(
            opts,
            GetManyOptions {
                limit: Some(2),
                reverse: true
            }
        );
    }
}
