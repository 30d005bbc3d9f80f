#![forbid(unsafe_code)]

//! Transient render tags attached to sequence indices.
//!
//! A [`HighlightSet`] carries exactly one [`Highlight`] tag for all of its
//! indices. It is rebuilt at every suspend point and never outlives the render
//! call it was built for.

use smallvec::SmallVec;
use std::fmt;

/// Visual state of a highlighted bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Highlight {
    /// Two cells are being compared.
    Comparing,
    /// Two cells are being exchanged.
    Swapping,
    /// The quick-sort pivot.
    Pivot,
    /// Final position confirmed by the completion sweep.
    Sorted,
}

impl Highlight {
    /// Stable lowercase name, suitable for style lookups.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Comparing => "comparing",
            Self::Swapping => "swapping",
            Self::Pivot => "pivot",
            Self::Sorted => "sorted",
        }
    }
}

impl fmt::Display for Highlight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Indices sharing a single highlight tag.
///
/// Most sets hold one or two indices, so they live inline; the completion
/// sweep is the only producer of larger sets.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HighlightSet {
    tag: Option<Highlight>,
    indices: SmallVec<[usize; 2]>,
}

impl HighlightSet {
    /// A set with nothing highlighted.
    pub fn none() -> Self {
        Self::default()
    }

    /// Tag every index in `indices` with `tag`.
    pub fn new(tag: Highlight, indices: impl IntoIterator<Item = usize>) -> Self {
        let indices: SmallVec<[usize; 2]> = indices.into_iter().collect();
        if indices.is_empty() {
            return Self::none();
        }
        Self {
            tag: Some(tag),
            indices,
        }
    }

    /// Tag a single index.
    pub fn single(tag: Highlight, index: usize) -> Self {
        Self::new(tag, [index])
    }

    /// Tag a pair of indices.
    pub fn pair(tag: Highlight, a: usize, b: usize) -> Self {
        Self::new(tag, [a, b])
    }

    /// Mark `0..=last` as sorted.
    pub fn sorted_through(last: usize) -> Self {
        Self::new(Highlight::Sorted, 0..=last)
    }

    /// The tag shared by every index, or `None` when empty.
    #[inline]
    pub fn tag(&self) -> Option<Highlight> {
        self.tag
    }

    /// Highlighted indices, in insertion order.
    #[inline]
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Whether nothing is highlighted.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Tag for `index`, if highlighted.
    pub fn state_of(&self, index: usize) -> Option<Highlight> {
        if self.indices.contains(&index) {
            self.tag
        } else {
            None
        }
    }

    /// Iterate `(index, tag)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (usize, Highlight)> + '_ {
        self.tag
            .into_iter()
            .flat_map(move |tag| self.indices.iter().map(move |&i| (i, tag)))
    }

    /// Drop all indices.
    pub fn clear(&mut self) {
        self.tag = None;
        self.indices.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_is_empty() {
        let set = HighlightSet::none();
        assert!(set.is_empty());
        assert_eq!(set.tag(), None);
        assert_eq!(set.state_of(0), None);
    }

    #[test]
    fn pair_tags_both_indices() {
        let set = HighlightSet::pair(Highlight::Comparing, 3, 4);
        assert_eq!(set.state_of(3), Some(Highlight::Comparing));
        assert_eq!(set.state_of(4), Some(Highlight::Comparing));
        assert_eq!(set.state_of(5), None);
        assert_eq!(
            set.iter().collect::<Vec<_>>(),
            vec![(3, Highlight::Comparing), (4, Highlight::Comparing)]
        );
    }

    #[test]
    fn empty_index_list_has_no_tag() {
        let set = HighlightSet::new(Highlight::Pivot, std::iter::empty());
        assert_eq!(set, HighlightSet::none());
    }

    #[test]
    fn sorted_through_covers_prefix() {
        let set = HighlightSet::sorted_through(4);
        assert_eq!(set.indices(), &[0, 1, 2, 3, 4]);
        assert_eq!(set.tag(), Some(Highlight::Sorted));
    }

    #[test]
    fn clear_resets_tag() {
        let mut set = HighlightSet::single(Highlight::Swapping, 1);
        set.clear();
        assert!(set.is_empty());
        assert_eq!(set.tag(), None);
    }

    #[test]
    fn display_names() {
        assert_eq!(Highlight::Comparing.to_string(), "comparing");
        assert_eq!(Highlight::Sorted.as_str(), "sorted");
    }
}
