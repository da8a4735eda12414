use serde::Deserialize;
use serde::Serialize;
use std::fmt;

/// A half-open range within the original source text expressed as UTF-8 byte offsets.
///
/// Offsets always refer to the unmodified source, never to text produced by earlier edits. An
/// empty location marks a synthetic node that has no position in the source.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Loc(pub usize, pub usize);

impl Loc {
  pub fn start(&self) -> usize {
    self.0
  }

  pub fn end(&self) -> usize {
    self.1
  }

  pub fn is_empty(&self) -> bool {
    self.0 >= self.1
  }

  pub fn len(&self) -> usize {
    self.1.saturating_sub(self.0)
  }

  /// Whether `other` lies entirely within this range. Empty ranges are contained by any range
  /// whose bounds enclose their offset.
  pub fn contains(&self, other: Loc) -> bool {
    self.0 <= other.0 && other.1 <= self.1
  }

  /// Whether the two ranges share at least one byte.
  pub fn overlaps(&self, other: Loc) -> bool {
    !self.is_empty() && !other.is_empty() && self.0 < other.1 && other.0 < self.1
  }
}

impl fmt::Debug for Loc {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}..{}", self.0, self.1)
  }
}

impl fmt::Display for Loc {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "[{}, {})", self.0, self.1)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn containment_and_overlap() {
    let outer = Loc(2, 10);
    assert!(outer.contains(Loc(2, 10)));
    assert!(outer.contains(Loc(4, 4)));
    assert!(!outer.contains(Loc(1, 3)));
    assert!(outer.overlaps(Loc(9, 12)));
    assert!(!outer.overlaps(Loc(10, 12)));
    // Touching ranges and empty ranges never overlap.
    assert!(!outer.overlaps(Loc(5, 5)));
    assert!(!Loc(5, 5).overlaps(outer));
    assert!(!outer.overlaps(Loc(2, 2)));
  }

  #[test]
  fn synthetic_locations_are_empty() {
    assert!(Loc::default().is_empty());
    assert_eq!(Loc(7, 3).len(), 0);
  }
}
