use crate::err::EditError;
use crate::loc::Loc;
use std::fmt;
use tracing::trace;

/// Text patches recorded against an unmodified source.
///
/// All ranges refer to offsets in [`EditBuffer::original`], regardless of what has been edited
/// before.
pub trait EditBuffer {
  fn original(&self) -> &str;

  fn overwrite(&mut self, loc: Loc, text: &str) -> Result<(), EditError>;

  fn remove(&mut self, loc: Loc) -> Result<(), EditError> {
    self.overwrite(loc, "")
  }

  /// Returns the text at `loc` with previously recorded patches applied.
  fn slice(&self, loc: Loc) -> Result<String, EditError>;
}

impl<T: EditBuffer + ?Sized> EditBuffer for &mut T {
  fn original(&self) -> &str {
    (**self).original()
  }

  fn overwrite(&mut self, loc: Loc, text: &str) -> Result<(), EditError> {
    (**self).overwrite(loc, text)
  }

  fn remove(&mut self, loc: Loc) -> Result<(), EditError> {
    (**self).remove(loc)
  }

  fn slice(&self, loc: Loc) -> Result<String, EditError> {
    (**self).slice(loc)
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Patch {
  loc: Loc,
  text: String,
}

/// The default [`EditBuffer`]: the original text plus a sorted list of non-overlapping patches.
///
/// A patch covering earlier patches replaces them. A patch that falls inside an earlier removal
/// is dropped, as the text it targets no longer exists. Any other overlap is rejected.
#[derive(Debug, Clone)]
pub struct SourceEdits {
  original: String,
  patches: Vec<Patch>,
}

impl SourceEdits {
  pub fn new(original: impl Into<String>) -> Self {
    SourceEdits {
      original: original.into(),
      patches: Vec::new(),
    }
  }

  pub fn has_changes(&self) -> bool {
    !self.patches.is_empty()
  }

  fn check_bounds(&self, loc: Loc) -> Result<(), EditError> {
    if loc.0 > loc.1
      || loc.1 > self.original.len()
      || !self.original.is_char_boundary(loc.0)
      || !self.original.is_char_boundary(loc.1)
    {
      return Err(EditError::OutOfBounds { loc });
    };
    Ok(())
  }
}

impl EditBuffer for SourceEdits {
  fn original(&self) -> &str {
    &self.original
  }

  fn overwrite(&mut self, loc: Loc, text: &str) -> Result<(), EditError> {
    self.check_bounds(loc)?;
    if loc.is_empty() {
      if text.is_empty() {
        return Ok(());
      };
      return Err(EditError::EmptyRange { loc });
    };

    let mut superseded = Vec::new();
    for (i, patch) in self.patches.iter().enumerate() {
      if !patch.loc.overlaps(loc) {
        continue;
      };
      if loc.contains(patch.loc) {
        superseded.push(i);
      } else if patch.loc.contains(loc) && patch.text.is_empty() {
        trace!(%loc, removed = %patch.loc, "edit absorbed by earlier removal");
        return Ok(());
      } else {
        return Err(EditError::Overlap {
          loc,
          existing: patch.loc,
        });
      };
    }
    for i in superseded.into_iter().rev() {
      let patch = self.patches.remove(i);
      trace!(%loc, superseded = %patch.loc, "edit replaces earlier edit");
    }

    trace!(%loc, text, "edit");
    let at = self.patches.partition_point(|p| p.loc.0 < loc.0);
    self.patches.insert(at, Patch {
      loc,
      text: text.to_string(),
    });
    Ok(())
  }

  fn slice(&self, loc: Loc) -> Result<String, EditError> {
    self.check_bounds(loc)?;
    let mut out = String::with_capacity(loc.len());
    let mut cursor = loc.0;
    for patch in &self.patches {
      if !patch.loc.overlaps(loc) {
        continue;
      };
      if !loc.contains(patch.loc) {
        return Err(EditError::Overlap {
          loc,
          existing: patch.loc,
        });
      };
      out.push_str(&self.original[cursor..patch.loc.0]);
      out.push_str(&patch.text);
      cursor = patch.loc.1;
    }
    out.push_str(&self.original[cursor..loc.1]);
    Ok(out)
  }
}

impl fmt::Display for SourceEdits {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut cursor = 0;
    for patch in &self.patches {
      f.write_str(&self.original[cursor..patch.loc.0])?;
      f.write_str(&patch.text)?;
      cursor = patch.loc.1;
    }
    f.write_str(&self.original[cursor..])
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn applies_patches_in_source_order() {
    let mut edits = SourceEdits::new("let a = 1;\nuse(a);\n");
    edits.overwrite(Loc(15, 16), "1").unwrap();
    edits.remove(Loc(0, 11)).unwrap();
    assert_eq!(edits.to_string(), "use(1);\n");
  }

  #[test]
  fn larger_patch_supersedes_contained_patches() {
    let mut edits = SourceEdits::new("let a = 1, b = 2;");
    edits.remove(Loc(9, 16)).unwrap();
    edits.overwrite(Loc(4, 16), "c = 3").unwrap();
    assert_eq!(edits.to_string(), "let c = 3;");
  }

  #[test]
  fn edits_inside_a_removal_are_dropped() {
    let mut edits = SourceEdits::new("let b = a;\nuse(b);\n");
    edits.remove(Loc(0, 11)).unwrap();
    edits.overwrite(Loc(8, 9), "1").unwrap();
    assert_eq!(edits.to_string(), "use(b);\n");
  }

  #[test]
  fn rejects_partial_overlaps() {
    let mut edits = SourceEdits::new("abcdef");
    edits.remove(Loc(1, 4)).unwrap();
    assert_eq!(
      edits.overwrite(Loc(3, 5), "x"),
      Err(EditError::Overlap {
        loc: Loc(3, 5),
        existing: Loc(1, 4),
      })
    );
    edits.overwrite(Loc(4, 6), "xy").unwrap();
    assert!(matches!(
      edits.remove(Loc(5, 6)),
      Err(EditError::Overlap { .. })
    ));
  }

  #[test]
  fn rejects_out_of_bounds_and_non_boundary_ranges() {
    let mut edits = SourceEdits::new("é");
    assert!(matches!(
      edits.remove(Loc(0, 3)),
      Err(EditError::OutOfBounds { .. })
    ));
    assert!(matches!(
      edits.remove(Loc(1, 2)),
      Err(EditError::OutOfBounds { .. })
    ));
    assert!(!edits.has_changes());
  }

  #[test]
  fn empty_ranges() {
    let mut edits = SourceEdits::new("abc");
    edits.remove(Loc(1, 1)).unwrap();
    assert!(!edits.has_changes());
    assert_eq!(
      edits.overwrite(Loc(1, 1), "x"),
      Err(EditError::EmptyRange { loc: Loc(1, 1) })
    );
  }

  #[test]
  fn slice_reflects_earlier_edits() {
    let mut edits = SourceEdits::new("let b = a + a;");
    edits.overwrite(Loc(8, 9), "1").unwrap();
    edits.overwrite(Loc(12, 13), "1").unwrap();
    assert_eq!(edits.slice(Loc(8, 13)).unwrap(), "1 + 1");
    assert_eq!(edits.slice(Loc(0, 4)).unwrap(), "let ");
    assert_eq!(edits.slice(Loc(9, 12)).unwrap(), " + ");
    edits.remove(Loc(3, 6)).unwrap();
    assert_eq!(edits.slice(Loc(0, 9)).unwrap(), "let= 1");
    assert!(matches!(
      edits.slice(Loc(4, 8)),
      Err(EditError::Overlap { .. })
    ));
  }

  #[test]
  fn empty_slice_inside_a_removal() {
    let mut edits = SourceEdits::new("abcdef");
    edits.remove(Loc(1, 5)).unwrap();
    assert_eq!(edits.slice(Loc(3, 3)).unwrap(), "");
    assert_eq!(edits.slice(Loc(1, 1)).unwrap(), "");
    assert_eq!(edits.slice(Loc(0, 6)).unwrap(), "af");
  }
}
