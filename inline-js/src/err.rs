use crate::ast::NodeKind;
use crate::loc::Loc;

/// Errors produced while inlining a single variable.
///
/// Edits already applied before the error are not rolled back.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InlineError {
  /// The variable is declared more than once, so there is no single value to inline.
  #[error("multiple definitions for `{name}` found, cannot inline")]
  MultipleDefinitions { name: String },

  /// No binding in the declaration belongs to the variable. This indicates scope metadata that
  /// does not match the tree.
  #[error("cannot find matching binding for `{name}`")]
  NoMatchingBinding { name: String },

  /// A node kind outside the supported declaration grammar, e.g. a rest element or a default
  /// value.
  #[error("unexpected node type: {kind} at {loc}")]
  UnexpectedNodeType { kind: NodeKind, loc: Loc },

  /// A non-declaring reference assigns to the variable.
  #[error("variable `{name}` is written to at {loc}, cannot inline")]
  VariableIsMutated { name: String, loc: Loc },

  #[error(transparent)]
  Edit(#[from] EditError),
}

impl InlineError {
  /// Whether the caller can skip this variable and carry on with others in the same file.
  /// A write is only detected before any edit when `check_writes_first` is set; otherwise the
  /// declaration is already gone. Other errors indicate unsupported input or inconsistent
  /// metadata.
  pub fn is_recoverable(&self) -> bool {
    matches!(
      self,
      InlineError::MultipleDefinitions { .. } | InlineError::VariableIsMutated { .. }
    )
  }
}

/// Errors produced by an [`crate::EditBuffer`] when a patch cannot be recorded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
  #[error("range {loc} is outside of the source or not on a character boundary")]
  OutOfBounds { loc: Loc },

  /// Overwriting an empty range would be an insertion, which is not an edit this buffer records.
  #[error("cannot overwrite empty range {loc}")]
  EmptyRange { loc: Loc },

  #[error("range {loc} overlaps previously edited range {existing}")]
  Overlap { loc: Loc, existing: Loc },
}
