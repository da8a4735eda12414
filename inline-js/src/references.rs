use crate::edit::EditBuffer;
use crate::err::InlineError;
use crate::scope::Variable;
use tracing::trace;

/// Overwrites every non-declaring reference to `variable` with `replacement`.
///
/// Stops at the first write reference; references before it have already been rewritten.
pub fn rewrite<E: EditBuffer + ?Sized>(
  variable: &Variable,
  replacement: &str,
  edits: &mut E,
) -> Result<(), InlineError> {
  for reference in variable.references.iter() {
    if reference.init {
      continue;
    };
    if reference.is_write() {
      return Err(InlineError::VariableIsMutated {
        name: variable.name.clone(),
        loc: reference.identifier.loc,
      });
    };
    trace!(name = %variable.name, loc = %reference.identifier.loc, "rewriting reference");
    edits.overwrite(reference.identifier.loc, replacement)?;
  }
  Ok(())
}

/// Fails if any non-declaring reference writes to `variable`, without touching any edits.
pub fn check_writes(variable: &Variable) -> Result<(), InlineError> {
  match variable
    .references
    .iter()
    .find(|r| !r.init && r.is_write())
  {
    Some(reference) => Err(InlineError::VariableIsMutated {
      name: variable.name.clone(),
      loc: reference.identifier.loc,
    }),
    None => Ok(()),
  }
}
