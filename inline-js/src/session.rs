use crate::binding::resolve;
use crate::edit::EditBuffer;
use crate::err::InlineError;
use crate::references::check_writes;
use crate::references::rewrite;
use crate::remove::remove;
use crate::remove::RemovalLedger;
use crate::replacement::build;
use crate::scope::Variable;
use serde::Deserialize;
use serde::Serialize;
use tracing::debug;
use tracing::debug_span;

/// Options controlling how inlining behaves.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InlineOptions {
  /// Check for write references before making any edit. Without this, a variable that turns out
  /// to be written to has already had its declaration removed when the error is returned.
  pub check_writes_first: bool,
}

impl InlineOptions {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_check_writes_first(mut self, check_writes_first: bool) -> Self {
    self.check_writes_first = check_writes_first;
    self
  }
}

/// Inlines variables of one source file, one at a time, into a shared edit buffer.
///
/// Variables must come from the same tree and be inlined sequentially. The session remembers
/// which list elements earlier calls removed, so inlining several variables declared together
/// (e.g. `let a = 1, b = 2;`) removes the declaration once both are gone.
pub struct Session<E: EditBuffer> {
  edits: E,
  ledger: RemovalLedger,
  options: InlineOptions,
}

impl<E: EditBuffer> Session<E> {
  pub fn new(edits: E) -> Self {
    Self::with_options(edits, InlineOptions::default())
  }

  pub fn with_options(edits: E, options: InlineOptions) -> Self {
    Session {
      edits,
      ledger: RemovalLedger::new(),
      options,
    }
  }

  pub fn options(&self) -> &InlineOptions {
    &self.options
  }

  pub fn edits(&self) -> &E {
    &self.edits
  }

  pub fn ledger(&self) -> &RemovalLedger {
    &self.ledger
  }

  pub fn into_edits(self) -> E {
    self.edits
  }

  /// Replaces every read of `variable` with its initial value and removes its declaration.
  pub fn inline(&mut self, variable: &Variable) -> Result<(), InlineError> {
    let span = debug_span!("inline", name = %variable.name);
    let _guard = span.enter();

    let binding = resolve(variable)?;
    if self.options.check_writes_first {
      check_writes(variable)?;
    };
    let replacement = build(&binding, &self.edits)?;
    remove(&binding, &mut self.edits, &mut self.ledger)?;
    rewrite(variable, &replacement, &mut self.edits)?;
    debug!(
      replacement = %replacement,
      references = variable.references.iter().filter(|r| !r.init).count(),
      "inlined"
    );
    Ok(())
  }

  /// Inlines each variable in order, stopping at the first error.
  pub fn inline_all<'v, 'a: 'v>(
    &mut self,
    variables: impl IntoIterator<Item = &'v Variable<'a>>,
  ) -> Result<(), InlineError> {
    for variable in variables {
      self.inline(variable)?;
    }
    Ok(())
  }
}
