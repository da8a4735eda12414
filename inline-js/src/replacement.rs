use crate::ast::ExprKind;
use crate::ast::Expression;
use crate::ast::Node;
use crate::ast::Syntax;
use crate::binding::AccessKey;
use crate::binding::Binding;
use crate::edit::EditBuffer;
use crate::err::InlineError;

/// Builds the expression that replaces every read of `binding`, e.g. `obj.a[0]`.
pub fn build<E: EditBuffer + ?Sized>(binding: &Binding, edits: &E) -> Result<String, InlineError> {
  let mut replacement = match binding.init {
    Some(init) => {
      let text = edits.slice(init.loc)?;
      if needs_parens(init) {
        format!("({})", text)
      } else {
        text
      }
    }
    None => "undefined".to_string(),
  };
  for access in binding.accesses.iter() {
    let key = key_source(access.key, edits)?;
    if access.computed {
      replacement.push('[');
      replacement.push_str(&key);
      replacement.push(']');
    } else {
      replacement.push('.');
      replacement.push_str(&key);
    };
  }
  Ok(replacement)
}

// Only binary and sequence expressions are wrapped. Other low-precedence initializers such as
// conditionals or arrow functions are inlined as is.
fn needs_parens(node: &Node) -> bool {
  matches!(
    node.stx.as_ref(),
    Syntax::Expression(Expression {
      kind: ExprKind::Binary | ExprKind::Sequence,
    })
  )
}

fn key_source<E: EditBuffer + ?Sized>(key: AccessKey, edits: &E) -> Result<String, InlineError> {
  let node = match key {
    AccessKey::Index(i) => return Ok(i.to_string()),
    AccessKey::Node(node) => node,
  };
  if !node.loc.is_empty() {
    return Ok(edits.slice(node.loc)?);
  };
  match node.stx.as_ref() {
    Syntax::Literal(lit) => Ok(lit.raw.clone()),
    _ => Err(InlineError::UnexpectedNodeType {
      kind: node.kind(),
      loc: node.loc,
    }),
  }
}
