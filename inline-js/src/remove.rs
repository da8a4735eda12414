use crate::ast::Node;
use crate::ast::Syntax;
use crate::binding::Binding;
use crate::edit::EditBuffer;
use crate::err::InlineError;
use crate::loc::Loc;
use ahash::HashSet;
use std::ptr;
use tracing::debug;

/// List elements removed by earlier inline calls on the same source.
///
/// The tree itself is never modified, so this is how a later call learns that e.g. a sibling
/// declarator is already gone. Entries are keyed by the container's and the element's ranges.
#[derive(Debug, Default, Clone)]
pub struct RemovalLedger {
  removed: HashSet<(Loc, Loc)>,
}

impl RemovalLedger {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn is_removed(&self, container: &Node, elem: &Node) -> bool {
    self.removed.contains(&(container.loc, elem.loc))
  }

  pub fn is_empty(&self) -> bool {
    self.removed.is_empty()
  }

  fn mark(&mut self, container: &Node, elem: &Node) {
    self.removed.insert((container.loc, elem.loc));
  }

  fn live<'n>(&self, container: &Node, elems: impl IntoIterator<Item = &'n Node>) -> Vec<&'n Node> {
    elems
      .into_iter()
      .filter(|e| !self.is_removed(container, e))
      .collect()
  }
}

/// Removes the source of `binding`, along with every enclosing pattern, declarator and
/// declaration that is left empty.
pub fn remove<E: EditBuffer + ?Sized>(
  binding: &Binding,
  edits: &mut E,
  ledger: &mut RemovalLedger,
) -> Result<(), InlineError> {
  for (i, node) in binding.ancestors.iter().copied().enumerate() {
    match node.stx.as_ref() {
      // Removed as part of their container.
      Syntax::Identifier(_) | Syntax::Property(_) | Syntax::VariableDeclarator(_) => {}
      Syntax::ObjectPattern(pat) => {
        let prop = inner(binding, i)?;
        remove_list_element(node, &pat.properties, prop, edits, ledger)?;
        if !ledger.live(node, &pat.properties).is_empty() {
          return Ok(());
        };
      }
      Syntax::ArrayPattern(pat) => {
        // Leave a hole so the indices of later elements are unchanged.
        let elem = inner(binding, i)?;
        edits.remove(elem.loc)?;
        ledger.mark(node, elem);
        if !ledger.live(node, pat.elements.iter().flatten()).is_empty() {
          return Ok(());
        };
      }
      Syntax::VariableDeclaration(decl) => {
        let declarator = inner(binding, i)?;
        remove_list_element(node, &decl.declarations, declarator, edits, ledger)?;
        if !ledger.live(node, &decl.declarations).is_empty() {
          return Ok(());
        };
        remove_statement(node, edits)?;
        return Ok(());
      }
      Syntax::Literal(_)
      | Syntax::RestElement(_)
      | Syntax::AssignmentPattern(_)
      | Syntax::Expression(_) => {
        return Err(InlineError::UnexpectedNodeType {
          kind: node.kind(),
          loc: node.loc,
        })
      }
    };
  }
  Ok(())
}

// The chain entry directly inside the container at `i`.
fn inner<'a>(binding: &Binding<'a>, i: usize) -> Result<&'a Node, InlineError> {
  match i.checked_sub(1) {
    Some(j) => Ok(binding.ancestors[j]),
    None => {
      let node = binding.ancestors[i];
      Err(InlineError::UnexpectedNodeType {
        kind: node.kind(),
        loc: node.loc,
      })
    }
  }
}

/// Removes `target` from a comma separated list, taking one adjacent separator with it.
fn remove_list_element<E: EditBuffer + ?Sized>(
  container: &Node,
  list: &[Node],
  target: &Node,
  edits: &mut E,
  ledger: &mut RemovalLedger,
) -> Result<(), InlineError> {
  let live = ledger.live(container, list);
  let Some(index) = live.iter().position(|e| ptr::eq(*e, target)) else {
    return Err(InlineError::UnexpectedNodeType {
      kind: target.kind(),
      loc: target.loc,
    });
  };
  if index == 0 {
    // With no next element the container itself goes next.
    if let Some(next) = live.get(1) {
      edits.remove(Loc(target.start(), next.start()))?;
    };
  } else {
    let prev = live[index - 1];
    edits.remove(Loc(prev.end(), target.end()))?;
  };
  ledger.mark(container, target);
  Ok(())
}

fn remove_statement<E: EditBuffer + ?Sized>(stmt: &Node, edits: &mut E) -> Result<(), InlineError> {
  let loc = removable_range(stmt.loc, edits.original());
  debug!(stmt = %stmt.loc, removed = %loc, "removing statement");
  edits.remove(loc)?;
  Ok(())
}

/// The range to delete for a statement at `loc`: its whole line, terminator included, if nothing
/// but spaces and tabs share the line with it; otherwise just `loc`.
pub fn removable_range(loc: Loc, source: &str) -> Loc {
  // Invalid ranges are left for the edit buffer to reject.
  if loc.start() > loc.end() || loc.end() > source.len() {
    return loc;
  };
  match (
    line_start_before(source, loc.start()),
    line_end_after(source, loc.end()),
  ) {
    (Some(start), Some(end)) => Loc(start, end),
    _ => loc,
  }
}

fn line_start_before(source: &str, index: usize) -> Option<usize> {
  let bytes = source.as_bytes();
  for i in (0..index).rev() {
    match bytes[i] {
      b' ' | b'\t' => {}
      b'\n' | b'\r' => return Some(i + 1),
      _ => return None,
    };
  }
  Some(0)
}

fn line_end_after(source: &str, index: usize) -> Option<usize> {
  let bytes = source.as_bytes();
  let mut i = index;
  while i < bytes.len() {
    match bytes[i] {
      b' ' | b'\t' => i += 1,
      b'\r' if bytes.get(i + 1) == Some(&b'\n') => return Some(i + 2),
      b'\n' | b'\r' => return Some(i + 1),
      _ => return None,
    };
  }
  Some(bytes.len())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::ast::ExprKind;
  use crate::ast::Identifier;
  use crate::ast::NodeKind;
  use crate::ast::ObjectPattern;
  use crate::ast::Property;
  use crate::ast::VarDeclKind;
  use crate::ast::VariableDeclaration;
  use crate::ast::VariableDeclarator;
  use crate::edit::SourceEdits;
  use crate::err::EditError;

  fn ident(loc: Loc, name: &str) -> Node {
    Node::new(loc, Identifier { name: name.into() })
  }

  fn binding<'a>(ancestors: Vec<&'a Node>) -> Binding<'a> {
    Binding {
      id: ancestors[0],
      init: None,
      accesses: Vec::new(),
      ancestors,
    }
  }

  #[test]
  fn removes_whole_line_when_statement_is_alone() {
    let src = "a();\n  let x = 1;  \nb();\n";
    assert_eq!(removable_range(Loc(7, 17), src), Loc(5, 20));
  }

  #[test]
  fn keeps_line_when_shared_with_other_code() {
    let src = "a(); let x = 1;\n";
    assert_eq!(removable_range(Loc(5, 15), src), Loc(5, 15));
    let src = "let x = 1; a();\n";
    assert_eq!(removable_range(Loc(0, 10), src), Loc(0, 10));
  }

  #[test]
  fn file_boundaries_count_as_line_boundaries() {
    assert_eq!(removable_range(Loc(0, 10), "let x = 1;"), Loc(0, 10));
    assert_eq!(removable_range(Loc(1, 11), "\tlet x = 1;\t"), Loc(0, 12));
  }

  #[test]
  fn handles_crlf_and_cr_terminators() {
    let src = "a();\r\nlet x = 1;\r\nb();";
    assert_eq!(removable_range(Loc(6, 16), src), Loc(6, 18));
    let src = "a();\rlet x = 1;\rb();";
    assert_eq!(removable_range(Loc(5, 15), src), Loc(5, 16));
  }

  #[test]
  fn invalid_ranges_are_returned_unchanged() {
    assert_eq!(removable_range(Loc(20, 25), "let a;"), Loc(20, 25));
    assert_eq!(removable_range(Loc(4, 2), "let a;"), Loc(4, 2));
  }

  #[test]
  fn statement_outside_source_is_an_edit_error() {
    let src = "let a;";
    let a = ident(Loc(24, 25), "a");
    let declarator = Node::new(Loc(24, 25), VariableDeclarator { id: a, init: None });
    let decl = Node::new(Loc(20, 26), VariableDeclaration {
      kind: VarDeclKind::Let,
      declarations: vec![declarator],
    });
    let Syntax::VariableDeclaration(d) = decl.stx.as_ref() else {
      unreachable!();
    };
    let declarator = &d.declarations[0];
    let Syntax::VariableDeclarator(v) = declarator.stx.as_ref() else {
      unreachable!();
    };

    let mut edits = SourceEdits::new(src);
    let mut ledger = RemovalLedger::new();
    let err = remove(&binding(vec![&v.id, declarator, &decl]), &mut edits, &mut ledger);
    assert_eq!(
      err,
      Err(InlineError::Edit(EditError::OutOfBounds { loc: Loc(20, 26) }))
    );
    assert!(!edits.has_changes());
  }

  #[test]
  fn rejects_unsupported_ancestor() {
    let src = "f(a)";
    let a = ident(Loc(2, 3), "a");
    let call = Node::new(Loc(0, 4), ExprKind::Call);
    let mut edits = SourceEdits::new(src);
    let mut ledger = RemovalLedger::new();
    assert_eq!(
      remove(&binding(vec![&a, &call]), &mut edits, &mut ledger),
      Err(InlineError::UnexpectedNodeType {
        kind: NodeKind::Expression(ExprKind::Call),
        loc: Loc(0, 4),
      })
    );
    assert!(!edits.has_changes());
  }

  #[test]
  fn rejects_container_without_inner_node() {
    let src = "{ a }";
    let pat = Node::new(Loc(0, 5), ObjectPattern {
      properties: vec![Node::new(Loc(2, 3), Property {
        key: ident(Loc(2, 3), "a"),
        value: ident(Loc(2, 3), "a"),
        computed: false,
        shorthand: true,
      })],
    });
    let mut edits = SourceEdits::new(src);
    let mut ledger = RemovalLedger::new();
    assert_eq!(
      remove(&binding(vec![&pat]), &mut edits, &mut ledger),
      Err(InlineError::UnexpectedNodeType {
        kind: NodeKind::ObjectPattern,
        loc: Loc(0, 5),
      })
    );
    assert!(!edits.has_changes());
    assert!(ledger.is_empty());
  }

  #[test]
  fn rejects_target_missing_from_list() {
    let src = "{ a }";
    let pat = Node::new(Loc(0, 5), ObjectPattern {
      properties: vec![Node::new(Loc(2, 3), Property {
        key: ident(Loc(2, 3), "a"),
        value: ident(Loc(2, 3), "a"),
        computed: false,
        shorthand: true,
      })],
    });
    // Same range as the real property, but a different node.
    let stray = Node::new(Loc(2, 3), Property {
      key: ident(Loc(2, 3), "a"),
      value: ident(Loc(2, 3), "a"),
      computed: false,
      shorthand: true,
    });
    let Syntax::Property(prop) = stray.stx.as_ref() else {
      unreachable!();
    };
    let mut edits = SourceEdits::new(src);
    let mut ledger = RemovalLedger::new();
    assert_eq!(
      remove(&binding(vec![&prop.value, &stray, &pat]), &mut edits, &mut ledger),
      Err(InlineError::UnexpectedNodeType {
        kind: NodeKind::Property,
        loc: Loc(2, 3),
      })
    );
    assert!(!edits.has_changes());
    assert!(ledger.is_empty());
  }
}
