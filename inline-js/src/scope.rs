use crate::ast::Node;
use std::ptr;

/// A variable as reported by scope analysis, borrowing the tree it was computed from.
#[derive(Debug, Clone)]
pub struct Variable<'a> {
  pub name: String,
  pub defs: Vec<Definition<'a>>,
  /// Identifier nodes that declare this variable.
  pub identifiers: Vec<&'a Node>,
  pub references: Vec<Reference<'a>>,
}

impl<'a> Variable<'a> {
  pub fn new(name: impl Into<String>) -> Self {
    Variable {
      name: name.into(),
      defs: Vec::new(),
      identifiers: Vec::new(),
      references: Vec::new(),
    }
  }

  /// Whether `id` is one of the declaring identifier nodes. This compares node identity; another
  /// identifier with the same name in the same pattern is not a match.
  pub fn is_declared_by(&self, id: &Node) -> bool {
    self.identifiers.iter().any(|decl| ptr::eq(*decl, id))
  }
}

#[derive(Debug, Clone, Copy)]
pub struct Definition<'a> {
  /// The declaration statement (e.g. `VariableDeclaration`) containing the definition.
  pub parent: &'a Node,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceFlag {
  Read,
  Write,
  ReadWrite,
}

#[derive(Debug, Clone, Copy)]
pub struct Reference<'a> {
  pub identifier: &'a Node,
  /// Set for the declaring occurrence, e.g. `a` in `let a = 1`.
  pub init: bool,
  pub flag: ReferenceFlag,
}

impl<'a> Reference<'a> {
  pub fn read(identifier: &'a Node) -> Self {
    Reference {
      identifier,
      init: false,
      flag: ReferenceFlag::Read,
    }
  }

  pub fn write(identifier: &'a Node) -> Self {
    Reference {
      identifier,
      init: false,
      flag: ReferenceFlag::Write,
    }
  }

  /// A compound assignment or update, e.g. `a += 1` or `a++`.
  pub fn read_write(identifier: &'a Node) -> Self {
    Reference {
      identifier,
      init: false,
      flag: ReferenceFlag::ReadWrite,
    }
  }

  pub fn initializing(identifier: &'a Node) -> Self {
    Reference {
      identifier,
      init: true,
      flag: ReferenceFlag::Write,
    }
  }

  pub fn is_write(&self) -> bool {
    matches!(self.flag, ReferenceFlag::Write | ReferenceFlag::ReadWrite)
  }
}
