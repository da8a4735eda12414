use crate::loc::Loc;
use serde::Deserialize;
use serde::Serialize;
use std::fmt;

/// A syntax node produced by an external parser.
///
/// The tree is only ever read. Inlining records what it removes in a separate ledger and emits
/// text patches; it never rewrites nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
  pub loc: Loc,
  pub stx: Box<Syntax>,
}

impl Node {
  pub fn new(loc: Loc, stx: impl Into<Syntax>) -> Node {
    Node {
      loc,
      stx: Box::new(stx.into()),
    }
  }

  pub fn kind(&self) -> NodeKind {
    self.stx.kind()
  }

  pub fn start(&self) -> usize {
    self.loc.0
  }

  pub fn end(&self) -> usize {
    self.loc.1
  }
}

// Kind names follow ESTree so trees exported by JS tooling map over directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Syntax {
  Identifier(Identifier),
  Literal(Literal),
  ObjectPattern(ObjectPattern),
  Property(Property),
  ArrayPattern(ArrayPattern),
  VariableDeclarator(VariableDeclarator),
  VariableDeclaration(VariableDeclaration),
  // Parsed but never inlined through.
  RestElement(RestElement),
  AssignmentPattern(AssignmentPattern),
  Expression(Expression),
}

impl Syntax {
  pub fn kind(&self) -> NodeKind {
    match self {
      Syntax::Identifier(_) => NodeKind::Identifier,
      Syntax::Literal(_) => NodeKind::Literal,
      Syntax::ObjectPattern(_) => NodeKind::ObjectPattern,
      Syntax::Property(_) => NodeKind::Property,
      Syntax::ArrayPattern(_) => NodeKind::ArrayPattern,
      Syntax::VariableDeclarator(_) => NodeKind::VariableDeclarator,
      Syntax::VariableDeclaration(_) => NodeKind::VariableDeclaration,
      Syntax::RestElement(_) => NodeKind::RestElement,
      Syntax::AssignmentPattern(_) => NodeKind::AssignmentPattern,
      Syntax::Expression(expr) => NodeKind::Expression(expr.kind),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identifier {
  pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Literal {
  /// The literal exactly as written, e.g. `'win32'` or `0x10`.
  pub raw: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectPattern {
  pub properties: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
  pub key: Node,
  // For `{ a }` the value is an Identifier node sharing the key's location.
  pub value: Node,
  pub computed: bool,
  #[serde(default)]
  pub shorthand: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrayPattern {
  // Holes are `None` so every element keeps its original index.
  pub elements: Vec<Option<Node>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableDeclarator {
  pub id: Node,
  pub init: Option<Node>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VarDeclKind {
  Var,
  Let,
  Const,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableDeclaration {
  pub kind: VarDeclKind,
  pub declarations: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestElement {
  pub argument: Node,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentPattern {
  pub left: Node,
  pub right: Node,
}

/// An expression the inliner treats as opaque text. Only its kind is inspected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expression {
  pub kind: ExprKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExprKind {
  Array,
  Arrow,
  Assignment,
  Binary,
  Call,
  Conditional,
  Function,
  Identifier,
  Literal,
  Logical,
  Member,
  Object,
  Sequence,
  Unary,
  Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
  Identifier,
  Literal,
  ObjectPattern,
  Property,
  ArrayPattern,
  VariableDeclarator,
  VariableDeclaration,
  RestElement,
  AssignmentPattern,
  Expression(ExprKind),
}

impl fmt::Display for NodeKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      NodeKind::Expression(kind) => write!(f, "{:?}Expression", kind),
      other => write!(f, "{:?}", other),
    }
  }
}

macro_rules! impl_into_syntax {
  ($($name:ident),* $(,)?) => {
    $(
      impl From<$name> for Syntax {
        fn from(value: $name) -> Self {
          Syntax::$name(value)
        }
      }
    )*
  };
}

impl_into_syntax!(
  Identifier,
  Literal,
  ObjectPattern,
  Property,
  ArrayPattern,
  VariableDeclarator,
  VariableDeclaration,
  RestElement,
  AssignmentPattern,
  Expression,
);

impl From<ExprKind> for Syntax {
  fn from(kind: ExprKind) -> Self {
    Syntax::Expression(Expression { kind })
  }
}
