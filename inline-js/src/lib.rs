//! Inline a variable's initial value into every read of it, then remove its declaration.
//!
//! Parsing and scope analysis happen elsewhere: callers provide the declaration's syntax tree
//! ([`ast::Node`]) and the variable's scope metadata ([`Variable`]). The result is a set of text
//! patches recorded in an [`EditBuffer`]; the tree is never modified.
//!
//! Destructured bindings are inlined as member accesses on the initializer, so `b` in
//! `const { a: [b] } = obj;` becomes `obj.a[0]`.
//!
//! # Example
//!
//! ```
//! use inline_js::ast::{ExprKind, Identifier, Node, VarDeclKind, VariableDeclaration, VariableDeclarator};
//! use inline_js::{bindings, inline, Definition, Loc, Reference, SourceEdits, Variable};
//!
//! let src = "let a = 1;\nuse(a);\n";
//! let decl = Node::new(Loc(0, 10), VariableDeclaration {
//!   kind: VarDeclKind::Let,
//!   declarations: vec![Node::new(Loc(4, 9), VariableDeclarator {
//!     id: Node::new(Loc(4, 5), Identifier { name: "a".into() }),
//!     init: Some(Node::new(Loc(8, 9), ExprKind::Literal)),
//!   })],
//! });
//! let read = Node::new(Loc(15, 16), Identifier { name: "a".into() });
//!
//! let id = bindings(&decl).unwrap()[0].id;
//! let mut variable = Variable::new("a");
//! variable.defs.push(Definition { parent: &decl });
//! variable.identifiers.push(id);
//! variable.references.push(Reference::initializing(id));
//! variable.references.push(Reference::read(&read));
//!
//! let mut edits = SourceEdits::new(src);
//! inline(&variable, &mut edits).unwrap();
//! assert_eq!(edits.to_string(), "use(1);\n");
//! ```

pub mod ast;
mod binding;
mod edit;
mod err;
mod loc;
mod references;
mod remove;
mod replacement;
mod scope;
mod session;

pub use binding::bindings;
pub use binding::resolve;
pub use binding::Access;
pub use binding::AccessKey;
pub use binding::Binding;
pub use edit::EditBuffer;
pub use edit::SourceEdits;
pub use err::EditError;
pub use err::InlineError;
pub use loc::Loc;
pub use references::check_writes;
pub use references::rewrite;
pub use remove::remove;
pub use remove::removable_range;
pub use remove::RemovalLedger;
pub use replacement::build;
pub use scope::Definition;
pub use scope::Reference;
pub use scope::ReferenceFlag;
pub use scope::Variable;
pub use session::InlineOptions;
pub use session::Session;

/// Inlines a single variable into `edits` using default options.
///
/// Each call starts without knowledge of earlier removals. To inline several variables of the
/// same file, use one [`Session`] for all of them.
pub fn inline<E: EditBuffer + ?Sized>(variable: &Variable, edits: &mut E) -> Result<(), InlineError> {
  Session::new(edits).inline(variable)
}
