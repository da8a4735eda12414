use crate::ast::Node;
use crate::ast::Syntax;
use crate::err::InlineError;
use crate::scope::Variable;
use tracing::debug;

/// One step of an access path, e.g. `.a` or `[0]`.
#[derive(Debug, Clone, Copy)]
pub struct Access<'a> {
  pub key: AccessKey<'a>,
  pub computed: bool,
}

#[derive(Debug, Clone, Copy)]
pub enum AccessKey<'a> {
  /// A property key written in the source.
  Node(&'a Node),
  /// The position of an array pattern element. It has no source text.
  Index(usize),
}

/// A name introduced by a declaration, together with how to compute its value from the
/// declarator's initializer.
#[derive(Debug, Clone)]
pub struct Binding<'a> {
  pub id: &'a Node,
  pub init: Option<&'a Node>,
  /// Accesses to apply to `init`, outermost first.
  pub accesses: Vec<Access<'a>>,
  /// Nodes containing `id`, starting with `id` itself and ending with the declaration.
  pub ancestors: Vec<&'a Node>,
}

/// Finds the binding declaring `variable` within its only definition.
pub fn resolve<'a>(variable: &Variable<'a>) -> Result<Binding<'a>, InlineError> {
  if variable.defs.len() > 1 {
    return Err(InlineError::MultipleDefinitions {
      name: variable.name.clone(),
    });
  };
  let Some(def) = variable.defs.first() else {
    return Err(InlineError::NoMatchingBinding {
      name: variable.name.clone(),
    });
  };

  let binding = bindings(def.parent)?
    .into_iter()
    .find(|b| variable.is_declared_by(b.id))
    .ok_or_else(|| InlineError::NoMatchingBinding {
      name: variable.name.clone(),
    })?;
  debug!(
    name = %variable.name,
    accesses = binding.accesses.len(),
    depth = binding.ancestors.len(),
    "resolved binding"
  );
  Ok(binding)
}

/// Returns every binding introduced by `decl`, in source order.
pub fn bindings(decl: &Node) -> Result<Vec<Binding<'_>>, InlineError> {
  let mut bindings = collect(decl)?;
  // Accesses are pushed innermost first while unwinding.
  for binding in bindings.iter_mut() {
    binding.accesses.reverse();
  }
  Ok(bindings)
}

fn collect(node: &Node) -> Result<Vec<Binding<'_>>, InlineError> {
  let mut bindings = match node.stx.as_ref() {
    Syntax::Identifier(_) => {
      return Ok(vec![Binding {
        id: node,
        init: None,
        accesses: Vec::new(),
        ancestors: vec![node],
      }])
    }
    Syntax::VariableDeclaration(decl) => flat_collect(&decl.declarations)?,
    Syntax::VariableDeclarator(declarator) => {
      let mut bindings = collect(&declarator.id)?;
      for binding in bindings.iter_mut() {
        binding.init = declarator.init.as_ref();
      }
      bindings
    }
    Syntax::ObjectPattern(pat) => flat_collect(&pat.properties)?,
    Syntax::ArrayPattern(pat) => {
      let mut bindings = Vec::new();
      for (i, elem) in pat.elements.iter().enumerate() {
        let Some(elem) = elem else {
          continue;
        };
        let mut elem_bindings = collect(elem)?;
        for binding in elem_bindings.iter_mut() {
          binding.accesses.push(Access {
            key: AccessKey::Index(i),
            computed: true,
          });
        }
        bindings.extend(elem_bindings);
      }
      bindings
    }
    Syntax::Property(prop) => {
      let mut bindings = collect(&prop.value)?;
      for binding in bindings.iter_mut() {
        binding.accesses.push(Access {
          key: AccessKey::Node(&prop.key),
          computed: prop.computed,
        });
      }
      bindings
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
  for binding in bindings.iter_mut() {
    binding.ancestors.push(node);
  }
  Ok(bindings)
}

fn flat_collect(nodes: &[Node]) -> Result<Vec<Binding<'_>>, InlineError> {
  let mut bindings = Vec::new();
  for node in nodes {
    bindings.extend(collect(node)?);
  }
  Ok(bindings)
}
