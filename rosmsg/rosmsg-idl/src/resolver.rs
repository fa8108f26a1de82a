//! Post-processing of parsed IDL documents into flat definitions.
//!
//! Every top-level node is resolved on its own, in three steps:
//!
//! 1. **Collect**: walk the tree in document order and record each typedef's
//!    shape, then decode every constant. Typedefs may alias earlier typedefs;
//!    constants may reference any constant of the tree, as long as the
//!    references do not form a cycle.
//! 2. **Substitute**: for every member, inline its typedef (keeping the
//!    member's own name and literals), replace constant references, turn `::`
//!    into `/` and coerce literals to the declared type.
//! 3. **Flatten**: children before parents, every `struct` becomes a definition
//!    named by its `/`-joined path, and so does every `module` whose members
//!    (typedefs aside) are all constants.
//!
//! Constant references match the written name first, then its last `::`
//! segment.

use std::collections::HashMap;

use rosmsg_core::{Definition, Field, ParseError, Value, coerce_value, normalize_idl_type};

use crate::ast::{IdlMember, IdlNode, Literal};

/// Resolve the top-level nodes of one document.
pub fn resolve_document(roots: &[IdlNode]) -> Result<Vec<Definition>, ParseError> {
    let mut out = Vec::new();
    for root in roots {
        let scope = Scope::collect(root)?;
        scope.flatten(root, &mut Vec::new(), &mut out)?;
    }
    Ok(out)
}

#[derive(Debug, Default)]
struct Scope {
    /// Typedef name -> fully inlined shape.
    typedefs: HashMap<String, IdlMember>,
    /// Constant name -> decoded value and the literal text it was written as.
    constants: HashMap<String, (Value, Option<String>)>,
}

fn lookup<'a, T>(map: &'a HashMap<String, T>, name: &str) -> Option<&'a T> {
    map.get(name)
        .or_else(|| name.rsplit("::").next().and_then(|last| map.get(last)))
}

/// A constant declaration waiting for its value.
struct PendingConstant<'a> {
    member: &'a IdlMember,
    /// `/`-joined path of the enclosing module or struct.
    parent: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Progress {
    Pending,
    InProgress,
    Done,
}

impl Scope {
    fn collect(root: &IdlNode) -> Result<Self, ParseError> {
        let mut scope = Self::default();
        let mut pending = Vec::new();
        scope.visit(root, &mut Vec::new(), &mut pending)?;

        let declared: HashMap<String, usize> = pending
            .iter()
            .enumerate()
            .map(|(i, c)| (c.member.name.clone(), i))
            .collect();
        let mut progress = vec![Progress::Pending; pending.len()];
        for i in 0..pending.len() {
            scope.resolve_constant(i, &pending, &declared, &mut progress)?;
        }
        Ok(scope)
    }

    /// Record typedefs and gather constant declarations.
    fn visit<'a>(
        &mut self,
        node: &'a IdlNode,
        path: &mut Vec<String>,
        pending: &mut Vec<PendingConstant<'a>>,
    ) -> Result<(), ParseError> {
        match node {
            IdlNode::Module { name, children } | IdlNode::Struct { name, children } => {
                path.push(name.clone());
                for child in children {
                    self.visit(child, path, pending)?;
                }
                path.pop();
            }
            IdlNode::Typedef(member) => {
                let shape = self.inline_typedef(member.clone())?;
                self.typedefs.insert(member.name.clone(), shape);
            }
            IdlNode::Constant(member) => pending.push(PendingConstant {
                member,
                parent: path.join("/"),
            }),
            IdlNode::Field(_) => {}
        }
        Ok(())
    }

    /// Decode constant `index`, resolving the constants it names first.
    fn resolve_constant(
        &mut self,
        index: usize,
        pending: &[PendingConstant<'_>],
        declared: &HashMap<String, usize>,
        progress: &mut [Progress],
    ) -> Result<(), ParseError> {
        let PendingConstant { member, parent } = &pending[index];
        if progress[index] == Progress::Done {
            return Ok(());
        }
        progress[index] = Progress::InProgress;

        // Bounds may come from a typedef.
        let shape = self.inline_typedef((*member).clone())?;
        let references = [shape.value.as_ref(), shape.upper_bound.as_ref()];
        for name in references.into_iter().flatten().filter_map(|l| match l {
            Literal::ConstantRef(name) => Some(name),
            Literal::Direct(_) => None,
        }) {
            let Some(&dependency) = lookup(declared, name) else {
                continue;
            };
            if progress[dependency] == Progress::InProgress {
                return Err(ParseError::UnresolvedConstant {
                    constant: name.clone(),
                    field: member.name.clone(),
                    parent: parent.clone(),
                });
            }
            self.resolve_constant(dependency, pending, declared, progress)?;
        }

        let field = self.lower_member(member, true, parent)?;
        if let Some(value) = field.value {
            self.constants
                .insert(member.name.clone(), (value, field.value_text));
        }
        progress[index] = Progress::Done;
        Ok(())
    }

    /// Replace a member whose type is a typedef with the typedef's shape.
    fn inline_typedef(&self, member: IdlMember) -> Result<IdlMember, ParseError> {
        let Some(alias) = lookup(&self.typedefs, &member.ty) else {
            return Ok(member);
        };
        if alias.is_array && member.is_array {
            return Err(ParseError::Syntax {
                context: "nested array type".to_string(),
                text: format!("{} {}", member.ty, member.name),
            });
        }

        let mut inlined = IdlMember {
            name: member.name,
            value: member.value,
            value_text: member.value_text,
            default_value: member.default_value,
            ..alias.clone()
        };
        if member.is_array {
            inlined.is_array = true;
            inlined.array_length = member.array_length;
            inlined.array_upper_bound = member.array_upper_bound;
        }
        Ok(inlined)
    }

    /// Look up the value a literal stands for.
    fn substitute(
        &self,
        literal: &Literal,
        field: &str,
        parent: &str,
    ) -> Result<(Value, Option<String>), ParseError> {
        match literal {
            Literal::Direct(value) => Ok((value.clone(), None)),
            Literal::ConstantRef(name) => lookup(&self.constants, name).cloned().ok_or_else(|| {
                ParseError::UnresolvedConstant {
                    constant: name.clone(),
                    field: field.to_string(),
                    parent: parent.to_string(),
                }
            }),
        }
    }

    fn count(
        &self,
        slot: Option<&Literal>,
        member: &IdlMember,
        parent: &str,
    ) -> Result<Option<usize>, ParseError> {
        let Some(literal) = slot else {
            return Ok(None);
        };
        let (value, _) = self.substitute(literal, &member.name, parent)?;
        value
            .as_usize()
            .map(Some)
            .ok_or_else(|| ParseError::LiteralFormat {
                ty: member.ty.clone(),
                detail: format!("bound of {} must be a non-negative integer", member.name),
            })
    }

    /// Convert one member into a resolved [`Field`].
    fn lower_member(
        &self,
        member: &IdlMember,
        is_constant: bool,
        parent: &str,
    ) -> Result<Field, ParseError> {
        let member = self.inline_typedef(member.clone())?;
        let ty = normalize_idl_type(&member.ty.replace("::", "/")).to_string();
        let upper_bound = self.count(member.upper_bound.as_ref(), &member, parent)?;

        if is_constant {
            if member.is_array {
                return Err(ParseError::Syntax {
                    context: "constant (constants must be non-array primitives)".to_string(),
                    text: format!("{} {}", member.ty, member.name),
                });
            }
            let literal = member.value.as_ref().ok_or_else(|| ParseError::Syntax {
                context: "constant without a value".to_string(),
                text: member.name.clone(),
            })?;
            let (value, referenced_text) = self.substitute(literal, &member.name, parent)?;
            let value_text = match literal {
                Literal::Direct(_) => member.value_text.clone(),
                Literal::ConstantRef(_) => referenced_text,
            };
            let value = coerce_value(&ty, false, value)?;
            let mut field = Field::constant(ty, member.name, value, value_text);
            field.upper_bound = upper_bound;
            return Ok(field);
        }

        let array_length = self.count(member.array_length.as_ref(), &member, parent)?;
        let array_upper_bound = self.count(member.array_upper_bound.as_ref(), &member, parent)?;
        let default_value = match &member.default_value {
            Some(literal) => {
                let (value, _) = self.substitute(literal, &member.name, parent)?;
                Some(coerce_value(&ty, member.is_array, value)?)
            }
            None => None,
        };

        let mut field = Field::variable(ty, member.name);
        if member.is_array {
            field = field.with_array(array_length, array_upper_bound);
        }
        field.upper_bound = upper_bound;
        field.default_value = default_value;
        Ok(field)
    }

    fn flatten(
        &self,
        node: &IdlNode,
        path: &mut Vec<String>,
        out: &mut Vec<Definition>,
    ) -> Result<(), ParseError> {
        let (IdlNode::Module { name, children } | IdlNode::Struct { name, children }) = node
        else {
            return Ok(());
        };

        path.push(name.clone());
        for child in children {
            self.flatten(child, path, out)?;
        }
        let full_name = path.join("/");
        path.pop();

        let emit = match node {
            IdlNode::Struct { .. } => true,
            _ => is_constant_group(children),
        };
        if !emit {
            return Ok(());
        }

        let fields = children
            .iter()
            .filter_map(|child| match child {
                IdlNode::Field(m) => Some(self.lower_member(m, false, &full_name)),
                IdlNode::Constant(m) => Some(self.lower_member(m, true, &full_name)),
                _ => None,
            })
            .collect::<Result<Vec<_>, _>>()?;
        tracing::debug!(name = %full_name, fields = fields.len(), "flatten IDL definition");
        out.push(Definition::new(Some(full_name), fields));
        Ok(())
    }
}

/// A module made only of constants (typedefs aside) stands for an enum-like group.
fn is_constant_group(children: &[IdlNode]) -> bool {
    let mut members = children
        .iter()
        .filter(|c| !matches!(c, IdlNode::Typedef(_)))
        .peekable();
    members.peek().is_some() && members.all(|c| matches!(c, IdlNode::Constant(_)))
}
