//! Named type definitions and per-contract action schemas.

use std::collections::HashMap;

use tracing::debug;

use crate::abi::Abi;
use crate::error::{Error, Result};
use crate::primitive::Primitive;
use crate::type_ref::TypeRef;
use crate::types::Custom;

/// Alias chains longer than this are treated as cycles.
const MAX_ALIAS_DEPTH: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub ty: TypeRef,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// Ordered field list. Field order is encoding order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructDef {
    pub name: String,
    /// Struct whose fields are encoded first.
    pub base: Option<String>,
    pub fields: Vec<Field>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypeDef {
    Primitive(Primitive),
    Alias(TypeRef),
    Struct(StructDef),
    Custom(Custom),
}

/// Types and actions merged from one contract's ABI.
#[derive(Debug, Clone, Default)]
pub struct Contract {
    types: HashMap<String, TypeDef>,
    actions: HashMap<String, TypeRef>,
}

impl Contract {
    pub fn resolve(&self, name: &str) -> Option<&TypeDef> {
        self.types.get(name)
    }

    pub fn action(&self, name: &str) -> Option<&TypeRef> {
        self.actions.get(name)
    }
}

/// What a type name ultimately refers to after alias resolution.
#[derive(Debug, Clone, Copy)]
pub enum Resolved<'r> {
    Primitive(Primitive),
    Struct(&'r StructDef),
    Custom(Custom),
    /// Alias to an array / optional / fixed-array reference.
    Composite(&'r TypeRef),
}

/// Maps type names to definitions, and `(code, action)` to payload types.
///
/// Populate it up front, then share it by reference with [`crate::Codec`].
/// Mutation needs `&mut`, so a registry can't change under a running codec;
/// hosts that update ABIs concurrently must synchronize externally.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    types: HashMap<String, TypeDef>,
    contracts: HashMap<String, Contract>,
}

impl Registry {
    /// An empty registry with no built-in types.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the built-in primitives, custom types and structs.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        crate::builtin::install(&mut registry);
        registry
    }

    pub fn register(&mut self, name: impl Into<String>, def: TypeDef) {
        self.types.insert(name.into(), def);
    }

    pub fn register_struct(&mut self, def: StructDef) {
        self.types.insert(def.name.clone(), TypeDef::Struct(def));
    }

    /// Maps `(code, action)` to the type of its message data.
    pub fn register_action(
        &mut self,
        code: impl Into<String>,
        action: impl Into<String>,
        ty: TypeRef,
    ) {
        self.contracts
            .entry(code.into())
            .or_default()
            .actions
            .insert(action.into(), ty);
    }

    /// Exact lookup in the global scope.
    pub fn resolve(&self, name: &str) -> Option<&TypeDef> {
        self.types.get(name)
    }

    pub fn contract(&self, code: &str) -> Option<&Contract> {
        self.contracts.get(code)
    }

    /// Payload type of `(code, action)`, if known.
    pub fn resolve_action(&self, code: &str, action: &str) -> Option<&TypeRef> {
        self.contracts.get(code)?.action(action)
    }

    /// Lookup in `scope` first, then the global scope.
    pub fn lookup<'r>(&'r self, scope: Option<&'r Contract>, name: &str) -> Option<&'r TypeDef> {
        scope
            .and_then(|contract| contract.resolve(name))
            .or_else(|| self.resolve(name))
    }

    /// Follows aliases until a concrete definition is reached.
    pub fn resolve_type<'r>(
        &'r self,
        scope: Option<&'r Contract>,
        name: &str,
    ) -> Result<Resolved<'r>> {
        let mut current = name;
        for _ in 0..MAX_ALIAS_DEPTH {
            let def = self
                .lookup(scope, current)
                .ok_or_else(|| Error::UnknownType(current.to_string()))?;
            match def {
                TypeDef::Primitive(p) => return Ok(Resolved::Primitive(*p)),
                TypeDef::Struct(s) => return Ok(Resolved::Struct(s)),
                TypeDef::Custom(c) => return Ok(Resolved::Custom(*c)),
                TypeDef::Alias(TypeRef::Named(next)) => current = next,
                TypeDef::Alias(composite) => return Ok(Resolved::Composite(composite)),
            }
        }
        Err(Error::UnknownType(format!("{} (alias cycle)", name)))
    }

    /// All fields of `def`, base struct fields first.
    pub fn struct_fields<'r>(
        &'r self,
        scope: Option<&'r Contract>,
        def: &'r StructDef,
    ) -> Result<Vec<&'r Field>> {
        let mut chain = vec![def];
        let mut current = def;
        while let Some(base) = current.base.as_deref() {
            if chain.len() > MAX_ALIAS_DEPTH {
                return Err(Error::UnknownType(format!("{} (base cycle)", def.name)));
            }
            current = match self.resolve_type(scope, base)? {
                Resolved::Struct(parent) => parent,
                _ => {
                    return Err(Error::validation(format!(
                        "base `{}` of `{}` is not a struct",
                        base, def.name
                    )))
                }
            };
            chain.push(current);
        }
        Ok(chain
            .into_iter()
            .rev()
            .flat_map(|s| s.fields.iter())
            .collect())
    }

    /// Registers the types, structs and actions of `abi` under `code`.
    ///
    /// Everything is parsed before anything is inserted, so a malformed ABI
    /// leaves the registry untouched.
    pub fn merge_abi(&mut self, code: &str, abi: &Abi) -> Result<()> {
        let mut types = Vec::with_capacity(abi.types.len() + abi.structs.len());
        for alias in &abi.types {
            let target = TypeRef::parse(&alias.type_)
                .map_err(|e| e.in_field(&alias.new_type_name))?;
            types.push((alias.new_type_name.clone(), TypeDef::Alias(target)));
        }
        for s in &abi.structs {
            let fields = s
                .fields
                .entries()
                .and_then(|entries| {
                    entries
                        .into_iter()
                        .map(|(name, ty)| {
                            let ty = TypeRef::parse(&ty).map_err(|e| e.in_field(&name))?;
                            Ok(Field::new(name, ty))
                        })
                        .collect::<Result<Vec<_>>>()
                })
                .map_err(|e| e.in_field(&s.name))?;
            let base = Some(s.base.trim())
                .filter(|b| !b.is_empty())
                .map(str::to_string);
            let def = StructDef {
                name: s.name.clone(),
                base,
                fields,
            };
            types.push((s.name.clone(), TypeDef::Struct(def)));
        }
        let mut actions = Vec::with_capacity(abi.actions.len());
        for action in &abi.actions {
            let ty = TypeRef::parse(&action.type_).map_err(|e| e.in_field(&action.name))?;
            actions.push((action.name.clone(), ty));
        }

        debug!(
            code,
            types = types.len(),
            actions = actions.len(),
            "merging contract abi"
        );
        let contract = self.contracts.entry(code.to_string()).or_default();
        contract.types.extend(types);
        contract.actions.extend(actions);
        Ok(())
    }
}
