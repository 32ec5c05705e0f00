//! The `TypeRef` algebra.
//!
//! A `TypeRef` is the immutable, structurally-equatable representation of a
//! TypeScript type expression. Three variants cover everything the mapping
//! rules produce:
//!
//! - `User` — a reference to a user-defined type (generic instantiations
//!   carry the definition identity plus mapped arguments)
//! - `Compound` — a templated expression mixing literal text and nested
//!   references (builtins, arrays, dictionaries, mapped types)
//! - `Union` — a flattened, deduplicated variant set; empty renders `never`
//!
//! The mapping from a type descriptor to a `TypeRef` (`TypeRef::from_type`)
//! resolves all model-specific corner cases, so rendering is purely
//! mechanical string building.

use std::collections::HashMap;
use std::collections::HashSet;

use crate::config::GeneratorHooks;
use crate::model::{TypeId, TypeKind, TypeUniverse, WellKnown};

/// A renderable TypeScript type expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeRef {
    /// Reference to a user-defined type, with mapped generic arguments.
    User {
        /// Generic definition identity (or the type itself if non-generic).
        ty: TypeId,
        /// Mapped generic arguments.
        args: Vec<TypeRef>,
    },
    /// Templated expression mixing text and nested references.
    Compound(Compound),
    /// Flattened, deduplicated union; never directly contains a union.
    Union(Vec<TypeRef>),
}

/// Templated type expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compound {
    /// Interleaved literal text and nested references.
    pub parts: Vec<CompoundPart>,
    /// Whether the whole expression binds tighter than a union (no
    /// parentheses needed when embedded).
    pub atomic: bool,
    /// Whether embedded references must be atomic (parenthesized otherwise).
    pub needs_atomic_parts: bool,
}

/// One part of a compound expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompoundPart {
    /// Literal text.
    Text(String),
    /// Nested type expression.
    Ref(TypeRef),
}

/// Context for rendering a `TypeRef` into TypeScript text.
#[derive(Debug)]
pub struct RenderScope<'a> {
    /// The type universe.
    pub universe: &'a TypeUniverse,
    /// Module assignment of every discovered type.
    pub module_of: &'a HashMap<TypeId, String>,
    /// Module currently being emitted (its own types render unqualified).
    pub current_module: &'a str,
    /// Hooks (namespace calculation).
    pub hooks: &'a GeneratorHooks,
}

/// Render a node into TypeScript source text.
pub trait Render {
    /// Produce the TypeScript string representation.
    fn render(&self, scope: &RenderScope<'_>) -> String;
}

impl TypeRef {
    /// An atomic builtin expression (`string`, `null`, a generic-parameter
    /// name, ...).
    pub fn builtin(text: impl Into<String>) -> Self {
        TypeRef::Compound(Compound {
            parts: vec![CompoundPart::Text(text.into())],
            atomic: true,
            needs_atomic_parts: false,
        })
    }

    /// The `null` marker variant.
    pub fn null() -> Self {
        Self::builtin("null")
    }

    /// The `undefined` marker variant.
    pub fn undefined() -> Self {
        Self::builtin("undefined")
    }

    /// The bottom type (empty union; renders `never`).
    pub fn never() -> Self {
        TypeRef::Union(Vec::new())
    }

    /// `Elem[]`. The element is parenthesized when non-atomic.
    pub fn array(elem: TypeRef) -> Self {
        TypeRef::Compound(Compound {
            parts: vec![CompoundPart::Ref(elem), CompoundPart::Text("[]".into())],
            atomic: true,
            needs_atomic_parts: true,
        })
    }

    /// `{ [key: string]: V }` / `{ [key: number]: V }`.
    pub fn indexed(key: &str, value: TypeRef) -> Self {
        TypeRef::Compound(Compound {
            parts: vec![
                CompoundPart::Text(format!("{{ [key: {key}]: ")),
                CompoundPart::Ref(value),
                CompoundPart::Text(" }".into()),
            ],
            atomic: true,
            needs_atomic_parts: false,
        })
    }

    /// `{ [key in E]?: V }` for enum-keyed dictionaries.
    pub fn mapped(key: TypeRef, value: TypeRef) -> Self {
        TypeRef::Compound(Compound {
            parts: vec![
                CompoundPart::Text("{ [key in ".into()),
                CompoundPart::Ref(key),
                CompoundPart::Text("]?: ".into()),
                CompoundPart::Ref(value),
                CompoundPart::Text(" }".into()),
            ],
            atomic: true,
            needs_atomic_parts: false,
        })
    }

    /// Union of the given variants, flattened and deduplicated in first-seen
    /// order. A single surviving variant is returned unwrapped.
    pub fn union(variants: impl IntoIterator<Item = TypeRef>) -> Self {
        let mut flat = Vec::new();
        for variant in variants {
            absorb(&mut flat, variant);
        }
        if flat.len() == 1 {
            flat.remove(0)
        } else {
            TypeRef::Union(flat)
        }
    }

    /// The flattened variant set of this expression (a non-union is its own
    /// single variant).
    pub fn variants(&self) -> Vec<TypeRef> {
        match self {
            TypeRef::Union(xs) => xs.clone(),
            other => vec![other.clone()],
        }
    }

    /// Exact-membership check on the flattened variant set.
    pub fn contains(&self, variant: &TypeRef) -> bool {
        match self {
            TypeRef::Union(xs) => xs.contains(variant),
            other => other == variant,
        }
    }

    /// Remove one variant from the flattened set. Removing the last variant
    /// yields the bottom type.
    pub fn subtract(&self, variant: &TypeRef) -> TypeRef {
        let remaining: Vec<_> = self
            .variants()
            .into_iter()
            .filter(|v| v != variant)
            .collect();
        TypeRef::union(remaining)
    }

    /// Whether this is the bottom type.
    pub fn is_never(&self) -> bool {
        matches!(self, TypeRef::Union(xs) if xs.is_empty())
    }

    /// Whether the rendered expression binds tighter than a union.
    pub fn is_atomic(&self) -> bool {
        match self {
            TypeRef::User { .. } => true,
            TypeRef::Compound(c) => c.atomic,
            TypeRef::Union(xs) => xs.len() < 2,
        }
    }

    /// Every user-defined type this expression references, with generic
    /// instantiations reduced to their definition identity.
    pub fn dependencies(&self) -> HashSet<TypeId> {
        let mut acc = HashSet::new();
        self.collect_dependencies(&mut acc);
        acc
    }

    /// Accumulate referenced user types into `acc`.
    pub fn collect_dependencies(&self, acc: &mut HashSet<TypeId>) {
        match self {
            TypeRef::User { ty, args } => {
                acc.insert(*ty);
                for arg in args {
                    arg.collect_dependencies(acc);
                }
            }
            TypeRef::Compound(c) => {
                for part in &c.parts {
                    if let CompoundPart::Ref(r) = part {
                        r.collect_dependencies(acc);
                    }
                }
            }
            TypeRef::Union(xs) => {
                for x in xs {
                    x.collect_dependencies(acc);
                }
            }
        }
    }

    /// Map a type descriptor into a `TypeRef`, applying the mapping rules in
    /// order. A nullable-value-type wrapper is unwrapped first; nullability
    /// itself is the occurrence's concern, not the type's. Types rejected by
    /// the filter — and framework types — degrade to `any`.
    pub fn from_type(universe: &TypeUniverse, id: TypeId, hooks: &GeneratorHooks) -> TypeRef {
        let descriptor = universe.get(id);

        if descriptor.well_known == Some(WellKnown::Nullable) {
            return match descriptor.generic_args.first() {
                Some(&inner) => Self::from_type(universe, inner, hooks),
                None => Self::builtin("any"),
            };
        }

        match descriptor.well_known {
            Some(WellKnown::Void) => Self::builtin("void"),
            Some(WellKnown::Any) => Self::builtin("any"),
            Some(WellKnown::String) => Self::builtin("string"),
            Some(WellKnown::Bool) => Self::builtin("boolean"),
            Some(WellKnown::Date) => Self::builtin("Date"),
            Some(WellKnown::Guid) => Self::builtin("string"),
            Some(WellKnown::Number) => Self::builtin("number"),
            Some(WellKnown::FormFile) => Self::builtin("FormData"),
            Some(WellKnown::FileResult) => Self::builtin("any"),
            Some(WellKnown::Dictionary) => Self::map_dictionary(universe, descriptor.generic_args.as_slice(), hooks),
            Some(WellKnown::Sequence) => match descriptor.generic_args.first() {
                Some(&elem) => Self::array(Self::from_type(universe, elem, hooks)),
                None => Self::array(Self::builtin("any")),
            },
            Some(WellKnown::ActionResult) => match descriptor.generic_args.first() {
                Some(&payload) => Self::from_type(universe, payload, hooks),
                None => Self::builtin("any"),
            },
            Some(WellKnown::Task) => match descriptor.generic_args.first() {
                Some(&payload) => Self::from_type(universe, payload, hooks),
                None => Self::builtin("void"),
            },
            Some(WellKnown::Nullable) => Self::builtin("any"),
            None => match descriptor.kind {
                TypeKind::GenericParam => Self::builtin(descriptor.name.clone()),
                _ => {
                    if descriptor.is_framework || !hooks.accepts(descriptor) {
                        return Self::builtin("any");
                    }
                    let ty = descriptor.generic_def.unwrap_or(id);
                    let args = descriptor
                        .generic_args
                        .iter()
                        .map(|&arg| Self::from_type(universe, arg, hooks))
                        .collect();
                    TypeRef::User { ty, args }
                }
            },
        }
    }

    fn map_dictionary(
        universe: &TypeUniverse,
        args: &[TypeId],
        hooks: &GeneratorHooks,
    ) -> TypeRef {
        let (&key, &value) = match (args.first(), args.get(1)) {
            (Some(k), Some(v)) => (k, v),
            _ => return Self::builtin("any"),
        };
        let key_descriptor = universe.get(key);
        let value_ref = Self::from_type(universe, value, hooks);
        match key_descriptor.well_known {
            Some(WellKnown::String) | Some(WellKnown::Guid) => Self::indexed("string", value_ref),
            Some(WellKnown::Number) => Self::indexed("number", value_ref),
            None if key_descriptor.kind == TypeKind::Enum => {
                let key_ref = Self::from_type(universe, key, hooks);
                match key_ref {
                    TypeRef::User { .. } => Self::mapped(key_ref, value_ref),
                    // Filtered-out enum key: nothing to map over.
                    _ => Self::builtin("any"),
                }
            }
            _ => Self::builtin("any"),
        }
    }
}

fn absorb(flat: &mut Vec<TypeRef>, variant: TypeRef) {
    match variant {
        TypeRef::Union(xs) => {
            for x in xs {
                absorb(flat, x);
            }
        }
        other => {
            if !flat.contains(&other) {
                flat.push(other);
            }
        }
    }
}

impl Render for TypeRef {
    fn render(&self, scope: &RenderScope<'_>) -> String {
        match self {
            TypeRef::User { ty, args } => {
                let name = scope.universe.get(*ty).name.as_str();
                let mut out = match scope.module_of.get(ty) {
                    Some(module) if module != scope.current_module => {
                        scope.hooks.qualified_ref(module, name)
                    }
                    _ => name.to_string(),
                };
                if !args.is_empty() {
                    let rendered: Vec<_> = args.iter().map(|a| a.render(scope)).collect();
                    out.push('<');
                    out.push_str(&rendered.join(", "));
                    out.push('>');
                }
                out
            }
            TypeRef::Compound(c) => {
                let mut out = String::new();
                for part in &c.parts {
                    match part {
                        CompoundPart::Text(t) => out.push_str(t),
                        CompoundPart::Ref(r) => {
                            let inner = r.render(scope);
                            if c.needs_atomic_parts && !r.is_atomic() {
                                out.push('(');
                                out.push_str(&inner);
                                out.push(')');
                            } else {
                                out.push_str(&inner);
                            }
                        }
                    }
                }
                out
            }
            TypeRef::Union(xs) => {
                if xs.is_empty() {
                    return "never".to_string();
                }
                xs.iter()
                    .map(|x| x.render(scope))
                    .collect::<Vec<_>>()
                    .join(" | ")
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::model::UniverseBuilder;

    fn scope<'a>(
        universe: &'a TypeUniverse,
        module_of: &'a HashMap<TypeId, String>,
        hooks: &'a GeneratorHooks,
        current: &'a str,
    ) -> RenderScope<'a> {
        RenderScope {
            universe,
            module_of,
            current_module: current,
            hooks,
        }
    }

    #[test]
    fn test_union_flattening() {
        let a = TypeRef::builtin("string");
        let b = TypeRef::builtin("null");
        let c = TypeRef::builtin("undefined");
        let nested = TypeRef::union([TypeRef::union([a.clone(), b.clone()]), c.clone()]);
        let flat = TypeRef::union([a, b, c]);
        assert_eq!(nested, flat);
    }

    #[test]
    fn test_union_deduplication() {
        let u = TypeRef::union([
            TypeRef::builtin("string"),
            TypeRef::builtin("string"),
            TypeRef::null(),
        ]);
        assert_eq!(u.variants().len(), 2);
    }

    #[test]
    fn test_single_variant_unwraps() {
        let u = TypeRef::union([TypeRef::builtin("string")]);
        assert_eq!(u, TypeRef::builtin("string"));
    }

    #[test]
    fn test_subtract_to_never() {
        let a = TypeRef::builtin("string");
        assert!(a.subtract(&TypeRef::builtin("string")).is_never());
    }

    #[test]
    fn test_subtract_undefined() {
        let u = TypeRef::union([TypeRef::builtin("string"), TypeRef::null(), TypeRef::undefined()]);
        let promoted = u.subtract(&TypeRef::undefined());
        assert_eq!(
            promoted,
            TypeRef::union([TypeRef::builtin("string"), TypeRef::null()])
        );
        assert!(!promoted.contains(&TypeRef::undefined()));
    }

    #[test]
    fn test_never_renders() {
        let universe = UniverseBuilder::new().build();
        let module_of = HashMap::new();
        let hooks = GeneratorHooks::default();
        let s = scope(&universe, &module_of, &hooks, "dto");
        assert_eq!(TypeRef::never().render(&s), "never");
    }

    #[test]
    fn test_array_of_union_parenthesized() {
        let universe = UniverseBuilder::new().build();
        let module_of = HashMap::new();
        let hooks = GeneratorHooks::default();
        let s = scope(&universe, &module_of, &hooks, "dto");
        let u = TypeRef::union([TypeRef::builtin("string"), TypeRef::null()]);
        assert_eq!(TypeRef::array(u).render(&s), "(string | null)[]");
        assert_eq!(TypeRef::array(TypeRef::builtin("number")).render(&s), "number[]");
    }

    #[test]
    fn test_builtin_mapping() {
        let builder = UniverseBuilder::new();
        let guid = builder.guid();
        let date = builder.date_time();
        let universe = builder.build();
        let hooks = GeneratorHooks::default();
        assert_eq!(
            TypeRef::from_type(&universe, guid, &hooks),
            TypeRef::builtin("string")
        );
        assert_eq!(
            TypeRef::from_type(&universe, date, &hooks),
            TypeRef::builtin("Date")
        );
    }

    #[test]
    fn test_sequence_and_dictionary_mapping() {
        let mut builder = UniverseBuilder::new();
        let dto = builder.class("UserDto");
        let list = builder.list_of(dto);
        let dict = builder.dictionary_of(builder.string(), dto);
        let int_dict = builder.dictionary_of(builder.int(), dto);
        let universe = builder.build();
        let hooks = GeneratorHooks::default();

        let module_of: HashMap<_, _> = [(dto, "dto".to_string())].into_iter().collect();
        let s = scope(&universe, &module_of, &hooks, "dto");

        assert_eq!(TypeRef::from_type(&universe, list, &hooks).render(&s), "UserDto[]");
        assert_eq!(
            TypeRef::from_type(&universe, dict, &hooks).render(&s),
            "{ [key: string]: UserDto }"
        );
        assert_eq!(
            TypeRef::from_type(&universe, int_dict, &hooks).render(&s),
            "{ [key: number]: UserDto }"
        );
    }

    #[test]
    fn test_enum_keyed_dictionary_renders_mapped_type() {
        let mut builder = UniverseBuilder::new();
        let status = builder.enum_type("Status", &[("Open", 0), ("Closed", 1)]);
        let dict = builder.dictionary_of(status, builder.string());
        let universe = builder.build();
        let hooks = GeneratorHooks::default();

        let module_of: HashMap<_, _> = [(status, "enums".to_string())].into_iter().collect();
        let s = scope(&universe, &module_of, &hooks, "dto");

        assert_eq!(
            TypeRef::from_type(&universe, dict, &hooks).render(&s),
            "{ [key in enums.Status]?: string }"
        );
    }

    #[test]
    fn test_wrapper_unwrapping() {
        let mut builder = UniverseBuilder::new();
        let dto = builder.class("UserDto");
        let task = builder.task_of(dto);
        let action = builder.action_result_of(dto);
        let task_of_action = builder.task_of(action);
        let bare_task = builder.task();
        let universe = builder.build();
        let hooks = GeneratorHooks::default();

        let expected = TypeRef::User { ty: dto, args: vec![] };
        assert_eq!(TypeRef::from_type(&universe, task, &hooks), expected);
        assert_eq!(TypeRef::from_type(&universe, task_of_action, &hooks), expected);
        assert_eq!(
            TypeRef::from_type(&universe, bare_task, &hooks),
            TypeRef::builtin("void")
        );
    }

    #[test]
    fn test_dependency_extraction_reduces_to_definition() {
        let mut builder = UniverseBuilder::new();
        let (def, params) = builder.generic_class("Page", &["T"]);
        let _ = params;
        let dto = builder.class("UserDto");
        let page_of_dto = builder.instantiate(def, &[dto]);
        let list = builder.list_of(page_of_dto);
        let universe = builder.build();
        let hooks = GeneratorHooks::default();

        let deps = TypeRef::from_type(&universe, list, &hooks).dependencies();
        assert!(deps.contains(&def));
        assert!(deps.contains(&dto));
        assert_eq!(deps.len(), 2);
    }

    #[test]
    fn test_filtered_type_renders_any() {
        let mut builder = UniverseBuilder::new();
        let dto = builder.class("InternalDto");
        let universe = builder.build();
        let hooks = GeneratorHooks {
            type_filter: Some(Box::new(|d| d.name != "InternalDto")),
            ..GeneratorHooks::default()
        };
        assert_eq!(
            TypeRef::from_type(&universe, dto, &hooks),
            TypeRef::builtin("any")
        );
    }
}
