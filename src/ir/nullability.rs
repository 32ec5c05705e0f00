//! Occurrence-site nullability.
//!
//! Nullability is a property of where a type is used, not of the type
//! itself. Each member, parameter and return slot computes a three-valued
//! verdict exactly once, from its own annotations plus the occurring type,
//! and resolution turns the verdict into a widened TypeScript union (and
//! possibly an optional marker).

use crate::config::{GeneratorHooks, GeneratorOptions, NullableMapping};
use crate::ir::typeref::TypeRef;
use crate::model::{find_attribute, AttributeInfo, TypeId, TypeUniverse, WellKnown};

/// Annotations that force an occurrence to be non-nullable.
pub const NOT_NULL_MARKERS: &[&str] = &["NotNull", "DisallowNull"];

/// Annotations that force an occurrence to be nullable.
pub const NULLABLE_MARKERS: &[&str] = &["CanBeNull", "AllowNull", "MaybeNull"];

/// Three-valued nullability verdict for one occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nullability {
    /// Definitely non-nullable; never widened.
    NotNull,
    /// Definitely nullable; widened per the active mapping.
    Null,
    /// No evidence either way; rendered without widening.
    Oblivious,
}

/// One use of a type at a member, parameter or return slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeOccurrence {
    /// The occurring type.
    pub ty: TypeId,
    /// Verdict computed from this occurrence's own annotations and type.
    pub nullability: Nullability,
}

impl TypeOccurrence {
    /// Compute the verdict for one occurrence. Precedence: explicit
    /// non-nullable annotation, explicit nullable annotation, nullable
    /// value-type wrapper, the strings-nullable default, value types
    /// (non-nullable), then oblivious.
    pub fn new(
        universe: &TypeUniverse,
        ty: TypeId,
        attributes: &[AttributeInfo],
        options: &GeneratorOptions,
    ) -> Self {
        let descriptor = universe.get(ty);
        let nullability = if find_attribute(attributes, NOT_NULL_MARKERS).is_some() {
            Nullability::NotNull
        } else if find_attribute(attributes, NULLABLE_MARKERS).is_some() {
            Nullability::Null
        } else if descriptor.well_known == Some(WellKnown::Nullable) {
            Nullability::Null
        } else if descriptor.well_known == Some(WellKnown::String)
            && options.strings_nullable_by_default
        {
            Nullability::Null
        } else if descriptor.is_value_type() {
            Nullability::NotNull
        } else {
            Nullability::Oblivious
        };
        Self { ty, nullability }
    }
}

/// A fully resolved occurrence: the TypeScript type plus whether the slot
/// carries a `?` marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOccurrence {
    /// Widened TypeScript type.
    pub ty: TypeRef,
    /// Whether the declaration site gets a `?` marker.
    pub optional: bool,
}

/// Resolve an occurrence into its TypeScript type. Nullable occurrences are
/// widened per `mapping`; when `promote_undefined` is set, a widened
/// `undefined` variant is subtracted and replaced by the optional marker.
pub fn resolve(
    universe: &TypeUniverse,
    occurrence: &TypeOccurrence,
    hooks: &GeneratorHooks,
    mapping: NullableMapping,
    promote_undefined: bool,
) -> ResolvedOccurrence {
    let base = TypeRef::from_type(universe, occurrence.ty, hooks);
    match occurrence.nullability {
        Nullability::NotNull | Nullability::Oblivious => ResolvedOccurrence {
            ty: base,
            optional: false,
        },
        Nullability::Null => {
            let widened = widen(base, mapping);
            let undefined = TypeRef::undefined();
            if promote_undefined && widened.contains(&undefined) {
                ResolvedOccurrence {
                    ty: widened.subtract(&undefined),
                    optional: true,
                }
            } else {
                ResolvedOccurrence {
                    ty: widened,
                    optional: false,
                }
            }
        }
    }
}

fn widen(base: TypeRef, mapping: NullableMapping) -> TypeRef {
    match mapping {
        NullableMapping::Null => TypeRef::union([base, TypeRef::null()]),
        NullableMapping::Undefined => TypeRef::union([base, TypeRef::undefined()]),
        NullableMapping::NullOrUndefined => {
            TypeRef::union([base, TypeRef::null(), TypeRef::undefined()])
        }
    }
}
