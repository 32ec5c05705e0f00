//! Abstract type model.
//!
//! The generator never talks to a live reflection system. Instead it walks a
//! `TypeUniverse` of `TypeDescriptor`s — an explicit, serializable snapshot
//! of the server-side type graph (controllers, DTOs, enums, and the
//! well-known framework types they reference). The CLI loads a universe from
//! a JSON model file; tests and embedders build one with `UniverseBuilder`.

mod builder;
mod descriptor;

pub use builder::UniverseBuilder;
pub use descriptor::{
    find_attribute, normalize_attribute_name, AttributeInfo, EnumVariant, MemberInfo, MethodInfo,
    ParamInfo, TypeDescriptor, TypeId, TypeKind, TypeUniverse, WellKnown,
};
