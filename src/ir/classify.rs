//! Type classification and module assignment.

use crate::config::GeneratorHooks;
use crate::model::{TypeId, TypeKind, TypeUniverse};

/// Marker identifying API controller classes, searched along the base chain.
pub const API_CONTROLLER_MARKERS: &[&str] = &["ApiController"];

/// Module receiving enum declarations.
pub const MODULE_ENUMS: &str = "enums";
/// Module receiving data-shape interfaces.
pub const MODULE_DTO: &str = "dto";
/// Module receiving controller call stubs.
pub const MODULE_API: &str = "api";

/// The three standard output modules, emitted even when empty.
pub const STANDARD_MODULES: &[&str] = &[MODULE_API, MODULE_DTO, MODULE_ENUMS];

/// What a discovered type contributes to the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeClass {
    /// Numeric enum plus its helper namespace; lands in `enums`.
    Enum,
    /// Concrete controller; its actions become call stubs in `api`.
    Controller,
    /// Everything else; becomes an interface in `dto`.
    Dto,
    /// Rejected by the type filter; generates nothing.
    Excluded,
}

/// Classify one discovered type. A controller is a non-abstract class
/// carrying the controller marker anywhere along its base chain; abstract
/// bases of controllers classify as DTOs like any other class.
pub fn classify(universe: &TypeUniverse, id: TypeId, hooks: &GeneratorHooks) -> TypeClass {
    let descriptor = universe.get(id);
    if descriptor.is_framework || !hooks.accepts(descriptor) {
        return TypeClass::Excluded;
    }
    if !descriptor.is_abstract
        && descriptor.kind == TypeKind::Class
        && universe.has_inherited_attribute(id, API_CONTROLLER_MARKERS)
    {
        return TypeClass::Controller;
    }
    if descriptor.kind == TypeKind::Enum {
        return TypeClass::Enum;
    }
    TypeClass::Dto
}

/// Module a classified type is declared in, if any.
pub fn module_for(class: TypeClass) -> Option<&'static str> {
    match class {
        TypeClass::Enum => Some(MODULE_ENUMS),
        TypeClass::Controller => Some(MODULE_API),
        TypeClass::Dto => Some(MODULE_DTO),
        TypeClass::Excluded => None,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::model::UniverseBuilder;

    #[test]
    fn test_controller_marker_is_inherited() {
        let mut builder = UniverseBuilder::new();
        let base = builder.controller("BaseController", "/[controller]");
        let derived = builder.class("UserController");
        builder.set_base(derived, base);
        let universe = builder.build();
        let hooks = GeneratorHooks::default();

        assert_eq!(classify(&universe, derived, &hooks), TypeClass::Controller);
    }

    #[test]
    fn test_abstract_controller_is_dto() {
        let mut builder = UniverseBuilder::new();
        let base = builder.controller("BaseController", "/[controller]");
        // Abstract base carrying the marker must not produce stubs.
        let abstract_base = builder.abstract_class("SharedController");
        builder.set_base(abstract_base, base);
        let universe = builder.build();
        let hooks = GeneratorHooks::default();
        assert_eq!(classify(&universe, abstract_base, &hooks), TypeClass::Dto);
    }

    #[test]
    fn test_enum_and_dto_classification() {
        let mut builder = UniverseBuilder::new();
        let status = builder.enum_type("Status", &[("Open", 0)]);
        let dto = builder.class("UserDto");
        let universe = builder.build();
        let hooks = GeneratorHooks::default();

        assert_eq!(classify(&universe, status, &hooks), TypeClass::Enum);
        assert_eq!(classify(&universe, dto, &hooks), TypeClass::Dto);
        assert_eq!(module_for(TypeClass::Enum), Some(MODULE_ENUMS));
        assert_eq!(module_for(TypeClass::Excluded), None);
    }

    #[test]
    fn test_filtered_type_is_excluded() {
        let mut builder = UniverseBuilder::new();
        let dto = builder.class("InternalDto");
        let universe = builder.build();
        let hooks = GeneratorHooks {
            type_filter: Some(Box::new(|d| !d.name.starts_with("Internal"))),
            ..GeneratorHooks::default()
        };
        assert_eq!(classify(&universe, dto, &hooks), TypeClass::Excluded);
    }
}
