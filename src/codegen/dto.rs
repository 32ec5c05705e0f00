//! DTO interface generation.

use crate::codegen::naming::lower_camel_first;
use crate::config::GeneratorOptions;
use crate::ir::nullability::{resolve, TypeOccurrence};
use crate::ir::typeref::{Render, RenderScope, TypeRef};
use crate::model::{find_attribute, MemberInfo, TypeId, TypeUniverse};

/// Annotations overriding the serialized member name.
pub const SERIALIZED_NAME_MARKERS: &[&str] = &["JsonPropertyName", "DataMember"];

fn member_name(member: &MemberInfo) -> String {
    if let Some(attr) = find_attribute(&member.attributes, SERIALIZED_NAME_MARKERS) {
        if let Some(name) = attr.value.as_deref().or_else(|| attr.property("Name")) {
            return name.to_string();
        }
    }
    lower_camel_first(&member.name)
}

/// Render one data shape as a TypeScript interface. The base class and
/// implemented interfaces become `extends` clauses when they map to user
/// types; framework and filtered bases are dropped silently.
pub fn generate_dto(
    universe: &TypeUniverse,
    id: TypeId,
    options: &GeneratorOptions,
    scope: &RenderScope<'_>,
) -> String {
    let descriptor = universe.get(id);

    let mut heritage: Vec<String> = Vec::new();
    let parents = descriptor
        .base
        .iter()
        .chain(descriptor.interfaces.iter())
        .copied();
    for parent in parents {
        let parent_ref = TypeRef::from_type(universe, parent, scope.hooks);
        if matches!(parent_ref, TypeRef::User { .. }) {
            heritage.push(parent_ref.render(scope));
        }
    }

    let mut out = String::new();
    out.push_str("export interface ");
    out.push_str(&descriptor.name);
    if !descriptor.generic_params.is_empty() {
        out.push('<');
        out.push_str(&descriptor.generic_params.join(", "));
        out.push('>');
    }
    if !heritage.is_empty() {
        out.push_str(" extends ");
        out.push_str(&heritage.join(", "));
    }
    out.push_str(" {\n");

    for member in &descriptor.members {
        let occurrence = TypeOccurrence::new(universe, member.ty, &member.attributes, options);
        let resolved = resolve(
            universe,
            &occurrence,
            scope.hooks,
            options.property_mapping(),
            options.make_undefined_properties_optional,
        );
        let marker = if resolved.optional { "?" } else { "" };
        out.push_str(&format!(
            "  {}{marker}: {};\n",
            member_name(member),
            resolved.ty.render(scope)
        ));
    }

    out.push_str("}\n");
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use crate::config::{GeneratorHooks, NullableMapping};
    use crate::model::{AttributeInfo, UniverseBuilder};

    fn scope<'a>(
        universe: &'a TypeUniverse,
        module_of: &'a HashMap<TypeId, String>,
        hooks: &'a GeneratorHooks,
    ) -> RenderScope<'a> {
        RenderScope {
            universe,
            module_of,
            current_module: "dto",
            hooks,
        }
    }

    #[test]
    fn test_interface_with_members_and_extends() {
        let mut builder = UniverseBuilder::new();
        let base = builder.class("EntityDto");
        let status = builder.enum_type("Status", &[("Open", 0)]);
        let user = builder.class("UserDto");
        builder.set_base(user, base);
        builder.add_member(user, crate::model::MemberInfo::new("Name", builder.string()));
        builder.add_member(user, crate::model::MemberInfo::new("Age", builder.int()));
        builder.add_member(user, crate::model::MemberInfo::new("Status", status));
        let universe = builder.build();
        let hooks = GeneratorHooks::default();
        let options = GeneratorOptions::default();

        let module_of: HashMap<_, _> = [
            (base, "dto".to_string()),
            (user, "dto".to_string()),
            (status, "enums".to_string()),
        ]
        .into_iter()
        .collect();
        let s = scope(&universe, &module_of, &hooks);

        let out = generate_dto(&universe, user, &options, &s);
        assert!(out.contains("export interface UserDto extends EntityDto {"));
        assert!(out.contains("  name: string | null;"));
        assert!(out.contains("  age: number;"));
        assert!(out.contains("  status: enums.Status;"));
    }

    #[test]
    fn test_framework_base_is_dropped() {
        let mut builder = UniverseBuilder::new();
        let user = builder.class("UserDto");
        builder.set_base(user, builder.object());
        let universe = builder.build();
        let hooks = GeneratorHooks::default();
        let options = GeneratorOptions::default();
        let module_of = HashMap::new();
        let s = scope(&universe, &module_of, &hooks);

        let out = generate_dto(&universe, user, &options, &s);
        assert!(out.starts_with("export interface UserDto {\n"));
    }

    #[test]
    fn test_serialized_name_override() {
        let mut builder = UniverseBuilder::new();
        let user = builder.class("UserDto");
        builder.add_member(
            user,
            crate::model::MemberInfo::new("FullName", builder.string())
                .with_attribute(AttributeInfo::new("JsonPropertyName").with_value("full_name")),
        );
        let universe = builder.build();
        let hooks = GeneratorHooks::default();
        let options = GeneratorOptions::default();
        let module_of = HashMap::new();
        let s = scope(&universe, &module_of, &hooks);

        let out = generate_dto(&universe, user, &options, &s);
        assert!(out.contains("  full_name: string | null;"));
    }

    #[test]
    fn test_optional_promotion_on_properties() {
        let mut builder = UniverseBuilder::new();
        let user = builder.class("UserDto");
        builder.add_member(user, crate::model::MemberInfo::new("Name", builder.string()));
        let universe = builder.build();
        let hooks = GeneratorHooks::default();
        let options = GeneratorOptions {
            property_nullable_mapping: Some(NullableMapping::NullOrUndefined),
            make_undefined_properties_optional: true,
            ..GeneratorOptions::default()
        };
        let module_of = HashMap::new();
        let s = scope(&universe, &module_of, &hooks);

        let out = generate_dto(&universe, user, &options, &s);
        assert!(out.contains("  name?: string | null;"));
    }

    #[test]
    fn test_generic_definition_declares_parameters() {
        let mut builder = UniverseBuilder::new();
        let (page, params) = builder.generic_class("Page", &["T"]);
        builder.add_member(page, crate::model::MemberInfo::new("Items", params[0]));
        builder.add_member(page, crate::model::MemberInfo::new("Total", builder.int()));
        let universe = builder.build();
        let hooks = GeneratorHooks::default();
        let options = GeneratorOptions::default();
        let module_of = HashMap::new();
        let s = scope(&universe, &module_of, &hooks);

        let out = generate_dto(&universe, page, &options, &s);
        assert!(out.contains("export interface Page<T> {"));
        assert!(out.contains("  items: T;"));
        assert!(out.contains("  total: number;"));
    }
}
