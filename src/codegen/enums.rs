//! Enum declaration and helper-namespace generation.

use crate::codegen::naming::{escape_ts_literal, insert_camel_spaces};
use crate::model::{find_attribute, EnumVariant, TypeId, TypeUniverse};

/// Annotation carrying human-readable variant names.
pub const DISPLAY_MARKERS: &[&str] = &["Display"];

fn display_name(variant: &EnumVariant) -> String {
    if let Some(attr) = find_attribute(&variant.attributes, DISPLAY_MARKERS) {
        if let Some(name) = attr.property("Name").or(attr.value.as_deref()) {
            return name.to_string();
        }
    }
    insert_camel_spaces(&variant.name)
}

fn short_name(variant: &EnumVariant) -> String {
    if let Some(attr) = find_attribute(&variant.attributes, DISPLAY_MARKERS) {
        if let Some(name) = attr
            .property("ShortName")
            .or_else(|| attr.property("Name"))
            .or(attr.value.as_deref())
        {
            return name.to_string();
        }
    }
    insert_camel_spaces(&variant.name)
}

fn switch_helper(
    out: &mut String,
    enum_name: &str,
    fn_name: &str,
    variants: &[EnumVariant],
    label: impl Fn(&EnumVariant) -> String,
) {
    out.push_str(&format!(
        "  export function {fn_name}(value: {enum_name}): string {{\n"
    ));
    out.push_str("    switch (value) {\n");
    for variant in variants {
        out.push_str(&format!(
            "      case {enum_name}.{}: return '{}';\n",
            variant.name,
            escape_ts_literal(&label(variant))
        ));
    }
    out.push_str("    }\n");
    out.push_str("  }\n");
}

/// Render one enum: the numeric declaration plus a companion namespace with
/// `getDescription`, `getShortName` and `getValues` helpers.
pub fn generate_enum(universe: &TypeUniverse, id: TypeId) -> String {
    let descriptor = universe.get(id);
    let name = descriptor.name.as_str();
    let variants = descriptor.variants.as_slice();

    let mut out = String::new();
    out.push_str(&format!("export enum {name} {{\n"));
    for variant in variants {
        out.push_str(&format!("  {} = {},\n", variant.name, variant.value));
    }
    out.push_str("}\n");

    out.push('\n');
    out.push_str(&format!("export namespace {name} {{\n"));
    switch_helper(&mut out, name, "getDescription", variants, display_name);
    out.push('\n');
    switch_helper(&mut out, name, "getShortName", variants, short_name);
    out.push('\n');
    out.push_str(&format!("  export function getValues(): {name}[] {{\n"));
    let refs: Vec<String> = variants
        .iter()
        .map(|v| format!("{name}.{}", v.name))
        .collect();
    out.push_str(&format!("    return [{}];\n", refs.join(", ")));
    out.push_str("  }\n");
    out.push_str("}\n");
    out
}
