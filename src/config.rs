//! Generator configuration.
//!
//! `GeneratorOptions` holds everything that can come from a config file
//! (serde-deserializable, camelCase keys). Customization points that are
//! functions — the type filter, the namespace calculator, the request-url
//! expression — live in `GeneratorHooks` so the options stay plain data and
//! two runs with different configurations cannot interfere through ambient
//! state.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::TypeDescriptor;

/// Which null-like variant(s) a nullable occurrence is widened with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum NullableMapping {
    /// Widen to `T | null`.
    #[default]
    Null,
    /// Widen to `T | undefined`.
    Undefined,
    /// Widen to `T | null | undefined`.
    NullOrUndefined,
}

/// Data-only generator configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GeneratorOptions {
    /// Treat unmarked `string` occurrences as nullable.
    pub strings_nullable_by_default: bool,
    /// Null-like widening used where no per-context override applies.
    pub default_nullable_mapping: NullableMapping,
    /// Override widening for DTO properties.
    pub property_nullable_mapping: Option<NullableMapping>,
    /// Override widening for action parameters.
    pub parameter_nullable_mapping: Option<NullableMapping>,
    /// Replace a trailing `| undefined` on properties with a `?` marker.
    pub make_undefined_properties_optional: bool,
    /// Replace a trailing `| undefined` on parameters with a `?` marker.
    pub make_undefined_parameters_optional: bool,
    /// Type names added to the traversal roots besides discovered
    /// controllers.
    pub additional_entry_types: Vec<String>,
    /// Header comment placed at the top of every emitted file. A default
    /// "generated file" banner is used when unset.
    pub header: Option<String>,
    /// Extra raw import lines per module name.
    pub additional_module_imports: BTreeMap<String, Vec<String>>,
    /// Extra raw content lines per module name, placed before declarations.
    pub additional_module_content: BTreeMap<String, Vec<String>>,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            strings_nullable_by_default: true,
            default_nullable_mapping: NullableMapping::Null,
            property_nullable_mapping: None,
            parameter_nullable_mapping: None,
            make_undefined_properties_optional: false,
            make_undefined_parameters_optional: false,
            additional_entry_types: Vec::new(),
            header: None,
            additional_module_imports: BTreeMap::new(),
            additional_module_content: BTreeMap::new(),
        }
    }
}

impl GeneratorOptions {
    /// Widening used for DTO property occurrences.
    pub fn property_mapping(&self) -> NullableMapping {
        self.property_nullable_mapping
            .unwrap_or(self.default_nullable_mapping)
    }

    /// Widening used for action parameter occurrences.
    pub fn parameter_mapping(&self) -> NullableMapping {
        self.parameter_nullable_mapping
            .unwrap_or(self.default_nullable_mapping)
    }
}

/// Predicate deciding whether a discovered type participates in generation.
pub type TypeFilter = dyn Fn(&TypeDescriptor) -> bool;

/// Function-valued customization points.
///
/// Every hook has a default: accept all types, `module.Type` qualified
/// references, and single-quoted URL literals.
#[derive(Default)]
pub struct GeneratorHooks {
    /// Rejecting a type excludes it from classification and traversal;
    /// referenced occurrences of a rejected type render as `any`.
    pub type_filter: Option<Box<TypeFilter>>,
    /// Computes the qualified reference for a type reached from another
    /// module, given `(module_name, type_name)`.
    pub namespace_ref: Option<Box<dyn Fn(&str, &str) -> String>>,
    /// Turns a resolved request URL into the TypeScript expression embedded
    /// in the call stub.
    pub request_url_expression: Option<Box<dyn Fn(&str) -> String>>,
}

impl fmt::Debug for GeneratorHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneratorHooks")
            .field("type_filter", &self.type_filter.is_some())
            .field("namespace_ref", &self.namespace_ref.is_some())
            .field("request_url_expression", &self.request_url_expression.is_some())
            .finish()
    }
}

impl GeneratorHooks {
    /// Apply the type filter (accept everything by default).
    pub fn accepts(&self, descriptor: &TypeDescriptor) -> bool {
        match &self.type_filter {
            Some(filter) => filter(descriptor),
            None => true,
        }
    }

    /// Qualified cross-module reference for a type.
    pub fn qualified_ref(&self, module: &str, type_name: &str) -> String {
        match &self.namespace_ref {
            Some(calc) => calc(module, type_name),
            None => format!("{module}.{type_name}"),
        }
    }

    /// URL expression for a call stub.
    pub fn url_expression(&self, url: &str) -> String {
        match &self.request_url_expression {
            Some(gen) => gen(url),
            None => format!("'{url}'"),
        }
    }
}
