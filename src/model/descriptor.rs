//! Type descriptors and the type universe.
//!
//! A `TypeDescriptor` exposes exactly what the engine needs from a structural
//! type: kind, name, generic identity and arguments, base type, interfaces,
//! readable members, declared methods, and custom attributes. Descriptors are
//! immutable once the universe is built and are compared by `TypeId`.

use serde::{Deserialize, Serialize};

use crate::error::GenerateError;

/// Identity of a type within a `TypeUniverse`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct TypeId(pub usize);

/// Structural kind of a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeKind {
    /// Reference type.
    Class,
    /// Value type.
    Struct,
    /// Enumeration.
    Enum,
    /// Interface.
    Interface,
    /// A generic type parameter placeholder (renders as its own name).
    GenericParam,
}

/// Special roles the mapping rules recognize on builtin and framework types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WellKnown {
    /// `void`.
    Void,
    /// The universal root object type; renders as `any`.
    Any,
    /// `string`.
    String,
    /// `boolean`.
    Bool,
    /// Date/time-like types; render as `Date`.
    Date,
    /// GUID-like types; render as `string`.
    Guid,
    /// Any numeric kind; renders as `number`.
    Number,
    /// Form-file upload type; renders as `FormData`.
    FormFile,
    /// File-result type; renders as `any`.
    FileResult,
    /// Nullable-value-type wrapper; unwrapped before mapping.
    Nullable,
    /// Dictionary-like generic with (key, value) arguments.
    Dictionary,
    /// Sequence; generic instantiations map to `Elem[]`, the non-generic
    /// form to `any[]`.
    Sequence,
    /// Action-result wrapper; unwraps to its payload argument.
    ActionResult,
    /// Task-like wrapper; unwraps to its payload, `void` when payloadless.
    Task,
}

/// A custom attribute attached to a type, member, method, parameter or
/// return slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeInfo {
    /// Attribute type name as declared (e.g. `Route`, `HttpPostAttribute`).
    pub name: String,
    /// Primary positional string argument, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Explicit precedence field (route ordering).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,
    /// Named arguments (e.g. `Name`/`ShortName` on a display attribute).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<(String, String)>,
}

impl AttributeInfo {
    /// Attribute with no arguments.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
            order: None,
            properties: Vec::new(),
        }
    }

    /// Set the primary positional argument.
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Set the precedence field.
    pub fn with_order(mut self, order: i32) -> Self {
        self.order = Some(order);
        self
    }

    /// Add a named argument.
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.push((key.into(), value.into()));
        self
    }

    /// Case-insensitive match against a marker name, tolerating the
    /// conventional `Attribute` suffix and a namespace-qualified name.
    pub fn matches(&self, marker: &str) -> bool {
        normalize_attribute_name(&self.name) == normalize_attribute_name(marker)
    }

    /// Look up a named argument.
    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }
}

/// Normalize an attribute name for marker matching: drop any namespace
/// qualification, strip one `Attribute` suffix, lowercase.
pub fn normalize_attribute_name(name: &str) -> String {
    let simple = name.rsplit('.').next().unwrap_or(name);
    let trimmed = simple
        .strip_suffix("Attribute")
        .or_else(|| simple.strip_suffix("attribute"))
        .unwrap_or(simple);
    trimmed.to_ascii_lowercase()
}

/// Find the first attribute in a set matching any of the given markers.
pub fn find_attribute<'a>(
    attributes: &'a [AttributeInfo],
    markers: &[&str],
) -> Option<&'a AttributeInfo> {
    attributes
        .iter()
        .find(|a| markers.iter().any(|m| a.matches(m)))
}

/// One declared member of an enumeration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnumVariant {
    /// Member name.
    pub name: String,
    /// Underlying numeric value.
    pub value: i64,
    /// Attributes on the member (display annotations).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<AttributeInfo>,
}

/// A readable field or property.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberInfo {
    /// Declared member name.
    pub name: String,
    /// Member type.
    pub ty: TypeId,
    /// Attributes on the member (nullability markers, serialization names).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<AttributeInfo>,
}

impl MemberInfo {
    /// Member with no attributes.
    pub fn new(name: impl Into<String>, ty: TypeId) -> Self {
        Self {
            name: name.into(),
            ty,
            attributes: Vec::new(),
        }
    }

    /// Add an attribute.
    pub fn with_attribute(mut self, attribute: AttributeInfo) -> Self {
        self.attributes.push(attribute);
        self
    }
}

/// A method parameter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParamInfo {
    /// Parameter name.
    pub name: String,
    /// Parameter type.
    pub ty: TypeId,
    /// Whether the declaration carries a default value.
    #[serde(default)]
    pub has_default: bool,
    /// Attributes on the parameter (body marker, nullability markers).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<AttributeInfo>,
}

impl ParamInfo {
    /// Required parameter with no attributes.
    pub fn new(name: impl Into<String>, ty: TypeId) -> Self {
        Self {
            name: name.into(),
            ty,
            has_default: false,
            attributes: Vec::new(),
        }
    }

    /// Mark the parameter as carrying a default value.
    pub fn with_default(mut self) -> Self {
        self.has_default = true;
        self
    }

    /// Add an attribute.
    pub fn with_attribute(mut self, attribute: AttributeInfo) -> Self {
        self.attributes.push(attribute);
        self
    }
}

/// A declared method.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodInfo {
    /// Method name.
    pub name: String,
    /// Visibility; only public methods become actions.
    #[serde(default = "default_true")]
    pub is_public: bool,
    /// Static methods never become actions.
    #[serde(default)]
    pub is_static: bool,
    /// Property accessor methods never become actions.
    #[serde(default)]
    pub is_accessor: bool,
    /// Return type.
    pub return_ty: TypeId,
    /// Attributes on the return slot.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub return_attributes: Vec<AttributeInfo>,
    /// Parameters in declaration order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<ParamInfo>,
    /// Attributes on the method (routes, verbs).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<AttributeInfo>,
}

fn default_true() -> bool {
    true
}

impl MethodInfo {
    /// Public instance method with no parameters or attributes.
    pub fn new(name: impl Into<String>, return_ty: TypeId) -> Self {
        Self {
            name: name.into(),
            is_public: true,
            is_static: false,
            is_accessor: false,
            return_ty,
            return_attributes: Vec::new(),
            params: Vec::new(),
            attributes: Vec::new(),
        }
    }

    /// Append a parameter.
    pub fn with_param(mut self, param: ParamInfo) -> Self {
        self.params.push(param);
        self
    }

    /// Add a method attribute.
    pub fn with_attribute(mut self, attribute: AttributeInfo) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Add a return-slot attribute.
    pub fn with_return_attribute(mut self, attribute: AttributeInfo) -> Self {
        self.return_attributes.push(attribute);
        self
    }

    /// Mark as a property accessor.
    pub fn accessor(mut self) -> Self {
        self.is_accessor = true;
        self
    }

    /// Mark as static.
    pub fn static_method(mut self) -> Self {
        self.is_static = true;
        self
    }
}

/// A structural type in the universe.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeDescriptor {
    /// Declared type name (without generic arity decorations).
    pub name: String,
    /// Structural kind.
    pub kind: TypeKind,
    /// Special mapping role, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub well_known: Option<WellKnown>,
    /// Abstract types are never entry points.
    #[serde(default)]
    pub is_abstract: bool,
    /// Known base-framework type; its declared methods never become actions.
    #[serde(default)]
    pub is_framework: bool,
    /// The generic definition this type instantiates, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generic_def: Option<TypeId>,
    /// Generic arguments of an instantiation.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub generic_args: Vec<TypeId>,
    /// Declared generic parameter names of a definition.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub generic_params: Vec<String>,
    /// Base type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<TypeId>,
    /// Implemented interfaces.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub interfaces: Vec<TypeId>,
    /// Readable fields and properties.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<MemberInfo>,
    /// Declared methods.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub methods: Vec<MethodInfo>,
    /// Attributes on the type itself.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<AttributeInfo>,
    /// Enumeration members in declaration order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variants: Vec<EnumVariant>,
}

impl TypeDescriptor {
    /// Minimal descriptor of the given kind.
    pub fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            well_known: None,
            is_abstract: false,
            is_framework: false,
            generic_def: None,
            generic_args: Vec::new(),
            generic_params: Vec::new(),
            base: None,
            interfaces: Vec::new(),
            members: Vec::new(),
            methods: Vec::new(),
            attributes: Vec::new(),
            variants: Vec::new(),
        }
    }

    /// Value types (structs and enums) are never nullable without a wrapper.
    pub fn is_value_type(&self) -> bool {
        matches!(self.kind, TypeKind::Struct | TypeKind::Enum)
    }

    /// First attribute on the type matching any of the markers.
    pub fn attribute(&self, markers: &[&str]) -> Option<&AttributeInfo> {
        find_attribute(&self.attributes, markers)
    }
}

/// The full set of types visible to one generation run.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeUniverse {
    types: Vec<TypeDescriptor>,
}

impl TypeUniverse {
    /// Append a descriptor, returning its identity.
    pub fn push(&mut self, descriptor: TypeDescriptor) -> TypeId {
        let id = TypeId(self.types.len());
        self.types.push(descriptor);
        id
    }

    /// Look up a descriptor.
    pub fn get(&self, id: TypeId) -> &TypeDescriptor {
        &self.types[id.0]
    }

    /// Mutable descriptor access; used by the builder only.
    pub(crate) fn get_mut(&mut self, id: TypeId) -> &mut TypeDescriptor {
        &mut self.types[id.0]
    }

    /// All type identities in declaration order.
    pub fn ids(&self) -> impl Iterator<Item = TypeId> + '_ {
        (0..self.types.len()).map(TypeId)
    }

    /// Find a type by declared name (first match; generic definitions win
    /// over their instantiations by declaration order).
    pub fn find(&self, name: &str) -> Option<TypeId> {
        self.types
            .iter()
            .position(|t| t.name == name)
            .map(TypeId)
    }

    /// Parse a universe from a JSON model file.
    pub fn from_json(json: &str) -> Result<Self, GenerateError> {
        serde_json::from_str(json).map_err(|source| GenerateError::Parse {
            what: "type model",
            source,
        })
    }

    /// Whether the type carries the given type-level marker directly or
    /// through its base chain.
    pub fn has_inherited_attribute(&self, id: TypeId, markers: &[&str]) -> bool {
        let mut current = Some(id);
        while let Some(cursor) = current {
            let descriptor = self.get(cursor);
            if descriptor.attribute(markers).is_some() {
                return true;
            }
            current = descriptor.base;
        }
        false
    }

    /// Public instance action candidates: methods declared on the type or an
    /// ancestor, walking the base chain, excluding accessors, static methods
    /// and anything declared directly on a framework type. The most derived
    /// declaration of a name wins.
    pub fn action_methods(&self, id: TypeId) -> Vec<&MethodInfo> {
        let mut seen = std::collections::HashSet::new();
        let mut methods = Vec::new();
        let mut current = Some(id);
        while let Some(cursor) = current {
            let descriptor = self.get(cursor);
            if !descriptor.is_framework {
                for method in &descriptor.methods {
                    if !method.is_public || method.is_static || method.is_accessor {
                        continue;
                    }
                    if seen.insert(method.name.clone()) {
                        methods.push(method);
                    }
                }
            }
            current = descriptor.base;
        }
        methods
    }
}
