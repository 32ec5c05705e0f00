//! Fluent construction of synthetic type universes.
//!
//! The builder pre-registers the well-known prelude (builtins, the
//! nullable/dictionary/sequence/result wrappers and the framework controller
//! base) so tests and embedders only declare their own types.

use super::descriptor::{
    AttributeInfo, EnumVariant, MemberInfo, MethodInfo, TypeDescriptor, TypeId, TypeKind,
    TypeUniverse, WellKnown,
};

/// Builds a `TypeUniverse` with the well-known prelude installed.
#[derive(Debug)]
pub struct UniverseBuilder {
    universe: TypeUniverse,
    void: TypeId,
    object: TypeId,
    string: TypeId,
    bool_: TypeId,
    date_time: TypeId,
    guid: TypeId,
    int: TypeId,
    long: TypeId,
    double: TypeId,
    form_file: TypeId,
    file_result: TypeId,
    nullable_def: TypeId,
    dictionary_def: TypeId,
    list_def: TypeId,
    enumerable: TypeId,
    action_result_def: TypeId,
    task_def: TypeId,
    controller_base: TypeId,
}

impl Default for UniverseBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl UniverseBuilder {
    /// Fresh universe containing only the prelude.
    pub fn new() -> Self {
        let mut universe = TypeUniverse::default();

        let mut builtin = |name: &str, kind: TypeKind, role: WellKnown| {
            let mut descriptor = TypeDescriptor::new(name, kind);
            descriptor.well_known = Some(role);
            universe.push(descriptor)
        };

        let void = builtin("void", TypeKind::Struct, WellKnown::Void);
        let object = builtin("object", TypeKind::Class, WellKnown::Any);
        let string = builtin("string", TypeKind::Class, WellKnown::String);
        let bool_ = builtin("bool", TypeKind::Struct, WellKnown::Bool);
        let date_time = builtin("DateTime", TypeKind::Struct, WellKnown::Date);
        builtin("DateTimeOffset", TypeKind::Struct, WellKnown::Date);
        let guid = builtin("Guid", TypeKind::Struct, WellKnown::Guid);
        let int = builtin("int", TypeKind::Struct, WellKnown::Number);
        let long = builtin("long", TypeKind::Struct, WellKnown::Number);
        let double = builtin("double", TypeKind::Struct, WellKnown::Number);
        builtin("decimal", TypeKind::Struct, WellKnown::Number);
        let form_file = builtin("IFormFile", TypeKind::Interface, WellKnown::FormFile);
        let file_result = builtin("FileResult", TypeKind::Class, WellKnown::FileResult);
        let enumerable = builtin("IEnumerable", TypeKind::Interface, WellKnown::Sequence);

        let mut generic = |name: &str, kind: TypeKind, role: WellKnown, params: &[&str]| {
            let mut descriptor = TypeDescriptor::new(name, kind);
            descriptor.well_known = Some(role);
            descriptor.generic_params = params.iter().map(|p| (*p).to_string()).collect();
            universe.push(descriptor)
        };

        let nullable_def = generic("Nullable", TypeKind::Struct, WellKnown::Nullable, &["T"]);
        let dictionary_def = generic(
            "Dictionary",
            TypeKind::Class,
            WellKnown::Dictionary,
            &["TKey", "TValue"],
        );
        let list_def = generic("List", TypeKind::Class, WellKnown::Sequence, &["T"]);
        let action_result_def = generic(
            "ActionResult",
            TypeKind::Class,
            WellKnown::ActionResult,
            &["TValue"],
        );
        let task_def = generic("Task", TypeKind::Class, WellKnown::Task, &["TResult"]);

        let mut controller = TypeDescriptor::new("ControllerBase", TypeKind::Class);
        controller.is_abstract = true;
        controller.is_framework = true;
        let controller_base = universe.push(controller);

        Self {
            universe,
            void,
            object,
            string,
            bool_,
            date_time,
            guid,
            int,
            long,
            double,
            form_file,
            file_result,
            nullable_def,
            dictionary_def,
            list_def,
            enumerable,
            action_result_def,
            task_def,
            controller_base,
        }
    }

    /// `void`.
    pub fn void(&self) -> TypeId {
        self.void
    }

    /// The universal root object type.
    pub fn object(&self) -> TypeId {
        self.object
    }

    /// `string`.
    pub fn string(&self) -> TypeId {
        self.string
    }

    /// `bool`.
    pub fn bool(&self) -> TypeId {
        self.bool_
    }

    /// `DateTime`.
    pub fn date_time(&self) -> TypeId {
        self.date_time
    }

    /// `Guid`.
    pub fn guid(&self) -> TypeId {
        self.guid
    }

    /// 32-bit integer.
    pub fn int(&self) -> TypeId {
        self.int
    }

    /// 64-bit integer.
    pub fn long(&self) -> TypeId {
        self.long
    }

    /// Double-precision float.
    pub fn double(&self) -> TypeId {
        self.double
    }

    /// Form-file upload type.
    pub fn form_file(&self) -> TypeId {
        self.form_file
    }

    /// File-result type.
    pub fn file_result(&self) -> TypeId {
        self.file_result
    }

    /// Non-generic sequence type.
    pub fn enumerable(&self) -> TypeId {
        self.enumerable
    }

    /// Framework controller base class.
    pub fn controller_base(&self) -> TypeId {
        self.controller_base
    }

    /// Register an arbitrary descriptor.
    pub fn push(&mut self, descriptor: TypeDescriptor) -> TypeId {
        self.universe.push(descriptor)
    }

    /// Plain concrete class.
    pub fn class(&mut self, name: &str) -> TypeId {
        self.universe.push(TypeDescriptor::new(name, TypeKind::Class))
    }

    /// Abstract class.
    pub fn abstract_class(&mut self, name: &str) -> TypeId {
        let mut descriptor = TypeDescriptor::new(name, TypeKind::Class);
        descriptor.is_abstract = true;
        self.universe.push(descriptor)
    }

    /// Interface.
    pub fn interface(&mut self, name: &str) -> TypeId {
        self.universe
            .push(TypeDescriptor::new(name, TypeKind::Interface))
    }

    /// Value type.
    pub fn struct_type(&mut self, name: &str) -> TypeId {
        self.universe
            .push(TypeDescriptor::new(name, TypeKind::Struct))
    }

    /// Enumeration with members in declaration order.
    pub fn enum_type(&mut self, name: &str, variants: &[(&str, i64)]) -> TypeId {
        let mut descriptor = TypeDescriptor::new(name, TypeKind::Enum);
        descriptor.variants = variants
            .iter()
            .map(|(variant, value)| EnumVariant {
                name: (*variant).to_string(),
                value: *value,
                attributes: Vec::new(),
            })
            .collect();
        self.universe.push(descriptor)
    }

    /// Concrete controller: a class deriving from the framework base,
    /// carrying the api-controller marker and a class-level route template.
    pub fn controller(&mut self, name: &str, route: &str) -> TypeId {
        let mut descriptor = TypeDescriptor::new(name, TypeKind::Class);
        descriptor.base = Some(self.controller_base);
        descriptor
            .attributes
            .push(AttributeInfo::new("ApiController"));
        descriptor
            .attributes
            .push(AttributeInfo::new("Route").with_value(route));
        self.universe.push(descriptor)
    }

    /// Generic class definition; returns the definition id and one
    /// placeholder id per declared parameter.
    pub fn generic_class(&mut self, name: &str, params: &[&str]) -> (TypeId, Vec<TypeId>) {
        let mut descriptor = TypeDescriptor::new(name, TypeKind::Class);
        descriptor.generic_params = params.iter().map(|p| (*p).to_string()).collect();
        let def = self.universe.push(descriptor);
        let placeholders = params
            .iter()
            .map(|p| {
                self.universe
                    .push(TypeDescriptor::new(*p, TypeKind::GenericParam))
            })
            .collect();
        (def, placeholders)
    }

    /// Instantiate a generic definition with concrete arguments. The
    /// instantiation inherits the definition's name, kind and mapping role.
    pub fn instantiate(&mut self, def: TypeId, args: &[TypeId]) -> TypeId {
        let (name, kind, role) = {
            let template = self.universe.get(def);
            (template.name.clone(), template.kind, template.well_known)
        };
        let mut descriptor = TypeDescriptor::new(name, kind);
        descriptor.well_known = role;
        descriptor.generic_def = Some(def);
        descriptor.generic_args = args.to_vec();
        self.universe.push(descriptor)
    }

    /// `List<elem>`.
    pub fn list_of(&mut self, elem: TypeId) -> TypeId {
        self.instantiate(self.list_def, &[elem])
    }

    /// `Dictionary<key, value>`.
    pub fn dictionary_of(&mut self, key: TypeId, value: TypeId) -> TypeId {
        self.instantiate(self.dictionary_def, &[key, value])
    }

    /// `Nullable<inner>`.
    pub fn nullable_of(&mut self, inner: TypeId) -> TypeId {
        self.instantiate(self.nullable_def, &[inner])
    }

    /// `ActionResult<payload>`.
    pub fn action_result_of(&mut self, payload: TypeId) -> TypeId {
        self.instantiate(self.action_result_def, &[payload])
    }

    /// `Task<payload>`.
    pub fn task_of(&mut self, payload: TypeId) -> TypeId {
        self.instantiate(self.task_def, &[payload])
    }

    /// Payloadless task.
    pub fn task(&mut self) -> TypeId {
        let mut descriptor = TypeDescriptor::new("Task", TypeKind::Class);
        descriptor.well_known = Some(WellKnown::Task);
        self.universe.push(descriptor)
    }

    /// Set the base type of a declared type.
    pub fn set_base(&mut self, id: TypeId, base: TypeId) {
        self.descriptor_mut(id).base = Some(base);
    }

    /// Add an implemented interface.
    pub fn add_interface(&mut self, id: TypeId, interface: TypeId) {
        self.descriptor_mut(id).interfaces.push(interface);
    }

    /// Add a readable member.
    pub fn add_member(&mut self, id: TypeId, member: MemberInfo) {
        self.descriptor_mut(id).members.push(member);
    }

    /// Add a declared method.
    pub fn add_method(&mut self, id: TypeId, method: MethodInfo) {
        self.descriptor_mut(id).methods.push(method);
    }

    /// Add a type-level attribute.
    pub fn add_attribute(&mut self, id: TypeId, attribute: AttributeInfo) {
        self.descriptor_mut(id).attributes.push(attribute);
    }

    /// Add an attribute to an enum member by name.
    pub fn add_variant_attribute(&mut self, id: TypeId, variant: &str, attribute: AttributeInfo) {
        if let Some(v) = self
            .descriptor_mut(id)
            .variants
            .iter_mut()
            .find(|v| v.name == variant)
        {
            v.attributes.push(attribute);
        }
    }

    /// Finish building.
    pub fn build(self) -> TypeUniverse {
        self.universe
    }

    fn descriptor_mut(&mut self, id: TypeId) -> &mut TypeDescriptor {
        self.universe.get_mut(id)
    }
}
