//! Controller stub generation: route resolution, request specs and the
//! `export namespace` call-stub text.
//!
//! Stubs delegate to an ambient `request(...)` helper supplied by the
//! consuming project; configuration can inject its import line per module.

use crate::codegen::naming::{
    escape_ts_literal, lower_camel_first, replace_case_insensitive, strip_controller_suffix,
};
use crate::config::GeneratorOptions;
use crate::error::GenerateError;
use crate::ir::nullability::{resolve, TypeOccurrence};
use crate::ir::typeref::{Render, RenderScope};
use crate::model::{
    find_attribute, AttributeInfo, MethodInfo, TypeId, TypeKind, TypeUniverse, WellKnown,
};

/// Route-template annotation.
pub const ROUTE_MARKERS: &[&str] = &["Route"];

/// Explicit body-parameter annotation.
pub const FROM_BODY_MARKERS: &[&str] = &["FromBody"];

/// Verb annotations and the HTTP method each one selects. These also carry
/// route templates when given a value.
pub const VERB_MARKERS: &[(&str, &str)] = &[
    ("HttpGet", "GET"),
    ("HttpPost", "POST"),
    ("HttpPut", "PUT"),
    ("HttpDelete", "DELETE"),
    ("HttpPatch", "PATCH"),
    ("HttpHead", "HEAD"),
    ("HttpOptions", "OPTIONS"),
];

/// Resolved HTTP request shape for one action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSpec {
    /// Final URL with placeholders substituted.
    pub url: String,
    /// HTTP method.
    pub method: &'static str,
    /// Indices of query parameters, in declaration order.
    pub query: Vec<usize>,
    /// Index of the body parameter, if any.
    pub body: Option<usize>,
}

fn is_route_bearing(attr: &AttributeInfo) -> bool {
    ROUTE_MARKERS.iter().any(|m| attr.matches(m))
        || VERB_MARKERS.iter().any(|(m, _)| attr.matches(m))
}

/// Pick the effective route template from an attribute list: all
/// route-bearing annotations with a template, ordered by their explicit
/// precedence field (lowest first, declaration order as tiebreak).
fn route_template(attributes: &[AttributeInfo]) -> Option<&str> {
    let mut candidates: Vec<(i32, &str)> = attributes
        .iter()
        .filter(|a| is_route_bearing(a))
        .filter_map(|a| a.value.as_deref().map(|t| (a.order.unwrap_or(0), t)))
        .collect();
    candidates.sort_by_key(|&(order, _)| order);
    candidates.first().map(|&(_, t)| t)
}

/// Class-level template, searched up the base chain so shared controller
/// bases can carry the route.
fn class_route_template(universe: &TypeUniverse, id: TypeId) -> Option<String> {
    let mut cursor = Some(id);
    while let Some(current) = cursor {
        let descriptor = universe.get(current);
        if let Some(template) = route_template(&descriptor.attributes) {
            return Some(template.to_string());
        }
        cursor = descriptor.base;
    }
    None
}

fn http_method(attributes: &[AttributeInfo]) -> &'static str {
    for attr in attributes {
        for &(marker, verb) in VERB_MARKERS {
            if attr.matches(marker) {
                return verb;
            }
        }
    }
    "GET"
}

fn collapse_separators(mut url: String) -> String {
    while url.contains("//") {
        url = url.replace("//", "/");
    }
    if url.len() > 1 && url.ends_with('/') {
        url.pop();
    }
    url
}

/// Combine class and method templates and substitute route placeholders.
/// A method template anchored at the root (leading `/` or `~/`) replaces
/// the class template entirely.
fn resolve_url(
    universe: &TypeUniverse,
    controller: TypeId,
    method: &MethodInfo,
) -> Result<String, GenerateError> {
    let descriptor = universe.get(controller);
    let class_template = class_route_template(universe, controller);
    let method_template = route_template(&method.attributes).map(str::to_string);

    if class_template.is_none() && method_template.is_none() {
        return Err(GenerateError::UnresolvableRoute {
            controller: descriptor.name.clone(),
            action: method.name.clone(),
        });
    }

    let combined = match &method_template {
        Some(t) if t.starts_with('/') => t.clone(),
        Some(t) if t.starts_with("~/") => t[1..].to_string(),
        _ => format!(
            "/{}/{}",
            class_template.as_deref().unwrap_or(""),
            method_template.as_deref().unwrap_or("")
        ),
    };
    let url = collapse_separators(combined);

    let controller_name = strip_controller_suffix(&descriptor.name);
    let url = replace_case_insensitive(&url, "[controller]", controller_name);
    let url = replace_case_insensitive(&url, "{controller}", controller_name);
    let url = replace_case_insensitive(&url, "[action]", &method.name);
    let url = replace_case_insensitive(&url, "{action}", &method.name);
    Ok(url)
}

fn is_body_candidate(universe: &TypeUniverse, ty: TypeId) -> bool {
    let descriptor = universe.get(ty);
    match descriptor.well_known {
        Some(WellKnown::FormFile) => true,
        Some(_) => false,
        None => {
            !descriptor.is_framework
                && matches!(descriptor.kind, TypeKind::Class | TypeKind::Interface)
        }
    }
}

/// Pick the body parameter: an explicit marker wins; otherwise a single
/// unmarked complex-typed parameter is taken implicitly, and two or more
/// unmarked candidates are a hard error rather than a silent guess.
fn body_param(
    universe: &TypeUniverse,
    controller: TypeId,
    method: &MethodInfo,
) -> Result<Option<usize>, GenerateError> {
    if let Some(explicit) = method
        .params
        .iter()
        .position(|p| find_attribute(&p.attributes, FROM_BODY_MARKERS).is_some())
    {
        return Ok(Some(explicit));
    }

    let candidates: Vec<usize> = method
        .params
        .iter()
        .enumerate()
        .filter(|(_, p)| is_body_candidate(universe, p.ty))
        .map(|(i, _)| i)
        .collect();
    match candidates.as_slice() {
        [] => Ok(None),
        [only] => Ok(Some(*only)),
        many => Err(GenerateError::AmbiguousBodyParameter {
            controller: universe.get(controller).name.clone(),
            action: method.name.clone(),
            candidates: many
                .iter()
                .map(|&i| method.params[i].name.clone())
                .collect(),
        }),
    }
}

/// Compute the full request spec for one action.
pub fn request_spec(
    universe: &TypeUniverse,
    controller: TypeId,
    method: &MethodInfo,
) -> Result<RequestSpec, GenerateError> {
    let url = resolve_url(universe, controller, method)?;
    let body = body_param(universe, controller, method)?;
    let query = (0..method.params.len())
        .filter(|&i| Some(i) != body)
        .collect();
    Ok(RequestSpec {
        url,
        method: http_method(&method.attributes),
        query,
        body,
    })
}

fn return_type(
    universe: &TypeUniverse,
    method: &MethodInfo,
    options: &GeneratorOptions,
    scope: &RenderScope<'_>,
) -> String {
    let occurrence = TypeOccurrence::new(
        universe,
        method.return_ty,
        &method.return_attributes,
        options,
    );
    // Returns widen per the default mapping but never gain a `?` marker.
    let resolved = resolve(
        universe,
        &occurrence,
        scope.hooks,
        options.default_nullable_mapping,
        false,
    );
    resolved.ty.render(scope)
}

fn stub(
    universe: &TypeUniverse,
    controller: TypeId,
    method: &MethodInfo,
    options: &GeneratorOptions,
    scope: &RenderScope<'_>,
) -> Result<String, GenerateError> {
    let spec = request_spec(universe, controller, method)?;

    let mut signature: Vec<String> = Vec::with_capacity(method.params.len());
    for param in &method.params {
        let occurrence = TypeOccurrence::new(universe, param.ty, &param.attributes, options);
        let resolved = resolve(
            universe,
            &occurrence,
            scope.hooks,
            options.parameter_mapping(),
            options.make_undefined_parameters_optional,
        );
        let marker = if resolved.optional || param.has_default {
            "?"
        } else {
            ""
        };
        signature.push(format!(
            "{}{marker}: {}",
            param.name,
            resolved.ty.render(scope)
        ));
    }

    let query_names: Vec<&str> = spec
        .query
        .iter()
        .map(|&i| method.params[i].name.as_str())
        .collect();
    let params_object = if query_names.is_empty() {
        "{}".to_string()
    } else {
        format!("{{ {} }}", query_names.join(", "))
    };
    let data = match spec.body {
        Some(i) => method.params[i].name.as_str(),
        None => "null",
    };

    let mut out = String::new();
    out.push_str(&format!(
        "  export async function {}({}): Promise<{}> {{\n",
        lower_camel_first(&method.name),
        signature.join(", "),
        return_type(universe, method, options, scope)
    ));
    out.push_str("    return (await request({\n");
    out.push_str(&format!(
        "      url: {},\n",
        scope.hooks.url_expression(&escape_ts_literal(&spec.url))
    ));
    out.push_str(&format!("      method: '{}',\n", spec.method));
    out.push_str(&format!("      params: {params_object},\n"));
    out.push_str(&format!("      data: {data},\n"));
    out.push_str("    })).data;\n");
    out.push_str("  }\n");
    Ok(out)
}

/// Render one controller as a namespace of async call stubs, one per
/// eligible action.
pub fn generate_controller(
    universe: &TypeUniverse,
    id: TypeId,
    options: &GeneratorOptions,
    scope: &RenderScope<'_>,
) -> Result<String, GenerateError> {
    let descriptor = universe.get(id);
    let mut out = String::new();
    out.push_str(&format!("export namespace {} {{\n", descriptor.name));
    let actions = universe.action_methods(id);
    for (i, method) in actions.into_iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&stub(universe, id, method, options, scope)?);
    }
    out.push_str("}\n");
    Ok(out)
}
