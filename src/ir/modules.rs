//! Module assembly.
//!
//! Discovered types are bucketed into the three standard modules, ordered
//! deterministically (types by name, modules by name), and each module's
//! import list is derived from the dependency graph. The standard modules
//! are always present so consumers can import them unconditionally.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::config::GeneratorHooks;
use crate::ir::classify::{classify, module_for, STANDARD_MODULES};
use crate::ir::graph::DependencyGraph;
use crate::model::{TypeId, TypeUniverse};

/// One output module: an ordered list of types plus the sibling modules it
/// imports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModulePlan {
    /// Module name (also the emitted file stem).
    pub name: String,
    /// Declared types, ordered by type name.
    pub types: Vec<TypeId>,
    /// Sibling modules referenced by this module's declarations.
    pub imports: Vec<String>,
}

/// The full module layout for one generation run.
#[derive(Debug, Clone)]
pub struct ModuleSet {
    /// Modules ordered by name.
    pub modules: Vec<ModulePlan>,
    /// Module assignment per discovered type.
    pub module_of: HashMap<TypeId, String>,
}

/// Bucket the graph's nodes into modules and compute imports. A module
/// never imports itself; self-referential cycles within a module need no
/// import edge.
pub fn assemble(
    universe: &TypeUniverse,
    graph: &DependencyGraph,
    hooks: &GeneratorHooks,
) -> ModuleSet {
    let mut module_of: HashMap<TypeId, String> = HashMap::new();
    for &id in graph.keys() {
        if let Some(module) = module_for(classify(universe, id, hooks)) {
            module_of.insert(id, module.to_string());
        }
    }

    let mut members: BTreeMap<String, Vec<TypeId>> = STANDARD_MODULES
        .iter()
        .map(|&m| (m.to_string(), Vec::new()))
        .collect();
    for (&id, module) in &module_of {
        members.entry(module.clone()).or_default().push(id);
    }
    for types in members.values_mut() {
        types.sort_by(|&a, &b| {
            universe
                .get(a)
                .name
                .cmp(&universe.get(b).name)
                .then(a.cmp(&b))
        });
    }

    let mut modules = Vec::with_capacity(members.len());
    for (name, types) in members {
        let mut imports: BTreeSet<String> = BTreeSet::new();
        for &id in &types {
            for dep in graph.get(&id).into_iter().flatten() {
                if let Some(target) = module_of.get(dep) {
                    if *target != name {
                        imports.insert(target.clone());
                    }
                }
            }
        }
        modules.push(ModulePlan {
            name,
            types,
            imports: imports.into_iter().collect(),
        });
    }

    ModuleSet { modules, module_of }
}
