//! Work-list dependency discovery.
//!
//! Starting from the entry set (controllers plus configured extras), the
//! builder walks each discovered type's outgoing references and keeps going
//! until the set is closed. Self-references are kept in the edge sets;
//! cycles are legal and simply mean two modules (or one) import each other.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::config::GeneratorHooks;
use crate::ir::classify::{classify, TypeClass};
use crate::ir::typeref::TypeRef;
use crate::model::{TypeId, TypeUniverse};

/// Discovered types and their direct user-type dependencies.
pub type DependencyGraph = HashMap<TypeId, HashSet<TypeId>>;

/// Close the entry set over direct dependencies. Filtered and framework
/// types never enter the graph; references to them degrade to `any` inside
/// the type mapping, so they contribute no edges.
pub fn build_graph(
    universe: &TypeUniverse,
    entries: &[TypeId],
    hooks: &GeneratorHooks,
) -> DependencyGraph {
    let mut graph = DependencyGraph::new();
    let mut queue: VecDeque<TypeId> = VecDeque::new();
    let mut seen: HashSet<TypeId> = HashSet::new();

    for &entry in entries {
        if classify(universe, entry, hooks) != TypeClass::Excluded && seen.insert(entry) {
            queue.push_back(entry);
        }
    }

    while let Some(id) = queue.pop_front() {
        let deps = direct_dependencies(universe, id, hooks);
        for &dep in &deps {
            if classify(universe, dep, hooks) != TypeClass::Excluded && seen.insert(dep) {
                queue.push_back(dep);
            }
        }
        graph.insert(id, deps);
    }

    // Edges to excluded types were collected for completeness; drop any
    // that never became nodes.
    let nodes: HashSet<TypeId> = graph.keys().copied().collect();
    for deps in graph.values_mut() {
        deps.retain(|d| nodes.contains(d));
    }
    graph
}

/// Direct user-type dependencies of one discovered type: action signatures
/// for controllers, base/interfaces/members for data shapes, nothing for
/// enums.
fn direct_dependencies(
    universe: &TypeUniverse,
    id: TypeId,
    hooks: &GeneratorHooks,
) -> HashSet<TypeId> {
    let mut referenced: Vec<TypeId> = Vec::new();
    match classify(universe, id, hooks) {
        TypeClass::Controller => {
            for method in universe.action_methods(id) {
                referenced.push(method.return_ty);
                for param in &method.params {
                    referenced.push(param.ty);
                }
            }
        }
        TypeClass::Dto => {
            let descriptor = universe.get(id);
            if let Some(base) = descriptor.base {
                referenced.push(base);
            }
            referenced.extend(descriptor.interfaces.iter().copied());
            for member in &descriptor.members {
                referenced.push(member.ty);
            }
        }
        TypeClass::Enum | TypeClass::Excluded => {}
    }

    let mut deps = HashSet::new();
    for ty in referenced {
        TypeRef::from_type(universe, ty, hooks).collect_dependencies(&mut deps);
    }
    deps
}
