//! Intermediate representation: type expressions, nullability, dependency
//! discovery and module layout.

pub mod classify;
pub mod graph;
pub mod modules;
pub mod nullability;
pub mod typeref;

pub use classify::{classify, module_for, TypeClass, MODULE_API, MODULE_DTO, MODULE_ENUMS};
pub use graph::{build_graph, DependencyGraph};
pub use modules::{assemble, ModulePlan, ModuleSet};
pub use nullability::{resolve, Nullability, ResolvedOccurrence, TypeOccurrence};
pub use typeref::{Render, RenderScope, TypeRef};
