//! Generation pipeline: entry collection, graph discovery, module assembly
//! and file text construction.

use std::fs;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::codegen::{generate_controller, generate_dto, generate_enum};
use crate::config::{GeneratorHooks, GeneratorOptions};
use crate::error::GenerateError;
use crate::ir::classify::{classify, TypeClass};
use crate::ir::typeref::RenderScope;
use crate::ir::{assemble, build_graph, ModulePlan, ModuleSet};
use crate::model::{TypeId, TypeUniverse};

const DEFAULT_HEADER: &str = "// This file is generated automatically. Do not edit it manually.";

/// One generated output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedModule {
    /// Module name.
    pub name: String,
    /// File name (`<module>.ts`).
    pub file_name: String,
    /// Complete file text.
    pub content: String,
}

/// Drives one generation run over a type universe.
#[derive(Debug)]
pub struct Generator {
    universe: TypeUniverse,
    options: GeneratorOptions,
    hooks: GeneratorHooks,
}

impl Generator {
    /// Generator with default hooks.
    pub fn new(universe: TypeUniverse, options: GeneratorOptions) -> Self {
        Self {
            universe,
            options,
            hooks: GeneratorHooks::default(),
        }
    }

    /// Install custom hooks.
    pub fn with_hooks(mut self, hooks: GeneratorHooks) -> Self {
        self.hooks = hooks;
        self
    }

    /// Entry types: every discovered controller plus the configured extras.
    /// A configured name that matches nothing is a hard error; a typo there
    /// would otherwise silently shrink the output.
    fn entries(&self) -> Result<Vec<TypeId>, GenerateError> {
        let mut entries: Vec<TypeId> = self
            .universe
            .ids()
            .filter(|&id| classify(&self.universe, id, &self.hooks) == TypeClass::Controller)
            .collect();
        for name in &self.options.additional_entry_types {
            match self.universe.find(name) {
                Some(id) => entries.push(id),
                None => return Err(GenerateError::UnknownEntryType(name.clone())),
            }
        }
        Ok(entries)
    }

    /// Run the pipeline and return the module texts without touching the
    /// filesystem. The result is deterministic for a given universe and
    /// configuration.
    pub fn generate(&self) -> Result<Vec<GeneratedModule>, GenerateError> {
        let entries = self.entries()?;
        debug!(entry_count = entries.len(), "Collected entry types.");

        let graph = build_graph(&self.universe, &entries, &self.hooks);
        debug!(type_count = graph.len(), "Closed dependency graph.");

        let set = assemble(&self.universe, &graph, &self.hooks);
        set.modules
            .iter()
            .map(|plan| {
                let content = self.render_module(plan, &set)?;
                Ok(GeneratedModule {
                    name: plan.name.clone(),
                    file_name: format!("{}.ts", plan.name),
                    content,
                })
            })
            .collect()
    }

    /// Run the pipeline and write one file per module into `dest`.
    pub fn generate_and_save(
        &self,
        dest: &Path,
        force_create: bool,
    ) -> Result<Vec<GeneratedModule>, GenerateError> {
        let modules = self.generate()?;

        if force_create {
            fs::create_dir_all(dest).map_err(|err| {
                warn!(
                    dest = %dest.display(),
                    error = %err,
                    "Failed to create output directory."
                );
                GenerateError::from(err)
            })?;
        }

        for module in &modules {
            let path = dest.join(&module.file_name);
            fs::write(&path, &module.content).map_err(|err| {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "Failed to write generated module."
                );
                GenerateError::from(err)
            })?;
            info!(
                path = %path.display(),
                content_len = module.content.len(),
                "Generated module written."
            );
        }
        Ok(modules)
    }

    fn render_module(
        &self,
        plan: &ModulePlan,
        set: &ModuleSet,
    ) -> Result<String, GenerateError> {
        let scope = RenderScope {
            universe: &self.universe,
            module_of: &set.module_of,
            current_module: &plan.name,
            hooks: &self.hooks,
        };

        let mut out = String::new();
        out.push_str(self.options.header.as_deref().unwrap_or(DEFAULT_HEADER));
        out.push('\n');

        for import in &plan.imports {
            out.push_str(&format!("import * as {import} from './{import}';\n"));
        }
        if let Some(extra) = self.options.additional_module_imports.get(&plan.name) {
            for line in extra {
                out.push_str(line);
                out.push('\n');
            }
        }

        let mut body = String::new();
        if let Some(extra) = self.options.additional_module_content.get(&plan.name) {
            for line in extra {
                body.push('\n');
                body.push_str(line);
                body.push('\n');
            }
        }
        for &id in &plan.types {
            let rendered = match classify(&self.universe, id, &self.hooks) {
                TypeClass::Enum => generate_enum(&self.universe, id),
                TypeClass::Controller => {
                    generate_controller(&self.universe, id, &self.options, &scope)?
                }
                TypeClass::Dto => generate_dto(&self.universe, id, &self.options, &scope),
                TypeClass::Excluded => continue,
            };
            body.push('\n');
            body.push_str(&rendered);
        }

        if body.is_empty() {
            // A declarationless file must still be a module.
            out.push_str("\nexport {};\n");
        } else {
            out.push_str(&body);
        }
        Ok(out)
    }
}
