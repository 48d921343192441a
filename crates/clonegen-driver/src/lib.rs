//! Run orchestration for the clonegen generator.
//!
//! Each target class is processed independently: resolve its header by
//! naming convention, parse, extract, render. Classes are scheduled on a
//! rayon worker pool and joined in request order; the assembled document is
//! persisted only when its content changed.

mod error;
mod output;

pub use error::ProcessError;
pub use output::{write_if_changed, WriteStatus};

use clonegen_clang::{compiler_args, ClangParser};
use clonegen_codegen::{assemble_document, render_clone_body, sort_fields};
use clonegen_config::{ClassSpec, RunConfig};
use clonegen_extract::{find_class, RecordRule};
use miette::{miette, Result};
use rayon::prelude::*;
use std::path::PathBuf;

/// Orchestrates one full generation run.
pub struct Driver {
    config: RunConfig,
    record_rule: RecordRule,
    clang_args: Vec<String>,
}

/// Outcome summary of a run.
#[derive(Debug)]
pub struct RunReport {
    /// Whether the output file was rewritten.
    pub status: WriteStatus,
    /// Per-class failures, by class name, in request order.
    pub failures: Vec<(String, ProcessError)>,
}

impl Driver {
    pub fn new(config: RunConfig) -> Self {
        let record_rule = if config.generator.value_records.is_empty() {
            RecordRule::AllRecords
        } else {
            RecordRule::AllowList(config.generator.value_records.clone())
        };
        let clang_args = compiler_args(&config.generator.include_dirs);
        Self {
            config,
            record_rule,
            clang_args,
        }
    }

    /// Header path for a class: directory + prefixed file name. This naming
    /// convention is a policy of the processor, not of the AST walker.
    fn header_path(&self, class: &ClassSpec) -> PathBuf {
        self.config.generator.header_dir.join(format!(
            "{}{}.h",
            self.config.generator.header_prefix,
            class.simple_name()
        ))
    }

    /// Process one target class to its rendered clone body.
    ///
    /// A class that is missing from its header renders nothing but is not a
    /// failure; parse diagnostics are printed and never fatal by themselves.
    pub fn process_class(&self, class: &ClassSpec) -> std::result::Result<String, ProcessError> {
        let header = self.header_path(class);
        println!("Parsing {}", header.display());

        let parser = ClangParser::new().map_err(|e| ProcessError::Frontend(e.to_string()))?;
        let ast = parser
            .parse_file(&header, &self.clang_args)
            .map_err(|e| ProcessError::Parse {
                path: header.clone(),
                message: e.to_string(),
            })?;

        for diagnostic in &ast.diagnostics {
            eprintln!("{}", diagnostic);
        }

        let record = find_class(&ast.translation_unit, &class.name, &self.record_rule)?;
        let Some(mut record) = record else {
            eprintln!("Class {} not found in {}", class.name, header.display());
            return Ok(String::new());
        };

        sort_fields(&mut record.fields);

        // The discovered chain loses to an explicit per-class override:
        // some classes reach their runtime base only through virtual
        // dispatch the AST cannot resolve.
        let bases = match &class.bases {
            Some(overridden) => overridden.as_slice(),
            None => record.bases.as_slice(),
        };
        let most_base = self.config.most_base_for(class);

        Ok(render_clone_body(
            &record.class_name,
            &record.fields,
            bases,
            &most_base,
        ))
    }

    /// Run the whole generation: process every class on the worker pool,
    /// assemble the document in request order, persist if changed.
    pub fn run(&self) -> Result<RunReport> {
        let results: Vec<std::result::Result<String, ProcessError>> = self
            .config
            .classes
            .par_iter()
            .map(|class| self.process_class(class))
            .collect();

        let mut bodies = Vec::new();
        let mut failures = Vec::new();
        for (class, result) in self.config.classes.iter().zip(results) {
            match result {
                Ok(body) => {
                    if !body.is_empty() {
                        bodies.push(body);
                    }
                }
                Err(e) => failures.push((class.name.clone(), e)),
            }
        }

        let class_names: Vec<String> = self
            .config
            .classes
            .iter()
            .map(|c| c.simple_name().to_string())
            .collect();
        let document = assemble_document(
            &class_names,
            &bodies,
            &self.config.generator.namespace,
            &self.config.generator.header_prefix,
        );

        let output = &self.config.generator.output;
        let status = write_if_changed(&document, output)
            .map_err(|e| miette!("Failed to write {}: {}", output.display(), e))?;
        match status {
            WriteStatus::Overwritten => {
                println!("File {} is outdated. Overwriting...", output.display());
            }
            WriteStatus::UpToDate => {
                println!("File {} is up to date.", output.display());
            }
        }

        Ok(RunReport { status, failures })
    }
}
