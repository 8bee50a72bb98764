//! Menupath code generator library.
//!
//! This crate turns a remote command-tree schema (menus, named-object
//! collections, leaf commands, docstrings, arity hints) into a statically
//! navigable Rust type hierarchy built on `menupath-runtime`. The generated
//! code includes:
//!
//! - A root struct constructed from a transport handle
//! - One nested module + struct per menu or named-object collection
//! - One accessor per child, taking an instance key for collections
//! - One async method per leaf command, forwarding arguments untouched
//!
//! ## Modules
//!
//! - [`source`] - Loading schema documents (JSON/YAML dumps, in-memory)
//! - [`naming`] - Remote name to Rust identifier sanitization
//! - [`validation`] - Kind determination and schema checks
//! - [`codegen`] - Code generation for individual components
//! - [`output`] - Final assembly, validation, and file writing
//! - [`cargo_gen`] - Cargo.toml generation for the output package
//! - [`errors`] - Error types for the generator
//!
//! ## Example Usage
//!
//! ```no_run
//! use std::path::Path;
//! use menupath_gen::source::FileSource;
//! use menupath_gen::{GeneratorOptions, generate};
//!
//! let source = FileSource::new("schemas/meshing.json");
//! let summary = generate(&source, &GeneratorOptions::default(), Path::new("stubs/src"), true).unwrap();
//! println!("{} commands", summary.command_count);
//! ```
//!
//! ## Generated Code Structure
//!
//! For a schema `{file: {import: {cad}}}` rooted at `Meshing`:
//!
//! ```text
//! pub struct Meshing { node: MenuNode }
//! impl Meshing {
//!     pub fn new(transport: TransportHandle) -> Self;
//!     pub fn file(&self) -> file::File;
//! }
//! pub mod file {
//!     pub struct File { node: MenuNode }
//!     impl File { pub fn import_(&self) -> import_::Import; }
//!     pub mod import_ {
//!         pub struct Import { node: MenuNode }
//!         impl Import {
//!             pub async fn cad(&self, args: impl Into<Arguments>) -> Result<Value, CallError>;
//!         }
//!     }
//! }
//! ```

use std::path::Path;

use tracing::info;

pub mod cargo_gen;
pub mod codegen;
pub mod errors;
pub mod naming;
pub mod options;
pub mod output;
pub mod source;
pub mod validation;

#[cfg(test)]
pub(crate) mod test_utils;

pub use errors::GeneratorError;
pub use options::GeneratorOptions;
pub use output::GenerationSummary;

use source::SchemaSource;

/// Loads, validates and emits a schema in one pass.
///
/// Nothing is written unless every step succeeds.
///
/// ## Errors
///
/// Returns the first [`GeneratorError`] from loading, validation, emission
/// or writing.
pub fn generate(
    source: &dyn SchemaSource,
    options: &GeneratorOptions,
    output_dir: &Path,
    dry_run: bool,
) -> Result<GenerationSummary, GeneratorError> {
    info!(source = %source.describe(), "loading schema");
    let document = source.load()?;
    let forest = validation::build_forest(&document, options)?;
    output::generate_and_write(&forest, options, output_dir, dry_run)
}
