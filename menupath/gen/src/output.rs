//! Output assembly and file writing for generated code.
//!
//! This module handles the final phase of code generation: assembling all
//! generated pieces into complete Rust files, validating the output,
//! formatting it, and writing it to disk atomically.
//!
//! ## Output Structure
//!
//! ```text
//! stubs/src/
//! ├── lib.rs       # Module declaration and re-exports
//! └── meshing.rs   # Root type plus one nested module per menu
//! ```
//!
//! ## Safety Guarantees
//!
//! - **Validation**: All generated code is validated with `syn` before writing
//! - **Formatting**: Output is formatted with `prettyplease` for consistent style
//! - **All or nothing**: Every file is rendered and staged to a temp file
//!   before the first target is replaced; a failed stage removes the others
//! - **Atomic writes**: Uses temp file + rename pattern to prevent partial writes
//! - **Deterministic**: The same forest and options always produce identical bytes

use std::fs;
use std::path::{Path, PathBuf};

use menupath_define::SchemaForest;
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use tracing::{debug, info};

use crate::codegen::{EmitContext, ModuleDocBuilder, generate_root};
use crate::errors::GeneratorError;
use crate::options::GeneratorOptions;

/// Name `lib.rs` re-exports an external runtime under.
pub const RUNTIME_ALIAS: &str = "runtime";

/// Notice prepended to every generated file.
pub const GENERATED_NOTICE: &str =
    "// This code was automatically generated by menupath-gen. Do not edit manually.";

/// One rendered file, relative to the output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub name: String,
    pub content: String,
}

/// What a generation run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationSummary {
    pub root_type: String,
    pub module_name: String,
    pub type_count: usize,
    pub command_count: usize,
    pub depth: usize,
    /// `lib.rs` first, then the root module file.
    pub files: Vec<GeneratedFile>,
}

impl GenerationSummary {
    /// Formatted code of the root module file.
    pub fn module_code(&self) -> &str {
        let name = format!("{}.rs", self.module_name);
        self.files
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.content.as_str())
            .unwrap_or_default()
    }
}

/// Assembles the root module: module docs, root type and nested menus.
pub fn assemble_module(forest: &SchemaForest, ctx: &EmitContext, runtime_crate: &str) -> TokenStream {
    let docs = ModuleDocBuilder::new(forest, runtime_crate).build();
    let root = generate_root(forest, ctx);

    quote! {
        #docs

        #root
    }
}

/// Assembles `lib.rs`: declares the root module and re-exports the root
/// type (and the runtime, when it is an external crate).
pub fn assemble_lib_rs(forest: &SchemaForest, module_name: &str, ctx: &EmitContext) -> TokenStream {
    let module = format_ident!("{}", module_name);
    let root = format_ident!("{}", forest.root_name);
    let doc = format!(" Generated bindings for the `{}` command tree.", forest.root_name);

    let runtime_reexport = if ctx.runtime_is_external() {
        let rt = ctx.runtime();
        let alias = format_ident!("{}", RUNTIME_ALIAS);
        quote! { pub use #rt as #alias; }
    } else {
        TokenStream::new()
    };

    quote! {
        #![doc = #doc]

        pub mod #module;

        pub use #module::#root;
        #runtime_reexport
    }
}

/// Validates generated code using syn.
///
/// Parses the token stream as a complete Rust file to ensure it's
/// syntactically valid before writing to disk.
///
/// ## Errors
///
/// Returns `GeneratorError::CodeGenError` if the code fails to parse.
pub fn validate_code(tokens: &TokenStream) -> Result<syn::File, GeneratorError> {
    syn::parse2(tokens.clone())
        .map_err(|e| GeneratorError::CodeGenError(format!("Generated code is invalid: {}", e)))
}

/// Formats generated code using prettyplease, prepending [`GENERATED_NOTICE`].
pub fn format_code(file: &syn::File) -> String {
    let formatted = prettyplease::unparse(file);
    format!("{GENERATED_NOTICE}\n\n{formatted}")
}

/// Renders every file for a forest without touching the filesystem.
///
/// ## Errors
///
/// Returns an error if the options are invalid or the generated code
/// fails to parse.
pub fn render(
    forest: &SchemaForest,
    options: &GeneratorOptions,
) -> Result<GenerationSummary, GeneratorError> {
    let ctx = EmitContext::new(options)?;
    let module_name = options.resolve_module_name(&forest.root_name)?;
    if ctx.runtime_is_external() && module_name == RUNTIME_ALIAS {
        return Err(GeneratorError::ConfigError(format!(
            "module name '{RUNTIME_ALIAS}' clashes with the runtime re-export in lib.rs; \
             pick another module name"
        )));
    }

    let lib_file = validate_code(&assemble_lib_rs(forest, &module_name, &ctx))?;
    let module_file = validate_code(&assemble_module(forest, &ctx, &options.runtime_crate))?;

    let files = vec![
        GeneratedFile {
            name: "lib.rs".to_string(),
            content: format_code(&lib_file),
        },
        GeneratedFile {
            name: format!("{module_name}.rs"),
            content: format_code(&module_file),
        },
    ];

    Ok(GenerationSummary {
        root_type: forest.root_name.clone(),
        module_name,
        type_count: forest.type_count(),
        command_count: forest.command_count(),
        depth: forest.depth(),
        files,
    })
}

/// Writes content to a file atomically using temp file + rename.
///
/// ## Errors
///
/// Returns `GeneratorError::WriteError` if:
/// - Parent directories cannot be created
/// - The temp file cannot be written
/// - The rename operation fails
pub fn write_atomic(path: &Path, content: &str) -> Result<(), GeneratorError> {
    let temp_path = stage(path, content)?;
    commit(&temp_path, path)
}

/// Writes several files so that none is replaced unless all could be
/// staged.
///
/// ## Errors
///
/// Returns `GeneratorError::WriteError` for the first file that cannot be
/// staged or renamed. Temp files staged before a staging failure are
/// removed.
pub fn write_all_atomic(files: &[(PathBuf, &str)]) -> Result<(), GeneratorError> {
    let mut staged: Vec<(PathBuf, &Path)> = Vec::with_capacity(files.len());
    for (path, content) in files {
        match stage(path, content) {
            Ok(temp_path) => staged.push((temp_path, path.as_path())),
            Err(e) => {
                for (temp_path, _) in &staged {
                    let _ = fs::remove_file(temp_path);
                }
                return Err(e);
            }
        }
    }

    for (temp_path, path) in &staged {
        commit(temp_path, path)?;
    }
    Ok(())
}

fn stage(path: &Path, content: &str) -> Result<PathBuf, GeneratorError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| GeneratorError::WriteError {
            path: parent.display().to_string(),
            source: e,
        })?;
    }

    let temp_path = path.with_extension("tmp");
    fs::write(&temp_path, content).map_err(|e| GeneratorError::WriteError {
        path: temp_path.display().to_string(),
        source: e,
    })?;
    Ok(temp_path)
}

fn commit(temp_path: &Path, path: &Path) -> Result<(), GeneratorError> {
    fs::rename(temp_path, path).map_err(|e| GeneratorError::WriteError {
        path: path.display().to_string(),
        source: e,
    })
}

/// Generates and writes all files for a forest.
///
/// This is the main entry point for code generation. It produces:
/// - `lib.rs` - Module declaration and re-exports
/// - `{module}.rs` - The root type and every nested menu
///
/// In dry-run mode the files are printed instead of written.
///
/// ## Errors
///
/// Returns an error if:
/// - Code generation produces invalid Rust
/// - File writing fails
pub fn generate_and_write(
    forest: &SchemaForest,
    options: &GeneratorOptions,
    output_dir: &Path,
    dry_run: bool,
) -> Result<GenerationSummary, GeneratorError> {
    let summary = render(forest, options)?;
    debug!(
        types = summary.type_count,
        commands = summary.command_count,
        depth = summary.depth,
        "rendered bindings"
    );

    if dry_run {
        for file in &summary.files {
            println!("=== {} ===\n{}\n", file.name, file.content);
        }
        return Ok(summary);
    }

    let targets: Vec<(PathBuf, &str)> = summary
        .files
        .iter()
        .map(|file| (output_dir.join(&file.name), file.content.as_str()))
        .collect();
    write_all_atomic(&targets)?;
    info!(dir = %output_dir.display(), files = targets.len(), "wrote bindings");

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::meshing_forest;
    use tempfile::TempDir;

    fn render_default() -> GenerationSummary {
        render(&meshing_forest(), &GeneratorOptions::default()).unwrap()
    }

    // === assembly ===

    #[test]
    fn lib_rs_declares_module_and_reexports() {
        let summary = render_default();
        let lib = &summary.files[0];
        assert_eq!(lib.name, "lib.rs");
        assert!(lib.content.contains("pub mod meshing;"));
        assert!(lib.content.contains("pub use meshing::Meshing;"));
        assert!(lib.content.contains("pub use ::menupath_runtime as runtime;"));
    }

    #[test]
    fn relative_runtime_is_not_reexported() {
        let options = GeneratorOptions {
            runtime_crate: "crate::runtime".to_string(),
            ..GeneratorOptions::default()
        };
        let summary = render(&meshing_forest(), &options).unwrap();
        assert!(!summary.files[0].content.contains("as runtime"));
        assert!(summary.module_code().contains("crate::runtime::MenuNode"));
    }

    #[test]
    fn runtime_module_name_clashes_with_reexport() {
        let mut forest = meshing_forest();
        forest.root_name = "Runtime".to_string();
        let err = render(&forest, &GeneratorOptions::default()).unwrap_err();
        assert!(matches!(err, GeneratorError::ConfigError(ref msg) if msg.contains("runtime")));

        let options = GeneratorOptions {
            module_name: Some("runtime".to_string()),
            ..GeneratorOptions::default()
        };
        assert!(render(&meshing_forest(), &options).is_err());

        let renamed = GeneratorOptions {
            module_name: Some("runtime_bindings".to_string()),
            ..GeneratorOptions::default()
        };
        let summary = render(&forest, &renamed).unwrap();
        assert!(summary.files[0].content.contains("pub use runtime_bindings::Runtime;"));
    }

    #[test]
    fn runtime_module_name_is_fine_with_relative_runtime() {
        let options = GeneratorOptions {
            runtime_crate: "crate::engine".to_string(),
            module_name: Some("runtime".to_string()),
            ..GeneratorOptions::default()
        };
        assert_eq!(render(&meshing_forest(), &options).unwrap().module_name, "runtime");
    }

    #[test]
    fn module_file_is_named_after_root() {
        let summary = render_default();
        assert_eq!(summary.module_name, "meshing");
        assert_eq!(summary.files[1].name, "meshing.rs");
        assert!(summary.module_code().contains("pub struct Meshing"));
    }

    #[test]
    fn summary_counts_match_forest() {
        let forest = meshing_forest();
        let summary = render(&forest, &GeneratorOptions::default()).unwrap();
        assert_eq!(summary.type_count, forest.type_count());
        assert_eq!(summary.command_count, forest.command_count());
        assert_eq!(summary.depth, 4);
    }

    #[test]
    fn every_file_starts_with_notice() {
        for file in render_default().files {
            assert!(file.content.starts_with(GENERATED_NOTICE), "{}", file.name);
        }
    }

    #[test]
    fn rendering_is_deterministic() {
        assert_eq!(render_default(), render_default());
    }

    // === validate_code / format_code ===

    #[test]
    fn validate_code_rejects_invalid_code() {
        let tokens = quote! { pub struct { } };
        assert!(matches!(
            validate_code(&tokens),
            Err(GeneratorError::CodeGenError(_))
        ));
    }

    #[test]
    fn format_code_produces_readable_output() {
        let file = validate_code(&quote! { pub struct Sample { node: u8 } }).unwrap();
        let code = format_code(&file);
        assert!(code.contains("pub struct Sample {\n    node: u8,\n}"));
    }

    // === write_atomic ===

    #[test]
    fn write_atomic_creates_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("test.rs");

        write_atomic(&file_path, "// Test content").unwrap();

        assert_eq!(fs::read_to_string(&file_path).unwrap(), "// Test content");
    }

    #[test]
    fn write_atomic_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("nested/deep/test.rs");

        write_atomic(&file_path, "// Nested content").unwrap();

        assert!(file_path.exists());
    }

    #[test]
    fn write_atomic_overwrites_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("existing.rs");
        fs::write(&file_path, "// Old content").unwrap();

        write_atomic(&file_path, "// New content").unwrap();

        assert_eq!(fs::read_to_string(&file_path).unwrap(), "// New content");
    }

    #[test]
    fn write_atomic_no_temp_file_left_behind() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("clean.rs");

        write_atomic(&file_path, "// Content").unwrap();

        assert!(!file_path.with_extension("tmp").exists());
    }

    // === generate_and_write ===

    #[test]
    fn dry_run_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let src = temp_dir.path().join("src");

        let summary =
            generate_and_write(&meshing_forest(), &GeneratorOptions::default(), &src, true).unwrap();

        assert!(!summary.module_code().is_empty());
        assert!(!src.exists());
    }

    #[test]
    fn writes_lib_and_module() {
        let temp_dir = TempDir::new().unwrap();
        let src = temp_dir.path().join("src");

        let summary =
            generate_and_write(&meshing_forest(), &GeneratorOptions::default(), &src, false).unwrap();

        let lib = fs::read_to_string(src.join("lib.rs")).unwrap();
        let module = fs::read_to_string(src.join("meshing.rs")).unwrap();
        assert_eq!(lib, summary.files[0].content);
        assert_eq!(module, summary.module_code());
    }

    #[test]
    fn failed_stage_leaves_existing_files_untouched() {
        let temp_dir = TempDir::new().unwrap();
        let src = temp_dir.path().join("src");
        fs::create_dir_all(src.join("meshing.tmp")).unwrap();
        fs::write(src.join("lib.rs"), "// previous").unwrap();

        let err = generate_and_write(&meshing_forest(), &GeneratorOptions::default(), &src, false)
            .unwrap_err();

        assert!(matches!(err, GeneratorError::WriteError { .. }));
        assert_eq!(fs::read_to_string(src.join("lib.rs")).unwrap(), "// previous");
        assert!(!src.join("lib.tmp").exists());
        assert!(!src.join("meshing.rs").exists());
    }

    #[test]
    fn write_all_atomic_writes_every_file() {
        let temp_dir = TempDir::new().unwrap();
        let files = vec![
            (temp_dir.path().join("a.rs"), "// a"),
            (temp_dir.path().join("nested/b.rs"), "// b"),
        ];

        write_all_atomic(&files).unwrap();

        assert_eq!(fs::read_to_string(&files[0].0).unwrap(), "// a");
        assert_eq!(fs::read_to_string(&files[1].0).unwrap(), "// b");
        assert!(!files[1].0.with_extension("tmp").exists());
    }

    #[test]
    fn invalid_options_write_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let src = temp_dir.path().join("src");
        let options = GeneratorOptions {
            runtime_crate: "not a path".to_string(),
            ..GeneratorOptions::default()
        };

        assert!(generate_and_write(&meshing_forest(), &options, &src, false).is_err());
        assert!(!src.exists());
    }
}
