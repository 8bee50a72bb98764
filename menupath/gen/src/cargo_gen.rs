//! Cargo.toml generation for the generated bindings crate.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::errors::GeneratorError;
use crate::output::write_atomic;

/// How the generated crate depends on `menupath-runtime`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeDependency {
    /// A registry version requirement, e.g. `"0.1"`.
    Version(String),
    /// A local checkout of the runtime crate.
    Path(PathBuf),
}

impl Default for RuntimeDependency {
    fn default() -> Self {
        Self::Version(env!("CARGO_PKG_VERSION").to_string())
    }
}

impl RuntimeDependency {
    fn to_toml(&self) -> String {
        match self {
            Self::Version(version) => format!("\"{}\"", toml_escape(version)),
            Self::Path(path) => {
                format!("{{ path = \"{}\" }}", toml_escape(&path.display().to_string()))
            }
        }
    }
}

/// Renders the manifest for a generated crate.
///
/// ## Examples
///
/// ```
/// use menupath_gen::cargo_gen::{RuntimeDependency, render_cargo_toml};
///
/// let toml = render_cargo_toml("meshing-stubs", &RuntimeDependency::Version("0.1".into()));
/// assert!(toml.contains("name = \"meshing-stubs\""));
/// assert!(toml.contains("menupath-runtime = \"0.1\""));
/// ```
pub fn render_cargo_toml(package_name: &str, runtime: &RuntimeDependency) -> String {
    format!(
        "# This file was automatically generated by menupath-gen. Do not edit manually.\n\
         \n\
         [package]\n\
         name = \"{}\"\n\
         version = \"0.1.0\"\n\
         edition = \"2024\"\n\
         publish = false\n\
         \n\
         [dependencies]\n\
         menupath-runtime = {}\n",
        toml_escape(package_name),
        runtime.to_toml()
    )
}

/// Writes `Cargo.toml` into `crate_dir` (the parent of the generated `src/`).
///
/// In dry-run mode the manifest is printed instead.
///
/// ## Errors
///
/// Returns `GeneratorError::WriteError` if the file cannot be written.
pub fn write_cargo_toml(
    crate_dir: &Path,
    package_name: &str,
    runtime: &RuntimeDependency,
    dry_run: bool,
) -> Result<String, GeneratorError> {
    let content = render_cargo_toml(package_name, runtime);
    if dry_run {
        println!("=== Cargo.toml ===\n{content}");
    } else {
        let path = crate_dir.join("Cargo.toml");
        write_atomic(&path, &content)?;
        info!(path = %path.display(), "wrote manifest");
    }
    Ok(content)
}

fn toml_escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
