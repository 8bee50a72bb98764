//! Generator configuration.

use crate::errors::GeneratorError;
use crate::naming::{sanitize_identifier, type_name};

/// Crate path generated code uses to reach the runtime.
pub const DEFAULT_RUNTIME_CRATE: &str = "menupath_runtime";

/// Root type name when neither the options nor the schema name one.
pub const DEFAULT_ROOT_TYPE: &str = "Session";

/// Package name written to the generated Cargo.toml.
pub const DEFAULT_PACKAGE_NAME: &str = "menupath-stubs";

/// Knobs for one generation run.
///
/// ## Examples
///
/// ```
/// use menupath_gen::GeneratorOptions;
///
/// let options = GeneratorOptions {
///     root_type: Some("Meshing".to_string()),
///     ..GeneratorOptions::default()
/// };
/// assert_eq!(options.runtime_crate, "menupath_runtime");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorOptions {
    /// Overrides the root type name carried by the schema.
    pub root_type: Option<String>,
    /// Overrides the module file name (defaults to the snake_case root type).
    pub module_name: Option<String>,
    /// Path of the runtime crate as seen from generated code.
    pub runtime_crate: String,
    /// Package name for the generated Cargo.toml.
    pub package_name: String,
    /// Additional words host identifiers must avoid.
    pub extra_reserved: Vec<String>,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            root_type: None,
            module_name: None,
            runtime_crate: DEFAULT_RUNTIME_CRATE.to_string(),
            package_name: DEFAULT_PACKAGE_NAME.to_string(),
            extra_reserved: Vec::new(),
        }
    }
}

impl GeneratorOptions {
    /// Resolves the root type name: the override, then the schema's own
    /// name, then [`DEFAULT_ROOT_TYPE`].
    ///
    /// ## Errors
    ///
    /// Returns `GeneratorError::ConfigError` when no identifier can be
    /// derived from the chosen name.
    pub fn resolve_root_type(&self, schema_root: Option<&str>) -> Result<String, GeneratorError> {
        let raw = self
            .root_type
            .as_deref()
            .or(schema_root)
            .unwrap_or(DEFAULT_ROOT_TYPE);
        let ident = sanitize_identifier(raw, &[]).ok_or_else(|| {
            GeneratorError::ConfigError(format!("root type name '{raw}' has no usable identifier"))
        })?;
        Ok(type_name(&ident))
    }

    /// Resolves the module the root type lives in.
    ///
    /// ## Errors
    ///
    /// Returns `GeneratorError::ConfigError` when the name is unusable or
    /// would clash with the generated `lib.rs`.
    pub fn resolve_module_name(&self, root_type: &str) -> Result<String, GeneratorError> {
        let raw = self.module_name.as_deref().unwrap_or(root_type);
        let module = sanitize_identifier(raw, &[]).ok_or_else(|| {
            GeneratorError::ConfigError(format!("module name '{raw}' has no usable identifier"))
        })?;
        if module == "lib" {
            return Err(GeneratorError::ConfigError(
                "module name 'lib' clashes with the generated lib.rs".to_string(),
            ));
        }
        Ok(module)
    }

    /// Parses [`runtime_crate`](Self::runtime_crate) as a Rust path.
    ///
    /// ## Errors
    ///
    /// Returns `GeneratorError::ConfigError` if it is not a valid path.
    pub fn runtime_path(&self) -> Result<syn::Path, GeneratorError> {
        let trimmed = self.runtime_crate.trim_start_matches("::");
        syn::parse_str::<syn::Path>(trimmed).map_err(|e| {
            GeneratorError::ConfigError(format!(
                "runtime crate '{}' is not a valid path: {e}",
                self.runtime_crate
            ))
        })
    }
}
