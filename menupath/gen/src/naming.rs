//! Identifier sanitization for generated code.
//!
//! Remote names are free-form (`"import"`, `"LocalRegions"`,
//! `"project[beta]"`, `"3d-mesh"`). Generated accessors need legal,
//! non-reserved Rust identifiers, so every remote name goes through the
//! same pure chain:
//!
//! 1. lowercase, word boundaries (camelCase, `-`, whitespace, `.`, `/`) become `_`
//! 2. opening brackets become `_`, every other illegal character is deleted,
//!    repeated `_` collapse and a leading digit gets a `_` prefix
//! 3. reserved words get a trailing `_`
//! 4. sibling collisions get `_2`, `_3`, ... in input order ([`disambiguate`])
//!
//! The remote name itself is never changed; only the host identifier is
//! derived from it.
//!
//! ## Examples
//!
//! ```
//! use menupath_gen::naming::{sanitize_identifier, type_name};
//!
//! assert_eq!(sanitize_identifier("import", &[]).as_deref(), Some("import_"));
//! assert_eq!(sanitize_identifier("LocalRegions", &[]).as_deref(), Some("local_regions"));
//! assert_eq!(sanitize_identifier("project[beta]", &[]).as_deref(), Some("project_beta"));
//! assert_eq!(type_name("local_regions"), "LocalRegions");
//! ```

use std::collections::HashSet;

/// Rust strict, reserved and edition-specific keywords.
const RUST_KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "crate",
    "do", "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl",
    "in", "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub",
    "ref", "return", "self", "static", "struct", "super", "trait", "true", "try", "type",
    "typeof", "union", "unsafe", "unsized", "use", "virtual", "where", "while", "yield",
];

/// Words reserved by other client bindings of the same command tree. Keeping
/// them reserved here keeps host identifiers identical across bindings.
const BINDING_RESERVED: &[&str] = &[
    "and", "assert", "class", "def", "del", "elif", "except", "finally", "from", "global",
    "import", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "with",
];

/// Members every generated type defines itself.
const GENERATED_MEMBERS: &[&str] = &["new", "node"];

/// Highest numeric suffix tried when resolving sibling collisions.
pub const MAX_COLLISION_SUFFIX: usize = 1000;

/// Whether `word` must not be used verbatim as a host identifier.
pub fn is_reserved(word: &str, extra: &[String]) -> bool {
    RUST_KEYWORDS.contains(&word)
        || BINDING_RESERVED.contains(&word)
        || GENERATED_MEMBERS.contains(&word)
        || extra.iter().any(|w| w == word)
}

/// Maps a remote name to a host identifier (steps 1-3 of the chain).
///
/// Returns `None` when nothing usable survives, e.g. for `"???"`.
pub fn sanitize_identifier(remote_name: &str, extra_reserved: &[String]) -> Option<String> {
    let mut words: Vec<String> = Vec::new();

    for chunk in remote_name.split(is_boundary) {
        let legal: String = chunk.chars().filter(char::is_ascii_alphanumeric).collect();
        words.extend(
            split_camel_case(&legal)
                .into_iter()
                .map(str::to_ascii_lowercase),
        );
    }

    let mut ident = words.join("_");
    if ident.is_empty() {
        return None;
    }
    if ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    if is_reserved(&ident, extra_reserved) {
        ident.push('_');
    }
    Some(ident)
}

/// Resolves collisions among sibling identifiers (step 4 of the chain).
///
/// The first occurrence keeps its name; later ones get the smallest
/// `_N` (N >= 2) that is neither another sibling's base name nor already
/// assigned. On failure returns the index of the entry that could not be
/// made unique.
pub fn disambiguate(bases: &[String]) -> Result<Vec<String>, usize> {
    let base_names: HashSet<&str> = bases.iter().map(String::as_str).collect();
    let mut taken: HashSet<String> = HashSet::with_capacity(bases.len());
    let mut resolved = Vec::with_capacity(bases.len());

    for (index, base) in bases.iter().enumerate() {
        if taken.insert(base.clone()) {
            resolved.push(base.clone());
            continue;
        }

        let stem = base.trim_end_matches('_');
        let candidate = (2..=MAX_COLLISION_SUFFIX)
            .map(|n| format!("{stem}_{n}"))
            .find(|c| !base_names.contains(c.as_str()) && !taken.contains(c))
            .ok_or(index)?;

        taken.insert(candidate.clone());
        resolved.push(candidate);
    }

    Ok(resolved)
}

/// UpperCamelCase type name for a host identifier.
///
/// `import_` becomes `Import`, `local_regions` becomes `LocalRegions`.
/// Names that would start with a digit or spell `Self` are prefixed or
/// suffixed with `Menu`.
pub fn type_name(host_identifier: &str) -> String {
    let name: String = host_identifier
        .split('_')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect();

    if name.is_empty() || name.starts_with(|c: char| c.is_ascii_digit()) {
        format!("Menu{name}")
    } else if name == "Self" {
        "SelfMenu".to_string()
    } else {
        name
    }
}

fn is_boundary(c: char) -> bool {
    matches!(c, '_' | '-' | '.' | '/' | '[' | '(' | '{' | '<') || c.is_whitespace()
}

/// Splits a CamelCase string into individual words.
///
/// - "LocalRegions" -> ["Local", "Regions"]
/// - "HTTPClient" -> ["HTTP", "Client"]
/// - "cad" -> ["cad"]
fn split_camel_case(s: &str) -> Vec<&str> {
    let mut words = Vec::new();
    let mut word_start = 0;
    let chars: Vec<char> = s.chars().collect();

    for i in 1..chars.len() {
        let current = chars[i];
        let prev = chars[i - 1];

        // "meshSize" -> "mesh", "Size"; "HTTPClient" -> "HTTP", "Client"
        let is_new_word = current.is_uppercase()
            && (prev.is_lowercase()
                || (i + 1 < chars.len() && chars[i + 1].is_lowercase() && prev.is_uppercase()));

        if is_new_word {
            if i > word_start {
                words.push(&s[word_start..i]);
            }
            word_start = i;
        }
    }

    if word_start < s.len() {
        words.push(&s[word_start..]);
    }

    words
}
