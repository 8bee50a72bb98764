//! Module documentation generation for generated command trees.
//!
//! This module provides the [`ModuleDocBuilder`] struct for generating
//! module-level documentation for the generated root module. The
//! documentation includes an introduction, a summary of the tree and a
//! usage example.

use menupath_define::{NodeKind, SchemaForest, SchemaNode};
use proc_macro2::TokenStream;
use quote::quote;

/// Builds module-level documentation for a generated command tree.
///
/// The builder generates documentation sections including:
/// - Introduction paragraph with the root name and its doc string
/// - Contents section listing the top-level menus, collections and commands
/// - Example section showing construction and a navigation chain
///
/// ## Examples
///
/// ```ignore
/// use menupath_gen::codegen::ModuleDocBuilder;
///
/// let forest: SchemaForest = /* ... */;
/// let doc_tokens = ModuleDocBuilder::new(&forest, "menupath_runtime").build();
/// ```
pub struct ModuleDocBuilder<'a> {
    forest: &'a SchemaForest,
    runtime_crate: &'a str,
}

impl<'a> ModuleDocBuilder<'a> {
    pub fn new(forest: &'a SchemaForest, runtime_crate: &'a str) -> Self {
        Self {
            forest,
            runtime_crate,
        }
    }

    /// Builds the complete module documentation as `#![doc = "..."]`
    /// attributes.
    pub fn build(&self) -> TokenStream {
        let intro = self.intro_paragraph();
        let contents = self.contents_section();
        let example = self.example_section();

        quote! {
            #![doc = #intro]
            //!
            #![doc = #contents]
            //!
            #![doc = #example]
        }
    }

    fn intro_paragraph(&self) -> String {
        let name = &self.forest.root_name;
        let doc = self.forest.doc.trim();
        if doc.is_empty() {
            format!(" Generated bindings for the `{name}` command tree.")
        } else {
            format!(" Generated bindings for the `{name}` command tree.\n\n {doc}")
        }
    }

    fn contents_section(&self) -> String {
        let nodes = &self.forest.nodes;
        if nodes.is_empty() {
            return " ## Contents\n\n The tree is empty.".to_string();
        }

        let mut lines = vec![
            " ## Contents".to_string(),
            String::new(),
            format!(
                " {} types, {} commands, {} levels deep.",
                self.forest.type_count(),
                self.forest.command_count(),
                self.forest.depth()
            ),
            String::new(),
        ];
        for node in nodes {
            let label = match node.kind {
                NodeKind::Container => "menu",
                NodeKind::NamedObjectCollection => "named objects",
                NodeKind::Leaf => "command",
            };
            lines.push(format!(" - `{}` ({label})", node.host_identifier));
        }
        lines.join("\n")
    }

    /// Uses the shallowest leaf reachable without an instance key, so the
    /// example never needs a made-up key.
    fn example_section(&self) -> String {
        let root = &self.forest.root_name;
        let runtime = self.runtime_crate.trim_start_matches("::");
        let call = first_plain_leaf(&self.forest.nodes)
            .map(|chain| format!("    let result = session.{}(()).await?;\n", chain.join("().")))
            .unwrap_or_default();

        let body = format!(
            "```rust,ignore\n\
             use std::sync::Arc;\n\
             use {runtime}::HttpTransport;\n\
             \n\
             async fn run() -> Result<(), Box<dyn std::error::Error>> {{\n\
             \x20   let session = {root}::new(Arc::new(HttpTransport::from_env()?));\n\
             {call}\
             \x20   Ok(())\n\
             }}\n\
             ```"
        );

        let mut lines = vec![" ## Example".to_string(), String::new()];
        lines.extend(body.lines().map(|l| format!(" {l}")));
        lines.join("\n")
    }
}

fn first_plain_leaf(nodes: &[SchemaNode]) -> Option<Vec<&str>> {
    let mut frontier: Vec<(Vec<&str>, &SchemaNode)> =
        nodes.iter().map(|n| (vec![n.host_identifier.as_str()], n)).collect();

    while !frontier.is_empty() {
        if let Some((chain, _)) = frontier.iter().find(|(_, n)| n.kind.is_leaf()) {
            return Some(chain.clone());
        }
        frontier = frontier
            .into_iter()
            .filter(|(_, n)| n.kind == NodeKind::Container)
            .flat_map(|(chain, n)| {
                n.children.iter().map(move |c| {
                    let mut next = chain.clone();
                    next.push(c.host_identifier.as_str());
                    (next, c)
                })
            })
            .collect();
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::meshing_forest;

    fn build(forest: &SchemaForest) -> String {
        ModuleDocBuilder::new(forest, "menupath_runtime").build().to_string()
    }

    #[test]
    fn builder_creates_valid_inner_attributes() {
        let forest = meshing_forest();
        let tokens = ModuleDocBuilder::new(&forest, "menupath_runtime").build();
        let file: syn::File = syn::parse2(tokens).unwrap();
        assert_eq!(file.attrs.len(), 5);
    }

    #[test]
    fn builder_includes_root_name_and_doc() {
        let code = build(&meshing_forest());
        assert!(code.contains("Meshing"));
        assert!(code.contains("Meshing session."));
    }

    #[test]
    fn contents_list_top_level_nodes() {
        let code = build(&meshing_forest());
        assert!(code.contains("`file` (menu)"));
        assert!(code.contains("`controls` (named objects)"));
        assert!(code.contains("`exit` (command)"));
    }

    #[test]
    fn example_uses_shallowest_plain_leaf() {
        let forest = meshing_forest();
        assert_eq!(first_plain_leaf(&forest.nodes), Some(vec!["exit"]));
    }

    #[test]
    fn example_skips_collections() {
        let forest = SchemaForest {
            root_name: "Meshing".to_string(),
            doc: String::new(),
            nodes: vec![
                SchemaNode::collection("controls", "controls", vec![SchemaNode::leaf("delete", "delete")]),
                SchemaNode::container(
                    "file",
                    "file",
                    vec![SchemaNode::container("import_", "import", vec![SchemaNode::leaf("cad", "cad")])],
                ),
            ],
        };
        assert_eq!(first_plain_leaf(&forest.nodes), Some(vec!["file", "import_", "cad"]));
        assert!(build(&forest).contains("session.file().import_().cad(()).await?"));
    }

    #[test]
    fn empty_tree_is_documented() {
        let forest = SchemaForest {
            root_name: "Empty".to_string(),
            doc: String::new(),
            nodes: vec![],
        };
        let code = build(&forest);
        assert!(code.contains("The tree is empty."));
        assert!(!code.contains("let result"));
    }
}
