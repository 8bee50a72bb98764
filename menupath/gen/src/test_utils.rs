//! Shared test utilities for menupath-gen tests.
//!
//! Fixtures mirror a small slice of a meshing command tree so that tests
//! across modules agree on shape and names.

use menupath_define::{RawEntry, SchemaDocument, SchemaForest};
use proc_macro2::TokenStream;
use quote::quote;

use crate::options::GeneratorOptions;
use crate::validation::build_forest;

/// Formats item-level tokens (structs, modules, impls) with prettyplease.
pub fn pretty_items(tokens: TokenStream) -> String {
    let file = syn::parse2::<syn::File>(tokens).expect("generated items should parse");
    prettyplease::unparse(&file)
}

/// Formats method tokens by wrapping them in a throwaway `impl`.
pub fn pretty_members(tokens: TokenStream) -> String {
    pretty_items(quote! { impl Probe { #tokens } })
}

/// A small meshing tree: nested menus, a named-object collection, a
/// reserved word, a bracketed name and documented leaves.
pub fn meshing_document() -> SchemaDocument {
    SchemaDocument {
        root: Some("Meshing".to_string()),
        doc: "Meshing session.".to_string(),
        entries: vec![
            RawEntry::menu(
                "file",
                vec![
                    RawEntry::menu(
                        "import",
                        vec![
                            RawEntry::command("cad")
                                .with_doc("Import a CAD file.")
                                .with_arity(1),
                        ],
                    ),
                    RawEntry::command("read-case").with_doc("Read a case file."),
                    RawEntry::command("project[beta]"),
                ],
            ),
            RawEntry::menu(
                "mesh",
                vec![RawEntry::menu(
                    "tet",
                    vec![RawEntry::menu("LocalRegions", vec![RawEntry::command("define")])],
                )],
            ),
            RawEntry::named_object(
                "controls",
                vec![
                    RawEntry::command("delete"),
                    RawEntry::menu("options", vec![RawEntry::command("set")]),
                ],
            )
            .with_doc("Size controls by name."),
            RawEntry::command("exit"),
        ],
    }
}

/// [`meshing_document`] validated with default options.
pub fn meshing_forest() -> SchemaForest {
    build_forest(&meshing_document(), &GeneratorOptions::default())
        .expect("fixture should validate")
}
