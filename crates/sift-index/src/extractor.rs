//! Source entity extraction.

use std::collections::HashSet;

use serde::Serialize;

use crate::doc_comment;
use crate::error::Result;
use crate::php::PhpGrammar;
use crate::syntax::{Grammar, Item, MemberKind, TypeDecl};

/// Visibility keyword omitted from canonical text.
const STRIPPED_VISIBILITY: &str = "public";

/// A member function of an indexed type, ready for embedding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceEntity {
    /// `\Namespace\Type::member`, or `Type::member` outside a namespace.
    pub identity: String,
    pub namespace: Option<String>,
    pub declaring_type: String,
    pub member_name: String,
    /// Identity line, pretty-printed member, then the doc summary if any.
    pub canonical_source_text: String,
    pub doc_summary: Option<String>,
    /// 1-based.
    pub source_line: usize,
}

/// Extracts [`SourceEntity`] records from a source file.
#[derive(Debug, Clone, Default)]
pub struct Extractor<G> {
    grammar: G,
}

impl Extractor<PhpGrammar> {
    #[must_use]
    pub fn php() -> Self {
        Self::new(PhpGrammar::new())
    }
}

impl<G: Grammar> Extractor<G> {
    pub fn new(grammar: G) -> Self {
        Self { grammar }
    }

    /// Extract the member functions of the first type declared in `source`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::IndexError::Parse`] if `source` is not syntactically
    /// valid.
    pub fn extract(&self, source: &str) -> Result<Vec<SourceEntity>> {
        let tree = self.grammar.parse(source)?;
        let Some((namespace, decl)) = first_type(&tree.items) else {
            return Ok(Vec::new());
        };

        let namespace = namespace.filter(|ns| !ns.is_empty());
        let prefix = match namespace {
            Some(ns) => format!("\\{ns}\\{}", decl.name),
            None => decl.name.clone(),
        };

        let mut seen = HashSet::new();
        let mut entities = Vec::new();
        for member in decl.members.iter().filter(|m| m.kind == MemberKind::Function) {
            if !seen.insert(member.name.to_lowercase()) {
                tracing::warn!(
                    owner = %prefix,
                    member = %member.name,
                    "duplicate method declaration, keeping the first"
                );
                continue;
            }

            let identity = format!("{prefix}::{}", member.name);
            let code = self
                .grammar
                .pretty_print(&member.without_visibility(STRIPPED_VISIBILITY));
            let doc_summary = member.doc_comment.as_deref().and_then(doc_comment::summarize);

            let mut canonical_source_text = format!("{identity}\n{code}");
            if let Some(summary) = &doc_summary {
                canonical_source_text.push('\n');
                canonical_source_text.push_str(summary);
            }

            entities.push(SourceEntity {
                identity,
                namespace: namespace.map(str::to_owned),
                declaring_type: decl.name.clone(),
                member_name: member.name.clone(),
                canonical_source_text,
                doc_summary,
                source_line: member.start_line,
            });
        }

        tracing::debug!(owner = %prefix, entities = entities.len(), "extracted");
        Ok(entities)
    }
}

/// First type declaration in document order. Namespaces are searched in
/// turn; a namespace without types is passed over.
fn first_type(items: &[Item]) -> Option<(Option<&str>, &TypeDecl)> {
    items.iter().find_map(|item| match item {
        Item::Type(decl) => Some((None, decl)),
        Item::Namespace(ns) => ns.items.iter().find_map(|inner| match inner {
            Item::Type(decl) => Some((ns.name.as_deref(), decl)),
            Item::Namespace(_) => None,
        }),
    })
}
