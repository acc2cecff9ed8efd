//! Ordered phrase dictionary mapping entity-type labels to seed phrases.

use serde::{Deserialize, Serialize};

/// One labelled category with its seed phrases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub label: String,
    #[serde(default)]
    pub phrases: Vec<String>,
}

/// Ordered mapping from category label to seed phrases.
///
/// Category order is significant: it breaks ties in the statistical stage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhraseDictionary {
    categories: Vec<Category>,
}

impl PhraseDictionary {
    #[must_use]
    pub fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    /// Build from `(label, phrases)` pairs.
    #[must_use]
    pub fn from_pairs<L, P, I>(pairs: I) -> Self
    where
        L: Into<String>,
        P: Into<String>,
        I: IntoIterator<Item = (L, Vec<P>)>,
    {
        Self::new(
            pairs
                .into_iter()
                .map(|(label, phrases)| Category {
                    label: label.into(),
                    phrases: phrases.into_iter().map(Into::into).collect(),
                })
                .collect(),
        )
    }

    /// Seed phrases for the six indexed entity kinds.
    #[must_use]
    pub fn builtin() -> Self {
        Self::from_pairs([
            (
                "PluginInterface",
                vec![
                    "plugin interface",
                    "extension point",
                    "dependency injection",
                    "plugin contract",
                    "plugin extension",
                    "extension",
                    "module extension",
                ],
            ),
            (
                "Plugin",
                vec![
                    "plugin",
                    "command handler",
                    "condition handler",
                    "plugin resource",
                    "widget plugin",
                    "event dispatcher",
                    "plugin event",
                    "command",
                    "publisher",
                ],
            ),
            (
                "ClientInterface",
                vec!["client", "client api", "gateway call", "api call"],
            ),
            (
                "ServiceInterface",
                vec![
                    "service",
                    "service layer",
                    "service",
                    "stateless",
                    "service",
                    "service interface",
                ],
            ),
            (
                "Config",
                vec![
                    "config",
                    "configuration",
                    "configure",
                    "environment",
                    "config setting",
                ],
            ),
            (
                "FacadeInterface",
                vec![
                    "facade",
                    "api facade",
                    "business logic facade",
                    "controller facade",
                    "facade method",
                    "facade interface",
                    "facade wrapper",
                ],
            ),
        ])
    }

    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Labels in dictionary order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|c| c.label.as_str())
    }

    /// Every `(label, phrase)` pair in dictionary order.
    pub fn phrases(&self) -> impl Iterator<Item = (&str, &str)> {
        self.categories
            .iter()
            .flat_map(|c| c.phrases.iter().map(move |p| (c.label.as_str(), p.as_str())))
    }

    /// True when there is no phrase to learn from.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.iter().all(|c| c.phrases.is_empty())
    }

    /// Content hash, stable across clones and process runs.
    #[must_use]
    pub fn fingerprint(&self) -> blake3::Hash {
        let mut hasher = blake3::Hasher::new();
        for category in &self.categories {
            hash_field(&mut hasher, &category.label);
            hasher.update(&(category.phrases.len() as u64).to_le_bytes());
            for phrase in &category.phrases {
                hash_field(&mut hasher, phrase);
            }
        }
        hasher.finalize()
    }
}

fn hash_field(hasher: &mut blake3::Hasher, value: &str) {
    hasher.update(&(value.len() as u64).to_le_bytes());
    hasher.update(value.as_bytes());
}
