use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

const LAYERS: &[&str] = &["Service", "Client", "Glue", "Zed", "Yves"];

/// Indexed entity category. The label doubles as the vector-store `type`
/// metadata value and as a phrase-dictionary category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    FacadeInterface,
    ClientInterface,
    ServiceInterface,
    Config,
    Plugin,
    PluginInterface,
}

/// File selection rule for one [`EntityKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscoveryRule {
    /// File name must end with this.
    pub file_suffix: &'static str,
    /// Content must contain at least one of these; empty means no constraint.
    pub content_any: &'static [&'static str],
    /// Content must contain none of these.
    pub content_none: &'static [&'static str],
}

impl DiscoveryRule {
    #[must_use]
    pub fn matches_name(&self, file_name: &str) -> bool {
        file_name.ends_with(self.file_suffix)
    }

    #[must_use]
    pub fn matches_content(&self, content: &str) -> bool {
        let any = self.content_any.is_empty() || self.content_any.iter().any(|w| content.contains(w));
        any && !self.content_none.iter().any(|w| content.contains(w))
    }
}

impl EntityKind {
    pub const ALL: [Self; 6] = [
        Self::FacadeInterface,
        Self::ClientInterface,
        Self::ServiceInterface,
        Self::Config,
        Self::Plugin,
        Self::PluginInterface,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::FacadeInterface => "FacadeInterface",
            Self::ClientInterface => "ClientInterface",
            Self::ServiceInterface => "ServiceInterface",
            Self::Config => "Config",
            Self::Plugin => "Plugin",
            Self::PluginInterface => "PluginInterface",
        }
    }

    #[must_use]
    pub fn discovery_rule(self) -> DiscoveryRule {
        match self {
            Self::FacadeInterface => DiscoveryRule {
                file_suffix: "FacadeInterface.php",
                content_any: &["Business"],
                content_none: &[],
            },
            Self::ClientInterface => DiscoveryRule {
                file_suffix: "ClientInterface.php",
                content_any: &["Client"],
                content_none: &["Dependency"],
            },
            Self::ServiceInterface => DiscoveryRule {
                file_suffix: "ServiceInterface.php",
                content_any: &["Service"],
                content_none: &["Dependency"],
            },
            Self::Config => DiscoveryRule {
                file_suffix: "Config.php",
                content_any: LAYERS,
                content_none: &[],
            },
            Self::Plugin => DiscoveryRule {
                file_suffix: "Plugin.php",
                content_any: LAYERS,
                content_none: &[],
            },
            Self::PluginInterface => DiscoveryRule {
                file_suffix: "PluginInterface.php",
                content_any: LAYERS,
                content_none: &[],
            },
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for EntityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                let known: Vec<_> = Self::ALL.iter().map(|k| k.label()).collect();
                format!("unknown entity kind `{s}`, expected one of: {}", known.join(", "))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_round_trip_through_from_str() {
        for kind in EntityKind::ALL {
            assert_eq!(kind.label().parse::<EntityKind>().unwrap(), kind);
            assert_eq!(kind.to_string(), kind.label());
        }
    }

    #[test]
    fn from_str_is_case_insensitive() {
        assert_eq!("plugin".parse::<EntityKind>().unwrap(), EntityKind::Plugin);
        assert!("Controller".parse::<EntityKind>().is_err());
    }

    #[test]
    fn facade_rule() {
        let rule = EntityKind::FacadeInterface.discovery_rule();
        assert!(rule.matches_name("CartFacadeInterface.php"));
        assert!(!rule.matches_name("CartFacade.php"));
        assert!(rule.matches_content("namespace Spryker\\Zed\\Cart\\Business;"));
        assert!(!rule.matches_content("namespace Spryker\\Zed\\Cart;"));
    }

    #[test]
    fn client_rule_excludes_dependency_bridges() {
        let rule = EntityKind::ClientInterface.discovery_rule();
        assert!(rule.matches_content("namespace Spryker\\Client\\Cart;"));
        assert!(!rule.matches_content("namespace Spryker\\Client\\Cart\\Dependency\\Client;"));
    }

    #[test]
    fn plugin_interface_suffix_also_matches_plugin_kind_only_by_name() {
        let plugin = EntityKind::Plugin.discovery_rule();
        let iface = EntityKind::PluginInterface.discovery_rule();
        assert!(plugin.matches_name("FooPlugin.php"));
        assert!(!plugin.matches_name("FooPluginInterface.php"));
        assert!(iface.matches_name("FooPluginInterface.php"));
    }

    #[test]
    fn layer_rule_needs_one_layer_word() {
        let rule = EntityKind::Config.discovery_rule();
        assert!(rule.matches_content("namespace Pyz\\Yves\\Checkout;"));
        assert!(!rule.matches_content("namespace Pyz\\Shared\\Checkout;"));
    }
}
