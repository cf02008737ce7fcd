//! Ledger configuration.

use serde::{Deserialize, Serialize};

use genevault_perms::GrantPolicy;

/// Configuration for the ledger.
///
/// Serde-enabled so hosts can embed it in their own configuration files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Who may grant and revoke, and which entries they flip.
    pub grant_policy: GrantPolicy,
    /// Whether successful mutations are forwarded to the event sink.
    pub emit_events: bool,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            grant_policy: GrantPolicy::AdminControlled,
            emit_events: true,
        }
    }
}

impl LedgerConfig {
    pub fn with_grant_policy(mut self, policy: GrantPolicy) -> Self {
        self.grant_policy = policy;
        self
    }

    pub fn with_events(mut self, emit: bool) -> Self {
        self.emit_events = emit;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_literal_contract() {
        let config = LedgerConfig::default();
        assert_eq!(config.grant_policy, GrantPolicy::AdminControlled);
        assert!(config.emit_events);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: LedgerConfig =
            serde_json::from_str(r#"{ "grant_policy": "owner_controlled" }"#).unwrap();

        assert_eq!(
            config,
            LedgerConfig::default().with_grant_policy(GrantPolicy::OwnerControlled)
        );
    }
}
