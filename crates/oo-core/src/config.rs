use serde::{Deserialize, Serialize};

use oo_types::{OoError, OoResult};

/// Controls which keys [`merge`](crate::merge::merge) copies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeOptions {
    /// Also copy enumerable keys a source inherits through its prototype
    /// chain, resolved to their current values.
    pub inherited_keys_included: bool,
    /// Skip keys whose value is `Undefined` instead of copying them.
    pub skip_absent: bool,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            inherited_keys_included: true,
            skip_absent: true,
        }
    }
}

impl MergeOptions {
    /// Own keys only, `Undefined` values copied as-is.
    pub fn own_only() -> Self {
        Self {
            inherited_keys_included: false,
            skip_absent: false,
        }
    }

    /// The options [`link`](crate::link::link) uses when placing instance
    /// properties: own keys only, values copied by reference.
    pub fn link() -> Self {
        Self::own_only()
    }

    /// Parse from TOML. Missing fields take their defaults.
    pub fn from_toml_str(s: &str) -> OoResult<Self> {
        toml::from_str(s).map_err(|e| OoError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_follows_latest_behavior() {
        let opts = MergeOptions::default();
        assert!(opts.inherited_keys_included);
        assert!(opts.skip_absent);
    }

    #[test]
    fn own_only_preset() {
        let opts = MergeOptions::own_only();
        assert!(!opts.inherited_keys_included);
        assert!(!opts.skip_absent);
        assert_eq!(MergeOptions::link(), opts);
    }

    #[test]
    fn toml_partial_uses_defaults() {
        let opts = MergeOptions::from_toml_str("skip_absent = false").unwrap();
        assert!(opts.inherited_keys_included);
        assert!(!opts.skip_absent);
    }

    #[test]
    fn toml_empty_is_default() {
        assert_eq!(MergeOptions::from_toml_str("").unwrap(), MergeOptions::default());
    }

    #[test]
    fn toml_type_error_is_config_error() {
        let err = MergeOptions::from_toml_str("skip_absent = \"yes\"").unwrap_err();
        assert!(matches!(err, OoError::Config(_)));
    }
}
