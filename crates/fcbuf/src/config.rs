//! Host-supplied settings consumed by the codecs.

use std::collections::HashMap;

use serde::Deserialize;

/// Largest supported asset precision.
pub const MAX_PRECISION: u8 = 18;

/// Codec configuration.
///
/// Plain data, deserializable from any serde format with camelCase keys.
/// Absent keys take their defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// Display message data as hex even when its type is known. Binary
    /// encoding is unaffected.
    pub force_message_data_hex: bool,
    /// Network prefix of legacy public key text.
    pub key_prefix: String,
    /// Precision used for symbols missing from `symbols`.
    pub default_precision: u8,
    /// Known symbol precisions.
    pub symbols: HashMap<String, u8>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            force_message_data_hex: false,
            key_prefix: "EOS".to_string(),
            default_precision: 4,
            symbols: HashMap::from([("EOS".to_string(), 4)]),
        }
    }
}

impl Config {
    /// Precision of `symbol` according to the symbol table.
    pub fn precision_of(&self, symbol: &str) -> u8 {
        self.symbols
            .get(symbol)
            .copied()
            .unwrap_or(self.default_precision)
    }

    pub fn with_force_message_data_hex(mut self, force: bool) -> Self {
        self.force_message_data_hex = force;
        self
    }

    pub fn with_symbol(mut self, symbol: impl Into<String>, precision: u8) -> Self {
        self.symbols.insert(symbol.into(), precision);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert!(!config.force_message_data_hex);
        assert_eq!(config.precision_of("EOS"), 4);
        assert_eq!(config.precision_of("XYZ"), 4);
    }

    #[test]
    fn partial_json() {
        let config: Config =
            serde_json::from_str(r#"{"forceMessageDataHex": true, "symbols": {"SYS": 2}}"#)
                .unwrap();
        assert!(config.force_message_data_hex);
        assert_eq!(config.key_prefix, "EOS");
        assert_eq!(config.precision_of("SYS"), 2);
        assert_eq!(config.precision_of("EOS"), 4);
    }
}
