//! Test-peer configuration.
//!
//! Conformance runs point the suite at real peer devices through a small
//! `KEY=VALUE` file. Malformed lines are skipped; a missing file falls back
//! to the built-in defaults with a notice.

use log::{info, warn};

use crate::BtAddress;

/// Default location of the peer address file.
pub const TEST_CONFIG_PATH: &str = "/opt/home/capi-network-bluetooth/tetware.conf";

const KEY_ADDR_MOBILE: &str = "BT_ADDR_MOBILE";
const KEY_ADDR_HEADSET: &str = "BT_ADDR_HEADSET";
const KEY_ADDR_LE: &str = "BT_ADDR_LE";

/// Peer addresses used by positive test cases.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TestPeerConfig {
    pub mobile: BtAddress,
    pub headset: BtAddress,
    pub le: BtAddress,
}

impl Default for TestPeerConfig {
    fn default() -> Self {
        Self {
            mobile: BtAddress::new([0x00, 0x1b, 0x66, 0x01, 0x02, 0x03]),
            headset: BtAddress::new([0x00, 0x1b, 0x66, 0x04, 0x05, 0x06]),
            le: BtAddress::new([0xc0, 0x97, 0x27, 0x01, 0x02, 0x03]),
        }
    }
}

impl TestPeerConfig {
    /// Loads from [`TEST_CONFIG_PATH`].
    pub fn load() -> TestPeerConfig {
        Self::load_from(TEST_CONFIG_PATH)
    }

    pub fn load_from(path: &str) -> TestPeerConfig {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::parse(&content),
            Err(_) => {
                info!("Peer config {} not found, using built-in defaults", path);
                TestPeerConfig::default()
            }
        }
    }

    fn parse(content: &str) -> TestPeerConfig {
        let mut config = TestPeerConfig::default();

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let (key, value) = match line.split_once('=') {
                Some(kv) => kv,
                None => {
                    warn!("Skipping malformed config line: {}", line);
                    continue;
                }
            };

            let addr = match BtAddress::from_string(value.trim()) {
                Some(addr) => addr,
                None => {
                    warn!("Skipping config line with bad address: {}", line);
                    continue;
                }
            };

            match key.trim() {
                KEY_ADDR_MOBILE => config.mobile = addr,
                KEY_ADDR_HEADSET => config.headset = addr,
                KEY_ADDR_LE => config.le = addr,
                other => warn!("Skipping unknown config key: {}", other),
            }
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_keys() {
        let config = TestPeerConfig::parse(
            "BT_ADDR_MOBILE=11:22:33:44:55:66\n\
             BT_ADDR_HEADSET=aa:bb:cc:dd:ee:ff\n\
             BT_ADDR_LE=C0:11:22:33:44:55\n",
        );
        assert_eq!(config.mobile.to_string(), "11:22:33:44:55:66");
        assert_eq!(config.headset.to_string(), "AA:BB:CC:DD:EE:FF");
        assert_eq!(config.le.to_string(), "C0:11:22:33:44:55");
    }

    #[test]
    fn malformed_lines_are_skipped() {
        let config = TestPeerConfig::parse(
            "garbage\n\
             BT_ADDR_MOBILE 11:22:33:44:55:66\n\
             BT_ADDR_HEADSET=not-an-address\n\
             # comment\n\
             BT_ADDR_LE=c0:11:22:33:44:55\n",
        );
        let defaults = TestPeerConfig::default();
        assert_eq!(config.mobile, defaults.mobile);
        assert_eq!(config.headset, defaults.headset);
        assert_eq!(config.le.to_string(), "C0:11:22:33:44:55");
    }

    #[test]
    fn empty_input_yields_defaults() {
        assert_eq!(TestPeerConfig::parse(""), TestPeerConfig::default());
    }

    #[test]
    fn missing_file_yields_defaults() {
        assert_eq!(
            TestPeerConfig::load_from("/nonexistent/tetware.conf"),
            TestPeerConfig::default()
        );
    }
}
