use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::address::StaticAddresses;
use crate::token::{TokenDeriver, TokenDigest};

/// HTTP transport parameters (optional section in config.toml).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    /// Connection timeout in seconds.
    pub connect_timeout_secs: u64,
    /// Whole-request timeout in seconds.
    pub timeout_secs: u64,
    /// Follow 3xx redirects (at most 10).
    pub follow_redirects: bool,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 15,
            timeout_secs: 60,
            follow_redirects: true,
        }
    }
}

/// Global configuration loaded from `~/.config/pagelink/config.toml`.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PagelinkConfig {
    /// Salt prepended to the path before hashing email tokens. Empty is valid.
    pub hash_salt: String,
    /// Token digest: "md5" (default) or "hmac-sha256".
    pub token_digest: TokenDigest,
    /// Addresses this server is reachable at, in preference order.
    pub addresses: Vec<String>,
    pub transport: TransportConfig,
}

// Manual impl: the salt is a secret and config gets logged.
impl fmt::Debug for PagelinkConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PagelinkConfig")
            .field("hash_salt", &crate::token::Redacted(&self.hash_salt))
            .field("token_digest", &self.token_digest)
            .field("addresses", &self.addresses)
            .field("transport", &self.transport)
            .finish()
    }
}

impl PagelinkConfig {
    pub fn token_deriver(&self) -> TokenDeriver {
        TokenDeriver::new(self.hash_salt.clone(), self.token_digest)
    }

    pub fn address_source(&self) -> StaticAddresses {
        StaticAddresses(self.addresses.clone())
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("pagelink")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from `path`.
pub fn load_from(path: &Path) -> Result<PagelinkConfig> {
    let data =
        fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: PagelinkConfig =
        toml::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<PagelinkConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = PagelinkConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    load_from(&path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::AddressSource;
    use std::io::Write;

    #[test]
    fn default_config_values() {
        let cfg = PagelinkConfig::default();
        assert_eq!(cfg.hash_salt, "");
        assert_eq!(cfg.token_digest, TokenDigest::Md5);
        assert!(cfg.addresses.is_empty());
        assert_eq!(cfg.transport.connect_timeout_secs, 15);
        assert_eq!(cfg.transport.timeout_secs, 60);
        assert!(cfg.transport.follow_redirects);
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = PagelinkConfig {
            hash_salt: "pepper".to_string(),
            token_digest: TokenDigest::HmacSha256,
            addresses: vec!["https://localhost:5001".to_string()],
            transport: TransportConfig::default(),
        };
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: PagelinkConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn empty_file_uses_defaults() {
        let cfg: PagelinkConfig = toml::from_str("").unwrap();
        assert_eq!(cfg, PagelinkConfig::default());
    }

    #[test]
    fn config_toml_custom_values() {
        let toml = r#"
            hash_salt = "s3cret"
            token_digest = "hmac-sha256"
            addresses = ["http://localhost:5000", "https://localhost:5001"]

            [transport]
            timeout_secs = 5
        "#;
        let cfg: PagelinkConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.hash_salt, "s3cret");
        assert_eq!(cfg.token_digest, TokenDigest::HmacSha256);
        assert_eq!(
            cfg.address_source().addresses(),
            vec!["http://localhost:5000", "https://localhost:5001"]
        );
        assert_eq!(cfg.transport.timeout_secs, 5);
        assert_eq!(cfg.transport.connect_timeout_secs, 15);
    }

    #[test]
    fn unknown_digest_is_rejected() {
        assert!(toml::from_str::<PagelinkConfig>(r#"token_digest = "sha1""#).is_err());
    }

    #[test]
    fn token_deriver_uses_salt() {
        let cfg: PagelinkConfig = toml::from_str(r#"hash_salt = "salt1""#).unwrap();
        assert_eq!(
            cfg.token_deriver().derive("/x").as_str(),
            "0h3xtByH5lPRk8yGYdSSfA=="
        );
    }

    #[test]
    fn debug_output_hides_salt() {
        let cfg = PagelinkConfig {
            hash_salt: "TOP-SECRET-SALT".to_string(),
            addresses: vec!["https://localhost:5001".to_string()],
            ..PagelinkConfig::default()
        };
        let shown = format!("{:?}", cfg);
        assert!(!shown.contains("TOP-SECRET-SALT"), "{shown}");
        assert!(shown.contains("https://localhost:5001"));
        assert!(shown.contains("<redacted>"));
        assert!(!format!("{:?}", cfg.token_deriver()).contains("TOP-SECRET-SALT"));
    }

    #[test]
    fn debug_output_marks_empty_salt() {
        let shown = format!("{:?}", PagelinkConfig::default());
        assert!(shown.contains("hash_salt: <empty>"), "{shown}");
    }

    #[test]
    fn load_from_file() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(b"hash_salt = \"abc\"\n").unwrap();
        f.flush().unwrap();
        let cfg = load_from(f.path()).unwrap();
        assert_eq!(cfg.hash_salt, "abc");
    }

    #[test]
    fn load_from_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_from(&dir.path().join("nope.toml")).is_err());
    }
}
