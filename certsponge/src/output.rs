//! Output destinations and the guarded file writer.
//!
//! # Destinations
//!
//! ```text
//! tls.pem   # bundle: private_key + certificate + ca_chain (0600)
//! ca.crt    # ca_chain                                     (0644)
//! <key>     # private_key, disabled by default             (0600)
//! <cert>    # certificate, disabled by default             (0644)
//! ```
//!
//! Destinations are written in the order above. Each one is checked for an
//! existing file right before it is written, so a conflict on a later
//! destination leaves earlier ones on disk.

use crate::error::{Result, SpongeError};
use crate::response::IssuanceResponse;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Owner read/write only.
pub const SENSITIVE_FILE_MODE: u32 = 0o600;
/// Owner read/write, group and other read.
pub const NON_SENSITIVE_FILE_MODE: u32 = 0o644;

pub const DEFAULT_BUNDLE_PATH: &str = "tls.pem";
pub const DEFAULT_CA_CHAIN_PATH: &str = "ca.crt";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    Bundle,
    CaChain,
    Key,
    Cert,
}

impl Destination {
    /// Processing order.
    pub const ALL: [Destination; 4] = [
        Destination::Bundle,
        Destination::CaChain,
        Destination::Key,
        Destination::Cert,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Destination::Bundle => "bundle",
            Destination::CaChain => "ca-chain",
            Destination::Key => "key",
            Destination::Cert => "cert",
        }
    }

    /// Whether the destination carries private key material.
    pub fn is_sensitive(self) -> bool {
        matches!(self, Destination::Bundle | Destination::Key)
    }

    /// Permission bits requested when the file is created.
    pub fn mode(self) -> u32 {
        if self.is_sensitive() {
            SENSITIVE_FILE_MODE
        } else {
            NON_SENSITIVE_FILE_MODE
        }
    }

    /// Renders the file content for this destination.
    pub fn render(self, resp: &IssuanceResponse) -> String {
        match self {
            Destination::Bundle => {
                let mut parts = Vec::with_capacity(2 + resp.ca_chain().len());
                parts.push(resp.private_key());
                parts.push(resp.certificate());
                parts.extend(resp.ca_chain().iter().map(String::as_str));
                parts.join("\n")
            }
            Destination::CaChain => resp.ca_chain().join("\n"),
            Destination::Key => format!("{}\n", resp.private_key()),
            Destination::Cert => format!("{}\n", resp.certificate()),
        }
    }
}

/// Where to write each destination. `None` disables a destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    pub bundle: Option<PathBuf>,
    pub ca_chain: Option<PathBuf>,
    pub key: Option<PathBuf>,
    pub cert: Option<PathBuf>,
    /// Overwrite existing files instead of aborting.
    pub force: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            bundle: Some(PathBuf::from(DEFAULT_BUNDLE_PATH)),
            ca_chain: Some(PathBuf::from(DEFAULT_CA_CHAIN_PATH)),
            key: None,
            cert: None,
            force: false,
        }
    }
}

impl OutputConfig {
    /// Config with every destination disabled.
    pub fn disabled() -> Self {
        Self {
            bundle: None,
            ca_chain: None,
            key: None,
            cert: None,
            force: false,
        }
    }

    pub fn path(&self, dest: Destination) -> Option<&Path> {
        let path = match dest {
            Destination::Bundle => &self.bundle,
            Destination::CaChain => &self.ca_chain,
            Destination::Key => &self.key,
            Destination::Cert => &self.cert,
        };
        path.as_deref()
    }

    /// Enabled destinations in processing order.
    pub fn targets(&self) -> impl Iterator<Item = (Destination, &Path)> + '_ {
        Destination::ALL
            .into_iter()
            .filter_map(|dest| self.path(dest).map(|path| (dest, path)))
    }
}

/// Whether a filesystem entry exists at `path`, following symlinks.
pub fn exists(path: &Path) -> bool {
    fs::metadata(path).is_ok()
}

/// Writes `content` to `path`, refusing to replace an existing file unless
/// `force` is set.
///
/// `mode` only takes effect when the file is created (Unix only).
pub fn write_guarded(path: &Path, content: &str, mode: u32, force: bool) -> Result<()> {
    let existed = exists(path);
    if existed && !force {
        return Err(SpongeError::AlreadyExists {
            path: path.to_path_buf(),
        });
    }
    if existed {
        tracing::warn!(path = %path.display(), "Overwriting existing file");
    }

    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(mode);
    }
    #[cfg(not(unix))]
    let _ = mode;

    let mut file = options
        .open(path)
        .map_err(|e| SpongeError::file("open", path, e))?;
    file.write_all(content.as_bytes())
        .map_err(|e| SpongeError::file("write", path, e))?;
    // fsync is rejected on devices and pipes.
    let is_regular = file.metadata().map(|m| m.is_file()).unwrap_or(false);
    if is_regular {
        file.sync_all()
            .map_err(|e| SpongeError::file("close", path, e))?;
    }
    Ok(())
}
