//! Command-line surface.
//!
//! Flags are accepted in single-dash long form (`-bundle tls.pem`,
//! `-ca-cert=ca.crt`) as well as the usual `--bundle` form. Single-dash long
//! flags are rewritten to their double-dash spelling before `clap` sees them.
//! Boolean flags take an optional value (`-f=false`), and parsing stops at the
//! first non-flag argument or `--`; whatever follows is ignored.

use crate::output::{DEFAULT_BUNDLE_PATH, DEFAULT_CA_CHAIN_PATH, OutputConfig};
use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;

/// Long flags that take a value.
const VALUE_FLAGS: &[&str] = &["bundle", "ca-cert", "key", "cert", "log-level"];

/// Boolean flags and the switch each one maps to.
const BOOL_FLAGS: &[(&str, &str)] = &[
    ("f", "-f"),
    ("force", "-f"),
    ("v", "-v"),
    ("version", "-v"),
];

#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(
    name = "certsponge",
    about = "Write a PKI issuance response from stdin to PEM files",
    disable_version_flag = true
)]
pub struct Cli {
    /// Path to the PEM bundle file to write containing: private_key, certificate, and ca_chain. Set to "" to disable.
    #[arg(long, value_name = "PATH", default_value = DEFAULT_BUNDLE_PATH, env = "CERTSPONGE_BUNDLE")]
    pub bundle: String,

    /// Path to the CA bundle file to write containing: ca_chain. Set to "" to disable.
    #[arg(long = "ca-cert", value_name = "PATH", default_value = DEFAULT_CA_CHAIN_PATH, env = "CERTSPONGE_CA_CERT")]
    pub ca_cert: String,

    /// Path to the file to write the private_key.
    #[arg(long, value_name = "PATH", env = "CERTSPONGE_KEY")]
    pub key: Option<String>,

    /// Path to the file to write the certificate.
    #[arg(long, value_name = "PATH", env = "CERTSPONGE_CERT")]
    pub cert: Option<String>,

    /// Force overwriting of existing files.
    #[arg(short = 'f', long, env = "CERTSPONGE_FORCE")]
    pub force: bool,

    /// Print version and exit.
    #[arg(short = 'v', long)]
    pub version: bool,

    /// Log filter used when RUST_LOG is not set.
    #[arg(long, value_name = "LEVEL", default_value = "warn", env = "CERTSPONGE_LOG")]
    pub log_level: String,
}

impl Cli {
    /// Parses the process arguments, accepting single-dash long flags.
    pub fn parse_args() -> Self {
        Self::parse_from(normalize_args(std::env::args_os()))
    }

    pub fn try_parse_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        Self::try_parse_from(normalize_args(args))
    }

    /// Destination settings for this invocation.
    pub fn output_config(&self) -> OutputConfig {
        OutputConfig {
            bundle: enabled(Some(&self.bundle)),
            ca_chain: enabled(Some(&self.ca_cert)),
            key: enabled(self.key.as_ref()),
            cert: enabled(self.cert.as_ref()),
            force: self.force,
        }
    }
}

fn enabled(path: Option<&String>) -> Option<PathBuf> {
    path.filter(|p| !p.is_empty()).map(PathBuf::from)
}

/// Rewrites `-bundle`-style flags to `--bundle`.
///
/// A value-taking flag and its separate value are joined as `--flag=value`
/// so values that begin with `-` or are empty survive parsing. Boolean flags
/// accept `=true`/`=false` and are emitted as their short switch or dropped.
/// Arguments after `--` or after the first non-flag argument are discarded.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut iter = args.into_iter().map(Into::into);
    let mut out: Vec<OsString> = iter.next().into_iter().collect();

    while let Some(arg) = iter.next() {
        let Some(s) = arg.to_str() else {
            out.push(arg);
            continue;
        };
        if s == "--" || s == "-" || !s.starts_with('-') {
            break;
        }

        let body = s.strip_prefix("--").unwrap_or(&s[1..]);
        let (name, value) = match body.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (body, None),
        };

        if let Some(&(_, switch)) = BOOL_FLAGS.iter().find(|(flag, _)| *flag == name) {
            match value.map(parse_bool) {
                None | Some(Some(true)) => out.push(switch.into()),
                Some(Some(false)) => {}
                // Leave malformed values for clap to reject.
                Some(None) => out.push(arg),
            }
            continue;
        }

        if !VALUE_FLAGS.contains(&name) {
            out.push(arg);
            continue;
        }

        if let Some(value) = value {
            out.push(format!("--{name}={value}").into());
        } else if let Some(value) = iter.next() {
            let mut joined = OsString::from(format!("--{name}="));
            joined.push(value);
            out.push(joined);
        } else {
            out.push(format!("--{name}").into());
        }
    }
    out
}

/// Boolean spellings accepted after `=`.
fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Some(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Some(false),
        _ => None,
    }
}
