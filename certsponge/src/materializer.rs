use crate::error::{Result, SpongeError};
use crate::output::{OutputConfig, write_guarded};
use crate::response::IssuanceResponse;
use std::io::Read;

/// Reads an issuance response from `input` and writes the configured files.
///
/// Nothing is written unless the input decodes and validates. Destinations
/// are processed in order and the first failure aborts the run; files
/// written before the failure are left in place.
pub fn execute<R: Read>(mut input: R, config: &OutputConfig) -> Result<()> {
    let mut buf = Vec::new();
    input.read_to_end(&mut buf).map_err(SpongeError::Io)?;
    tracing::debug!(bytes = buf.len(), "Read issuance response");

    let resp = IssuanceResponse::from_slice(&buf)?;
    resp.validate()?;

    materialize(&resp, config)
}

/// Writes the destinations enabled in `config` from an already validated response.
pub fn materialize(resp: &IssuanceResponse, config: &OutputConfig) -> Result<()> {
    let enabled: Vec<_> = config.targets().map(|(dest, _)| dest.name()).collect();
    tracing::debug!(destinations = ?enabled, "Writing destinations");

    for (dest, path) in config.targets() {
        let content = dest.render(resp);
        write_guarded(path, &content, dest.mode(), config.force)?;
        tracing::info!(
            destination = dest.name(),
            path = %path.display(),
            bytes = content.len(),
            mode = %format!("{:o}", dest.mode()),
            "Wrote file"
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("stdin closed"))
        }
    }

    #[test]
    fn read_failure_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = OutputConfig {
            bundle: Some(dir.path().join("tls.pem")),
            ..OutputConfig::disabled()
        };

        let err = execute(FailingReader, &config).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
        assert!(!dir.path().join("tls.pem").exists());
    }
}
