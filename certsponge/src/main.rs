//! certsponge — write a PKI issuance response to PEM files
//!
//! Reads the JSON response of a secrets engine `issue` call from stdin and
//! writes the private key, certificate and CA chain to disk.

use certsponge::cli::Cli;
use certsponge::logger::init_logger;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse_args();

    if cli.version {
        println!("{}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    init_logger(&cli.log_level)?;

    let config = cli.output_config();
    certsponge::execute(std::io::stdin().lock(), &config)?;

    Ok(())
}
