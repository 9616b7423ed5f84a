//! Drives a `ReviewSession` over a hex-encoded envelope from a file or
//! stdin and prints the full caption/value stream. Stands in for the
//! APDU dispatcher that is the only caller on real hardware (out of
//! scope for this crate).

use clap::Parser;
use std::error::Error;
use std::io::{self, Read};
use std::path::PathBuf;

use sthw::ReviewSession;

#[derive(Debug, Parser)]
#[clap(name = "sthw-demo")]
#[clap(about = "Walk a hex-encoded Stellar envelope through the review core")]
struct Cli {
    /// Hex-encoded envelope; reads stdin when omitted.
    input: Option<PathBuf>,

    /// Treat the input as a standalone Soroban authorization entry
    /// instead of a transaction envelope.
    #[clap(long)]
    authorization: bool,

    /// Ed25519 public key (hex) whose matching source account is shown
    /// abbreviated rather than in full.
    #[clap(long)]
    signer: Option<String>,

    /// Skip the sequence-number field when walking the header.
    #[clap(long = "no-sequence")]
    no_sequence: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    tracing_subscriber::fmt::init();

    let hex_input = match &cli.input {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    let bytes = hex::decode(hex_input.trim())?;

    let mut session = ReviewSession::new();
    if let Some(signer) = &cli.signer {
        let key: [u8; 32] = hex::decode(signer)?
            .try_into()
            .map_err(|_| "signing key must be 32 bytes")?;
        session.set_signing_key(Some(key));
    }
    session.set_display_sequence(!cli.no_sequence);

    if cli.authorization {
        session.parse_authorization(&bytes)?;
    } else {
        session.parse_transaction(&bytes)?;
    }

    while let Some((caption, value)) = session.next_data(true)? {
        println!("{}: {}", caption.as_str(), value.as_str());
    }
    if session.unverified_contracts() {
        eprintln!("warning: one or more contract calls rendered generically (unverified)");
    }
    Ok(())
}
