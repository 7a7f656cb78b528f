//! `mugi-bmp`: encrypts or decrypts the pixel payload of a BMP image.
//!
//! The 54-byte header is copied verbatim and the rest of the file is XORed
//! against the MUGI keystream. Running the tool again with the same key and
//! IV restores the original image.
//!
//! **Usage:**
//! ```text
//! mugi-bmp <INPUT> <KEY> <IV> [OUTPUT]
//! ```
//!
//! `KEY` and `IV` are integer literals (`0x` hex, `0b` binary or decimal)
//! reduced to 128 bits. `OUTPUT` defaults to `out.bmp`.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use mugi::image::process_bmp;
use mugi::mugi::{IV_BITS, KEY_BITS};
use mugi::BitWord;

/// XOR a BMP payload with the MUGI keystream.
#[derive(Parser)]
#[command(
    name = "mugi-bmp",
    about = "Encrypt or decrypt a BMP image payload with the MUGI keystream"
)]
struct Args {
    /// Source BMP file.
    input: PathBuf,

    /// 128-bit key literal.
    key: String,

    /// 128-bit initialization vector literal.
    iv: String,

    /// Destination file.
    #[arg(default_value = "out.bmp")]
    output: PathBuf,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let key = BitWord::parse(&args.key, KEY_BITS).context("invalid key")?;
    let iv = BitWord::parse(&args.iv, IV_BITS).context("invalid IV")?;

    let image = fs::read(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;
    let processed = process_bmp(&image, &key, &iv)
        .with_context(|| format!("cannot process {}", args.input.display()))?;
    fs::write(&args.output, &processed)
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    info!(
        "Wrote {} ({} bytes)",
        args.output.display(),
        processed.len()
    );
    Ok(())
}
