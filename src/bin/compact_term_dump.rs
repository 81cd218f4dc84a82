//! Compact Term Dump
//!
//! Reads a raw binary file containing a compact-term operand stream
//! (already stripped of any BEAM chunk header) and prints every decoded
//! term with its byte offset, followed by a roundtrip verdict for the whole
//! buffer.
//!
//! ```text
//! compact-term-dump path/to/operands.bin
//! ```

use compact_term_format::{decode, roundtrip, DecodeError};
use std::fs;
use std::path::Path;
use std::process::ExitCode;

fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<u8>, LoadError> {
    fs::read(path).map_err(|_| LoadError::FileError)
}

/// Dump tool I/O errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoadError {
    FileError,
}

fn main() -> ExitCode {
    let mut args = std::env::args();
    let program = args.next().unwrap_or_else(|| "compact-term-dump".to_string());
    let Some(path) = args.next() else {
        eprintln!("usage: {program} <operand-stream-file>");
        return ExitCode::FAILURE;
    };

    let bytes = match load_from_file(&path) {
        Ok(bytes) => bytes,
        Err(LoadError::FileError) => {
            eprintln!("error: could not read {path}");
            return ExitCode::FAILURE;
        }
    };

    match dump(&bytes) {
        Ok(()) => {
            println!("roundtrip: {}", roundtrip(&bytes));
            ExitCode::SUCCESS
        }
        Err((error, offset)) => {
            eprintln!("decode error at offset {offset}: {error:?}");
            ExitCode::FAILURE
        }
    }
}

/// Print each decoded term with its starting byte offset. Stops and reports
/// the failing offset on the first decode error, after printing every term
/// decoded so far.
fn dump(bytes: &[u8]) -> Result<(), (DecodeError, usize)> {
    let mut offset = 0usize;
    let mut remaining = bytes;
    while !remaining.is_empty() {
        match decode(remaining) {
            Ok((term, rest)) => {
                println!("{offset:#06x}: {term:?}");
                offset += remaining.len() - rest.len();
                remaining = rest;
            }
            Err(error) => return Err((error, offset)),
        }
    }
    Ok(())
}
