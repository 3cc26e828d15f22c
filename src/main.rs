//! Codecs - decode, encode, hash and script text

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = codecs::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
