//! Command surface: verify one audit bundle file.
//!
//! Usage: `verify_bundle <bundle-file>`
//!
//! Prints the deterministic `key=value` report to stdout and exits with
//! 0 for PASS, 2 for FAIL. Exit 1 means the bundle file could not be read
//! at all (an operational fault, not a verification outcome).

use std::path::Path;

use meridian_harness::bundle_file::verify_bundle_file;

fn main() {
    let mut args = std::env::args().skip(1);
    let (Some(path), None) = (args.next(), args.next()) else {
        eprintln!("usage: verify_bundle <bundle-file>");
        std::process::exit(1);
    };

    match verify_bundle_file(Path::new(&path)) {
        Ok(verdict) => {
            print!("{}", verdict.render());
            std::process::exit(verdict.exit_code());
        }
        Err(e) => {
            eprintln!("verify_bundle: {e}");
            std::process::exit(1);
        }
    }
}
