//! `sqa` - issue tracker for software quality assurance testing.
//!
//! Projects and their issues live in a local store file; no server, no sync.

use sqa_tracker::{error_report, run};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}", error_report(&e));
        std::process::exit(1);
    }
}
