//! Version command implementation.

use serde::Serialize;
use sqa_lib::Result;

use crate::cli::VersionArgs;
use crate::format::print_json;

#[derive(Serialize)]
struct VersionOutput<'a> {
    version: &'a str,
    build: &'a str,
    target_os: &'a str,
}

/// Execute the version command.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn execute(args: &VersionArgs, json: bool) -> Result<()> {
    let version = env!("CARGO_PKG_VERSION");

    if args.short {
        println!("{version}");
        return Ok(());
    }

    let build = if cfg!(debug_assertions) {
        "dev"
    } else {
        "release"
    };

    if json {
        return print_json(&VersionOutput {
            version,
            build,
            target_os: std::env::consts::OS,
        });
    }

    println!("sqa version {version} ({build})");
    Ok(())
}
