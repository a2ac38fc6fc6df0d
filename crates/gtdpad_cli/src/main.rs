//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `gtdpad_core` linkage without any UI runtime.
//! - Print the seeded group summary so wiring issues show up immediately.
//! - Start file logging under `GTDPAD_LOG_DIR`, or `<tmp>/gtdpad/logs`.

use gtdpad_core::{default_log_level, init_logging, GroupRepository, MemoryStore, ALL_GROUPS};
use std::path::PathBuf;
use std::process::ExitCode;

const LOG_DIR_ENV: &str = "GTDPAD_LOG_DIR";

fn main() -> ExitCode {
    println!("gtdpad_core ping={}", gtdpad_core::ping());
    println!("gtdpad_core version={}", gtdpad_core::core_version());

    let log_dir = log_dir();
    match init_logging(default_log_level(), &log_dir.to_string_lossy()) {
        Ok(()) => println!("gtdpad_core logs={}", log_dir.display()),
        // Logging is optional for the smoke run.
        Err(err) => eprintln!("gtdpad_core logging disabled: {err}"),
    }

    let repo = match GroupRepository::open_or_seed(MemoryStore::new()) {
        Ok(repo) => repo,
        Err(err) => {
            eprintln!("gtdpad_core seed failed: {err}");
            return ExitCode::FAILURE;
        }
    };
    let groups = match repo.groups(ALL_GROUPS) {
        Ok(groups) => groups,
        Err(err) => {
            eprintln!("gtdpad_core query failed: {err}");
            return ExitCode::FAILURE;
        }
    };
    for group in groups {
        println!(
            "group id={} items={} top={}",
            group.id(),
            group.items().len(),
            group.top_items().len()
        );
    }
    ExitCode::SUCCESS
}

fn log_dir() -> PathBuf {
    std::env::var_os(LOG_DIR_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::temp_dir().join("gtdpad").join("logs"))
}
