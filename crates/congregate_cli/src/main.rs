//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `congregate_core` linkage and start-up wiring without a UI.
//! - Keep output deterministic for quick local sanity checks.
//!
//! Usage: `congregate_cli [config.json]`

use congregate_core::db::{open_db, open_db_in_memory};
use congregate_core::{
    init_logging_from_config, AppShell, CoreConfig, DomainStore, SqliteSessionRecordRepository,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("congregate_core ping={}", congregate_core::ping());
    println!("congregate_core version={}", congregate_core::core_version());

    let config = match std::env::args().nth(1) {
        Some(path) => match CoreConfig::from_file(&path) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("config error: {err}");
                return ExitCode::FAILURE;
            }
        },
        None => CoreConfig::default(),
    };

    match init_logging_from_config(&config) {
        Ok(enabled) => println!("logging enabled={enabled}"),
        Err(err) => eprintln!("logging disabled: {err}"),
    }

    let opened = match config.db_path.as_deref() {
        Some(path) => open_db(path),
        None => open_db_in_memory(),
    };
    let conn = match opened {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!("database error: {err}");
            return ExitCode::FAILURE;
        }
    };

    let shell = AppShell::start(
        SqliteSessionRecordRepository::new(&conn),
        DomainStore::new(),
        config,
    );
    match shell.session() {
        Some(session) => println!(
            "session restored=true role={} branch={}",
            session.role, session.branch
        ),
        None => println!("session restored=false"),
    }
    log::info!(
        "event=cli_start module=cli status=ok restored={}",
        shell.session().is_some()
    );
    println!("route={:?}", shell.route());
    ExitCode::SUCCESS
}
