mod config;
mod db;
mod entry;
mod logging;
mod models;
mod run;
mod summary;
mod ui;

use anyhow::Result;

fn main() -> Result<()> {
    let mut args: Vec<String> = std::env::args().collect();
    let db_override = config::take_db_flag(&mut args)?;
    let paths = config::Paths::resolve(db_override)?;
    if let Err(e) = logging::init(&paths.log_path) {
        eprintln!("Warning: logging disabled: {e:#}");
    }

    let mut db = db::Database::open(&paths.db_path)?;

    match args.len() {
        1 => run::as_tui(&mut db),
        2.. => run::as_cli(&args, &mut db),
        _ => {
            eprintln!("Usage: assetui [command]");
            Ok(())
        }
    }
}
