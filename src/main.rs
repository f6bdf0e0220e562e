// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use ledgerdesk::{cli, commands, config::Settings, db, logging};

fn main() -> Result<()> {
    logging::init();
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let store = db::open_or_init()?;
    let settings = Settings::load(store.conn())?;

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", db::db_path()?.display());
        }
        Some(("tx", sub)) => commands::transactions::handle(&store, &settings, sub)?,
        Some(("product", sub)) => commands::products::handle(&store, &settings, sub)?,
        Some(("employee", sub)) => commands::employees::handle(&store, &settings, sub)?,
        Some(("department", sub)) => commands::departments::handle(&store, &settings, sub)?,
        Some(("report", sub)) => commands::reports::handle(&store, &settings, sub)?,
        Some(("import", sub)) => commands::importer::handle(&store, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&store, sub)?,
        Some(("config", sub)) => commands::settings::handle(store.conn(), sub)?,
        Some(("doctor", _)) => commands::doctor::handle(&store)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
