// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod config;
mod logging;
mod runtime;

use anyhow::{Context, Result, bail};
use config::Config;
use hbt_app::{HabitService, HabitsTab};
use hbt_db::Store;
use runtime::DbService;
use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;

const IN_MEMORY: &str = ":memory:";

fn main() {
    if let Err(error) = run() {
        eprintln!("{error:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse(env::args().skip(1))?;
    let config_path = match &cli.config_path {
        Some(path) => path.clone(),
        None => Config::default_path()?,
    };

    match cli.action {
        Action::Help => {
            print!("{HELP}");
            return Ok(());
        }
        Action::PrintConfigPath => {
            println!("{}", config_path.display());
            return Ok(());
        }
        Action::PrintExampleConfig => {
            print!("{}", Config::example_config(&config_path));
            return Ok(());
        }
        Action::PrintDbPath | Action::Check | Action::Launch => {}
    }

    let config = Config::load(&config_path).with_context(|| {
        format!(
            "load config {}; `hbt --print-example-config` prints a working template",
            config_path.display()
        )
    })?;
    let db_path = cli.db_path(&config)?;
    if cli.action == Action::PrintDbPath {
        println!("{}", db_path.display());
        return Ok(());
    }

    let _log_guard = match logging::init_logging() {
        Ok((_path, guard)) => Some(guard),
        Err(error) => {
            eprintln!("warning: logging disabled: {error:#}");
            None
        }
    };

    let store = open_store(&db_path, cli.wants_demo_rows())?;
    if cli.action == Action::Check {
        tracing::info!(db = %db_path.display(), "startup check passed");
        return Ok(());
    }

    let service: Arc<dyn HabitService> = Arc::new(DbService::new(store));
    let mut tab = HabitsTab::new();
    hbt_tui::run_app(&mut tab, service, &config.theme())
}

/// Opens and bootstraps the database, optionally topping it up with the demo
/// habits.
fn open_store(db_path: &Path, with_demo_rows: bool) -> Result<Store> {
    let store = Store::open(db_path).with_context(|| {
        format!(
            "open database {}; point [storage].db_path or HBT_DB_PATH at a writable file",
            db_path.display()
        )
    })?;
    store.bootstrap()?;
    if with_demo_rows {
        store.seed_demo_data()?;
    }
    Ok(store)
}

const HELP: &str = "\
hbt - habit tracker

usage: hbt [options]

  --config <path>          Use a specific config path
  --print-config-path      Print resolved config path
  --print-path             Print resolved database path
  --print-example-config   Print a config template
  --demo                   Launch on a throwaway in-memory database with demo habits
  --seed                   Add the demo habits to the configured database
  --check                  Validate config and database, then exit
  -h, --help               Show this help
";

/// What the process does once arguments are read. Only one may be requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Launch,
    Check,
    Help,
    PrintConfigPath,
    PrintDbPath,
    PrintExampleConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Cli {
    action: Action,
    config_path: Option<PathBuf>,
    demo: bool,
    seed: bool,
}

impl Cli {
    fn parse<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut cli = Self {
            action: Action::Launch,
            config_path: None,
            demo: false,
            seed: false,
        };

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            let requested = match arg.as_ref() {
                "--config" => {
                    let Some(path) = args.next() else {
                        bail!("--config needs a path, for example --config ~/hbt.toml");
                    };
                    cli.config_path = Some(PathBuf::from(path.as_ref()));
                    continue;
                }
                "--demo" => {
                    cli.demo = true;
                    continue;
                }
                "--seed" => {
                    cli.seed = true;
                    continue;
                }
                "--check" => Action::Check,
                "--print-config-path" => Action::PrintConfigPath,
                "--print-path" => Action::PrintDbPath,
                "--print-example-config" => Action::PrintExampleConfig,
                "-h" | "--help" => Action::Help,
                other => bail!("unknown argument {other:?}; see `hbt --help`"),
            };
            cli.request(requested)?;
        }

        if cli.demo && cli.seed {
            bail!("--demo already loads demo habits into memory; drop --seed");
        }
        Ok(cli)
    }

    fn request(&mut self, action: Action) -> Result<()> {
        if action == Action::Help || self.action == Action::Help {
            self.action = Action::Help;
            return Ok(());
        }
        if self.action != Action::Launch && self.action != action {
            bail!("{:?} and {:?} cannot be combined; pick one", self.action, action);
        }
        self.action = action;
        Ok(())
    }

    fn db_path(&self, config: &Config) -> Result<PathBuf> {
        if self.demo {
            return Ok(PathBuf::from(IN_MEMORY));
        }
        config.db_path()
    }

    fn wants_demo_rows(&self) -> bool {
        self.demo || self.seed
    }
}
