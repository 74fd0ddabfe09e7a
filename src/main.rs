//! taskdeck CLI - to-do list with undo/redo

use anyhow::Result;
use clap::Parser;
use std::io::{self, Write};
use taskdeck::cli::display::error;
use taskdeck::cli::{Cli, Commands, execute, run_shell, update_config};
use taskdeck::storage::{Config, DataLocation, FileKv, load_tasks, save_tasks};
use taskdeck::tasks::Session;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| writeln!(buf, "{}", record.args()))
        .init();

    let cli = Cli::parse();

    let result = run(cli);

    if let Err(e) = &result {
        error(&e.to_string());
        std::process::exit(1);
    }

    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    let location = DataLocation::resolve(cli.data_dir.as_deref())?;

    if let Commands::Config {
        max_history,
        unbounded,
        restore_deleted_position,
    } = cli.command
    {
        update_config(
            &location.config_path(),
            max_history,
            unbounded,
            restore_deleted_position,
            &mut io::stdout(),
        )?;
        return Ok(());
    }

    let config = Config::load_from(&location.config_path())?;

    let mut store = FileKv::new(location);
    if store.location().exists() {
        log::debug!("using data directory {:?}", store.location().dir);
    } else {
        log::debug!(
            "data directory {:?} will be created on first save",
            store.location().dir
        );
    }
    let tasks = load_tasks(&store)?;
    let mut session = Session::new(tasks, config.history());

    match cli.command {
        Commands::Shell => {
            log::info!("Type a command, 'help' for the list, or 'exit' to leave.");
            let stdin = io::stdin();
            run_shell(&mut session, &mut store, stdin.lock(), io::stdout())?;
        }
        command => {
            let mut confirm = |_: &str| -> io::Result<bool> {
                let mut input = String::new();
                io::stdin().read_line(&mut input)?;
                Ok(input.trim().eq_ignore_ascii_case("y"))
            };

            let changed = execute(&mut session, command, &mut io::stdout(), &mut confirm)?;
            if changed {
                save_tasks(&mut store, session.tasks())?;
            }
        }
    }

    Ok(())
}
