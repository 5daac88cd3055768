use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clinic_desk::app::App;
use clinic_desk::command;
use clinic_desk::config::Config;
use clinic_desk::error::Result;
use clinic_desk::store::wire;

fn main() -> Result<()> {
    // Initialize logging (only show warnings and errors by default)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();

    // Load configuration
    let config = Config::load()?;

    // Check for --import flag
    let import_path = if args.len() >= 3 && args[1] == "--import" {
        Some(PathBuf::from(&args[2]))
    } else {
        None
    };

    // Check for --stats flag (headless stats)
    let headless_stats = args.len() >= 2 && args[1] == "--stats";

    // Initialize app (restores the configured snapshot if present)
    let mut app = App::new(config)?;

    // If import path provided, merge the snapshot and exit
    if let Some(path) = import_path {
        let (patients, doctors, appointments) = app.import_snapshot(&path)?;
        app.save_snapshot()?;
        println!(
            "Imported {} patients, {} doctors, {} appointments from {:?}",
            patients, doctors, appointments, path
        );
        return Ok(());
    }

    // If headless stats, just print and exit
    if headless_stats {
        println!("{}", wire::stats_json(&app.store.stats()?)?);
        return Ok(());
    }

    // Run the prompt loop
    let result = run_app(&mut app);

    if let Err(e) = result {
        eprintln!("Error: {}", e);
    }

    Ok(())
}

fn run_app(app: &mut App) -> Result<()> {
    let stdin = io::stdin();
    let mut stdin = stdin.lock();
    let mut line = String::new();

    loop {
        print!("> ");
        io::stdout().flush()?;

        line.clear();
        if stdin.read_line(&mut line)? == 0 {
            // EOF behaves like quit
            return Ok(());
        }

        match command::parse(&line) {
            Ok(Some(cmd)) => {
                let should_quit = app.handle_command(cmd)?;
                if should_quit {
                    return Ok(());
                }
            }
            Ok(None) => {}
            Err(e) => eprintln!("error: {}", e),
        }
    }
}
