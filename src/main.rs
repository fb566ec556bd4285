//! corec: scanner and parser for the core teaching language

use std::io;
use std::path::Path;
use std::process::ExitCode;

use clap::Parser as _;
use crossterm::{
    execute,
    style::Stylize,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::EnvFilter;

use corec::cli::{CorecArgs, CorecSubcommand};
use corec::config::Config;
use corec::driver;
use corec::symbol_table;
use corec::ui::App;
use corec::CorecResult;

fn main() -> ExitCode {
    let args = CorecArgs::parse();

    tracing_subscriber::fmt()
        .with_target(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(args.log_level())),
        )
        .init();

    let config = args.config();
    let result = match &args.subcommand {
        CorecSubcommand::Scan { file } => scan(&config, file),
        CorecSubcommand::Parse { file } => {
            let path = file.as_deref().unwrap_or(&config.tokens_path);
            parse(&config, path)
        }
        CorecSubcommand::Build { file } => build(&config, file),
        CorecSubcommand::View { file } => view(&config, file),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {}", "error:".red().bold(), err);
            ExitCode::FAILURE
        }
    }
}

fn scan(config: &Config, file: &Path) -> CorecResult<()> {
    let output = driver::scan_file(config, file)?;
    // Comments are echoed here but kept out of the token table
    for token in output.tokens.iter().filter(|t| !t.kind.is_error()) {
        println!("{}", symbol_table::console_line(token));
    }

    let count = output.persisted().count();
    output.into_result()?;
    println!(
        "{} {} tokens written to {}",
        "scanned:".green().bold(),
        count,
        config.tokens_path.display()
    );
    Ok(())
}

fn parse(config: &Config, file: &Path) -> CorecResult<()> {
    driver::parse_file(config, file)?;
    println!(
        "{} parse tree written to {}",
        "parsed:".green().bold(),
        config.tree_path.display()
    );
    Ok(())
}

fn build(config: &Config, file: &Path) -> CorecResult<()> {
    driver::build_file(config, file)?;
    println!(
        "{} {} and {}",
        "built:".green().bold(),
        config.tokens_path.display(),
        config.tree_path.display()
    );
    Ok(())
}

fn view(config: &Config, file: &Path) -> CorecResult<()> {
    let source = driver::read_source(config, file)?;
    let output = driver::scan_source(config, &source);
    let lexical_errors = output.errors.len();

    // Logging would tear the alternate screen; silence it while the UI runs
    let quiet = tracing::subscriber::NoSubscriber::default();
    let res = tracing::subscriber::with_default(quiet, || {
        let mut app = App::new(&source, output.tokens, lexical_errors);
        run_terminal(&mut app)
    });

    res?;
    Ok(())
}

fn run_terminal(app: &mut App) -> io::Result<()> {
    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}
