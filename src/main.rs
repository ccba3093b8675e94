/*!
 * Command-line interface for ContextForge
 */

use std::io;
use std::process;
use std::time::Duration;

use clap::{CommandFactory, Parser};
use clap_complete::generate;
use indicatif::{ProgressBar, ProgressStyle};

use contextforge::config::{Args, Config};
use contextforge::error::Result;
use contextforge::report::{ReportFormat, Reporter};
use contextforge::session::Session;

fn main() {
    let args = Args::parse();

    if let Some(shell) = args.generate {
        let mut cmd = Args::command();
        generate(shell, &mut cmd, "contextforge", &mut io::stdout());
        return;
    }

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let config = Config::from_args(args)?;
    config.validate()?;

    // Status spinner on stderr; document output goes to the configured sink
    let progress = ProgressBar::new_spinner();
    progress.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {wide_msg}")
            .unwrap(),
    );
    progress.enable_steady_tick(Duration::from_millis(100));
    progress.set_message("🔍 Processing files...");

    let mut session = Session::new(config, Some(progress.clone()));
    let result = session.run();

    progress.finish_and_clear();
    let report = result?;

    Reporter::new(ReportFormat::ConsoleTable).print_report(&report);

    Ok(())
}
