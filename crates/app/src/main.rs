use enigma_app::config::{print_help, Config};
use std::process::ExitCode;
use tracing::Level;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let config = match Config::from_args(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Run with --help for usage.");
            return ExitCode::from(1);
        }
    };

    if config.show_help {
        print_help();
        return ExitCode::SUCCESS;
    }

    let level = if config.verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match enigma_app::run(&config) {
        Ok(metrics) => {
            if config.print_metrics {
                metrics.print_summary();
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(1)
        }
    }
}
