use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = ffplan_cli::Cli::parse();
    init_logging(cli.verbose);
    let stdout = std::io::stdout();
    if let Err(err) = ffplan_cli::run(&cli, &mut stdout.lock()) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

/// `RUST_LOG` decides, unless `--verbose` asks for debug output.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
