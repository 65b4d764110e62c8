use clap::Parser;
use keepsake_router::cli::{run_cli, Cli};
use keepsake_router::logging::init_logging;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _guard = init_logging(&cli.log_level)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run_cli(&cli, &mut out)
}
