use clap::Parser;
use color_eyre::eyre::Result;
use peeper::console::{Console, ConsoleConfig};
use peeper::signup::{DEFAULT_EMAIL_DOMAIN, DEFAULT_SPECIAL_CHARS};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "peeper", version, about = "A tiny console social network")]
struct Cli {
    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "warn")]
    log_level: String,
    /// Suffix every signup email must end with
    #[arg(long, env = "PEEPER_EMAIL_DOMAIN", default_value = DEFAULT_EMAIL_DOMAIN)]
    email_domain: String,
    /// Characters of which a signup password needs at least one
    #[arg(long, env = "PEEPER_SPECIAL_CHARS", default_value = DEFAULT_SPECIAL_CHARS)]
    special_chars: String,
    /// Name shown in the welcome banner
    #[arg(long, default_value = "Peeper")]
    name: String,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = ConsoleConfig {
        app_name: cli.name,
        email_domain: cli.email_domain,
        special_chars: cli.special_chars,
    };

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    Console::new(stdin.lock(), stdout.lock(), config).run()?;
    Ok(())
}
