use anyhow::Result;
use clap::{Parser, Subcommand};
use mipgen::{command, GenerateArgs, MipmapRequest};

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Args {
    #[clap(flatten)]
    generate: GenerateArgs,
    #[clap(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show information about the installed tooling
    Doctor,
}

fn main() -> Result<()> {
    use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter};
    tracing_log::LogTracer::init().ok();
    let env = std::env::var("MIPGEN_LOG").unwrap_or_else(|_| "error".into());
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_span_events(FmtSpan::ACTIVE | FmtSpan::CLOSE)
        .with_env_filter(EnvFilter::new(env))
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();
    log_panics::init();
    let args = Args::parse();
    match args.command {
        Some(Commands::Doctor) => command::doctor(),
        None => {
            let request = MipmapRequest::new(args.generate)?;
            command::generate(&request)?;
        }
    }
    Ok(())
}
