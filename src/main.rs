use clap::{Parser, Subcommand};

use scoped_lifetimes::app::{self, settings, AppError, ServerSettings};

#[derive(Parser, Debug)]
#[command(name = "lifetime-demo", version, about = "Transient, scoped and singleton services side by side")]
struct Cli {
    /// Log filter used when RUST_LOG is not set
    #[arg(long, global = true)]
    log_filter: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the sample web app
    Serve {
        #[arg(long, env = "LIFETIME_DEMO_HOST", default_value = settings::DEFAULT_HOST)]
        host: String,

        #[arg(long, env = "LIFETIME_DEMO_PORT", default_value_t = settings::DEFAULT_PORT)]
        port: u16,
    },
    /// Simulate requests in-process and print one report line per request
    Report {
        #[arg(long, default_value_t = 2)]
        requests: usize,
    },
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let cli = Cli::parse();
    app::init_tracing(cli.log_filter.as_deref())?;

    match cli.command {
        Command::Serve { host, port } => {
            let provider = app::build_provider(ServerSettings { host, port })?;
            app::serve(provider).await
        }
        Command::Report { requests } => {
            let provider = app::build_provider(ServerSettings::default())?;
            for (request, report) in app::run_report(&provider, requests)?.iter().enumerate() {
                println!("request {}: {report}", request + 1);
            }
            Ok(())
        }
    }
}
