use clap::Parser;
use iss_flyover::utils::logger;
use iss_flyover::{app, CliConfig};

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    // Logs stay on stderr in compact form, --json only changes stdout
    logger::init_cli_logger(cli.verbose);

    tracing::debug!("CLI args: {:?}", cli);

    let code = app::run(&cli, &mut std::io::stdout(), &mut std::io::stderr()).await;
    if code != app::EXIT_SUCCESS {
        std::process::exit(code);
    }
}
