use clap::Parser;

use livelog::cli::Cli;
use livelog::runtime::modes;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = modes::run(cli).await {
        eprintln!("{}", modes::format_error(&e));
        std::process::exit(1);
    }
}
