use clap::Parser;

#[tokio::main]
async fn main() {
    let cli = goveectl::cli::Cli::parse();
    let exit_code = goveectl::run(cli).await;
    std::process::exit(exit_code);
}
