use clap::Parser;
use dotenvy::dotenv;
use sea_orm_blog_cli::{handle_error, run_command, Cli};

#[tokio::main]
async fn main() {
    dotenv().ok();

    let cli = Cli::parse();

    run_command(cli.command, cli.database_url, cli.verbose)
        .await
        .unwrap_or_else(handle_error);
}
