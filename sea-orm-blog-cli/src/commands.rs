use sea_orm_blog::{query, schema, seed, Config, Dataset};
use std::{error::Error, fmt::Display};
use tracing_subscriber::{prelude::*, EnvFilter};

use crate::{Commands, Source};

pub async fn run_command(
    command: Commands,
    database_url: Option<String>,
    verbose: bool,
) -> Result<(), Box<dyn Error>> {
    init_tracing(verbose)?;

    let mut config = Config::load()?;
    if let Some(url) = database_url {
        config.database.url = url;
    }
    let db = config.connect().await?;

    match command {
        Commands::Seed => {
            schema::create_tables(&db).await?;
            let summary = seed::run(&db).await?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        Commands::Stats { source } => {
            schema::ensure_tables(&db).await?;
            let report = match source {
                Source::Db => query::metrics_report(&db).await?,
                Source::Memory => Dataset::load(&db).await?.report(),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Commands::Reset => {
            schema::reset(&db).await?;
            println!("Tables recreated");
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) -> Result<(), Box<dyn Error>> {
    let filter = match verbose {
        true => "debug",
        false => "sea_orm_blog=info",
    };
    let filter_layer = EnvFilter::try_new(filter)?;

    if verbose {
        let fmt_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
        tracing_subscriber::registry()
            .with(filter_layer)
            .with(fmt_layer)
            .try_init()?;
    } else {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_level(false)
            .without_time();
        tracing_subscriber::registry()
            .with(filter_layer)
            .with(fmt_layer)
            .try_init()?;
    }
    Ok(())
}

pub fn handle_error<E>(error: E)
where
    E: Display,
{
    eprintln!("{error}");
    ::std::process::exit(1);
}
