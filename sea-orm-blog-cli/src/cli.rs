use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Seed and inspect the SeaORM blog database",
    arg_required_else_help = true
)]
pub struct Cli {
    #[arg(global = true, short, long, help = "Show debug messages")]
    pub verbose: bool,

    #[arg(
        global = true,
        short = 'u',
        long,
        env = "DATABASE_URL",
        help = "Database URL, overrides the one in sea-orm-blog.toml"
    )]
    pub database_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, PartialEq, Eq, Debug)]
pub enum Commands {
    #[command(about = "Replace the content of the database with the demo data set")]
    Seed,
    #[command(about = "Print user, post and tag metrics as JSON")]
    Stats {
        #[arg(
            value_enum,
            long,
            default_value_t = Source::Db,
            help = "Count with SQL or load every row and count in memory"
        )]
        source: Source,
    },
    #[command(about = "Drop and recreate every table")]
    Reset,
}

#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Source {
    #[default]
    Db,
    Memory,
}
