use crate::BlogErr;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use serde::Deserialize;
use std::{
    env, fs,
    path::{Path, PathBuf},
};

/// Name of the configuration file looked up in the current directory and its parent
pub const CONFIG_FILE: &str = "sea-orm-blog.toml";

/// Used when neither a config file nor `DATABASE_URL` names a database
pub const DEFAULT_DATABASE_URL: &str = "sqlite::memory:";

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub database: DatabaseConfig,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct DatabaseConfig {
    /// A database URL, or `env:VAR` to read it from the environment
    #[serde(default = "default_url")]
    pub url: String,
    #[serde(default)]
    pub sqlx_logging: bool,
    #[serde(default)]
    pub max_connections: Option<u32>,
}

fn default_url() -> String {
    DEFAULT_DATABASE_URL.to_owned()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            sqlx_logging: false,
            max_connections: None,
        }
    }
}

impl Config {
    /// Config pointing at `url` with every other setting at its default
    pub fn with_url<T>(url: T) -> Self
    where
        T: Into<String>,
    {
        Self {
            database: DatabaseConfig {
                url: url.into(),
                ..Default::default()
            },
        }
    }

    pub fn from_toml(content: &str) -> Result<Self, BlogErr> {
        toml::from_str(content).map_err(|e| BlogErr::Config(e.to_string()))
    }

    /// Read [`CONFIG_FILE`] if there is one, otherwise fall back to
    /// `DATABASE_URL` (a `.env` file is honoured) and finally to
    /// [`DEFAULT_DATABASE_URL`].
    pub fn load() -> Result<Self, BlogErr> {
        dotenvy::dotenv().ok();

        let current_dir = env::current_dir().map_err(|e| BlogErr::Config(e.to_string()))?;
        match find_config_file(&current_dir) {
            Some(path) => {
                tracing::debug!(path = %path.display(), "loading config file");
                let content =
                    fs::read_to_string(&path).map_err(|e| BlogErr::Config(e.to_string()))?;
                Self::from_toml(&content)
            }
            None => Ok(Self::with_url(
                env::var("DATABASE_URL").unwrap_or_else(|_| default_url()),
            )),
        }
    }

    /// The database URL with any `env:` indirection resolved
    pub fn database_url(&self) -> Result<String, BlogErr> {
        match self.database.url.strip_prefix("env:") {
            Some(var) => env::var(var)
                .map_err(|_| BlogErr::Config(format!("environment variable `{var}` is not set"))),
            None => Ok(self.database.url.clone()),
        }
    }

    pub fn connect_options(&self) -> Result<ConnectOptions, BlogErr> {
        let mut opt = ConnectOptions::new(self.database_url()?);
        opt.sqlx_logging(self.database.sqlx_logging)
            .sqlx_logging_level(log::LevelFilter::Debug);
        if let Some(max_connections) = self.database.max_connections {
            opt.max_connections(max_connections);
        }
        Ok(opt)
    }

    pub async fn connect(&self) -> Result<DatabaseConnection, BlogErr> {
        let opt = self.connect_options()?;
        tracing::info!(url = opt.get_url(), "connecting");
        Ok(Database::connect(opt).await?)
    }
}

/// The config file is expected to be in `dir` or its parent
fn find_config_file(dir: &Path) -> Option<PathBuf> {
    std::iter::once(dir)
        .chain(dir.parent())
        .map(|dir| dir.join(CONFIG_FILE))
        .find(|path| path.exists())
}
