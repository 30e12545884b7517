use std::env;

const DEFAULT_CORS_ORIGINS: &[&str] = &[
    "http://localhost:5173",
    "http://192.168.0.11:5173",
    "http://192.168.0.105:5173",
    "http://192.168.0.3:5173",
    "https://sass-micro-finance.web.app",
];

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("MONGODB_URI (or DB_USER, DB_PASSWORD and DB_HOST) must be set")]
    MissingDatabaseUri,
    #[error("{key} must be a number, got '{value}'")]
    InvalidNumber { key: &'static str, value: String },
    #[error("BCRYPT_COST must be between 4 and 31, got {0}")]
    InvalidBcryptCost(u32),
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub mongodb_uri: String,
    pub database_name: String,
    pub connect_retries: u32,
    pub connect_delay_secs: u64,
    pub bcrypt_cost: u32,
    pub cors_origins: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Monta a configuração a partir de uma função de busca (env em produção,
    /// mapa fixo nos testes).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let mongodb_uri = match get("MONGODB_URI") {
            Some(uri) => uri,
            None => match (get("DB_USER"), get("DB_PASSWORD"), get("DB_HOST")) {
                (Some(user), Some(password), Some(host)) => format!(
                    "mongodb+srv://{}:{}@{}/?retryWrites=true&w=majority",
                    user, password, host
                ),
                _ => return Err(ConfigError::MissingDatabaseUri),
            },
        };

        let bcrypt_cost = parse_or(get("BCRYPT_COST"), "BCRYPT_COST", bcrypt::DEFAULT_COST)?;
        if !(4..=31).contains(&bcrypt_cost) {
            return Err(ConfigError::InvalidBcryptCost(bcrypt_cost));
        }

        let cors_origins = match get("CORS_ORIGINS") {
            Some(list) => list
                .split(',')
                .map(|o| o.trim().to_string())
                .filter(|o| !o.is_empty())
                .collect(),
            None => DEFAULT_CORS_ORIGINS.iter().map(|o| o.to_string()).collect(),
        };

        Ok(Self {
            host: get("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or(get("PORT"), "PORT", 5000)?,
            mongodb_uri,
            database_name: get("MONGODB_DATABASE").unwrap_or_else(|| "microfinance".to_string()),
            connect_retries: parse_or(get("DB_CONNECT_RETRIES"), "DB_CONNECT_RETRIES", 100)?,
            connect_delay_secs: parse_or(get("DB_CONNECT_DELAY_SECS"), "DB_CONNECT_DELAY_SECS", 5)?,
            bcrypt_cost,
            cors_origins,
        })
    }
}

fn parse_or<T: std::str::FromStr>(value: Option<String>, key: &'static str, default: T) -> Result<T, ConfigError> {
    match value {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidNumber { key, value: raw }),
        None => Ok(default),
    }
}
