#[derive(Debug, Clone)]
pub struct DatabaseSettings {
    pub path: String,
    pub pool_size: u32,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            path: "cinevous.db".to_string(),
            pool_size: 8,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RubricSettings {
    pub min_category_weight: i64,
    pub max_category_weight: i64,
    pub target_total_weight: i64,
}

impl Default for RubricSettings {
    fn default() -> Self {
        Self {
            min_category_weight: 5,
            max_category_weight: 50,
            target_total_weight: 100,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerSettings {
    /// Header carrying the authenticated identity, set by the upstream auth layer
    pub user_header: &'static str,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            user_header: "x-user-id",
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database: DatabaseSettings,
    pub rubric: RubricSettings,
    pub server: ServerSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            database: DatabaseSettings::default(),
            rubric: RubricSettings::default(),
            server: ServerSettings::default(),
        }
    }

    /// Defaults overridden by `DATABASE_PATH` and `DATABASE_POOL_SIZE`.
    pub fn from_env() -> Self {
        let mut config = Self::new();
        if let Ok(path) = std::env::var("DATABASE_PATH") {
            config.database.path = path;
        }
        if let Some(size) = std::env::var("DATABASE_POOL_SIZE")
            .ok()
            .and_then(|raw| raw.parse::<u32>().ok())
            .filter(|size| *size > 0)
        {
            config.database.pool_size = size;
        }
        config
    }
}
