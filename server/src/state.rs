use std::sync::Arc;

use sqlx::SqlitePool;

use super::{config::Config, database::init_sqlite, emotion::EmotionClassifier};

pub struct AppState {
    pub config: Config,
    pub pool: SqlitePool,
    pub classifier: EmotionClassifier,
}

impl AppState {
    pub async fn new() -> Arc<Self> {
        let config = Config::load();

        let pool = init_sqlite(&config.database_url).await;

        Arc::new(Self {
            config,
            pool,
            classifier: EmotionClassifier::default(),
        })
    }
}
