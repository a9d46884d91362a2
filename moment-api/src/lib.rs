pub mod config;
pub mod models;
pub mod routes;
pub mod schema;
pub mod services;

use config::AppConfig;
use moment_shared::clients::db::DbPool;
use moment_shared::clients::images::ImageStore;

pub struct AppState {
    pub db: DbPool,
    pub config: AppConfig,
    pub images: ImageStore,
}
