use anyhow::Result;

use super::config_model::{Database, DotEnvyConfig, Server, Storage};

pub fn load() -> Result<DotEnvyConfig> {
    dotenvy::dotenv().ok();

    let server = Server {
        port: std::env::var("SERVER_PORT")
            .expect("SERVER_PORT is invalid")
            .parse()?,
        body_limit: std::env::var("SERVER_BODY_LIMIT")
            .expect("SERVER_BODY_LIMIT is invalid")
            .parse()?,
        timeout: std::env::var("SERVER_TIMEOUT")
            .expect("SERVER_TIMEOUT is invalid")
            .parse()?,
    };

    let database = Database {
        url: std::env::var("DATABASE_URL").expect("DATABASE_URL is invalid"),
    };

    let storage = Storage {
        endpoint: std::env::var("S3_ENDPOINT").expect("S3_ENDPOINT is invalid"),
        region: std::env::var("S3_REGION").unwrap_or_else(|_| "auto".to_string()),
        bucket: std::env::var("S3_BUCKET").expect("S3_BUCKET is invalid"),
        access_key: std::env::var("S3_ACCESS_KEY").expect("S3_ACCESS_KEY is invalid"),
        secret_key: std::env::var("S3_SECRET_KEY").expect("S3_SECRET_KEY is invalid"),
    };

    Ok(DotEnvyConfig {
        server,
        database,
        storage,
    })
}
