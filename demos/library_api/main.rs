//! Library API demo: seeded authors and books behind the shaping endpoints
//!
//! ```text
//! cargo run --example library_api -- demos/library_api/config.yaml
//! curl -i 'http://127.0.0.1:6058/api/authors?orderBy=name%20desc&fields=id,name&pageSize=2'
//! ```

use shaping::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,shaping=debug,tower_http=info")),
        )
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => {
            tracing::info!("Loading configuration from {}", path);
            AppConfig::from_yaml_file(&path)?
        }
        None => AppConfig::default(),
    };

    println!("📚 Shaping-RS Library API");
    println!("   GET    /api/authors?pageNumber=&pageSize=&orderBy=&fields=&genre=&searchQuery=");
    println!("   GET    /api/authors/{{id}}?fields=");
    println!("   POST   /api/authors");
    println!("   DELETE /api/authors/{{id}}");
    println!("   GET    /api/authors/{{id}}/books");
    println!("   POST   /api/authorcollections\n");

    ServerBuilder::new()
        .with_config(config)
        .with_seed_data()
        .serve()
        .await
}
