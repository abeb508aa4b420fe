//! Quotes REST API over the seeded in-memory store
//!
//! ```text
//! cargo run --example quotes_api
//! QUOTES_CONFIG=quotes.yaml cargo run --example quotes_api
//! ```

use std::sync::Arc;
use quotes::prelude::*;
use quotes::telemetry::{init_tracing, log_notifications};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing()?;

    let config = match std::env::var("QUOTES_CONFIG") {
        Ok(path) => QuotesConfig::from_yaml_file(&path)?,
        Err(_) => QuotesConfig::default(),
    };

    let service = InMemoryQuoteService::from_config(&config)?;

    // Toasts have no UI here, so they go to the log
    tokio::spawn(log_notifications(service.events().subscribe()));

    println!("📋 Quotes API on http://127.0.0.1:3000");
    println!("   GET    /quotes?search=&status=");
    println!("   POST   /quotes");
    println!("   GET    /quotes/{{id}}");
    println!("   PUT    /quotes/{{id}}");
    println!("   DELETE /quotes/{{id}}");
    println!("   GET    /contacts/{{id}}/quotes");
    println!("   GET    /deals/{{id}}/quotes\n");

    ServerBuilder::new()
        .with_service(Arc::new(service))
        .serve("127.0.0.1:3000")
        .await
}
