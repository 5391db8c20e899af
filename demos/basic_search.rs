//! Example: Basic meta search across multiple engines.

use metasearch_core::{Search, SearchOptions};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing for debug output
    tracing_subscriber::fmt::init();

    // Uses the built-in registry
    let search = Search::new();
    let options = SearchOptions::new()
        .with_engines(["ddg", "wiki"])
        .with_limit(10);

    let query = "rust programming language";
    println!("Searching for: {}", query);
    println!();

    let response = search.search(query, options).await?;

    println!(
        "Found {} results in {}ms",
        response.count,
        response.duration.as_millis()
    );
    println!();

    for (i, result) in response.results.iter().enumerate() {
        println!("{}. {}", i + 1, result.title);
        println!("   URL: {}", result.url);
        println!("   Engines: {:?}", result.engines);
        println!("   Score: {:.2}", result.score);
        if !result.content.is_empty() {
            let snippet = if result.content.chars().count() > 100 {
                result.content.chars().take(100).collect::<String>() + "..."
            } else {
                result.content.clone()
            };
            println!("   {}", snippet);
        }
        println!();
    }

    for failure in &response.errors {
        println!("{} failed: {}", failure.engine, failure.message);
    }

    Ok(())
}
