//! Example: Meta search with Chinese search engines, cancellable with Ctrl+C.

use std::time::Duration;

use metasearch_core::{CancellationToken, Search, SearchOptions, SearchQuery};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let search = Search::new();

    // 搜狗, 必应中国, 360搜索; "so360" and "360" name the same engine
    let options = SearchOptions::new()
        .with_engines(["sogou", "bing_cn", "360", "so360"])
        .with_timeout(Duration::from_secs(15));

    let query = SearchQuery::new("Rust 编程语言")?.with_language("zh-CN");
    println!("Searching for: {}", query.text());
    println!();

    let cancel = CancellationToken::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_signal.cancel();
        }
    });

    let response = search.search_query(&query, options, &cancel).await?;

    println!(
        "Found {} results in {}ms",
        response.count,
        response.duration.as_millis()
    );
    println!();

    for (i, result) in response.results.iter().take(10).enumerate() {
        println!("{}. {}", i + 1, result.title);
        println!("   URL: {}", result.url);
        println!("   Engines: {:?}", result.engines);
        println!("   Score: {:.2}", result.score);
        if !result.content.is_empty() {
            let snippet = if result.content.chars().count() > 80 {
                result.content.chars().take(80).collect::<String>() + "..."
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
