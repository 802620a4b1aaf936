use std::time::Duration;

use stockwatch::{
    Backoff, DailyDigest, FhClientBuilder, InMemoryWatchlist, RetryConfig, SearchBuilder, User,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = FhClientBuilder::from_env()?
        .timeout(Duration::from_secs(5))
        .build()?;

    let store = InMemoryWatchlist::new();
    store.add("ada@example.com", "AAPL").await?;
    store.add("ada@example.com", "TSLA").await?;

    // 1. Popular stocks (empty query), annotated with the watchlist.
    println!("--- Popular ---");
    let popular = SearchBuilder::new(&client)
        .watchlist(["AAPL", "TSLA"])
        .fetch()
        .await?;
    for s in &popular {
        let star = if s.is_in_watchlist { "*" } else { " " };
        println!("  {star} {:<6} {} [{}]", s.symbol, s.name, s.exchange);
    }
    println!();

    // 2. Free-text search; the second call is served from the response cache.
    println!("--- Search: \"micro\" ---");
    for _ in 0..2 {
        let hits = SearchBuilder::new(&client).query("micro").fetch().await?;
        println!("  {} results, first: {:?}", hits.len(), hits.first().map(|h| &h.symbol));
    }
    println!();

    // 3. The daily digest: company news for watchlist users, general news for the rest.
    let users = [
        User {
            email: "ada@example.com".into(),
            name: "Ada".into(),
        },
        User {
            email: "bob@example.com".into(),
            name: "Bob".into(),
        },
    ];
    let retry = RetryConfig {
        backoff: Backoff::Fixed(Duration::from_millis(500)),
        ..RetryConfig::default()
    };
    let digest = DailyDigest::new(&client, &store)
        .retry_policy(retry)
        .collect(&users)
        .await;

    println!("--- Daily digest ---");
    for entry in digest {
        println!("  {} <{}>: {} articles", entry.user.name, entry.user.email, entry.articles.len());
        for a in entry.articles.iter().take(3) {
            println!("    - {}", a.headline);
        }
    }

    Ok(())
}
