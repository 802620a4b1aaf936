use chrono::Utc;
use stockwatch::format::format_time_ago;
use stockwatch::{FhClientBuilder, NewsBuilder};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    stockwatch::init_tracing_for_tests();

    // 1. Build a client from FINNHUB_API_KEY (and optionally FINNHUB_BASE_URL).
    let client = FhClientBuilder::from_env()?.build()?;
    let now = Utc::now().timestamp();

    // 2. General market news: deduplicated, provider order, at most 6.
    println!("--- Market News ---");
    let general = NewsBuilder::new(&client).fetch().await?;
    for a in &general {
        println!(
            "  [{}] {} ({})",
            a.source,
            a.headline,
            format_time_ago(a.datetime, now)
        );
    }
    println!();

    // 3. Personalized news: one article per round across the watchlist, newest first.
    let watchlist = ["AAPL", "MSFT", "NVDA"];
    println!("--- News for {} ---", watchlist.join(", "));
    let personal = NewsBuilder::new(&client).symbols(watchlist).fetch().await?;
    for a in &personal {
        println!(
            "  {:<5} {} ({})",
            a.related,
            a.headline,
            format_time_ago(a.datetime, now)
        );
        println!("        {}", a.summary);
    }

    Ok(())
}
