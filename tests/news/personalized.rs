use stockwatch::{DateRange, NewsBuilder, RawArticle};

use crate::common::{ScriptedNews, article, day};

fn ids_by_datetime_desc(articles: &[stockwatch::FormattedArticle]) -> bool {
    articles.windows(2).all(|w| w[0].datetime >= w[1].datetime)
}

#[tokio::test]
async fn failing_symbol_is_skipped_and_rounds_stop_at_six() {
    let svc = ScriptedNews::new()
        .company("AAA", Ok(vec![article(1, "AAA beats estimates", 1_000)]))
        .company("BBB", Err(500))
        .company("CCC", Ok(vec![article(3, "CCC opens new plant", 3_000)]));

    let news = NewsBuilder::new(&svc)
        .symbols(["AAA", "BBB", "CCC"])
        .as_of(day(2024, 3, 10))
        .fetch()
        .await
        .unwrap();

    // Rounds 0..6 visit AAA, BBB, CCC twice each; the BBB rounds contribute nothing.
    assert_eq!(
        svc.company_calls(),
        vec!["AAA", "BBB", "CCC", "AAA", "BBB", "CCC"]
    );
    assert_eq!(news.len(), 4);
    assert!(news.iter().all(|a| a.related != "BBB"));
    assert_eq!(news.iter().filter(|a| a.related == "AAA").count(), 2);
    assert_eq!(news.iter().filter(|a| a.related == "CCC").count(), 2);
    assert!(ids_by_datetime_desc(&news));
    assert_eq!(svc.general_calls(), 0);
}

#[tokio::test]
async fn single_symbol_is_queried_six_times_and_sorted_newest_first() {
    let mut svc = ScriptedNews::new();
    for (id, ts) in [(11, 300), (12, 600), (13, 100), (14, 500), (15, 200), (16, 400)] {
        svc = svc.company("AAA", Ok(vec![article(id, &format!("story {id}"), ts)]));
    }

    let news = NewsBuilder::new(&svc)
        .symbols(["AAA"])
        .as_of(day(2024, 3, 10))
        .fetch()
        .await
        .unwrap();

    assert_eq!(svc.company_calls().len(), 6);
    assert_eq!(news.len(), 6);
    let times: Vec<i64> = news.iter().map(|a| a.datetime).collect();
    assert_eq!(times, vec![600, 500, 400, 300, 200, 100]);

    let mut ids: Vec<i64> = news.iter().map(|a| a.id).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 6, "each round's article gets its own id");
    assert!(news.iter().all(|a| a.category == "company" && a.related == "AAA"));
}

#[tokio::test]
async fn round_cap_bounds_calls_when_there_are_more_symbols() {
    let symbols = ["S0", "S1", "S2", "S3", "S4", "S5", "S6", "S7", "S8", "S9"];
    let mut svc = ScriptedNews::new();
    for (i, s) in symbols.iter().enumerate() {
        let i = i64::try_from(i).unwrap();
        svc = svc.company(s, Ok(vec![article(i, &format!("{s} news"), 1_000 + i)]));
    }

    let news = NewsBuilder::new(&svc)
        .symbols(symbols)
        .as_of(day(2024, 3, 10))
        .fetch()
        .await
        .unwrap();

    assert_eq!(svc.company_calls(), vec!["S0", "S1", "S2", "S3", "S4", "S5"]);
    assert_eq!(news.len(), 6);
    assert_eq!(news[0].related, "S5");
    assert_eq!(news[5].related, "S0");
}

#[tokio::test]
async fn first_valid_article_of_each_round_is_kept() {
    let mut no_summary = article(1, "no summary", 900);
    no_summary.summary = None;
    let mut undated = article(2, "undated", 0);
    undated.datetime = Some(0);
    let mut blank_url = article(3, "blank url", 950);
    blank_url.url = Some("   ".to_string());
    let chosen = article(4, "  The real story  ", 800);
    let later = article(5, "also valid", 999);

    let svc = ScriptedNews::new().company(
        "AAPL",
        Ok(vec![no_summary, undated, blank_url, chosen, later]),
    );

    let news = NewsBuilder::new(&svc)
        .symbols(["AAPL", "AAPL"])
        .as_of(day(2024, 3, 10))
        .fetch()
        .await
        .unwrap();

    assert_eq!(news.len(), 6);
    for a in &news {
        assert_eq!(a.headline, "The real story");
        assert_eq!(a.datetime, 800);
        assert_eq!(a.url, "https://news.example.com/4");
    }
}

#[tokio::test]
async fn company_summary_is_cut_to_two_hundred_chars_plus_ellipsis() {
    let mut long = article(1, "long", 10);
    long.summary = Some("x".repeat(500));
    let mut short = article(2, "short", 20);
    short.summary = Some("  Hi  ".to_string());

    let svc = ScriptedNews::new()
        .company("LONG", Ok(vec![long]))
        .company("SHORT", Ok(vec![short]));

    let news = NewsBuilder::new(&svc)
        .symbols(["LONG", "SHORT"])
        .as_of(day(2024, 3, 10))
        .fetch()
        .await
        .unwrap();

    let long = news.iter().find(|a| a.related == "LONG").unwrap();
    assert_eq!(long.summary.chars().count(), 203);
    assert!(long.summary.ends_with("..."));
    let short = news.iter().find(|a| a.related == "SHORT").unwrap();
    assert_eq!(short.summary, "Hi...");
}

#[tokio::test]
async fn multibyte_summaries_are_cut_on_characters() {
    let mut raw = article(1, "unicode", 10);
    raw.summary = Some("é".repeat(300));
    let svc = ScriptedNews::new().company("UNI", Ok(vec![raw]));

    let news = NewsBuilder::new(&svc)
        .symbols(["UNI"])
        .as_of(day(2024, 3, 10))
        .fetch()
        .await
        .unwrap();

    assert_eq!(news[0].summary.chars().count(), 203);
}

#[tokio::test]
async fn no_valid_company_news_is_an_empty_result_not_general_news() {
    let mut invalid = article(1, "invalid", 10);
    invalid.headline = None;
    let svc = ScriptedNews::new()
        .company("AAA", Ok(vec![invalid]))
        .company("BBB", Err(503))
        .general(Ok(vec![article(99, "general", 10)]));

    let news = NewsBuilder::new(&svc)
        .symbols(["AAA", "BBB"])
        .as_of(day(2024, 3, 10))
        .fetch()
        .await
        .unwrap();

    assert!(news.is_empty());
    assert_eq!(svc.company_calls().len(), 6);
    assert_eq!(svc.general_calls(), 0);
}

#[tokio::test]
async fn symbols_are_trimmed_uppercased_and_blanks_dropped() {
    let svc = ScriptedNews::new().company("AAPL", Ok(vec![article(1, "apple", 10)]));

    let news = NewsBuilder::new(&svc)
        .symbols(["  aapl ", "", "   "])
        .as_of(day(2024, 3, 10))
        .fetch()
        .await
        .unwrap();

    assert_eq!(svc.company_calls(), vec!["AAPL"; 6]);
    assert_eq!(news.len(), 6);
    assert!(news.iter().all(|a| a.related == "AAPL"));
}

#[tokio::test]
async fn company_defaults_fill_missing_fields() {
    let raw = RawArticle {
        id: 42,
        headline: Some("  Headline with padding ".to_string()),
        summary: Some("Body".to_string()),
        url: Some("https://news.example.com/42".to_string()),
        datetime: Some(1_700_000_000),
        source: None,
        image: None,
        category: Some("ignored".to_string()),
        related: Some("ignored".to_string()),
    };
    let svc = ScriptedNews::new().company("MSFT", Ok(vec![raw]));

    let news = NewsBuilder::new(&svc)
        .symbols(["msft"])
        .as_of(day(2024, 3, 10))
        .fetch()
        .await
        .unwrap();

    let a = &news[0];
    assert_eq!(a.headline, "Headline with padding");
    assert_eq!(a.source, "Company News");
    assert_eq!(a.image, "");
    assert_eq!(a.category, "company");
    assert_eq!(a.related, "MSFT");
}

#[tokio::test]
async fn company_ids_are_stable_across_requests() {
    let svc = ScriptedNews::new()
        .company("AAA", Ok(vec![article(7, "same", 10)]))
        .company("BBB", Ok(vec![article(7, "same id other symbol", 20)]));

    let first = NewsBuilder::new(&svc)
        .symbols(["AAA", "BBB"])
        .as_of(day(2024, 3, 10))
        .fetch()
        .await
        .unwrap();
    let second = NewsBuilder::new(&svc)
        .symbols(["AAA", "BBB"])
        .as_of(day(2024, 3, 10))
        .fetch()
        .await
        .unwrap();

    assert_eq!(first, second);
    let aaa = first.iter().find(|a| a.related == "AAA").unwrap();
    let bbb = first.iter().find(|a| a.related == "BBB").unwrap();
    assert_ne!(aaa.id, bbb.id, "same provider id under different symbols");
    assert!(aaa.id >= 0 && aaa.id < (1 << 53));
}

#[tokio::test]
async fn every_round_uses_the_five_day_window() {
    let svc = ScriptedNews::new().company("AAA", Ok(vec![article(1, "a", 10)]));

    NewsBuilder::new(&svc)
        .symbols(["AAA"])
        .as_of(day(2024, 3, 1))
        .fetch()
        .await
        .unwrap();

    let expected = DateRange {
        from: day(2024, 2, 25),
        to: day(2024, 3, 1),
    };
    assert_eq!(svc.windows().len(), 6);
    assert!(svc.windows().iter().all(|w| *w == expected));
}

#[tokio::test]
async fn get_news_routes_symbols_to_personalized_mode() {
    let svc = ScriptedNews::new().company("NVDA", Ok(vec![article(1, "chips", 10)]));

    let news = stockwatch::get_news(&svc, Some(&["nvda"][..])).await.unwrap();

    assert_eq!(news.len(), 6);
    assert_eq!(svc.general_calls(), 0);
}
