use solarsite_core::traits::Retriever;
use solarsite_core::types::KnowledgeChunk;
use solarsite_knowledge::{build_context, search, search_in_category, search_scored, KeywordRetriever, CHAT_CONTEXT_LIMIT, DEFAULT_SEARCH_LIMIT};

fn chunk(id: &str, title: &str, content: &str, category: &str, keywords: &[&str]) -> KnowledgeChunk {
    KnowledgeChunk {
        id: id.to_string(),
        title: title.to_string(),
        content: content.to_string(),
        category: category.to_string(),
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
        url: None,
    }
}

fn corpus() -> Vec<KnowledgeChunk> {
    vec![
        chunk("finance", "Finance Options", "Spread the cost of solar or a battery over time.", "pricing", &["finance", "loan"]),
        chunk("warranty", "Warranty", "Panels, inverters and battery units all carry warranties.", "company", &["warranty"]),
        chunk("battery", "Home Battery Storage", "Store surplus energy for the evening.", "battery", &["battery", "storage"]),
        chunk("ev", "EV Chargers", "Charge your car from the sun.", "ev", &["ev", "charger"]),
    ]
}

fn ids(chunks: &[&KnowledgeChunk]) -> Vec<String> {
    chunks.iter().map(|c| c.id.clone()).collect()
}

#[test]
fn keyword_match_outranks_content_only_match() {
    let corpus = corpus();
    let hits = search_scored("battery", &corpus, CHAT_CONTEXT_LIMIT);

    // title phrase 10 + keyword 5 + title token 3 against content phrase 5 + content token 1
    assert_eq!(hits[0].chunk.id, "battery");
    assert!(hits[0].score > hits[1].score);
    assert_eq!(hits.len(), 3);
}

#[test]
fn equal_scores_keep_corpus_order() {
    let corpus = corpus();
    let hits = search_scored("battery", &corpus, DEFAULT_SEARCH_LIMIT);

    // finance and warranty both mention battery only in content
    assert_eq!(hits[1].score, hits[2].score);
    assert_eq!(hits[1].chunk.id, "finance");
    assert_eq!(hits[2].chunk.id, "warranty");
}

#[test]
fn empty_query_and_empty_corpus_give_nothing() {
    let corpus = corpus();
    assert!(search("", &corpus, DEFAULT_SEARCH_LIMIT).is_empty());
    assert!(search("   ", &corpus, DEFAULT_SEARCH_LIMIT).is_empty());
    assert!(search("battery", &[], DEFAULT_SEARCH_LIMIT).is_empty());
}

#[test]
fn unmatched_query_gives_nothing() {
    assert!(search("zebra crossing", &corpus(), DEFAULT_SEARCH_LIMIT).is_empty());
}

#[test]
fn limit_caps_results() {
    let corpus = corpus();
    assert_eq!(search("battery", &corpus, 1).len(), 1);
    assert!(search("battery", &corpus, 0).is_empty());
}

#[test]
fn repeated_search_is_identical() {
    let corpus = corpus();
    let first = ids(&search("charge battery warranty", &corpus, DEFAULT_SEARCH_LIMIT));
    let second = ids(&search("charge battery warranty", &corpus, DEFAULT_SEARCH_LIMIT));
    assert_eq!(first, second);
    assert!(!first.is_empty());
}

#[test]
fn category_filter_applies_before_ranking() {
    let corpus = corpus();
    let hits = search_in_category("battery", &corpus, "Company", DEFAULT_SEARCH_LIMIT);
    assert_eq!(ids(&hits), vec!["warranty".to_string()]);
}

#[test]
fn retriever_over_builtin_corpus() {
    let retriever = KeywordRetriever::builtin().expect("builtin corpus");

    let hits = retriever.search("home battery", CHAT_CONTEXT_LIMIT);
    assert!(!hits.is_empty());
    assert_eq!(hits[0].chunk.id, "home-batteries");

    let rebate = retriever.search("rebate", DEFAULT_SEARCH_LIMIT);
    assert!(rebate.iter().any(|h| h.chunk.id == "stc-rebate"));
    assert!(rebate.windows(2).all(|w| w[0].score >= w[1].score));
}

#[test]
fn retriever_rejects_duplicate_ids() {
    let mut chunks = corpus();
    chunks.push(chunk("ev", "Dup", "", "ev", &[]));
    assert!(KeywordRetriever::new(chunks).is_err());
}

#[test]
fn context_lists_selected_chunks_in_rank_order() {
    let corpus = corpus();
    let hits = search("battery", &corpus, 2);
    let context = build_context(&hits);

    assert!(context.starts_with("## Home Battery Storage\n"));
    assert!(context.contains("\n\n## Finance Options\n"));
}
