use std::env;
use std::path::PathBuf;

use solarsite_core::traits::Retriever;
use solarsite_knowledge::{build_context, KeywordRetriever, DEFAULT_SEARCH_LIMIT};

fn program_name(args: &[String]) -> &str {
    args.first().map_or("solarsite-search", String::as_str)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        let program = program_name(&args);
        eprintln!("Usage: {} <query> [corpus_path]", program);
        eprintln!("Example: {} 'home battery backup' ./kb", program);
        std::process::exit(1);
    }
    let query_text = &args[1];
    let retriever = match args.get(2).map(PathBuf::from) {
        Some(path) => KeywordRetriever::from_path(&path)?,
        None => KeywordRetriever::builtin()?,
    };
    println!("solarsite-search\n================");
    println!("Query: {}", query_text);
    println!("Corpus: {} chunks", retriever.chunks().len());
    let results = retriever.search(query_text, DEFAULT_SEARCH_LIMIT);
    println!("\nFound {} results for: \"{}\"", results.len(), query_text);
    for (i, result) in results.iter().enumerate() {
        let url = result.chunk.url.as_deref().unwrap_or("-");
        println!("\n  {}. score={}  id={}  category={}  url={}", i + 1, result.score, result.chunk.id, result.chunk.category, url);
    }
    let chunks: Vec<_> = results.iter().map(|r| r.chunk).collect();
    if !chunks.is_empty() {
        println!("\nContext:\n{}", build_context(&chunks));
    }
    Ok(())
}
