use interlinear::{BibleEngine, EngineConfig};
use std::env;

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 3 {
        eprintln!("Usage: {} <assets-dir> <reference...>", args[0]);
        eprintln!("Example: {} ./assets John 1:1", args[0]);
        std::process::exit(1);
    }

    let assets_dir = &args[1];
    // The reference may arrive split across several arguments ("1 John 2:3").
    let query = args[2..].join(" ");

    let config = EngineConfig::default().with_assets_dir(assets_dir);
    let engine = match BibleEngine::open(config) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("ERROR: Failed to open assets in {}", assets_dir);
            eprintln!("  {}", e);
            std::process::exit(1);
        }
    };

    let reference = match engine.resolve(&query) {
        Ok(reference) => reference,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = engine.ensure_loaded(&reference.book) {
        eprintln!("ERROR: Failed to load {}", reference.book);
        eprintln!("  {}", e);
        std::process::exit(1);
    }

    let Some(verse) = engine.verse(&reference) else {
        eprintln!("ERROR: {} not found", reference);
        std::process::exit(1);
    };

    match reference.book.book() {
        Some(book) => println!(
            "{} {}:{} ({})",
            book.name(),
            reference.chapter,
            reference.verse,
            reference
        ),
        None => println!("{}", reference),
    }
    println!("{}", "=".repeat(60));

    for (i, word) in verse.words.iter().enumerate() {
        let details = engine.inspect(word);
        let strongs = word
            .strongs
            .map(|id| id.to_string())
            .unwrap_or_else(|| "-".to_string());
        let headword = details
            .definition
            .as_ref()
            .map(|entry| entry.headword.as_str())
            .unwrap_or("");
        println!("  {}. {} [{}] {}", i + 1, word.text, strongs, headword);
        if !details.morphology.is_empty() {
            println!("     {}", details.morphology.join(", "));
        }
        if let Some(entry) = &details.definition {
            if !entry.definition.is_empty() {
                println!("     {}", entry.definition);
            }
        }
    }

    println!("{}", "=".repeat(60));
    let show = |label: &str, target: Option<interlinear::CanonicalReference>| match target {
        Some(target) => println!("{}: {}", label, target),
        None => println!("{}: -", label),
    };
    show("Previous", engine.previous(&reference));
    show("Next", engine.next(&reference));
}
