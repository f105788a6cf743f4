use clap::Parser;
use page_sections::SectionExtractor;
use page_sections::responder::{self, Request, StaticPage};
use std::io::Read;

mod args;
use args::Args;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Parse command-line arguments
    let args = Args::parse();

    let html = match read_input(&args.input) {
        Ok(html) => html,
        Err(e) => {
            ::log::error!("Failed to read {}: {}", args.input, e);
            std::process::exit(1);
        }
    };

    let extractor = match &args.config {
        Some(path) => match SectionExtractor::new().with_config_file(path) {
            Ok(extractor) => extractor,
            Err(e) => {
                ::log::error!("Failed to load configuration {}: {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => SectionExtractor::new(),
    };

    ::log::info!("Extracting sections for URL: {}", args.url);

    // Serve the page through the responder and ask for its data once
    let (tx, handle) = responder::spawn(StaticPage::new(args.url.as_str(), &html), extractor);
    let (request, rx) = Request::get_page_data();
    if tx.send(request).await.is_err() {
        ::log::error!("Responder stopped before the request was sent");
        std::process::exit(1);
    }
    let mut page = match rx.await {
        Ok(page) => page,
        Err(e) => {
            ::log::error!("No page data received: {}", e);
            std::process::exit(1);
        }
    };
    drop(tx);
    if let Err(e) = handle.await {
        ::log::warn!("Responder task ended abnormally: {}", e);
    }

    ::log::info!(
        "Found {} of {} sections and {} images",
        page.structured_content.found_count(),
        page.structured_content.len(),
        page.images.len()
    );

    if args.no_snapshot {
        page.dom_snapshot.clear();
    }

    let output = if args.pretty {
        serde_json::to_string_pretty(&page)
    } else {
        serde_json::to_string(&page)
    };
    match output {
        Ok(json) => println!("{}", json),
        Err(e) => {
            ::log::error!("Failed to serialize page data: {}", e);
            std::process::exit(1);
        }
    }
}

/// Reads the HTML document from a file or stdin
fn read_input(input: &str) -> std::io::Result<String> {
    if input == "-" {
        let mut html = String::new();
        std::io::stdin().read_to_string(&mut html)?;
        Ok(html)
    } else {
        std::fs::read_to_string(input)
    }
}
