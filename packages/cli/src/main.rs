#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Interactive CLI for scraping pages and extracting card details.
//!
//! Presents a menu loop: scrape a website or decode a PDF into clean
//! plain text, show the result, and optionally run the LLM extraction
//! over it. Successful extractions can be saved as pretty-printed JSON.
//!
//! Uses `indicatif-log-bridge` (via [`card_scout_cli_utils::init_logger`])
//! to route `log` output around the spinners shown while fetching and
//! extracting.

use std::path::Path;

use card_scout_cli_utils::MultiProgress;
use card_scout_extract_models::{ExtractionResult, NormalizedText, RawDocument};
use dialoguer::{Confirm, Input, Select};

/// Lines of normalized text shown before eliding the rest.
const PREVIEW_LINES: usize = 40;

/// Default path offered when saving extraction results.
const DEFAULT_EXPORT_PATH: &str = "card_details.json";

/// Top-level tool selection.
enum Tool {
    ScrapeWebsite,
    ExtractPdf,
    Quit,
}

impl Tool {
    const ALL: &[Self] = &[Self::ScrapeWebsite, Self::ExtractPdf, Self::Quit];

    #[must_use]
    const fn label(&self) -> &'static str {
        match self {
            Self::ScrapeWebsite => "Scrape a website",
            Self::ExtractPdf => "Extract from a PDF file",
            Self::Quit => "Quit",
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let multi = card_scout_cli_utils::init_logger();

    println!("Card Scout");
    println!();

    let labels: Vec<&str> = Tool::ALL.iter().map(Tool::label).collect();

    loop {
        let idx = Select::new()
            .with_prompt("What would you like to do?")
            .items(&labels)
            .default(0)
            .interact()?;

        match Tool::ALL[idx] {
            Tool::ScrapeWebsite => handle_website(&multi).await?,
            Tool::ExtractPdf => handle_pdf(&multi).await?,
            Tool::Quit => break,
        }

        println!();
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// Scrapes a URL into normalized text, then offers extraction.
async fn handle_website(multi: &MultiProgress) -> Result<(), Box<dyn std::error::Error>> {
    let url: String = Input::new()
        .with_prompt("Enter URL")
        .default("https://example.com".to_string())
        .interact_text()?;

    let raw = RawDocument::Website { url };

    let spinner = card_scout_cli_utils::step_spinner(multi, "Scraping content...");
    let normalized = card_scout_extract::normalize::normalize(&raw).await;
    spinner.finish_and_clear();

    match normalized {
        Ok(text) => {
            show_normalized(&text);
            offer_extraction(multi, &text).await?;
        }
        Err(e) => println!("Scrape failed: {e}"),
    }

    Ok(())
}

/// Decodes a local PDF into normalized text, then offers extraction.
async fn handle_pdf(multi: &MultiProgress) -> Result<(), Box<dyn std::error::Error>> {
    let path: String = Input::new()
        .with_prompt("Path to PDF file")
        .interact_text()?;

    let bytes = match std::fs::read(&path) {
        Ok(bytes) => bytes,
        Err(e) => {
            println!("Could not read {path}: {e}");
            return Ok(());
        }
    };

    let file_name = Path::new(&path)
        .file_name()
        .map_or_else(|| path.clone(), |name| name.to_string_lossy().into_owned());

    let raw = RawDocument::Pdf { file_name, bytes };

    let spinner = card_scout_cli_utils::step_spinner(multi, "Extracting PDF text...");
    let normalized = card_scout_extract::normalize::normalize(&raw).await;
    spinner.finish_and_clear();

    match normalized {
        Ok(text) => {
            show_normalized(&text);
            offer_extraction(multi, &text).await?;
        }
        Err(e) => println!("PDF decode failed: {e}"),
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Display & extraction
// ---------------------------------------------------------------------------

/// Prints a capped preview of the normalized text.
fn show_normalized(text: &NormalizedText) {
    println!();
    println!("Source: {} ({} lines)", text.source_label, text.lines.len());
    println!("{}", "-".repeat(60));

    for line in text.lines.iter().take(PREVIEW_LINES) {
        println!("{line}");
    }

    if text.lines.len() > PREVIEW_LINES {
        println!("... ({} more lines)", text.lines.len() - PREVIEW_LINES);
    }

    println!("{}", "-".repeat(60));
}

/// Asks whether to run the model extraction, and runs it if confirmed.
async fn offer_extraction(
    multi: &MultiProgress,
    text: &NormalizedText,
) -> Result<(), Box<dyn std::error::Error>> {
    let confirmed = Confirm::new()
        .with_prompt("Run card extraction?")
        .default(true)
        .interact()?;

    if !confirmed {
        return Ok(());
    }

    let provider = match card_scout_ai::providers::create_provider_from_env() {
        Ok(provider) => provider,
        Err(e) => {
            println!("Extraction failed: {e}");
            return Ok(());
        }
    };

    let spinner = card_scout_cli_utils::step_spinner(multi, "Extracting card details...");
    let result = card_scout_extract::extract_normalized(text, provider.as_ref()).await;
    spinner.finish_and_clear();

    match &result {
        ExtractionResult::Success { records } => {
            println!();
            println!("{}", serde_json::to_string_pretty(records)?);
            println!();
            println!("{} card record(s) extracted", records.len());

            offer_export(records)?;
        }
        ExtractionResult::Failure {
            reason,
            raw_response,
        } => {
            println!("Extraction failed: {reason}");
            if let Some(raw) = raw_response {
                println!();
                println!("Raw model response (for manual recovery):");
                println!("{raw}");
            }
        }
    }

    Ok(())
}

/// Offers to write the extracted records to a pretty-printed JSON file.
fn offer_export(
    records: &[card_scout_extract_models::CardRecord],
) -> Result<(), Box<dyn std::error::Error>> {
    let save = Confirm::new()
        .with_prompt("Save records to a JSON file?")
        .default(false)
        .interact()?;

    if !save {
        return Ok(());
    }

    let path: String = Input::new()
        .with_prompt("Output path")
        .default(DEFAULT_EXPORT_PATH.to_string())
        .interact_text()?;

    let json = serde_json::to_string_pretty(records)?;

    match std::fs::write(&path, json) {
        Ok(()) => println!("Saved to {path}"),
        Err(e) => println!("Could not write {path}: {e}"),
    }

    Ok(())
}
