// src/main.rs
//
// Command-line entry point: opens the journal, optionally imports a folder of
// photos as drafts, then prints where the journal stands.
//
// Usage: trailjournal [PHOTO_FOLDER]

use trailjournal::app::{init_app_state, JournalConfig};
use trailjournal::application::commands::{
    get_review, get_statistics, get_storage_stats, import_directory,
};
use trailjournal::application::AppState;

const TOP_SPECIES: usize = 5;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. LOGGING
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "trailjournal=info".into()),
        )
        .init();

    // 2. APPLICATION STATE
    let config = JournalConfig::from_env();
    let state = init_app_state(&config)?;

    // 3. OPTIONAL IMPORT
    if let Some(folder) = std::env::args().nth(1) {
        let summary = import_directory(&state, &folder)?;
        println!(
            "Imported {} photos from {} ({} failed)",
            summary.imported, folder, summary.failed
        );
    }

    // 4. REPORT
    print_report(&state, &config)?;

    Ok(())
}

fn print_report(state: &AppState, config: &JournalConfig) -> Result<(), Box<dyn std::error::Error>> {
    let stats = get_statistics(state, TOP_SPECIES)?;
    let review = get_review(state)?;

    println!("Journal: {}", config.data_dir.display());
    println!(
        "  {} entries, {} drafts, {} finalized, {} species",
        stats.summary.total_entries,
        stats.summary.drafts,
        stats.summary.finalized,
        stats.summary.distinct_species
    );

    for option in review.filters.iter().filter(|f| f.count > 0) {
        println!("  drafts [{}]: {}", option.label, option.count);
    }

    if !stats.top_species.is_empty() {
        println!("Top species:");
        for row in &stats.top_species {
            println!("  {:<24} {}", row.species, row.count);
        }
    }

    if let Some(hour) = stats.peak_hour {
        println!("Busiest hour: {:02}:00", hour);
    }

    let db_stats = get_storage_stats(state)?;
    println!(
        "Database: {} KiB, {} saved locations",
        db_stats.size_bytes / 1024,
        db_stats.saved_location_count
    );

    Ok(())
}
