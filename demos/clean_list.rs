//! Basic usage example for the squeegee hygiene engine.

use squeegee::error::Result;
use squeegee::{Dataset, EmailClassifier, Mutation, Record, RowStatus};

fn main() -> Result<()> {
    println!("=== Squeegee Email Hygiene Demo ===\n");

    // A small contact table, the way a CSV collaborator would hand it over.
    let columns = vec![
        "name".to_string(),
        "email".to_string(),
        "phone".to_string(),
    ];
    let raw_rows: Vec<Record> = vec![
        row("Ada Lovelace", " Ada@Example.COM ", "555-0100"),
        row("Grace Hopper", "grace@gmail.con", "555-0101"),
        row("Alan Turing", "alan yahoo.com", "555-0102"),
        row("Edsger Dijkstra", "edsger@yah00.com", "555-0103"),
        row("Donald Knuth", "", "555-0104"),
    ];

    let mut dataset = Dataset::ingest(columns, raw_rows)?;
    println!(
        "Ingested {} rows (name column: {:?}, email column: {:?})\n",
        dataset.len(),
        dataset.name_column(),
        dataset.email_column()
    );

    // Validate everything, watching progress per chunk.
    let classifier = EmailClassifier::new();
    let stats = dataset.classify_with_progress(&classifier, |progress| {
        println!("  validated {}%", progress.percent());
    });

    println!(
        "\nResults: {} valid, {} fixable, {} invalid",
        stats.valid, stats.fixable, stats.invalid
    );
    for row in dataset.rows() {
        match row.status() {
            RowStatus::Fixable => println!(
                "  row {} ({}): {} -> suggested {}",
                row.id(),
                row.name(),
                display_email(row.email()),
                row.suggestion().unwrap_or("-")
            ),
            RowStatus::Invalid => println!(
                "  row {} ({}): {} is beyond mechanical repair",
                row.id(),
                row.name(),
                display_email(row.email())
            ),
            _ => {}
        }
    }

    // Accept every suggested correction in one sweep.
    let outcome = dataset.apply(&classifier, Mutation::AcceptAll)?;
    println!(
        "\nAccepted {} suggestions; now {} valid / {} invalid ({}% valid)",
        outcome.rows_affected,
        outcome.stats.valid,
        outcome.stats.invalid,
        outcome.stats.percent_valid()
    );

    // Project the table back out with every original column intact.
    println!("\nExported rows:");
    for record in dataset.export() {
        let cells: Vec<String> = record
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect();
        println!("  {}", cells.join(", "));
    }

    Ok(())
}

fn row(name: &str, email: &str, phone: &str) -> Record {
    [("name", name), ("email", email), ("phone", phone)]
        .into_iter()
        .collect()
}

fn display_email(email: &str) -> &str {
    if email.is_empty() { "<empty>" } else { email }
}
