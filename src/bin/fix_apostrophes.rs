//! One-off: unescape `\'` left in generated essence documents.
//! Run from project root: cargo run --bin fix_apostrophes [-- data/essences]

use std::path::Path;

use essence_docs::essence::{fix_apostrophes, OUTPUT_DIR};

fn main() -> anyhow::Result<()> {
    let dir = std::env::args()
        .nth(1)
        .unwrap_or_else(|| OUTPUT_DIR.to_string());

    let report = fix_apostrophes(Path::new(&dir))?;
    println!(
        "Fixing escaped apostrophes in {} markdown files...\n",
        report.files_scanned
    );
    for fix in &report.fixed {
        println!(
            "[OK] {}: Fixed {} escaped apostrophe(s)",
            fix.file_name, fix.replacements
        );
    }
    println!(
        "\nTotal: Fixed {} escaped apostrophe(s) across {} file(s)",
        report.total_replacements(),
        report.files_scanned
    );
    Ok(())
}
