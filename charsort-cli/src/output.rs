/// Output formatting: terminal table and JSON.
use charsort_core::Item;
use serde::Serialize;
use std::collections::HashMap;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Serialize)]
struct JsonRankedItem<'a> {
    rank: usize,
    #[serde(flatten)]
    item: &'a Item,
    #[serde(skip_serializing_if = "Option::is_none")]
    image: Option<String>,
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    items: Vec<JsonRankedItem<'a>>,
    comparisons_made: usize,
    comparisons_total: usize,
    complete: bool,
}

/// Summary numbers printed under the results.
pub struct Summary {
    pub submitted: usize,
    pub total: usize,
    pub complete: bool,
}

/// Write results as a formatted terminal table.
pub fn write_table(out: &mut impl Write, rankings: &[&Item], summary: &Summary) -> io::Result<()> {
    // Find the widest name for padding
    let name_width = rankings.iter()
        .map(|r| r.display_name.chars().count())
        .max()
        .unwrap_or(4)
        .max(4); // at least "Name"

    writeln!(out, " # | {:<name_width$} | Score | Tier", "Name")?;
    writeln!(out, "---|-{}-|-------|-----", "-".repeat(name_width))?;

    for (i, r) in rankings.iter().enumerate() {
        writeln!(
            out,
            "{:>2} | {:<name_width$} | {:>5} | {:>4}",
            i + 1, r.display_name, r.score, r.tier,
        )?;
    }

    let status = if summary.complete { "complete" } else { "partial" };
    writeln!(
        out,
        "\n{} characters ranked, {}/{} comparisons ({status})",
        rankings.len(),
        summary.submitted,
        summary.total,
    )
}

/// Write results as JSON. Items found in `images` carry their image path.
pub fn write_json(
    out: &mut impl Write,
    rankings: &[&Item],
    summary: &Summary,
    images: &HashMap<String, PathBuf>,
) -> io::Result<()> {
    let items = rankings
        .iter()
        .enumerate()
        .map(|(i, &item)| JsonRankedItem {
            rank: i + 1,
            item,
            image: images.get(&item.id).map(|path| path.display().to_string()),
        })
        .collect();

    let output = JsonOutput {
        items,
        comparisons_made: summary.submitted,
        comparisons_total: summary.total,
        complete: summary.complete,
    };

    serde_json::to_writer_pretty(&mut *out, &output)?;
    writeln!(out)
}
