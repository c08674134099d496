//! The `lexidrill stats` command.

use anyhow::Result;
use comfy_table::{Cell, Table};

use lexidrill_core::statistics::{compute_lexicon_stats, hardest_words, WeightStats};

use super::Globals;

pub fn execute(globals: &Globals, profile: String, top: usize) -> Result<()> {
    let (_, store) = globals.load()?;
    let lexicon = store.load(&profile)?;
    let stats = compute_lexicon_stats(&lexicon);

    let mut table = Table::new();
    table.set_header(vec![
        "Category", "Words", "Practiced", "Mean", "Min", "Max", "Draw share",
    ]);
    for (category, s) in &stats.per_category {
        table.add_row(stats_row(category.label(), s));
    }
    table.add_row(stats_row("Total", &stats.overall));
    println!("Profile '{profile}'\n{table}");

    let hardest = hardest_words(&lexicon, top);
    if !hardest.is_empty() {
        let mut table = Table::new();
        table.set_header(vec![
            "#",
            lexicon.languages.primary.as_str(),
            lexicon.languages.secondary.as_str(),
            "Category",
            "Weight",
        ]);
        for (position, row) in hardest {
            table.add_row(vec![
                Cell::new(position),
                Cell::new(&row.primary),
                Cell::new(&row.secondary),
                Cell::new(row.category.letter()),
                Cell::new(format!("{:.3}", row.weight)),
            ]);
        }
        println!("\nHardest words\n{table}");
    }

    Ok(())
}

fn stats_row(label: &str, s: &WeightStats) -> Vec<Cell> {
    vec![
        Cell::new(label),
        Cell::new(s.words),
        Cell::new(s.practiced),
        Cell::new(format!("{:.3}", s.mean_weight)),
        Cell::new(format!("{:.3}", s.min_weight)),
        Cell::new(format!("{:.3}", s.max_weight)),
        Cell::new(format!("{:.1}%", s.draw_share * 100.0)),
    ]
}
