//! Session report types with JSON persistence.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::engine::DrillConfig;
use crate::session::{mean_rating, SessionEntry};

/// A completed session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionReport {
    /// Unique session identifier.
    pub id: Uuid,
    /// When the session ended.
    pub created_at: DateTime<Utc>,
    /// Profile the session ran on.
    pub profile: String,
    /// Configuration the session was run with.
    pub config: DrillConfig,
    /// Size of the eligible population.
    pub population: usize,
    /// Stored weights changed by the session.
    pub weights_changed: usize,
    /// Presented words, in order.
    pub entries: Vec<SessionEntry>,
    /// Total wall-clock duration in milliseconds.
    pub duration_ms: u64,
}

impl SessionReport {
    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: SessionReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }

    /// Mean rating, `None` for an empty session.
    pub fn mean_rating(&self) -> Option<f64> {
        mean_rating(&self.entries)
    }

    /// Entries rated 3, in presentation order.
    pub fn missed(&self) -> impl Iterator<Item = &SessionEntry> {
        self.entries.iter().filter(|e| e.rating.value() == 3)
    }

    /// Render the session summary as markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();
        md.push_str(&format!(
            "# Session summary: {} ({})\n\n",
            self.profile,
            self.created_at.format("%Y-%m-%d %H:%M")
        ));
        md.push_str(&format!(
            "{} word(s) from {} eligible, category {}.\n\n",
            self.entries.len(),
            self.population,
            self.config.selector
        ));

        if self.entries.is_empty() {
            md.push_str("No words were asked.\n");
            return md;
        }

        md.push_str("| Word | Solution | Your answer | Score | Weight |\n");
        md.push_str("|------|----------|-------------|-------|--------|\n");
        for e in &self.entries {
            md.push_str(&format!(
                "| {} | {} | {} | {} | {:.3} -> {:.3} |\n",
                e.prompt, e.answer, e.guess, e.rating, e.weight_before, e.weight_after
            ));
        }
        if let Some(mean) = self.mean_rating() {
            md.push_str(&format!("\nMean rating: {mean:.2}\n"));
        }
        md
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CategorySelector;
    use crate::scorer::Rating;

    fn entry(prompt: &str, rating: u8) -> SessionEntry {
        SessionEntry {
            prompt: prompt.into(),
            answer: "x".into(),
            guess: "y".into(),
            rating: Rating::try_from(rating).unwrap(),
            weight_before: 1.5,
            weight_after: (1.5 + f64::from(rating)) / 2.0,
            store_position: 0,
        }
    }

    fn report(entries: Vec<SessionEntry>) -> SessionReport {
        SessionReport {
            id: Uuid::nil(),
            created_at: Utc::now(),
            profile: "anna".into(),
            config: DrillConfig::default(),
            population: 10,
            weights_changed: entries.len(),
            entries,
            duration_ms: 5,
        }
    }

    #[test]
    fn json_roundtrip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports").join("session.json");
        let original = report(vec![entry("gehen", 3), entry("Haus", 0)]);
        original.save_json(&path).unwrap();

        let loaded = SessionReport::load_json(&path).unwrap();
        assert_eq!(loaded.profile, "anna");
        assert_eq!(loaded.entries, original.entries);
        assert_eq!(loaded.config.selector, CategorySelector::All);
    }

    #[test]
    fn summary_statistics() {
        let r = report(vec![entry("gehen", 3), entry("Haus", 0), entry("klein", 3)]);
        assert_eq!(r.mean_rating(), Some(2.0));
        let missed: Vec<&str> = r.missed().map(|e| e.prompt.as_str()).collect();
        assert_eq!(missed, vec!["gehen", "klein"]);
        assert!(report(vec![]).mean_rating().is_none());
    }

    #[test]
    fn markdown_lists_every_entry() {
        let md = report(vec![entry("gehen", 3), entry("gehen", 1)]).to_markdown();
        assert_eq!(md.matches("| gehen |").count(), 2);
        assert!(md.contains("1.500 -> 2.250"));
        assert!(md.contains("Mean rating: 2.00"));
        assert!(report(vec![]).to_markdown().contains("No words were asked"));
    }
}
