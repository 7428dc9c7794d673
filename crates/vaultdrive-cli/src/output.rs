//! Terminal output for the vaultdrive binary
//!
//! Every command reports through [`OutputFormat`], so the `--json` flag
//! swaps the human checkmark style for machine-readable lines without
//! branching at each call site. The end-of-run sync summary lives here
//! too, next to the formatting it belongs to.

use vaultdrive_core::domain::stats::SyncStats;

/// Output format selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Human,
    Json,
}

impl OutputFormat {
    pub fn is_json(self) -> bool {
        matches!(self, OutputFormat::Json)
    }

    /// Top-level result line of a command
    pub fn success(self, message: &str) {
        match self {
            Self::Human => println!("\u{2713} {message}"),
            Self::Json => println!(
                "{}",
                serde_json::json!({"success": true, "message": message})
            ),
        }
    }

    pub fn error(self, message: &str) {
        match self {
            Self::Human => eprintln!("\u{2717} Error: {message}"),
            Self::Json => eprintln!(
                "{}",
                serde_json::json!({"success": false, "error": message})
            ),
        }
    }

    /// Indented detail line; silent in JSON mode
    pub fn info(self, message: &str) {
        if let Self::Human = self {
            println!("  {message}");
        }
    }

    /// Structured payload; silent in human mode
    pub fn print_json(self, value: &serde_json::Value) {
        if let Self::Json = self {
            println!(
                "{}",
                serde_json::to_string_pretty(value).unwrap_or_default()
            );
        }
    }

    /// Prints the per-run sync summary in the selected format
    pub fn sync_summary(self, stats: &SyncStats) {
        match self {
            Self::Json => self.print_json(&summary_json(stats)),
            Self::Human => {
                let (headline, details) = human_summary(stats);
                self.success(&headline);
                for line in details {
                    self.info(&line);
                }
            }
        }
    }
}

fn summary_json(stats: &SyncStats) -> serde_json::Value {
    serde_json::json!({
        "added": stats.added,
        "updated": stats.updated,
        "unchanged": stats.unchanged,
        "total": stats.total(),
    })
}

fn human_summary(stats: &SyncStats) -> (String, Vec<String>) {
    if stats.added == 0 && stats.updated == 0 {
        let headline = format!(
            "Already up to date ({} file{} checked)",
            stats.unchanged,
            if stats.unchanged == 1 { "" } else { "s" }
        );
        (headline, Vec::new())
    } else {
        let details = vec![
            format!("Added:     {}", stats.added),
            format!("Updated:   {}", stats.updated),
            format!("Unchanged: {}", stats.unchanged),
        ];
        ("Sync completed".to_string(), details)
    }
}
