//! Table output formatting for enriched leaderboards using comfy-table.

use std::env;

use comfy_table::{presets, Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use super::truncate;
use crate::domain::models::Member;

/// Table formatter for CLI output
pub struct TableFormatter {
    /// Whether to use colors in output
    use_colors: bool,
}

impl TableFormatter {
    /// Formatter with colors when the terminal supports them.
    pub fn new() -> Self {
        Self {
            use_colors: supports_color(),
        }
    }

    /// Formatter with colors forced on or off.
    pub const fn with_colors(use_colors: bool) -> Self {
        Self { use_colors }
    }

    /// Format ranked members, marking the ones without a profile
    pub fn format_members(&self, members: &[Member]) -> String {
        let mut table = Table::new();
        table
            .load_preset(presets::UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);

        table.set_header(vec![
            Cell::new("Rank").add_attribute(Attribute::Bold),
            Cell::new("Member").add_attribute(Attribute::Bold),
            Cell::new("Score").add_attribute(Attribute::Bold),
            Cell::new("Name").add_attribute(Attribute::Bold),
            Cell::new("Avatar").add_attribute(Attribute::Bold),
        ]);

        for member in members {
            table.add_row(vec![
                Cell::new(member.rank).set_alignment(CellAlignment::Right),
                Cell::new(truncate(&member.public_id, 24)),
                Cell::new(member.score).set_alignment(CellAlignment::Right),
                self.optional_cell(member.display_name.as_deref(), 32),
                self.optional_cell(member.avatar_url.as_deref(), 40),
            ]);
        }

        table.to_string()
    }

    fn optional_cell(&self, value: Option<&str>, max_len: usize) -> Cell {
        match value {
            Some(value) => Cell::new(truncate(value, max_len)),
            None if self.use_colors => Cell::new("-").fg(Color::DarkGrey),
            None => Cell::new("-"),
        }
    }
}

impl Default for TableFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// Check if color output is supported
fn supports_color() -> bool {
    if env::var("NO_COLOR").is_ok() {
        return false;
    }
    !matches!(env::var("TERM").as_deref(), Ok("dumb"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_members() {
        let mut alice = Member::new("m1", 1, 100);
        alice.display_name = Some("Alice".to_string());
        alice.avatar_url = Some("http://x/a.png".to_string());
        let members = vec![alice, Member::new("m2", 2, 90)];

        let output = TableFormatter::with_colors(false).format_members(&members);
        assert!(output.contains("Rank"));
        assert!(output.contains("Alice"));
        assert!(output.contains("http://x/a.png"));
        assert!(output.contains("m2"));
    }

    #[test]
    fn test_format_members_empty() {
        let output = TableFormatter::with_colors(false).format_members(&[]);
        assert!(output.contains("Member"));
    }
}
