// docveil/src/report.rs
//! Findings summary rendering for the docveil CLI.
//!
//! By default the summary never prints matched values: each category shows
//! its distinct-value count and a stable sample hash, so a summary can be
//! pasted into a ticket without re-leaking the PII it reports.

use comfy_table::{presets::UTF8_FULL, Cell, Color, Table};

use docveil_core::{canonical_sample_hash, DocumentFindings, RedactionScope, SeverityTier};

fn tier_cell(tier: SeverityTier, color: bool) -> Cell {
    let cell = Cell::new(tier.as_str());
    if !color {
        return cell;
    }
    match tier {
        SeverityTier::Basic => cell.fg(Color::Green),
        SeverityTier::Intermediate => cell.fg(Color::Yellow),
        SeverityTier::Critical => cell.fg(Color::Red),
    }
}

/// Builds the findings table, one row per detected category.
///
/// When `scope` is given, each row notes whether the category falls under
/// the requested redaction tier.
pub fn render_findings_table(
    findings: &DocumentFindings,
    scope: Option<&RedactionScope>,
    show_values: bool,
    color: bool,
) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);

    let mut header = vec!["Category", "Tier", "Values", "Sample"];
    if scope.is_some() {
        header.push("In scope");
    }
    table.set_header(header);

    for (category, finding) in findings.iter() {
        let sample = if show_values {
            finding.values.iter().cloned().collect::<Vec<_>>().join(", ")
        } else {
            finding
                .values
                .iter()
                .next()
                .map(|value| canonical_sample_hash(category, value)[..12].to_string())
                .unwrap_or_default()
        };

        let mut row = vec![
            Cell::new(category),
            tier_cell(finding.tier, color),
            Cell::new(finding.values.len()),
            Cell::new(sample),
        ];
        if let Some(scope) = scope {
            let in_scope = scope.categories.contains(category);
            row.push(Cell::new(if in_scope { "yes" } else { "no" }));
        }
        table.add_row(row);
    }

    table
}
