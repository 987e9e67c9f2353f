//! Formatted output helpers for CLI commands.

use stackforge_compose::merge::MergeReport;
use stackforge_compose::registry::ServiceMeta;

/// One line per merged service: `~ name` if changed, `= name` otherwise.
#[must_use]
pub fn change_summary(report: &MergeReport) -> Vec<String> {
    report
        .changed
        .iter()
        .map(|(name, changed)| {
            let marker = if *changed { '~' } else { '=' };
            format!("{marker} {name}")
        })
        .collect()
}

/// `name  Display Name  [tag, tag]`, padded into columns.
#[must_use]
pub fn service_row(name: &str, meta: &ServiceMeta) -> String {
    format!(
        "{name:<16}{:<20}[{}]",
        meta.display_name,
        meta.service_type_tags.join(", ")
    )
}
