//! Per-category change sections and the summary block.
//!
//! Every block is rendered twice from the same data: once for the terminal
//! and once as Markdown lines for the changelog. Empty lists render an
//! explicit `None` so changelogs are structurally identical across runs.

use super::{ProfileLinker, RenderedBlock};
use crate::diff::DiffResult;
use crate::model::{Category, IdentifierSet};

/// Apply ANSI color formatting if colored output is enabled.
pub(crate) fn ansi_color(text: &str, color: &str, colored: bool) -> String {
    if colored {
        match color {
            "red" => format!("\x1b[31m{text}\x1b[0m"),
            "green" => format!("\x1b[32m{text}\x1b[0m"),
            "yellow" => format!("\x1b[33m{text}\x1b[0m"),
            "cyan" => format!("\x1b[36m{text}\x1b[0m"),
            "bold" => format!("\x1b[1m{text}\x1b[0m"),
            "dim" => format!("\x1b[2m{text}\x1b[0m"),
            _ => text.to_string(),
        }
    } else {
        text.to_string()
    }
}

/// Render the changes of one category.
pub fn render(
    category: Category,
    diff: &DiffResult,
    linker: &ProfileLinker,
    colored: bool,
) -> RenderedBlock {
    let added_links = linker.links(&diff.added);
    let removed_links = linker.links(&diff.removed);

    let mut display = vec![ansi_color(
        &format!("{} CHANGES", category.label().to_uppercase()),
        "bold",
        colored,
    )];
    display.push(display_list(
        &ansi_color("+ Added:", "green", colored),
        &added_links,
        colored,
    ));
    display.push(display_list(
        &ansi_color("- Removed:", "red", colored),
        &removed_links,
        colored,
    ));

    let mut log_lines = vec![format!("## {} changes", category.title())];
    push_log_list(&mut log_lines, "Added", &diff.added, &added_links);
    push_log_list(&mut log_lines, "Removed", &diff.removed, &removed_links);
    log_lines.push(String::new());

    RenderedBlock {
        display: display.join("\n"),
        log_lines,
    }
}

/// Render the net-change summary over all categories, in the order given.
pub fn render_summary(diffs: &[(Category, &DiffResult)], colored: bool) -> RenderedBlock {
    let mut display = vec![ansi_color("SUMMARY", "bold", colored)];
    let mut log_lines = vec!["## Summary".to_string()];

    for (category, diff) in diffs {
        let counts = format!(
            "{}, {}, Net: {}",
            ansi_color(&format!("+{}", diff.added.len()), "green", colored),
            ansi_color(&format!("-{}", diff.removed.len()), "red", colored),
            diff.net()
        );
        display.push(format!(
            "  {} {}",
            ansi_color(&format!("{}:", category.title()), "cyan", colored),
            counts
        ));
        log_lines.push(format!(
            "- {}: +{}, -{}, Net: {}",
            category.title(),
            diff.added.len(),
            diff.removed.len(),
            diff.net()
        ));
    }
    log_lines.push(String::new());

    RenderedBlock {
        display: display.join("\n"),
        log_lines,
    }
}

fn display_list(heading: &str, links: &[String], colored: bool) -> String {
    if links.is_empty() {
        format!("{heading} {}", ansi_color("None", "dim", colored))
    } else {
        let mut out = heading.to_string();
        for link in links {
            out.push_str("\n  ");
            out.push_str(link);
        }
        out
    }
}

fn push_log_list(lines: &mut Vec<String>, heading: &str, ids: &IdentifierSet, links: &[String]) {
    lines.push(format!("**{heading} ({}):**", ids.len()));
    if links.is_empty() {
        lines.push("- None".to_string());
    } else {
        lines.extend(links.iter().map(|link| format!("- {link}")));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::compute_lists;

    #[test]
    fn test_log_lines_shape() {
        let diff = compute_lists(["b", "c"], ["a", "b"]);
        let block = render(Category::Followers, &diff, &ProfileLinker::default(), false);

        assert_eq!(
            block.log_lines,
            vec![
                "## Followers changes",
                "**Added (1):**",
                "- https://instagram.com/c",
                "**Removed (1):**",
                "- https://instagram.com/a",
                "",
            ]
        );
    }

    #[test]
    fn test_empty_lists_render_none_placeholder() {
        let diff = DiffResult::default();
        let block = render(Category::Following, &diff, &ProfileLinker::default(), false);

        assert_eq!(
            block.log_lines,
            vec![
                "## Following changes",
                "**Added (0):**",
                "- None",
                "**Removed (0):**",
                "- None",
                "",
            ]
        );
        assert_eq!(
            block.display,
            "FOLLOWING CHANGES\n+ Added: None\n- Removed: None"
        );
    }

    #[test]
    fn test_display_lists_links() {
        let diff = compute_lists(["x", "y"], Vec::<&str>::new());
        let block = render(Category::Followers, &diff, &ProfileLinker::default(), false);

        assert_eq!(
            block.display,
            "FOLLOWERS CHANGES\n+ Added:\n  https://instagram.com/x\n  https://instagram.com/y\n- Removed: None"
        );
    }

    #[test]
    fn test_colored_display_uses_ansi() {
        let diff = DiffResult::default();
        let block = render(Category::Followers, &diff, &ProfileLinker::default(), true);
        assert!(block.display.contains("\x1b[1m"));
        assert!(!block.log_lines.iter().any(|l| l.contains('\x1b')));
    }

    #[test]
    fn test_summary_net_counts() {
        let followers = compute_lists(["x", "y"], Vec::<&str>::new());
        let following = compute_lists(Vec::<&str>::new(), ["x", "y"]);
        let block = render_summary(
            &[
                (Category::Followers, &followers),
                (Category::Following, &following),
            ],
            false,
        );

        assert_eq!(
            block.log_lines,
            vec![
                "## Summary",
                "- Followers: +2, -0, Net: 2",
                "- Following: +0, -2, Net: -2",
                "",
            ]
        );
        assert!(block.display.contains("Followers: +2, -0, Net: 2"));
        assert!(block.display.contains("Following: +0, -2, Net: -2"));
    }
}
