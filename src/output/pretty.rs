use colored::Colorize;

use crate::results::ResultLog;
use crate::session::{Outcome, ReviewItem, ReviewReport};

/// Longest text preview shown in item listings
const TEXT_PREVIEW_CHARS: usize = 60;

/// Format review items as a numbered list
pub fn format_items_pretty(items: &[ReviewItem], source: &str) -> String {
    if items.is_empty() {
        return format!("{} (0 items)\n  No items", source);
    }

    let width = items.len().to_string().len();
    let mut output = format!("{} ({} items)\n", source.bold(), items.len());
    output.push_str(&"─".repeat(60));
    output.push('\n');

    for (i, item) in items.iter().enumerate() {
        output.push_str(&format!(
            "{}  {}  {}\n",
            item_number(i + 1, width).dimmed(),
            item.filename.cyan(),
            preview_text(&item.text),
        ));
    }

    output
}

/// Item number right-aligned to `width` columns.
fn item_number(n: usize, width: usize) -> String {
    format!("{n:>width$}")
}

/// Single-line, length-limited rendering of recognized text.
fn preview_text(text: &str) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() > TEXT_PREVIEW_CHARS {
        let cut: String = flat.chars().take(TEXT_PREVIEW_CHARS - 1).collect();
        format!("{cut}…")
    } else {
        flat
    }
}

/// Format the end-of-review summary
pub fn format_report_pretty(report: &ReviewReport) -> String {
    let mut output = format!("{}\n", "Review results:".bold());
    output.push_str(&report.to_string());
    output
}

/// Format a saved result log
pub fn format_result_log_pretty(log: &ResultLog) -> String {
    let mut output = format!("{}\n", "Result log".cyan().bold());
    output.push_str(&"─".repeat(40).dimmed().to_string());
    output.push('\n');
    output.push_str(&format!("  {} {}\n", "Input:".bold(), log.input.display()));
    if let Some(range) = log.range {
        output.push_str(&format!(
            "  {} items {}-{}\n",
            "Range:".bold(),
            range.start,
            range.end
        ));
    }
    output.push_str(&format!(
        "  {} {}\n",
        "Started:".bold(),
        log.started_at.format("%Y-%m-%d %H:%M")
    ));
    output.push_str(&format!(
        "  {} {}\n",
        "Finished:".bold(),
        log.finished_at.format("%Y-%m-%d %H:%M")
    ));

    let report = log.report();
    if let Some(accuracy) = report.accuracy_percent() {
        output.push_str(&format!("  {} {accuracy:.1}%\n", "Accuracy:".bold()));
    }
    output.push('\n');
    output.push_str(&format!("Total: {}\n", report.total));
    output.push_str(&format!("Correct: {}\n", report.correct.to_string().green()));
    output.push_str(&format!("Incorrect: {}\n", report.incorrect.to_string().red()));
    output.push('\n');
    output.push_str("Details:\n");
    for record in &log.results {
        let outcome = match record.outcome {
            Outcome::Correct => record.outcome.as_str().green(),
            Outcome::Incorrect => record.outcome.as_str().red(),
        };
        output.push_str(&format!(
            "{}: {}  {}\n",
            record.filename,
            outcome,
            preview_text(&record.text).dimmed()
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_items_pretty_empty() {
        let result = format_items_pretty(&[], "ocr.json");
        assert!(result.contains("0 items"));
        assert!(result.contains("No items"));
    }

    #[test]
    fn test_format_items_pretty() {
        colored::control::set_override(false);
        let items = vec![
            ReviewItem::new("a.png", "hello"),
            ReviewItem::new("b.png", "wor1d"),
        ];
        let result = format_items_pretty(&items, "ocr.json");

        assert!(result.contains("ocr.json (2 items)"));
        assert!(result.contains("1  a.png  hello"));
        assert!(result.contains("2  b.png  wor1d"));
    }

    #[test]
    fn test_item_numbers_align_before_coloring() {
        assert_eq!(item_number(3, 2), " 3");
        assert_eq!(item_number(12, 2), "12");

        // Width survives styling because padding is part of the text
        let styled = item_number(3, 2).dimmed();
        assert_eq!(&*styled, " 3");
    }

    #[test]
    fn test_format_items_pretty_pads_numbers() {
        colored::control::set_override(false);
        let items: Vec<_> = (0..10)
            .map(|i| ReviewItem::new(format!("{i}.png"), "t"))
            .collect();
        let output = format_items_pretty(&items, "ocr.json");

        assert!(output.contains("\n 1  0.png  t\n"));
        assert!(output.contains("\n10  9.png  t\n"));
    }

    #[test]
    fn test_preview_text_flattens_and_truncates() {
        assert_eq!(preview_text("two\nlines"), "two lines");
        let long = "x".repeat(100);
        let preview = preview_text(&long);
        assert_eq!(preview.chars().count(), TEXT_PREVIEW_CHARS);
        assert!(preview.ends_with('…'));
    }

    #[test]
    fn test_format_report_pretty() {
        colored::control::set_override(false);
        let report = ReviewReport::new(1, 0, vec![("a.png".to_string(), Outcome::Correct)]);
        let result = format_report_pretty(&report);

        assert!(result.starts_with("Review results:\n"));
        assert!(result.contains("Total: 1\nCorrect: 1\nIncorrect: 0\n\nDetails:\na.png: correct\n"));
    }
}
