//! services/catalog/src/render.rs
//!
//! Text rendering for the `prints` binary, and the delete confirmation prompt.

use std::fmt::Display;
use std::io::{self, BufRead, Write};

use chrono::{DateTime, TimeZone, Utc};
use print_catalog_core::{LabelCount, Print, PrintFilter};

pub fn format_date<Tz: TimeZone>(created_at: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: Display,
{
    created_at.with_timezone(tz).format("%Y/%m/%d").to_string()
}

pub fn render_print<Tz: TimeZone>(print: &Print, tz: &Tz) -> String
where
    Tz::Offset: Display,
{
    let mut line = format!("{}  {}", format_date(&print.created_at, tz), print.title);
    if !print.labels.is_empty() {
        let tags: Vec<String> = print.labels.iter().map(|l| format!("#{}", l)).collect();
        line.push_str("  ");
        line.push_str(&tags.join(" "));
    }
    line.push_str(&format!("  [{}]", print.id));
    line
}

/// Renders the filtered listing. `total` is the size of the unfiltered catalog.
pub fn render_listing<Tz: TimeZone>(
    prints: &[Print],
    filter: &PrintFilter,
    total: usize,
    tz: &Tz,
) -> String
where
    Tz::Offset: Display,
{
    let mut out = format!("Prints ({})\n", total);
    if prints.is_empty() {
        if filter.is_active() {
            out.push_str("No prints match the search.\n");
        } else {
            out.push_str("No prints yet.\n");
            out.push_str("Add the first one with `prints add <IMAGE> --title <TITLE>`.\n");
        }
        return out;
    }
    for print in prints {
        out.push_str(&render_print(print, tz));
        out.push('\n');
    }
    out
}

pub fn render_labels(counts: &[LabelCount]) -> String {
    counts
        .iter()
        .map(|c| format!("#{} ({})\n", c.label, c.count))
        .collect()
}

/// Asks whether to delete the print titled `title`. Anything but `y`/`yes` declines.
pub fn confirm_delete<R: BufRead, W: Write>(title: &str, mut input: R, mut output: W) -> io::Result<bool> {
    write!(output, "Delete \"{}\"? [y/N] ", title)?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}
