//! Terminal rendering of `svn` output.
//!
//! Everything here consumes the plain strings returned by
//! [`Subversion`](crate::svn::Subversion); nothing parses beyond what is
//! needed to lay the text out.

pub mod table;

use colored::{ColoredString, Colorize};

use crate::error::SvnResult;
use crate::svn::Subversion;

const LOGO: [&str; 5] = [
    r"  ____        _                     _           _ ",
    r" / ___| _   _| |____   _____ _ __| |_ ___  __| |",
    r" \___ \| | | | '_ \ \ / / _ \ '__| __/ _ \/ _` |",
    r"  ___) | |_| | |_) \ V /  __/ |  | ||  __/ (_| |",
    r" |____/ \__,_|_.__/ \_/ \___|_|   \__\___|\__,_|",
];

/// Banner lines centered in `width` columns.
#[must_use]
pub fn banner(width: usize) -> Vec<String> {
    let logo_width = LOGO.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let pad = " ".repeat(width.saturating_sub(logo_width) / 2);
    LOGO.iter().map(|line| format!("{pad}{}", line.trim_end())).collect()
}

/// A horizontal rule of `width` columns with `title` centered in it.
#[must_use]
pub fn rule(title: &str, width: usize) -> String {
    let label = format!(" {title} ");
    let label_width = label.chars().count();
    if label_width >= width {
        return title.to_string();
    }
    let left = (width - label_width) / 2;
    let right = width - label_width - left;
    format!("{}{label}{}", "─".repeat(left), "─".repeat(right))
}

/// Split `svn info` output into `(label, value)` pairs on the first colon
/// of each line. Lines without a colon are skipped.
#[must_use]
pub fn parse_info(info: &str) -> Vec<(String, String)> {
    info.lines()
        .filter_map(|line| line.split_once(':'))
        .map(|(label, value)| (label.trim().to_string(), value.trim().to_string()))
        .collect()
}

/// Color one line of `svn status` output by its item status column.
#[must_use]
pub fn style_status_line(line: &str) -> ColoredString {
    match line.chars().next() {
        Some('M' | 'R') => line.yellow(),
        Some('A') => line.green(),
        Some('D' | '!') => line.red(),
        Some('C') => line.bright_red().bold(),
        Some('?' | 'I' | 'X') => line.dimmed(),
        _ => line.normal(),
    }
}

fn heading(text: &str) -> ColoredString {
    text.yellow().bold()
}

/// Print the banner and a rule naming the working copy.
pub fn display_header(svn: &Subversion) {
    let width = table::terminal_width();
    for line in banner(width) {
        println!("{line}");
    }
    let title = format!("Subversion Repository: {}", svn.path().display());
    println!("{}", rule(&title, width).yellow().bold().italic());
}

/// Print `svn info` as a two-column table.
///
/// # Errors
///
/// Propagates the failure of the underlying `svn info` call.
pub fn display_info(svn: &Subversion) -> SvnResult<()> {
    println!("{}", heading("Info"));
    let info = svn.info()?;
    println!("{}", table::info_table(&parse_info(&info)));
    Ok(())
}

/// Print the most recent `limit` log entries.
///
/// # Errors
///
/// Propagates the failure of the underlying `svn log` call.
pub fn display_logs(svn: &Subversion, limit: u32) -> SvnResult<()> {
    println!("\n{}", heading("Recent Log entries"));
    println!("{}", svn.log(limit)?);
    Ok(())
}

/// Print `svn status` with each line colored by its status code.
///
/// # Errors
///
/// Propagates the failure of the underlying `svn status` call.
pub fn display_status(svn: &Subversion) -> SvnResult<()> {
    println!("{}", heading("Status"));
    let status = svn.status()?;
    if status.is_empty() {
        println!("{}", "Working copy is clean".green());
    } else {
        for line in status.lines() {
            println!("{}", style_status_line(line));
        }
    }
    Ok(())
}

/// Print a list of branch names under a heading.
pub fn display_branches(url: &str, branches: &[String]) {
    println!("{}", heading(&format!("Branches in {url}")));
    if branches.is_empty() {
        println!("{}", "(none)".dimmed());
    }
    for branch in branches {
        println!("  {}", branch.trim_end_matches('/'));
    }
}

/// Print raw command output, skipping empty results.
pub fn display_output(output: &str) {
    if !output.is_empty() {
        println!("{output}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_info_splits_on_first_colon() {
        let info = "Path: .\nURL: https://svn.example.com/repo/trunk\n\
                    Last Changed Date: 2024-05-01 10:11:12 +0000 (Wed, 01 May 2024)\n\nnoise line";
        let rows = parse_info(info);
        assert_eq!(
            rows,
            vec![
                ("Path".to_string(), ".".to_string()),
                ("URL".to_string(), "https://svn.example.com/repo/trunk".to_string()),
                (
                    "Last Changed Date".to_string(),
                    "2024-05-01 10:11:12 +0000 (Wed, 01 May 2024)".to_string()
                ),
            ]
        );
    }

    #[test]
    fn parse_info_empty() {
        assert!(parse_info("").is_empty());
    }

    #[test]
    fn banner_is_centered() {
        let lines = banner(100);
        assert_eq!(lines.len(), LOGO.len());
        let pad = lines[0].len() - lines[0].trim_start().len();
        assert!(pad > 20, "expected centering padding, got {pad}");

        let narrow = banner(10);
        assert_eq!(narrow[1], LOGO[1].trim_end());
    }

    #[test]
    fn rule_centers_title() {
        let line = rule("wc", 10);
        assert_eq!(line.chars().count(), 10);
        assert!(line.contains(" wc "));
        assert!(line.starts_with("───"));
    }

    #[test]
    fn rule_falls_back_to_title_when_narrow() {
        assert_eq!(rule("a long title", 5), "a long title");
    }

    #[test]
    fn status_lines_keep_their_text() {
        colored::control::set_override(false);
        assert_eq!(style_status_line("M       trunk/a.txt").to_string(), "M       trunk/a.txt");
        assert_eq!(style_status_line("?       junk").to_string(), "?       junk");
        assert_eq!(style_status_line("").to_string(), "");
    }
}
