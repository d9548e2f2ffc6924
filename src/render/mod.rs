//! Plain-text rendering of responses for terminal clients.
//!
//! Every response body is a bordered table ending with the same footer. When
//! `color` is set, text is styled with ANSI escapes; layout is identical either
//! way. Rendering is pure: callers decide whether the client wants color.

pub mod table;

use chrono::{DateTime, Datelike, Utc};
use colored::Colorize;

use crate::domain::entities::Article;
use crate::domain::query::country::VALID_COUNTRIES;
use crate::domain::query::grammar::{ARGUMENTS, VALID_CATEGORIES};
use table::{Align, CONTENT_WIDTH, Line, Table, wrap_text};

pub use table::DISPLAY_WIDTH;

const REPOSITORY_URL: &str = "https://github.com/omgimanerd/getnews.tech";

fn footer(color: bool) -> Vec<Line> {
    vec![
        Line::styled(
            "Powered by the News API (https://newsapi.org).",
            color,
            |s| s.green(),
        ),
        Line::styled("Open source contributions are welcome!", color, |s| s.green()),
        Line::styled(REPOSITORY_URL, color, |s| s.underline().blue()),
    ]
}

fn wrapped(
    text: &str,
    color: bool,
    style: impl Fn(&str) -> colored::ColoredString + Copy,
) -> Vec<Line> {
    wrap_text(text, CONTENT_WIDTH)
        .iter()
        .map(|line| Line::styled(line, color, style))
        .collect()
}

fn ordinal(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

/// `Published on Mar 1st, 2024 at 12:30pm UTC`.
pub fn format_date(date: Option<DateTime<Utc>>) -> String {
    match date {
        Some(date) => format!(
            "Published on {} {}{}, {} at {} UTC",
            date.format("%b"),
            date.day(),
            ordinal(date.day()),
            date.year(),
            date.format("%-I:%M%P"),
        ),
        None => "Publication date not available".to_string(),
    }
}

/// Renders a list of articles, one cell per article.
pub fn format_articles(articles: &[Article], color: bool) -> String {
    let header = Line::styled("Articles", color, |s| s.bold());
    let mut table = Table::with_header(header);

    for article in articles {
        let mut lines = wrapped(
            &format!("{} - {}", article.source_name, article.title),
            color,
            |s| s.bold().cyan(),
        );
        lines.push(Line::styled(
            &format_date(article.published_at),
            color,
            |s| s.cyan(),
        ));
        lines.extend(wrapped(
            article
                .description
                .as_deref()
                .unwrap_or("No description available."),
            color,
            |s| s.normal(),
        ));
        lines.push(Line::styled(&article.url, color, |s| s.underline().green()));
        table.push(lines, Align::Left);
    }

    if articles.is_empty() {
        table.push(
            vec![Line::plain("No articles found on this topic.")],
            Align::Left,
        );
    }

    table.push(footer(color), Align::Center);
    table.render()
}

/// Renders usage instructions with every argument, category and country.
pub fn format_help(color: bool) -> String {
    let header = Line::styled("Help", color, |s| s.bold());
    let mut table = Table::with_header(header);

    let mut lines = vec![
        Line::blank(),
        Line::plain("Usage: curl [country].getnews.tech/[query],arg=value,arg=value"),
        Line::blank(),
        Line::styled("Arguments:", color, |s| s.bold()),
    ];
    for spec in ARGUMENTS {
        let name = if spec.is_flag() {
            spec.name.to_string()
        } else {
            format!("{}=value", spec.name)
        };
        lines.push(Line::plain(&format!("  {:<16}{}", name, spec.description)));
    }
    lines.push(Line::blank());
    lines.extend(wrapped(
        &format!("Valid categories: {}", VALID_CATEGORIES.join(", ")),
        color,
        |s| s.blue(),
    ));
    lines.push(Line::blank());
    lines.extend(wrapped(
        &format!("Valid countries: {}", VALID_COUNTRIES.join(", ")),
        color,
        |s| s.blue(),
    ));
    lines.push(Line::blank());
    lines.extend(wrapped(
        "Example: curl us.getnews.tech/climate+change,category=science,n=5",
        color,
        |s| s.green(),
    ));

    table.push(lines, Align::Left);
    table.push(footer(color), Align::Center);
    table.render()
}

/// Renders a short message, used for errors.
pub fn format_message(message: &str, color: bool) -> String {
    let mut table = Table::new();
    table.push(wrapped(message, color, |s| s.red()), Align::Center);
    table.push(footer(color), Align::Center);
    table.render()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use unicode_width::UnicodeWidthStr;

    fn article(description: Option<&str>) -> Article {
        Article::new(
            "Reuters".to_string(),
            "Markets rally after rate decision".to_string(),
            description.map(str::to_string),
            "https://getnews.tech/s/abcdefgh12345678".to_string(),
            Some(Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap()),
        )
    }

    #[test]
    fn test_format_date() {
        let date = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap();
        assert_eq!(
            format_date(Some(date)),
            "Published on Mar 1st, 2024 at 12:30pm UTC"
        );
        let date = Utc.with_ymd_and_hms(2023, 11, 12, 7, 5, 0).unwrap();
        assert_eq!(
            format_date(Some(date)),
            "Published on Nov 12th, 2023 at 7:05am UTC"
        );
        assert_eq!(format_date(None), "Publication date not available");
    }

    #[test]
    fn test_ordinals() {
        assert_eq!(ordinal(1), "st");
        assert_eq!(ordinal(2), "nd");
        assert_eq!(ordinal(3), "rd");
        assert_eq!(ordinal(11), "th");
        assert_eq!(ordinal(22), "nd");
        assert_eq!(ordinal(23), "rd");
        assert_eq!(ordinal(31), "st");
    }

    #[test]
    fn test_format_articles_plain() {
        let out = format_articles(&[article(Some("Stocks rose."))], false);
        assert!(out.contains("Reuters - Markets rally after rate decision"));
        assert!(out.contains("Published on Mar 1st, 2024"));
        assert!(out.contains("Stocks rose."));
        assert!(out.contains("https://getnews.tech/s/abcdefgh12345678"));
        assert!(out.contains("Powered by the News API"));
        assert!(!out.contains('\u{1b}'));
        assert!(out.lines().all(|l| l.chars().count() == DISPLAY_WIDTH));
    }

    #[test]
    fn test_format_articles_with_japanese_headline() {
        let article = Article::new(
            "NHK".to_string(),
            "日銀が追加利上げを決定、政策金利は約１７年ぶりの高水準に　市場では円高が進行し株価は下落".to_string(),
            Some("日本銀行は金融政策決定会合で追加の利上げを決めた。".to_string()),
            "https://getnews.tech/s/abcdefgh12345678".to_string(),
            None,
        );

        let out = format_articles(&[article], false);
        assert!(out.contains("NHK - 日銀が追加利上げを決定"));
        assert!(out.lines().all(|l| l.width() == DISPLAY_WIDTH));
    }

    #[test]
    fn test_missing_description() {
        let out = format_articles(&[article(None)], false);
        assert!(out.contains("No description available."));
    }

    #[test]
    fn test_no_articles() {
        let out = format_articles(&[], false);
        assert!(out.contains("No articles found on this topic."));
    }

    #[test]
    fn test_colored_output_has_escapes() {
        colored::control::set_override(true);
        let out = format_articles(&[article(None)], true);
        assert!(out.contains('\u{1b}'));
    }

    #[test]
    fn test_format_help_lists_everything() {
        let out = format_help(false);
        for spec in ARGUMENTS {
            assert!(out.contains(spec.name));
        }
        assert!(out.contains("technology"));
        assert!(out.contains("za"));
        assert!(out.lines().all(|l| l.chars().count() == DISPLAY_WIDTH));
    }

    #[test]
    fn test_format_message_wraps_long_text() {
        let message = "word ".repeat(40);
        let out = format_message(&message, false);
        assert!(out.lines().all(|l| l.chars().count() == DISPLAY_WIDTH));
        assert!(out.contains("word word"));
    }
}
