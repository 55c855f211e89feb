//! Plain-text rendering of statistics and conversations.
//!
//! Charts are drawn as horizontal bars scaled to the largest value in each
//! section.

use std::fmt::Write;

use crate::core::models::StatsBundle;
use crate::core::output::TIMESTAMP_FORMAT;
use crate::message::ChatMessage;

const BAR_WIDTH: usize = 40;

/// Renders the full statistics report.
///
/// ```
/// use chatstats::core::aggregate::aggregate;
/// use chatstats::report::render_stats;
/// use chatstats::ChatMessage;
///
/// let rows = vec![ChatMessage::new("Alice", "hello world").with_date_time("1/1/2023", "10:00")];
/// let text = render_stats(&aggregate(&rows));
/// assert!(text.contains("Messages: 1"));
/// assert!(text.contains("Alice"));
/// ```
pub fn render_stats(stats: &StatsBundle) -> String {
    let mut out = String::new();
    // writing into a String cannot fail
    let _ = write_stats(&mut out, stats);
    out
}

/// Renders one line per message: `[YYYY-MM-DD HH:MM] sender: text`.
pub fn render_conversation(messages: &[&ChatMessage]) -> String {
    let mut out = String::new();
    for msg in messages {
        let _ = writeln!(
            out,
            "[{}] {}: {}",
            msg.timestamp.format(TIMESTAMP_FORMAT),
            msg.sender,
            msg.message
        );
    }
    out
}

fn write_stats(out: &mut String, stats: &StatsBundle) -> std::fmt::Result {
    writeln!(out, "Chat statistics")?;
    writeln!(out, "===============")?;
    writeln!(
        out,
        "Messages: {}  Words: {}  Participants: {}",
        stats.total_messages,
        stats.total_words,
        stats.senders.len()
    )?;
    if let (Some(first), Some(last)) = (stats.first_message, stats.last_message) {
        writeln!(
            out,
            "Period: {} .. {}",
            first.format(TIMESTAMP_FORMAT),
            last.format(TIMESTAMP_FORMAT)
        )?;
    }
    if let Some(day) = &stats.most_active_day {
        writeln!(out, "Most active day: {} ({} messages)", day.date, day.count)?;
    }
    if let Some(hour) = stats.busiest_hour() {
        writeln!(out, "Busiest hour: {:02}:00 ({} messages)", hour.hour, hour.count)?;
    }

    if stats.is_empty() {
        return Ok(());
    }

    section(out, "Participants")?;
    let name_width = label_width(stats.senders.iter().map(|s| s.sender.as_str()));
    for s in &stats.senders {
        writeln!(
            out,
            "  {:<name_width$}  {:>6} messages  {:>7} words",
            s.sender, s.messages, s.words
        )?;
    }

    section(out, "Average messages per weekday")?;
    let max_avg = stats
        .weekday_averages
        .iter()
        .map(|d| d.avg)
        .fold(0.0_f64, f64::max);
    for d in &stats.weekday_averages {
        let filled = scale(d.avg, max_avg);
        writeln!(out, "  {:<9}  {:<BAR_WIDTH$}  {:.2}", d.day, bar(filled), d.avg)?;
    }

    section(out, "Messages per hour")?;
    let max_hour = stats.hourly.iter().map(|h| h.count).max().unwrap_or(0);
    for h in &stats.hourly {
        writeln!(
            out,
            "  {:02}  {:<BAR_WIDTH$}  {}",
            h.hour,
            bar(scale_count(h.count, max_hour)),
            h.count
        )?;
    }

    section(out, "Messages per month")?;
    let max_month = stats.monthly.iter().map(|m| m.count).max().unwrap_or(0);
    for m in &stats.monthly {
        writeln!(
            out,
            "  {}  {:<BAR_WIDTH$}  {}",
            m.month,
            bar(scale_count(m.count, max_month)),
            m.count
        )?;
    }

    section(out, &format!("Last {} days", stats.daily.len()))?;
    let day_width = label_width(stats.daily.iter().map(|d| d.date.as_str()));
    let max_day = stats.daily.iter().map(|d| d.count).max().unwrap_or(0);
    for d in &stats.daily {
        writeln!(
            out,
            "  {:<day_width$}  {:<BAR_WIDTH$}  {}",
            d.date,
            bar(scale_count(d.count, max_day)),
            d.count
        )?;
    }

    section(out, "Top words")?;
    if stats.top_words.is_empty() {
        writeln!(out, "  (none)")?;
    }
    for (rank, w) in stats.top_words.iter().enumerate() {
        writeln!(out, "  {:>2}. {} ({})", rank + 1, w.word, w.count)?;
    }

    section(out, "Top phrases")?;
    if stats.top_phrases.is_empty() {
        writeln!(out, "  (none)")?;
    }
    for (rank, p) in stats.top_phrases.iter().enumerate() {
        writeln!(out, "  {:>2}. {} ({})", rank + 1, p.phrase, p.count)?;
    }
    Ok(())
}

fn section(out: &mut String, title: &str) -> std::fmt::Result {
    writeln!(out)?;
    writeln!(out, "{title}")?;
    writeln!(out, "{}", "-".repeat(title.chars().count()))
}

fn label_width<'a>(labels: impl Iterator<Item = &'a str>) -> usize {
    labels.map(|l| l.chars().count()).max().unwrap_or(0)
}

fn scale(value: f64, max: f64) -> usize {
    if max <= 0.0 {
        return 0;
    }
    ((value / max) * BAR_WIDTH as f64).round() as usize
}

fn scale_count(value: u64, max: u64) -> usize {
    scale(value as f64, max as f64)
}

fn bar(filled: usize) -> String {
    "#".repeat(filled.min(BAR_WIDTH))
}
