//! Builds a [`StatsBundle`] from normalized messages.
//!
//! Each metric is one linear pass over the rows. The aggregator only reads
//! the rows; a malformed `hour`, `weekday` or `date` value removes the row
//! from the affected metric and nothing else.
//!
//! # Example
//!
//! ```
//! use chatstats::core::aggregate::aggregate;
//! use chatstats::ChatMessage;
//!
//! let rows = vec![
//!     ChatMessage::new("Alice", "good morning everyone")
//!         .with_date_time("1/1/2023", "08:00")
//!         .with_hour("8")
//!         .with_weekday("Sunday"),
//!     ChatMessage::new("Bob", "morning")
//!         .with_date_time("1/1/2023", "08:05")
//!         .with_hour("8")
//!         .with_weekday("Sunday"),
//! ];
//!
//! let stats = aggregate(&rows);
//! assert_eq!(stats.total_messages, 2);
//! assert_eq!(stats.word_count("morning"), Some(2));
//! assert_eq!(stats.hourly[8].count, 2);
//! ```
//!
//! # Ordering notes
//!
//! - Ties in word and phrase rankings keep the order in which the keys were
//!   first met while walking the rows.
//! - `most_active_day` on a tie is the date key met first.
//! - The daily timeline is keyed by the raw `date` string and ordered by
//!   reading it as day/month/year; unreadable keys sort first (1970-01-01).

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::config::StatsConfig;
use crate::core::models::{
    DayCount, HourCount, MonthCount, PhraseCount, SenderStats, StatsBundle, WeekdayAverage,
    WordCount,
};
use crate::core::text::{self, FrequencyTable};
use crate::message::{ChatMessage, WEEKDAY_NAMES};
use crate::parsing::date;

/// Aggregates with the default [`StatsConfig`].
pub fn aggregate(rows: &[ChatMessage]) -> StatsBundle {
    aggregate_with(rows, &StatsConfig::default())
}

/// Aggregates with explicit limits.
///
/// Pure: the same rows and config always give an identical bundle. An empty
/// slice gives a bundle with zero counts.
pub fn aggregate_with(rows: &[ChatMessage], config: &StatsConfig) -> StatsBundle {
    let senders = sender_stats(rows);
    let total_words = senders.iter().map(|s| s.words).sum();

    let bundle = StatsBundle {
        total_messages: rows.len() as u64,
        total_words,
        first_message: rows.iter().map(ChatMessage::timestamp).min(),
        last_message: rows.iter().map(ChatMessage::timestamp).max(),
        senders,
        weekday_averages: weekday_averages(rows),
        hourly: hourly_histogram(rows),
        daily: daily_timeline(rows, config.daily_window),
        monthly: monthly_timeline(rows),
        top_words: top_words(rows, config),
        top_phrases: top_phrases(rows, config),
        most_active_day: most_active_day(rows),
    };

    log::debug!(
        "aggregated {} messages: {} senders, {} months, {} ranked words, {} ranked phrases",
        bundle.total_messages,
        bundle.senders.len(),
        bundle.monthly.len(),
        bundle.top_words.len(),
        bundle.top_phrases.len()
    );
    bundle
}

/// Message and word counts per sender, in order of first appearance.
pub fn sender_stats(rows: &[ChatMessage]) -> Vec<SenderStats> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut stats: Vec<SenderStats> = Vec::new();

    for row in rows {
        let i = *index.entry(row.sender.as_str()).or_insert_with(|| {
            stats.push(SenderStats {
                sender: row.sender.clone(),
                messages: 0,
                words: 0,
            });
            stats.len() - 1
        });
        stats[i].messages += 1;
        stats[i].words += row.word_count() as u64;
    }
    stats
}

/// Average messages per observed date for each weekday, Monday first.
///
/// The divisor is the number of distinct `date` values seen for that
/// weekday, not the number of weeks in the dataset.
pub fn weekday_averages(rows: &[ChatMessage]) -> Vec<WeekdayAverage> {
    let mut totals = [0u64; 7];
    let mut dates: [HashSet<&str>; 7] = Default::default();

    for row in rows {
        if let Some(day) = row.weekday_value() {
            let i = day.num_days_from_monday() as usize;
            totals[i] += 1;
            dates[i].insert(row.date.as_str());
        }
    }

    WEEKDAY_NAMES
        .iter()
        .zip(totals.iter().zip(dates.iter()))
        .map(|(name, (&total, seen))| {
            let days = seen.len() as u64;
            let avg = if days > 0 {
                total as f64 / days as f64
            } else {
                0.0
            };
            WeekdayAverage {
                day: (*name).to_string(),
                avg,
                total,
                days,
            }
        })
        .collect()
}

/// Twenty-four buckets keyed by the supplied `hour` column.
pub fn hourly_histogram(rows: &[ChatMessage]) -> Vec<HourCount> {
    let mut counts = [0u64; 24];
    for hour in rows.iter().filter_map(ChatMessage::hour_value) {
        counts[usize::from(hour)] += 1;
    }

    counts
        .iter()
        .enumerate()
        .map(|(hour, &count)| HourCount {
            hour: hour as u8,
            count,
        })
        .collect()
}

/// Messages per `YYYY-MM` of the resolved timestamp, chronological.
pub fn monthly_timeline(rows: &[ChatMessage]) -> Vec<MonthCount> {
    let mut months: BTreeMap<String, u64> = BTreeMap::new();
    for row in rows {
        *months
            .entry(row.timestamp.format("%Y-%m").to_string())
            .or_insert(0) += 1;
    }

    months
        .into_iter()
        .map(|(month, count)| MonthCount { month, count })
        .collect()
}

/// Messages per raw `date` key, keeping only the latest `window` days.
pub fn daily_timeline(rows: &[ChatMessage], window: usize) -> Vec<DayCount> {
    let mut days: Vec<(String, u64)> = date_counts(rows)
        .iter()
        .map(|(key, count)| (key.to_owned(), count))
        .collect();
    days.sort_by_cached_key(|(key, _)| date::day_sort_key(key));

    let skip = days.len().saturating_sub(window);
    days.into_iter()
        .skip(skip)
        .map(|(date, count)| DayCount { date, count })
        .collect()
}

/// The raw `date` key with the most messages; the first one met on ties.
pub fn most_active_day(rows: &[ChatMessage]) -> Option<DayCount> {
    date_counts(rows).max().map(|(date, count)| DayCount {
        date: date.to_owned(),
        count,
    })
}

/// Raw counts of cleaned words of at least `min_word_len` chars.
pub fn word_frequencies(rows: &[ChatMessage], config: &StatsConfig) -> FrequencyTable {
    let mut table = FrequencyTable::new();
    for row in rows {
        for word in text::tokens(&row.message, config.min_word_len) {
            table.add(&word);
        }
    }
    table
}

/// Raw counts of two- and three-token phrases, before the minimum-count cut.
pub fn phrase_frequencies(rows: &[ChatMessage], config: &StatsConfig) -> FrequencyTable {
    let mut table = FrequencyTable::new();
    for row in rows {
        let tokens = text::tokens(&row.message, config.min_phrase_token_len);
        for phrase in text::phrases(&tokens) {
            table.add(&phrase);
        }
    }
    table
}

/// Most frequent words, descending.
pub fn top_words(rows: &[ChatMessage], config: &StatsConfig) -> Vec<WordCount> {
    word_frequencies(rows, config)
        .top(config.top_words, 1)
        .into_iter()
        .map(|(word, count)| WordCount { word, count })
        .collect()
}

/// Most frequent phrases seen at least `min_phrase_count` times, descending.
pub fn top_phrases(rows: &[ChatMessage], config: &StatsConfig) -> Vec<PhraseCount> {
    phrase_frequencies(rows, config)
        .top(config.top_phrases, config.min_phrase_count)
        .into_iter()
        .map(|(phrase, count)| PhraseCount { phrase, count })
        .collect()
}

fn date_counts(rows: &[ChatMessage]) -> FrequencyTable {
    let mut table = FrequencyTable::new();
    for row in rows {
        table.add(&row.date);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msg(sender: &str, text: &str, date_str: &str, hour: &str, weekday: &str) -> ChatMessage {
        ChatMessage::new(sender, text)
            .with_date_time(date_str, format!("{hour}:00"))
            .with_hour(hour)
            .with_weekday(weekday)
    }

    #[test]
    fn test_empty_input_is_zeroed() {
        let stats = aggregate(&[]);
        assert!(stats.is_empty());
        assert_eq!(stats.total_words, 0);
        assert!(stats.senders.is_empty());
        assert_eq!(stats.hourly.len(), 24);
        assert!(stats.hourly.iter().all(|h| h.count == 0));
        assert_eq!(stats.weekday_averages.len(), 7);
        assert!(stats.weekday_averages.iter().all(|w| w.avg == 0.0));
        assert!(stats.daily.is_empty());
        assert!(stats.monthly.is_empty());
        assert!(stats.most_active_day.is_none());
        assert!(stats.first_message.is_none());
    }

    #[test]
    fn test_sender_stats() {
        let rows = vec![
            msg("Bob", "one two", "1/1/2023", "10", "Sunday"),
            msg("Alice", "  three  ", "1/1/2023", "10", "Sunday"),
            msg("Bob", "", "1/1/2023", "10", "Sunday"),
        ];
        let senders = sender_stats(&rows);
        assert_eq!(
            senders,
            vec![
                SenderStats {
                    sender: "Bob".into(),
                    messages: 2,
                    words: 2
                },
                SenderStats {
                    sender: "Alice".into(),
                    messages: 1,
                    words: 1
                },
            ]
        );
    }

    #[test]
    fn test_weekday_average_uses_distinct_dates() {
        let rows = vec![
            msg("A", "x", "1/1/2023", "10", "Sunday"),
            msg("A", "x", "1/1/2023", "11", "Sunday"),
            msg("A", "x", "1/1/2023", "12", "Sunday"),
            msg("A", "x", "8/1/2023", "10", "Sunday"),
            msg("A", "x", "2/1/2023", "10", "Monday"),
            msg("A", "x", "3/1/2023", "10", "Someday"),
        ];
        let averages = weekday_averages(&rows);
        assert_eq!(averages[0].day, "Monday");
        assert_eq!(averages[0].avg, 1.0);

        let sunday = &averages[6];
        assert_eq!(sunday.day, "Sunday");
        assert_eq!(sunday.total, 4);
        assert_eq!(sunday.days, 2);
        assert_eq!(sunday.avg, 2.0);

        // Tuesday never observed
        assert_eq!(averages[1].avg, 0.0);
        assert_eq!(averages[1].days, 0);
        // "Someday" is excluded everywhere
        assert_eq!(averages.iter().map(|w| w.total).sum::<u64>(), 5);
    }

    #[test]
    fn test_hourly_excludes_bad_hours() {
        let rows = vec![
            msg("A", "x", "1/1/2023", "0", "Sunday"),
            msg("A", "x", "1/1/2023", "23", "Sunday"),
            msg("A", "x", "1/1/2023", "23", "Sunday"),
        ];
        let mut rows = rows;
        rows.push(ChatMessage::new("A", "x").with_hour("24"));
        rows.push(ChatMessage::new("A", "x").with_hour("late"));

        let hourly = hourly_histogram(&rows);
        assert_eq!(hourly[0].count, 1);
        assert_eq!(hourly[23].count, 2);
        assert_eq!(hourly.iter().map(|h| h.count).sum::<u64>(), 3);
    }

    #[test]
    fn test_monthly_timeline_sorted() {
        let rows = vec![
            msg("A", "x", "15/03/2023", "10", "Wednesday"),
            msg("A", "x", "1/12/2022", "10", "Thursday"),
            msg("A", "x", "20/03/2023", "10", "Monday"),
        ];
        let monthly = monthly_timeline(&rows);
        assert_eq!(
            monthly,
            vec![
                MonthCount {
                    month: "2022-12".into(),
                    count: 1
                },
                MonthCount {
                    month: "2023-03".into(),
                    count: 2
                },
            ]
        );
    }

    #[test]
    fn test_daily_timeline_orders_by_day_month_year() {
        let rows = vec![
            msg("A", "x", "2/2/2023", "10", "Thursday"),
            msg("A", "x", "10/1/2023", "10", "Tuesday"),
            msg("A", "x", "10/1/2023", "11", "Tuesday"),
            msg("A", "x", "bogus", "10", "Tuesday"),
        ];
        let daily = daily_timeline(&rows, 30);
        let keys: Vec<_> = daily.iter().map(|d| d.date.as_str()).collect();
        assert_eq!(keys, ["bogus", "10/1/2023", "2/2/2023"]);
        assert_eq!(daily[1].count, 2);
    }

    #[test]
    fn test_daily_timeline_keeps_latest_window() {
        let rows: Vec<_> = (1..=40)
            .map(|day| {
                let date_str = format!("{}/{}/2023", (day - 1) % 28 + 1, (day - 1) / 28 + 1);
                msg("A", "x", &date_str, "10", "Monday")
            })
            .collect();
        let daily = daily_timeline(&rows, 30);
        assert_eq!(daily.len(), 30);
        assert_eq!(daily.first().unwrap().date, "11/1/2023");
        assert_eq!(daily.last().unwrap().date, "12/2/2023");
    }

    #[test]
    fn test_most_active_day() {
        let mut rows = Vec::new();
        for _ in 0..3 {
            rows.push(msg("A", "x", "1/1/2023", "10", "Sunday"));
        }
        for _ in 0..5 {
            rows.push(msg("A", "x", "2/1/2023", "10", "Monday"));
        }
        assert_eq!(
            most_active_day(&rows),
            Some(DayCount {
                date: "2/1/2023".into(),
                count: 5
            })
        );
    }

    #[test]
    fn test_most_active_day_tie_keeps_first_seen() {
        let rows = vec![
            msg("A", "x", "1/1/2023", "10", "Sunday"),
            msg("A", "x", "2/1/2023", "10", "Monday"),
        ];
        assert_eq!(most_active_day(&rows).unwrap().date, "1/1/2023");
    }

    #[test]
    fn test_words_and_phrases_threshold() {
        let rows = vec![
            msg("A", "a bb ccc", "1/1/2023", "10", "Sunday"),
            msg("B", "a bb ccc", "1/1/2023", "10", "Sunday"),
        ];
        let config = StatsConfig::default();

        assert_eq!(word_frequencies(&rows, &config).get("ccc"), 2);
        assert_eq!(word_frequencies(&rows, &config).get("bb"), 0);
        assert_eq!(phrase_frequencies(&rows, &config).get("bb ccc"), 2);

        let stats = aggregate(&rows);
        assert_eq!(stats.word_count("ccc"), Some(2));
        assert!(stats.top_phrases.is_empty());
    }

    #[test]
    fn test_phrases_ranked_at_three() {
        let rows: Vec<_> = (0..3)
            .map(|_| msg("A", "see you later", "1/1/2023", "10", "Sunday"))
            .collect();
        let stats = aggregate(&rows);
        assert_eq!(stats.phrase_count("see you"), Some(3));
        assert_eq!(stats.phrase_count("see you later"), Some(3));
        assert_eq!(stats.phrase_count("you later"), Some(3));
    }

    #[test]
    fn test_phrases_do_not_cross_messages() {
        let rows: Vec<_> = (0..3)
            .flat_map(|_| {
                vec![
                    msg("A", "hello there", "1/1/2023", "10", "Sunday"),
                    msg("A", "friend", "1/1/2023", "10", "Sunday"),
                ]
            })
            .collect();
        let phrases = phrase_frequencies(&rows, &StatsConfig::default());
        assert_eq!(phrases.get("there friend"), 0);
        assert_eq!(phrases.get("hello there"), 3);
    }

    #[test]
    fn test_top_words_limit() {
        let text: String = (0..50).map(|i| format!("word{i:02} ")).collect();
        let rows = vec![msg("A", &text, "1/1/2023", "10", "Sunday")];
        let stats = aggregate(&rows);
        assert_eq!(stats.top_words.len(), 30);
        // all tied: first-seen order
        assert_eq!(stats.top_words[0].word, "word00");
        assert_eq!(stats.top_words[29].word, "word29");

        let stats = aggregate_with(&rows, &StatsConfig::new().with_top_words(5));
        assert_eq!(stats.top_words.len(), 5);
    }

    #[test]
    fn test_aggregate_is_deterministic() {
        let rows = vec![
            msg("A", "alpha beta gamma", "1/1/2023", "10", "Sunday"),
            msg("B", "beta gamma delta", "2/1/2023", "11", "Monday"),
            msg("C", "gamma delta alpha", "3/1/2023", "12", "Tuesday"),
        ];
        assert_eq!(aggregate(&rows), aggregate(&rows));
    }

    #[test]
    fn test_first_and_last_message() {
        let rows = vec![
            msg("A", "x", "1/1/2023", "10", "Sunday"),
            msg("A", "x", "5/1/2023", "18", "Thursday"),
        ];
        let stats = aggregate(&rows);
        assert_eq!(
            stats.first_message.unwrap().to_string(),
            "2023-01-01 10:00:00"
        );
        assert_eq!(
            stats.last_message.unwrap().to_string(),
            "2023-01-05 18:00:00"
        );
    }
}
