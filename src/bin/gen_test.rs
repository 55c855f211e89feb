//! Toxic test data generator for stress testing chatstats.
//!
//! Usage: cargo run --bin gen_test --features gen-test -- [messages] [output]
//! Example: cargo run --bin gen_test --features gen-test -- 100000 heavy_test.csv

use std::env;
use std::error::Error;
use std::fs::File;
use std::io::BufWriter;
use std::time::Instant;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Timelike};
use rand::Rng;
use rand::seq::SliceRandom;

use chatstats::message::weekday_name;
use chatstats::parser::REQUIRED_COLUMNS;

const EMOJIS: &[&str] = &[
    "😀", "😂", "🤣", "😍", "🤔", "🙄", "😱", "🤯", "💀", "🔥", "👍", "❤️", "💔", "🏳️‍🌈",
    "👨‍👩‍👧‍👦", "🤷‍♀️",
];

const SENDERS: &[&str] = &[
    "Alice",
    "Bob",
    "Иван",
    "Мария",
    "村上",
    "محمد",
    "User,With,Commas",
    "User\"With\"Quotes",
    "",
    "🔥FireUser🔥",
];

const WORDS: &[&str] = &[
    "hello", "pizza", "tonight", "meeting", "tomorrow", "coffee", "station", "weekend", "call",
    "me", "ok", "see", "you", "later", "good", "morning", "lol", "привет", "как", "дела",
];

fn main() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = env::args().collect();

    let count: usize = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(100_000);
    let output = args.get(2).map_or("heavy_test.csv", String::as_str);

    println!("Toxic Generator");
    println!("   Messages: {count}");
    println!("   Output:   {output}");
    println!();

    let file = File::create(output)?;
    let mut writer = csv::Writer::from_writer(BufWriter::with_capacity(1024 * 1024, file));
    writer.write_record(REQUIRED_COLUMNS)?;

    let mut rng = rand::thread_rng();
    let start = Instant::now();
    let mut at = NaiveDate::from_ymd_opt(2022, 11, 1)
        .and_then(|d| d.and_hms_opt(8, 0, 0))
        .ok_or("invalid start date")?;

    for i in 0..count {
        at += Duration::minutes(rng.gen_range(0..=240));
        let sender = SENDERS.choose(&mut rng).copied().unwrap_or("Alice");
        let record = generate_row(&mut rng, i, at, sender);
        writer.write_record(&record)?;

        if (i + 1) % 10_000 == 0 {
            let mps = (i + 1) as f64 / start.elapsed().as_secs_f64();
            eprint!("\r   Generated {}/{} ({:.0} msg/s)", i + 1, count, mps);
        }
    }
    writer.flush()?;

    let elapsed = start.elapsed();
    println!("\n\nDone!");
    println!("   Time:  {:.2}s", elapsed.as_secs_f64());
    println!("   Speed: {:.0} msg/s", count as f64 / elapsed.as_secs_f64());
    Ok(())
}

/// Builds one CSV record. Every 50th row carries a defect the loader has to
/// degrade gracefully on.
fn generate_row(rng: &mut impl Rng, index: usize, at: NaiveDateTime, sender: &str) -> [String; 7] {
    let date = match index % 3 {
        0 => format!("{}/{}/{}", at.day(), at.month(), at.year()),
        1 => format!("{:02}/{:02}/{:02}", at.day(), at.month(), at.year() % 100),
        _ => format!("{}-{}-{}", at.day(), at.month(), at.year()),
    };
    let time = if index % 7 == 0 {
        at.format("%H:%M:%S").to_string()
    } else {
        at.format("%H:%M").to_string()
    };
    let mut hour = at.hour().to_string();
    let mut weekday = weekday_name(at.weekday()).to_string();
    let mut date_col = date;

    match index % 50 {
        10 => hour = "25".to_string(),
        20 => weekday = "Funday".to_string(),
        30 => date_col = "yesterday".to_string(),
        40 => hour.clear(),
        _ => {}
    }

    [
        at.format("%Y-%m-%d %H:%M").to_string(),
        date_col,
        time,
        hour,
        weekday,
        sender.to_string(),
        generate_message(rng, index),
    ]
}

fn generate_message(rng: &mut impl Rng, index: usize) -> String {
    match index % 12 {
        0..=5 => {
            let len = rng.gen_range(1..12);
            (0..len)
                .filter_map(|_| WORDS.choose(rng).copied())
                .collect::<Vec<_>>()
                .join(" ")
        }
        6 => format!("Message with, commas, and \"quotes\" #{index}"),
        7 => format!("Message with\nnewlines\nand\ttabs #{index}"),
        8 => {
            let emojis: String = (0..20).filter_map(|_| EMOJIS.choose(rng).copied()).collect();
            format!("Emoji spam: {emojis}")
        }
        9 => String::new(),
        10 => "see you later ".repeat(rng.gen_range(1..50)),
        _ => "Z̷̧a̶̢l̸̨g̵̡o̴̧ text!!! ???".to_string(),
    }
}
