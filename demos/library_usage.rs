//! Example: Using chatstats as a library
//!
//! This example demonstrates how to use chatstats in your own projects.
//!
//! Run with: cargo run --example library_usage

use chatstats::prelude::*;

const EXPORT: &str = "datetime,date,time,hour,weekday,sender,message
2024-03-02 09:10,2/3/2024,09:10,9,Saturday,Alice,Morning! Coffee at the station?
2024-03-02 09:12,2/3/2024,09:12,9,Saturday,Bob,coffee at the station sounds good
2024-03-01 22:40,1/3/2024,22:40,22,Friday,Alice,Good night
2024-03-04 12:00,04/03/24,12:00,12,Monday,Carol,coffee at the station again
";

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    println!("=== chatstats Library Usage Examples ===\n");

    // Example 1: Parse an export held in memory
    println!("1. Parsing an export (rows come back sorted by timestamp):");
    let messages = ChatCsvParser::new().parse_str(EXPORT)?;
    for msg in &messages {
        println!("   [{}] {}: {}", msg.timestamp, msg.sender, msg.message);
    }

    // Example 2: Aggregate statistics
    println!("\n2. Statistics:");
    let stats = aggregate(&messages);
    for sender in &stats.senders {
        println!(
            "   {}: {} messages, {} words",
            sender.sender, sender.messages, sender.words
        );
    }
    if let Some(day) = &stats.most_active_day {
        println!("   Most active day: {} ({} messages)", day.date, day.count);
    }
    for phrase in &stats.top_phrases {
        println!("   Phrase '{}' x{}", phrase.phrase, phrase.count);
    }

    // Example 3: Tuned limits
    println!("\n3. Top 3 words only:");
    let small = aggregate_with(&messages, &StatsConfig::new().with_top_words(3));
    for word in &small.top_words {
        println!("   {} ({})", word.word, word.count);
    }

    // Example 4: Filter the conversation view
    println!("\n4. Messages mentioning 'coffee' since March 2:");
    let filter = ViewFilter::new()
        .with_search("coffee")
        .with_date_from("2024-03-02")?;
    let view = filter.apply(&messages);
    print!("{}", render_conversation(&view));

    // Example 5: Export as CSV
    println!("\n5. CSV export:");
    print!("{}", to_csv(&view)?);

    // Example 6: JSON for charting tools
    #[cfg(feature = "json-output")]
    {
        println!("\n6. Hourly histogram as JSON:");
        println!("   {}", to_json(&stats.hourly[9..13], false)?);
    }

    // Example 7: Session with serialized uploads
    println!("\n7. Session:");
    let mut session = Session::new();
    let ticket = session.begin_upload("export.csv")?;
    match session.begin_upload("other.csv") {
        Err(e) => println!("   Second upload rejected: {e}"),
        Ok(_) => println!("   Unexpected: second upload accepted"),
    }
    session.complete_upload(ticket, Ok(EXPORT.as_bytes().to_vec()))?;
    session.set_tab(Tab::Chat);
    session.set_search("night");
    let matching = session.conversation().len();
    println!(
        "   Loaded {} messages; {} match '{}'",
        session.dataset().map_or(0, |d| d.len()),
        matching,
        session.search()
    );

    // Example 8: Full text report
    println!("\n8. Text report:\n");
    print!("{}", render_stats(&stats));

    Ok(())
}
