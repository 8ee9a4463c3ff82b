//! chatlore - Chat Export Analytics CLI
//!
//! Reads an exported chat log and prints who talks most, what words and
//! emoji dominate, how fast people respond, and when the chat is busiest.

use anyhow::{Context, Result};
use chatlore_core::{analyze_file, ChatReport, Config};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "chatlore")]
#[command(about = "Descriptive statistics for exported chat logs")]
#[command(version)]
struct Args {
    /// Path to the exported chat JSON (falls back to the configured default)
    input: Option<PathBuf>,

    /// Export format (md = markdown, json = JSON)
    #[arg(long)]
    export: Option<String>,

    /// Print the raw response-time samples as well
    #[arg(long)]
    response_times: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = Config::load().context("failed to load configuration")?;
    let _log_guard = chatlore_core::logging::init(&config.logging).ok();

    let input = args
        .input
        .unwrap_or_else(|| PathBuf::from(&config.report.default_input));

    tracing::info!(input = %input.display(), "Analyzing export");
    let report = analyze_file(&input)
        .with_context(|| format!("failed to analyze {}", input.display()))?;

    match args.export.as_deref() {
        Some("json") => print_json(&report)?,
        Some("md") => print_markdown(&report),
        Some(other) => anyhow::bail!("Unknown export format: {}. Use 'md' or 'json'", other),
        None => print_terminal(&report, args.response_times),
    }

    Ok(())
}

fn print_json(report: &ChatReport) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

fn print_terminal(report: &ChatReport, show_response_times: bool) {
    println!();
    println!("===== Chat Analysis =====");
    println!();

    if report.valid_messages == 0 {
        println!("  No valid messages found.");
        println!();
        return;
    }

    println!("Total Messages Sent by Each Person:");
    for (person, stats) in &report.senders {
        println!("  {}: {}", person, stats.messages);
    }

    println!("\nNumber of Words Sent by Each Person:");
    for (person, stats) in &report.senders {
        println!("  {}: {}", person, stats.words);
    }

    println!("\nTotal Characters Sent by Each Person:");
    for (person, stats) in &report.senders {
        println!("  {}: {}", person, stats.characters);
    }

    println!("\nUnique Words Used by Each Person:");
    for (person, stats) in &report.senders {
        println!("  {}: {}", person, stats.distinct_words);
    }

    println!("\nDays with No Messages Sent:");
    println!("  {}", report.days_with_no_messages);

    println!("\nDays Only One Person Sent Messages:");
    for (person, stats) in &report.senders {
        println!("  {}: {} days", person, stats.exclusive_days);
    }

    println!("\nPeak Activity by Hour:");
    for (hour, count) in report.hourly_activity.iter().enumerate() {
        if *count > 0 {
            println!("  {}:00 - {} messages", hour, count);
        }
    }

    println!("\nTop 10 Most Common Words Overall:");
    for (word, count) in &report.top_words {
        println!("  {}: {}", word, count);
    }

    println!("\nTop 10 Most Common Words by Each Person:");
    for (person, stats) in &report.senders {
        println!("  {}:", person);
        for (word, count) in &stats.top_words {
            println!("    {}: {}", word, count);
        }
    }

    println!("\nAverage Message Length (words):");
    for (person, stats) in &report.senders {
        println!("  {}: {:.2} words", person, stats.average_message_length);
    }

    println!("\nMost Frequently Used Emoji Overall:");
    match &report.top_emoji {
        Some((emoji, count)) => println!("  {} - {} times", emoji, count),
        None => println!("  none"),
    }

    println!("\nMost Frequently Used Emoji by Each Person:");
    for (person, stats) in &report.senders {
        match &stats.top_emoji {
            Some((emoji, count)) => println!("  {}: {} ({} times)", person, emoji, count),
            None => println!("  {}: none (0 times)", person),
        }
    }

    println!("\nTop 10 Words Before Emojis:");
    for (word, count) in &report.top_words_before_emoji {
        println!("  {}: {}", word, count);
    }

    println!("\nTotal Emoji Count:");
    println!("  {}", report.emoji_total);

    println!("\nEmoji Count Per Person:");
    for (person, stats) in &report.senders {
        println!("  {}: {}", person, stats.emoji_total);
    }

    println!("\nConversations Started by Each Person:");
    for (person, stats) in &report.senders {
        println!("  {}: {} times", person, stats.conversation_starts);
    }

    if let Some(mean) = report.mean_response_secs {
        println!("\nResponse Time:");
        println!(
            "  {} samples, mean {:.0}s",
            report.response_times_secs.len(),
            mean
        );
        if show_response_times {
            println!("  samples: {:?}", report.response_times_secs);
        }
    }

    println!();
}

fn print_markdown(report: &ChatReport) {
    println!("# Chat Analysis");
    println!();
    println!(
        "{} valid messages across {} active days (span {} days, {} silent).",
        report.valid_messages, report.active_days, report.total_days, report.days_with_no_messages
    );
    println!();

    println!("## Senders");
    println!();
    println!("| Person | Messages | Words | Characters | Unique Words | Avg Length | Starters | Exclusive Days |");
    println!("|---|---|---|---|---|---|---|---|");
    for (person, stats) in &report.senders {
        println!(
            "| {} | {} | {} | {} | {} | {:.2} | {} | {} |",
            person,
            stats.messages,
            stats.words,
            stats.characters,
            stats.distinct_words,
            stats.average_message_length,
            stats.conversation_starts,
            stats.exclusive_days
        );
    }
    println!();

    println!("## Top Words");
    println!();
    for (word, count) in &report.top_words {
        println!("- {} ({})", word, count);
    }
    println!();

    for (person, stats) in &report.senders {
        println!("### {}", person);
        println!();
        for (word, count) in &stats.top_words {
            println!("- {} ({})", word, count);
        }
        println!();
    }

    println!("## Emoji");
    println!();
    println!("Total emoji: {}", report.emoji_total);
    match &report.top_emoji {
        Some((emoji, count)) => println!("Most frequent: {} ({} times)", emoji, count),
        None => println!("Most frequent: none"),
    }
    for (person, stats) in &report.senders {
        match &stats.top_emoji {
            Some((emoji, count)) => println!("- {}: {} ({} times)", person, emoji, count),
            None => println!("- {}: none", person),
        }
    }
    println!();

    if !report.top_words_before_emoji.is_empty() {
        println!("## Words Before Emoji");
        println!();
        for (word, count) in &report.top_words_before_emoji {
            println!("- {} ({})", word, count);
        }
        println!();
    }

    println!("## Activity by Hour");
    println!();
    println!("| Hour | Messages |");
    println!("|---|---|");
    for (hour, count) in report.hourly_activity.iter().enumerate() {
        if *count > 0 {
            println!("| {:02}:00 | {} |", hour, count);
        }
    }
    println!();

    if let Some(mean) = report.mean_response_secs {
        println!(
            "Mean response time: {:.0}s over {} samples.",
            mean,
            report.response_times_secs.len()
        );
    }
}
