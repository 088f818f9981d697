use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use countdown_core::{
    item_views, parse_end_instant, CountdownClock, EnglishLocalizer, ItemView, Tick,
    TimeRemaining, DEFAULT_LOCALE, TICK_INTERVAL_MS,
};

#[derive(Parser, Debug)]
#[command(
    name = "countdown-cli",
    about = "Print the time left until an end instant."
)]
struct Args {
    /// End instant, e.g. 2099-01-01T00:00:00Z.
    #[arg(short, long)]
    ends: String,

    /// Keep printing once per second until the end instant.
    #[arg(short, long)]
    watch: bool,

    /// Print the remaining time as JSON.
    #[arg(long, conflicts_with = "watch")]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let end = parse_end_instant(&args.ends)
        .with_context(|| format!("invalid --ends value {:?}", args.ends))?;
    let end_ms = end.timestamp_millis();

    if args.watch {
        let mut stdout = io::stdout().lock();
        watch(end_ms, now_ms, pause, &mut stdout)?;
        writeln!(stdout, "Ended at {end}")?;
        return Ok(());
    }

    let remaining = TimeRemaining::between(end_ms, now_ms());
    if args.json {
        println!("{}", serde_json::to_string_pretty(&remaining)?);
    } else {
        println!("{}", format_line(&remaining));
    }

    Ok(())
}

/// Write one line per tick until the clock expires.
fn watch(
    end_ms: i64,
    mut now: impl FnMut() -> i64,
    mut wait: impl FnMut(),
    out: &mut impl Write,
) -> io::Result<()> {
    let mut clock = CountdownClock::new();
    clock.start(end_ms, ());
    while let Tick::Update(remaining) = clock.tick(now()) {
        writeln!(out, "{}", format_line(&remaining))?;
        wait();
    }
    Ok(())
}

fn pause() {
    thread::sleep(Duration::from_millis(u64::from(TICK_INTERVAL_MS)));
}

fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

fn format_line(remaining: &TimeRemaining) -> String {
    item_views(remaining, DEFAULT_LOCALE, &EnglishLocalizer)
        .iter()
        .map(|ItemView { number_text, unit_text, .. }| format!("{number_text} {unit_text}"))
        .collect::<Vec<_>>()
        .join("  ")
}
