//! Replay typed text as keystrokes.

use std::io::BufRead;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use clap::Args;
use mechvibe_core::ProfileId;
use mechvibe_io::{Dispatcher, PlayOutcome};

use super::common::{describe_outcome, load_config, start_engine};

#[derive(Args)]
pub struct TypeArgs {
    /// Text to type (reads lines from stdin when omitted)
    #[arg(value_name = "TEXT")]
    text: Option<String>,

    /// Delay between keystrokes in milliseconds
    #[arg(short, long, default_value = "90")]
    delay: u64,

    /// Switch profile (defaults to the configured one)
    #[arg(short, long)]
    profile: Option<ProfileId>,

    /// Pan keys by their position on the board
    #[arg(long)]
    pan: bool,
}

#[derive(Debug, Default, PartialEq, Eq)]
struct Tally {
    scheduled: usize,
    dropped: usize,
}

pub fn run(args: TypeArgs, config_path: Option<&Path>) -> anyhow::Result<()> {
    let mut config = load_config(config_path)?;
    if let Some(profile) = args.profile {
        config.settings.current_switch = profile;
    }
    config.settings.stereo_panning |= args.pan;

    let dispatcher = start_engine(&config)?;
    dispatcher.wait_for_switch(config.engine.load_timeout() * 2);
    println!(
        "Typing on {} ({} audio)",
        dispatcher.active_profile(),
        dispatcher.audio_mode()
    );

    let running = Arc::new(AtomicBool::new(true));
    let r = Arc::clone(&running);
    ctrlc::set_handler(move || {
        if r.swap(false, Ordering::SeqCst) {
            println!("\nStopping... (press Ctrl+C again to quit)");
        } else {
            std::process::exit(130);
        }
    })?;

    let delay = Duration::from_millis(args.delay);
    let mut tally = Tally::default();

    match args.text {
        Some(text) => type_line(&dispatcher, &text, delay, &running, &mut tally),
        None => {
            println!("Type a line and press Enter to hear it. Ctrl+D to quit.\n");
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                let line = line?;
                running.store(true, Ordering::SeqCst);
                type_line(&dispatcher, &line, delay, &running, &mut tally);
            }
        }
    }

    // Let the last sound ring out
    thread::sleep(Duration::from_millis(400));
    println!(
        "{} keystrokes played, {} dropped",
        tally.scheduled, tally.dropped
    );
    Ok(())
}

fn type_line(
    dispatcher: &Dispatcher,
    line: &str,
    delay: Duration,
    running: &AtomicBool,
    tally: &mut Tally,
) {
    let keys = line
        .chars()
        .map(key_for_char)
        .chain(std::iter::once(("Enter".to_string(), "Enter".to_string())));

    for (label, code) in keys {
        if !running.load(Ordering::SeqCst) {
            break;
        }
        let outcome = dispatcher.play_key(&label, &code, None);
        tracing::debug!(
            label = %label,
            code = %code,
            outcome = %describe_outcome(&outcome),
            "keystroke"
        );
        record(tally, &outcome);
        thread::sleep(delay);
    }
}

fn record(tally: &mut Tally, outcome: &PlayOutcome) {
    if outcome.is_scheduled() {
        tally.scheduled += 1;
    } else {
        tally.dropped += 1;
    }
}

/// Label and code a keyboard event would report for `c` on a US layout.
fn key_for_char(c: char) -> (String, String) {
    match c {
        ' ' => (" ".to_string(), "Space".to_string()),
        '\n' | '\r' => ("Enter".to_string(), "Enter".to_string()),
        '\t' => ("Tab".to_string(), "Tab".to_string()),
        '\u{8}' => ("Backspace".to_string(), "Backspace".to_string()),
        c if c.is_ascii_alphabetic() => (c.to_string(), format!("Key{}", c.to_ascii_uppercase())),
        c if c.is_ascii_digit() => (c.to_string(), format!("Digit{c}")),
        c => (c.to_string(), String::new()),
    }
}
