//! Bengali Keyboard Trainer - adaptive typing drills for the Jatiya layout
//!
//! Single binary, crossterm front end around the proficiency engine:
//! lessons target the learner's weakest unlocked characters, and new keys
//! unlock as per-character proficiency crosses the threshold.

mod cli;
mod engine;
mod layout;
mod progress;

use clap::Parser;
use cli::display::Display;
use cli::input::{physical_key_from_char, InputHandler};
use engine::{check_unlock, evaluate, generate, merge_lesson, LessonMode, LessonSession};
use layout::Layout;
use progress::Store;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::error::Error;
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "Bengali Keyboard Trainer")]
#[command(about = "Adaptive Bengali (Jatiya layout) typing drills")]
struct Args {
    /// Directory holding progress, vocabulary, and settings
    #[arg(short, long, default_value = "data")]
    data_dir: PathBuf,

    /// Import a whitespace-separated vocabulary file and persist it
    #[arg(long)]
    vocab: Option<PathBuf>,

    /// Draw lessons from every unlocked character instead of the weakest few
    #[arg(long)]
    use_all: bool,

    /// Override the unlock proficiency threshold (0.0-1.0)
    #[arg(long)]
    threshold: Option<f32>,

    /// Seed for lesson shuffling (deterministic lessons)
    #[arg(long)]
    seed: Option<u64>,

    /// Manually lock or unlock a key (e.g. KeyQ), then exit.
    /// Unlocking out of sequence freezes automatic progression.
    #[arg(long, value_name = "KEY")]
    toggle_key: Option<String>,

    /// Print per-character statistics and exit
    #[arg(long)]
    profile: bool,

    /// Discard all progress and start fresh
    #[arg(long)]
    reset: bool,
}

/// Outcome of one lesson's event loop.
enum LessonOutcome {
    Completed(LessonSession, f64),
    Abandoned,
}

fn run_lesson(
    layout: &Layout,
    display: &Display,
    input: &InputHandler,
    text: &str,
) -> Result<LessonOutcome, Box<dyn Error>> {
    let mut session = LessonSession::new(text);
    let started = Instant::now();
    let mut last_accepted = started;
    let mut live = session.live_stats(started.elapsed());

    loop {
        display.clear()?;
        display.show_lesson(&session)?;
        display.show_live(&live)?;
        display.show_help()?;

        if session.is_finished() {
            return Ok(LessonOutcome::Completed(
                session,
                started.elapsed().as_secs_f64(),
            ));
        }

        let key = match input.read_key()? {
            Some(key) => key,
            None => continue,
        };
        if InputHandler::is_exit(&key) {
            return Ok(LessonOutcome::Abandoned);
        }
        let typed = match InputHandler::key_to_char(&key) {
            Some(c) => c,
            None => continue,
        };
        let physical = match physical_key_from_char(typed) {
            Some(pk) => pk,
            None => continue,
        };

        let now = Instant::now();
        let elapsed = now.duration_since(last_accepted);
        if let Some(keystroke) = evaluate(
            layout,
            physical.key_id,
            physical.shifted,
            session.text(),
            session.cursor(),
            elapsed,
        ) {
            last_accepted = now;
            session.apply(&keystroke);
            live = session.live_stats(started.elapsed());
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let layout = Layout::jatiya();
    let store = Store::new(&args.data_dir);

    let mut progress = if args.reset {
        store.reset_progress(&layout)?
    } else {
        store.load_progress(&layout)
    };

    let mut settings = store.load_settings();
    if let Some(threshold) = args.threshold {
        settings.proficiency_threshold = threshold.clamp(0.0, 1.0);
        store.save_settings(&settings)?;
    }
    if args.use_all {
        settings.use_all_unlocked_keys = true;
        store.save_settings(&settings)?;
    }

    if let Some(path) = &args.vocab {
        let content = fs::read_to_string(path)?;
        let words: Vec<String> = content
            .split_whitespace()
            .map(|w| w.to_string())
            .filter(|w| !w.is_empty())
            .collect();
        store.save_vocabulary(&words)?;
        println!("Imported {} vocabulary words", words.len());
    }

    if let Some(key) = &args.toggle_key {
        if layout.key(key).is_none() {
            return Err(format!("unknown key identifier: {}", key).into());
        }
        progress = progress.toggle_key(key);
        store.save_progress(&progress)?;
        println!("Unlocked keys: {}", progress.unlocked_keys.join(", "));
        return Ok(());
    }

    let display = Display::new();

    if args.profile {
        display.show_profile(&progress.character_summaries())?;
        return Ok(());
    }

    let vocabulary = store.load_vocabulary().unwrap_or_default();
    let mode = if settings.use_all_unlocked_keys {
        LessonMode::AllUnlocked
    } else {
        LessonMode::FocusWeakest
    };
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    println!("Bengali Keyboard Trainer v0.1.0");
    println!(
        "Unlocked keys: {} | Threshold: {:.0}%",
        progress.unlocked_keys.len(),
        settings.proficiency_threshold * 100.0
    );

    InputHandler::enable_raw_mode()?;
    let input = InputHandler::new();

    'app: loop {
        let text = generate(&layout, &progress, &vocabulary, mode, &mut rng);

        match run_lesson(&layout, &display, &input, &text)? {
            LessonOutcome::Abandoned => break 'app,
            LessonOutcome::Completed(session, duration_secs) => {
                let live = session.live_stats(std::time::Duration::from_secs_f64(duration_secs));
                progress = merge_lesson(progress, session.into_stats());

                let (updated, unlocked) =
                    check_unlock(&layout, progress, settings.proficiency_threshold);
                progress = updated;
                store.save_progress(&progress)?;

                display.show_summary(&live, duration_secs)?;
                if let Some(unlocked) = &unlocked {
                    display.show_unlock(unlocked.character)?;
                }
                display.show_continue_prompt()?;

                loop {
                    if let Some(key) = input.read_key()? {
                        if InputHandler::is_exit(&key) {
                            break 'app;
                        }
                        if InputHandler::is_enter(&key) {
                            break;
                        }
                    }
                }
            }
        }
    }

    InputHandler::disable_raw_mode()?;
    display.clear()?;

    println!("Session over. Keep practicing!");
    Ok(())
}
