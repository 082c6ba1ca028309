//! Terminal display and UI rendering
//!
//! Features:
//! - Lesson text with per-character color coding and cursor highlight
//! - Live WPM and word-accuracy overlay
//! - Lesson summary and unlock celebration
//! - Per-character profile table

use crate::engine::session::{LessonSession, LiveStats};
use crate::progress::CharacterStats;
use crossterm::{
    cursor, execute,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal::{self, ClearType},
};
use std::io::{stdout, Write};

/// Terminal display manager.
pub struct Display;

impl Display {
    pub fn new() -> Self {
        Display
    }

    /// Clear screen.
    pub fn clear(&self) -> Result<(), Box<dyn std::error::Error>> {
        let mut stdout = stdout();
        execute!(
            stdout,
            terminal::Clear(ClearType::All),
            cursor::MoveTo(0, 0)
        )?;
        Ok(())
    }

    /// Render the lesson text: green for matched, red for missed, grey for
    /// upcoming, with the cursor position underlined.
    pub fn show_lesson(&self, session: &LessonSession) -> Result<(), Box<dyn std::error::Error>> {
        let mut stdout = stdout();

        execute!(stdout, cursor::MoveTo(0, 2))?;
        for (i, &c) in session.text().iter().enumerate() {
            let color = match session.result_at(i) {
                Some(true) => Color::Green,
                Some(false) => Color::Red,
                None => Color::DarkGrey,
            };
            execute!(stdout, SetForegroundColor(color))?;
            if i == session.cursor() {
                execute!(stdout, SetAttribute(Attribute::Underlined))?;
            }
            execute!(stdout, Print(c), SetAttribute(Attribute::Reset))?;
        }
        execute!(stdout, ResetColor, Print("\n"))?;
        stdout.flush()?;
        Ok(())
    }

    /// Display live WPM and word accuracy.
    pub fn show_live(&self, live: &LiveStats) -> Result<(), Box<dyn std::error::Error>> {
        let mut stdout = stdout();

        execute!(
            stdout,
            cursor::MoveTo(0, 4),
            SetForegroundColor(Color::Cyan),
            Print("WPM: "),
            ResetColor,
            Print(format!("{:.0}", live.wpm)),
            Print("  |  "),
            SetForegroundColor(Color::Cyan),
            Print("Accuracy: "),
            SetForegroundColor(if live.accuracy_percent > 90.0 {
                Color::Green
            } else if live.accuracy_percent > 80.0 {
                Color::Yellow
            } else {
                Color::Red
            }),
            Print(format!("{:.0}%\n", live.accuracy_percent)),
            ResetColor,
        )?;
        stdout.flush()?;
        Ok(())
    }

    /// Lesson summary line after completion.
    pub fn show_summary(
        &self,
        live: &LiveStats,
        duration_secs: f64,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let mut stdout = stdout();

        execute!(
            stdout,
            cursor::MoveTo(0, 6),
            SetForegroundColor(Color::Blue),
            Print("─".repeat(50)),
            Print("\n"),
            ResetColor,
            Print(format!(
                "Lesson complete!  WPM: {:.0}  |  Accuracy: {:.0}%  |  Time: {:.1}s\n",
                live.wpm, live.accuracy_percent, duration_secs
            )),
        )?;
        stdout.flush()?;
        Ok(())
    }

    /// Celebrate a newly unlocked character.
    pub fn show_unlock(&self, character: char) -> Result<(), Box<dyn std::error::Error>> {
        let mut stdout = stdout();

        execute!(
            stdout,
            SetForegroundColor(Color::Yellow),
            Print(format!("★ New character unlocked: {}\n", character)),
            ResetColor,
        )?;
        stdout.flush()?;
        Ok(())
    }

    /// Show help text.
    pub fn show_help(&self) -> Result<(), Box<dyn std::error::Error>> {
        let mut stdout = stdout();

        execute!(
            stdout,
            cursor::MoveTo(0, 9),
            SetForegroundColor(Color::DarkGrey),
            Print("Type the text above  |  Esc to abandon the lesson\n"),
            ResetColor,
        )?;
        stdout.flush()?;
        Ok(())
    }

    /// Prompt shown between lessons.
    pub fn show_continue_prompt(&self) -> Result<(), Box<dyn std::error::Error>> {
        let mut stdout = stdout();

        execute!(
            stdout,
            SetForegroundColor(Color::DarkGrey),
            Print("Press ENTER for the next lesson  |  Esc to quit\n"),
            ResetColor,
        )?;
        stdout.flush()?;
        Ok(())
    }

    /// Print the per-character profile table (plain output, no raw mode).
    pub fn show_profile(
        &self,
        rows: &[(char, &CharacterStats)],
    ) -> Result<(), Box<dyn std::error::Error>> {
        let mut stdout = stdout();

        writeln!(stdout, "{:<6} {:>9} {:>8} {:>12}", "char", "attempts", "errors", "proficiency")?;
        writeln!(stdout, "{}", "─".repeat(40))?;
        for (c, stats) in rows {
            writeln!(
                stdout,
                "{:<6} {:>9} {:>8} {:>11.0}%",
                c,
                stats.total_attempts,
                stats.total_errors,
                stats.proficiency * 100.0
            )?;
        }
        stdout.flush()?;
        Ok(())
    }
}

impl Default for Display {
    fn default() -> Self {
        Self::new()
    }
}
