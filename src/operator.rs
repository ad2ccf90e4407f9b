use anyhow::{bail, Result};
use colored::Colorize;
use crossterm::cursor;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::Print;
use crossterm::terminal::{self, ClearType};
use crossterm::{execute, queue};
use std::io::{self, BufRead, IsTerminal, Write};

/// Questions the workflow asks the person at the keyboard.
pub trait Operator {
    /// Yes/no question; empty input picks `default`.
    fn confirm(&mut self, question: &str, default: bool) -> Result<bool>;

    /// Pick one of `options`. `None` means the operator cancelled.
    fn select(&mut self, question: &str, options: &[String]) -> Result<Option<usize>>;
}

/// Operator talking to the controlling terminal.
#[derive(Debug, Default)]
pub struct TerminalOperator;

impl TerminalOperator {
    pub fn new() -> Self {
        TerminalOperator
    }
}

/// Ask the user a question and return a trimmed input line, or `None` once
/// the input is closed.
fn prompt_input(input: &mut impl BufRead, prompt: &str) -> Result<Option<String>> {
    print!("{prompt}");
    io::stdout().flush()?;

    let mut buf = String::new();
    if input.read_line(&mut buf)? == 0 {
        println!();
        return Ok(None);
    }
    Ok(Some(buf.trim().to_string()))
}

/// Interpret a yes/no answer. `None` for anything unrecognised.
fn parse_yes_no(input: &str, default: bool) -> Option<bool> {
    match input.trim().to_lowercase().as_str() {
        "" => Some(default),
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

impl Operator for TerminalOperator {
    fn confirm(&mut self, question: &str, default: bool) -> Result<bool> {
        ask_yes_no(&mut io::stdin().lock(), question, default)
    }

    fn select(&mut self, question: &str, options: &[String]) -> Result<Option<usize>> {
        if options.is_empty() {
            return Ok(None);
        }

        println!("{} {}", "?".green().bold(), question.bold());

        if io::stdin().is_terminal() && io::stdout().is_terminal() {
            select_with_arrows(options)
        } else {
            select_by_number(&mut io::stdin().lock(), options)
        }
    }
}

/// Closed input is an error, never the default answer.
fn ask_yes_no(input: &mut impl BufRead, question: &str, default: bool) -> Result<bool> {
    let hint = if default { "(Y/n)" } else { "(y/N)" };
    loop {
        let prompt = format!("{} {question} {} ", "?".green().bold(), hint.bright_black());
        let Some(answer) = prompt_input(input, &prompt)? else {
            bail!("input closed before {question:?} was answered");
        };
        match parse_yes_no(&answer, default) {
            Some(answer) => return Ok(answer),
            None => println!("Please answer y or n."),
        }
    }
}

fn select_by_number(input: &mut impl BufRead, options: &[String]) -> Result<Option<usize>> {
    for (idx, opt) in options.iter().enumerate() {
        println!("  {}) {}", idx + 1, opt);
    }

    loop {
        let prompt = format!("Enter choice [1-{}]: ", options.len());
        let Some(answer) = prompt_input(input, &prompt)? else {
            return Ok(None);
        };
        if answer.is_empty() {
            return Ok(None);
        }
        match parse_choice(&answer, options.len()) {
            Some(idx) => return Ok(Some(idx)),
            None => println!("Invalid choice. Please enter a number between 1 and {}.", options.len()),
        }
    }
}

/// 1-based menu number to index.
fn parse_choice(input: &str, len: usize) -> Option<usize> {
    let n: usize = input.trim().parse().ok()?;
    (1..=len).contains(&n).then(|| n - 1)
}

/// Single line shown for an option in the arrow menu.
fn menu_line(option: &str, width: usize) -> String {
    let flat = option.split('\n').map(str::trim_end).collect::<Vec<_>>().join(" ⏎ ");
    let max = width.saturating_sub(3).max(10);
    if flat.chars().count() <= max {
        flat
    } else {
        let mut cut: String = flat.chars().take(max.saturating_sub(1)).collect();
        cut.push('…');
        cut
    }
}

fn select_with_arrows(options: &[String]) -> Result<Option<usize>> {
    let mut stdout = io::stdout();
    let width = terminal::size().map(|(w, _)| w as usize).unwrap_or(80);
    let lines: Vec<String> = options.iter().map(|o| menu_line(o, width)).collect();

    let result = {
        terminal::enable_raw_mode()?;
        let _restore = RestoreOnDrop::new(|| {
            let _ = execute!(io::stdout(), cursor::Show);
            if let Err(e) = terminal::disable_raw_mode() {
                log::warn!("Failed to leave raw mode: {e}");
            }
        });
        execute!(stdout, cursor::Hide)?;
        run_menu(&mut stdout, &lines)
    };
    println!();

    let choice = result?;
    if let Some(idx) = choice {
        println!("{} {}", "❯".cyan(), options[idx]);
    }
    Ok(choice)
}

/// Runs `restore` when dropped, on every exit path.
struct RestoreOnDrop<F: FnOnce()> {
    restore: Option<F>,
}

impl<F: FnOnce()> RestoreOnDrop<F> {
    fn new(restore: F) -> Self {
        RestoreOnDrop {
            restore: Some(restore),
        }
    }
}

impl<F: FnOnce()> Drop for RestoreOnDrop<F> {
    fn drop(&mut self) {
        if let Some(restore) = self.restore.take() {
            restore();
        }
    }
}

fn run_menu(stdout: &mut io::Stdout, lines: &[String]) -> Result<Option<usize>> {
    let count = lines.len();
    let mut selected = 0usize;
    let mut drawn = false;

    loop {
        if drawn {
            queue!(stdout, cursor::MoveUp(count as u16))?;
        }
        queue!(stdout, cursor::MoveToColumn(0), terminal::Clear(ClearType::FromCursorDown))?;
        for (idx, line) in lines.iter().enumerate() {
            let rendered = if idx == selected {
                format!("{} {}", "❯".cyan(), line.cyan())
            } else {
                format!("  {line}")
            };
            queue!(stdout, Print(rendered), Print("\r\n"))?;
        }
        stdout.flush()?;
        drawn = true;

        if let Event::Key(KeyEvent { code, modifiers, kind: KeyEventKind::Press, .. }) = event::read()? {
            match code {
                KeyCode::Up | KeyCode::Char('k') => {
                    selected = if selected == 0 { count - 1 } else { selected - 1 };
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    selected = (selected + 1) % count;
                }
                KeyCode::Enter => return Ok(Some(selected)),
                KeyCode::Esc => return Ok(None),
                KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => return Ok(None),
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yes_no_parsing() {
        assert_eq!(parse_yes_no("", true), Some(true));
        assert_eq!(parse_yes_no("", false), Some(false));
        assert_eq!(parse_yes_no(" Y ", false), Some(true));
        assert_eq!(parse_yes_no("no", true), Some(false));
        assert_eq!(parse_yes_no("maybe", true), None);
    }

    #[test]
    fn closed_input_never_confirms() {
        let mut input: &[u8] = b"";
        let err = ask_yes_no(&mut input, "Do you want to continue?", true).unwrap_err();
        assert!(err.to_string().contains("input closed"));
    }

    #[test]
    fn confirm_reprompts_until_it_understands() {
        let mut input: &[u8] = b"maybe\nn\n";
        assert!(!ask_yes_no(&mut input, "Continue?", true).unwrap());

        let mut input: &[u8] = b"\n";
        assert!(ask_yes_no(&mut input, "Continue?", true).unwrap());
    }

    #[test]
    fn numbered_menu_reads_a_choice_or_cancels() {
        let options = vec!["feat: a".to_string(), "fix: b".to_string()];

        let mut input: &[u8] = b"9\n2\n";
        assert_eq!(select_by_number(&mut input, &options).unwrap(), Some(1));

        let mut input: &[u8] = b"";
        assert_eq!(select_by_number(&mut input, &options).unwrap(), None);
    }

    #[test]
    fn restore_runs_when_setup_fails_early() {
        use std::cell::Cell;

        let restored = Cell::new(false);
        let outcome = (|| -> Result<()> {
            let _restore = RestoreOnDrop::new(|| restored.set(true));
            bail!("cursor hide failed");
        })();

        assert!(outcome.is_err());
        assert!(restored.get());
    }

    #[test]
    fn numbered_choices_are_one_based() {
        assert_eq!(parse_choice("1", 3), Some(0));
        assert_eq!(parse_choice("3", 3), Some(2));
        assert_eq!(parse_choice("0", 3), None);
        assert_eq!(parse_choice("4", 3), None);
        assert_eq!(parse_choice("x", 3), None);
    }

    #[test]
    fn menu_lines_are_flattened_and_clipped() {
        assert_eq!(menu_line("feat: a\n\nbody", 80), "feat: a ⏎  ⏎ body");
        let long = "x".repeat(200);
        let line = menu_line(&long, 40);
        assert_eq!(line.chars().count(), 37);
        assert!(line.ends_with('…'));
    }
}
