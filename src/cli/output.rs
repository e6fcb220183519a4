//! Colored terminal output for the transit-agent CLI.
//!
//! Every line helper has a plain form (`[OK] ...`) used with `--no-color`
//! and when output is piped into other tools.

use owo_colors::OwoColorize;
use std::io::{self, Write};

/// Status marks used by the one-line helpers
#[derive(Debug, Clone, Copy)]
enum Mark {
    Ok,
    Info,
    Warn,
    Skip,
    Done,
}

impl Mark {
    fn plain(self) -> &'static str {
        match self {
            Mark::Ok => "[OK]",
            Mark::Info => "[INFO]",
            Mark::Warn => "[WARN]",
            Mark::Skip => "[SKIPPED]",
            Mark::Done => "[DONE]",
        }
    }

    fn colored(self) -> String {
        match self {
            Mark::Ok => "✓".green().bold().to_string(),
            Mark::Info => "•".blue().to_string(),
            Mark::Warn => "⚠".yellow().bold().to_string(),
            Mark::Skip => "○".yellow().to_string(),
            Mark::Done => "🚀".green().to_string(),
        }
    }
}

/// Output style configuration
pub struct Output {
    /// Whether to use colored output
    pub colored: bool,
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}

impl Output {
    pub fn new() -> Self {
        Self { colored: true }
    }

    pub fn no_color() -> Self {
        Self { colored: false }
    }

    fn mark(&self, mark: Mark, message: &str) {
        if self.colored {
            println!("  {} {}", mark.colored(), message);
        } else {
            println!("  {} {}", mark.plain(), message);
        }
    }

    /// Bilingual startup banner
    pub fn banner(&self) {
        let version = format!("v{}", env!("CARGO_PKG_VERSION"));
        if self.colored {
            println!(
                "\n   🚌 {}\n   {} {}\n",
                "Alexandria Transit Assistant".bright_cyan().bold(),
                "مساعد المواصلات في الإسكندرية".cyan(),
                version.dimmed()
            );
        } else {
            println!(
                "\n   Alexandria Transit Assistant\n   مساعد المواصلات في الإسكندرية {}\n",
                version
            );
        }
    }

    pub fn success(&self, message: &str) {
        if self.colored {
            self.mark(Mark::Ok, &message.green().to_string());
        } else {
            self.mark(Mark::Ok, message);
        }
    }

    pub fn info(&self, message: &str) {
        self.mark(Mark::Info, message);
    }

    pub fn warning(&self, message: &str) {
        if self.colored {
            self.mark(Mark::Warn, &message.yellow().to_string());
        } else {
            self.mark(Mark::Warn, message);
        }
    }

    /// Errors go to stderr so `ask --json` stdout stays parseable
    pub fn error(&self, message: &str) {
        if self.colored {
            eprintln!("  {} {}", "✗".red().bold(), message.red());
        } else {
            eprintln!("  [ERROR] {}", message);
        }
    }

    /// A file written by `init`
    pub fn created(&self, kind: &str, path: &str) {
        if self.colored {
            self.mark(Mark::Ok, &format!("{} {}", kind.dimmed(), path.bright_white()));
        } else {
            println!("  [CREATED] {} {}", kind, path);
        }
    }

    pub fn skipped(&self, path: &str, reason: &str) {
        if self.colored {
            self.mark(
                Mark::Skip,
                &format!("{} {}", path.dimmed(), format!("({})", reason).yellow()),
            );
        } else {
            self.mark(Mark::Skip, &format!("{} ({})", path, reason));
        }
    }

    pub fn created_dir(&self, path: &str) {
        self.created("directory", path);
    }

    pub fn header(&self, title: &str) {
        if self.colored {
            println!("\n  {}", title.bright_white().bold().underline());
        } else {
            println!("\n  === {} ===", title);
        }
    }

    pub fn subheader(&self, title: &str) {
        if self.colored {
            println!("\n  {}", title.cyan().bold());
        } else {
            println!("\n  --- {} ---", title);
        }
    }

    pub fn kv(&self, key: &str, value: &str) {
        if self.colored {
            println!("    {}: {}", key.dimmed(), value.bright_white());
        } else {
            println!("    {}: {}", key, value);
        }
    }

    pub fn list_item(&self, item: &str) {
        if self.colored {
            println!("    {} {}", "•".blue(), item);
        } else {
            println!("    - {}", item);
        }
    }

    pub fn hint(&self, message: &str) {
        if self.colored {
            println!("\n  💡 {}", message.dimmed().italic());
        } else {
            println!("\n  [TIP] {}", message);
        }
    }

    /// A shell command the user can copy
    pub fn command(&self, cmd: &str) {
        let line = format!("$ {}", cmd);
        if self.colored {
            println!("     {}", line.bright_cyan());
        } else {
            println!("     {}", line);
        }
    }

    pub fn complete(&self, message: &str) {
        println!();
        if self.colored {
            self.mark(Mark::Done, &message.bright_green().bold().to_string());
        } else {
            self.mark(Mark::Done, message);
        }
    }

    /// Print the chat prompt and read one line; `None` at end of input
    pub fn prompt(&self, label: &str) -> Option<String> {
        if self.colored {
            print!("\n{} ", format!("{}:", label).bright_green().bold());
        } else {
            print!("\n{}: ", label);
        }
        io::stdout().flush().ok();

        let mut input = String::new();
        match io::stdin().read_line(&mut input) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(input.trim().to_string()),
        }
    }

    /// Print an assistant reply; `**bold**` spans are rendered bold
    pub fn answer(&self, text: &str) {
        if self.colored {
            println!("\n🤖 {}", render_bold(text));
        } else {
            println!("\nAgent: {}", text.replace("**", ""));
        }
    }

    /// Column headings followed by a rule; `widths` pads every column but the last
    pub fn table_header(&self, columns: &[&str], widths: &[usize]) {
        let row = pad_row(columns, widths);
        let rule_len = widths.iter().map(|w| w + 1).sum::<usize>() + 20;
        if self.colored {
            println!("    {}", row.bright_white().bold());
            println!("    {}", "─".repeat(rule_len).dimmed());
        } else {
            println!("    {}", row);
            println!("    {}", "-".repeat(rule_len));
        }
    }

    pub fn table_row(&self, values: &[&str], widths: &[usize]) {
        println!("    {}", pad_row(values, widths));
    }

    pub fn newline(&self) {
        println!();
    }
}

fn pad_row(values: &[&str], widths: &[usize]) -> String {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| match widths.get(i) {
            Some(&w) if i + 1 < values.len() => format!("{:<w$}", v, w = w),
            _ => v.to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Replace `**text**` spans with ANSI bold
fn render_bold(text: &str) -> String {
    text.split("**")
        .enumerate()
        .map(|(i, part)| {
            if i % 2 == 1 {
                part.bold().to_string()
            } else {
                part.to_string()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        assert!(Output::new().colored);
        assert!(Output::default().colored);
        assert!(!Output::no_color().colored);
    }

    #[test]
    fn test_render_bold() {
        let rendered = render_bold("Take **BUS 12** now");
        assert!(rendered.starts_with("Take "));
        assert!(rendered.ends_with(" now"));
        assert!(!rendered.contains("**"));
        assert_eq!(render_bold("plain"), "plain");
    }

    #[test]
    fn test_pad_row() {
        assert_eq!(pad_row(&["261", "Victoria Station"], &[6]), "261    Victoria Station");
        // The last column is never padded
        assert_eq!(pad_row(&["a", "b"], &[3, 10]), "a   b");
        assert_eq!(pad_row(&[], &[4]), "");
    }

    #[test]
    fn test_output_methods_no_panic() {
        for output in [Output::no_color(), Output::new()] {
            output.banner();
            output.success("saved");
            output.info("3 stops");
            output.warning("OTP offline");
            output.error("bad config");
            output.answer("**Trip Plan** from A to B");
            output.created("config", "transit.toml");
            output.skipped(".env", "already exists");
            output.created_dir("deploy");
            output.header("Status");
            output.subheader("OTP");
            output.kv("key", "value");
            output.list_item("item");
            output.hint("hint");
            output.command("transit-agent serve");
            output.complete("done");
            output.table_header(&["ID", "Name"], &[6]);
            output.table_row(&["261", "Victoria Station"], &[6]);
            output.newline();
        }
    }
}
