use owo_colors::{OwoColorize, Style};
use std::sync::OnceLock;

static COLOR: OnceLock<bool> = OnceLock::new();

/// Message kinds printed by the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Header,
    Success,
    Error,
    Warn,
    Info,
}

impl Level {
    /// Grape palette; plain when `color` is off
    pub fn style(self, color: bool) -> Style {
        if !color {
            return Style::new();
        }
        match self {
            Level::Header => Style::new().truecolor(111, 45, 168).bold(),
            Level::Success => Style::new().truecolor(106, 153, 78),
            Level::Error => Style::new().bright_red().bold(),
            Level::Warn => Style::new().truecolor(214, 160, 40),
            Level::Info => Style::new().italic().dimmed(),
        }
    }

    fn current(self) -> Style {
        self.style(*COLOR.get_or_init(|| console::Term::stdout().is_term()))
    }
}

pub fn header(text: &str) {
    println!("🍇 {}", text.style(Level::Header.current()));
}

pub fn success(label: &str) {
    println!("✅ {}", label.style(Level::Success.current()));
}

pub fn error(label: &str) {
    eprintln!("❌ {}", label.style(Level::Error.current()));
}

pub fn warn(label: &str) {
    eprintln!("⚠️ {}", label.style(Level::Warn.current()));
}

pub fn info(label: &str, value: &str) {
    println!("ℹ️ {}: {}", label.style(Level::Info.current()), value);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colored_styles_emit_escapes() {
        let text = format!("{}", "grape".style(Level::Header.style(true)));
        assert!(text.contains("\x1b["));
        assert!(text.contains("grape"));
    }

    #[test]
    fn test_levels_differ() {
        let rendered: Vec<String> = [Level::Header, Level::Success, Level::Error, Level::Warn, Level::Info]
            .into_iter()
            .map(|level| format!("{}", "x".style(level.style(true))))
            .collect();
        for (i, a) in rendered.iter().enumerate() {
            for b in &rendered[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
