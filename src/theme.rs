//! Theme module for ralph-prd
//!
//! Color palette and stateless styling helpers for operator-facing console
//! output. Every helper takes the tone explicitly; nothing here holds state.

use crossterm::style::{style, Color, Stylize};

// ============================================================================
// Accent Colors - Cyan/Teal Primary
// ============================================================================

/// Primary cyan accent color (#00d4aa)
pub const CYAN_PRIMARY: Color = Color::Rgb { r: 0, g: 212, b: 170 };

// ============================================================================
// Status Colors
// ============================================================================

/// Green success color (#4ade80)
pub const GREEN_SUCCESS: Color = Color::Rgb { r: 74, g: 222, b: 128 };

/// Amber warning color (#fbbf24)
pub const AMBER_WARNING: Color = Color::Rgb { r: 251, g: 191, b: 36 };

/// Red error color (#f87171)
pub const RED_ERROR: Color = Color::Rgb { r: 248, g: 113, b: 113 };

// ============================================================================
// Text Colors
// ============================================================================

/// Muted text color - for labels and hints (#64748b)
pub const TEXT_MUTED: Color = Color::Rgb { r: 100, g: 116, b: 139 };

/// Semantic tone of a console message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Info,
    Success,
    Warning,
    Error,
    Muted,
}

impl Tone {
    pub fn color(&self) -> Color {
        match self {
            Tone::Info => CYAN_PRIMARY,
            Tone::Success => GREEN_SUCCESS,
            Tone::Warning => AMBER_WARNING,
            Tone::Error => RED_ERROR,
            Tone::Muted => TEXT_MUTED,
        }
    }
}

/// Style a message with the given tone
pub fn paint(message: &str, tone: Tone) -> String {
    style(message).with(tone.color()).to_string()
}

/// Boxed banner used at the top of each command
pub fn banner(lines: &[&str]) -> String {
    const WIDTH: usize = 40;
    let mut out = String::new();
    out.push_str(&format!("╔{}╗\n", "═".repeat(WIDTH)));
    for line in lines {
        out.push_str(&format!("║   {:<width$}║\n", line, width = WIDTH - 3));
    }
    out.push_str(&format!("╚{}╝", "═".repeat(WIDTH)));
    style(out).with(CYAN_PRIMARY).bold().to_string()
}

/// Section header framed by rules
pub fn section(title: &str) -> String {
    let rule = "=".repeat(60);
    format!("{}\n{}\n{}", rule, paint(title, Tone::Info), rule)
}

/// `✓`/`✗` check line
pub fn check_line(ok: bool, label: &str) -> String {
    if ok {
        paint(&format!("  ✓ {}", label), Tone::Success)
    } else {
        paint(&format!("  ✗ {}", label), Tone::Error)
    }
}
