use std::io::{self, Write};

use crossterm::{
    cursor::{MoveLeft, SetCursorStyle},
    queue,
    style::{Color, ResetColor, SetForegroundColor},
};

/// How an echoed byte is coloured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Correct,
    Incorrect,
}

impl Style {
    pub fn color(self) -> Color {
        match self {
            Style::Correct => Color::Green,
            Style::Incorrect => Color::Red,
        }
    }
}

/// A single change to what the user sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderAction {
    /// Print the typed byte in colour.
    Echo { byte: u8, style: Style },
    /// Print a plain space for a separator key.
    Separator,
    /// Step back over the last typed byte and restore the target byte in the
    /// default colour, leaving the cursor on it.
    Revert(u8),
    CursorLeft(u16),
    /// Back to default colours and the idle cursor.
    Reset,
}

/// Cursor shown while the user is typing.
pub fn typing_cursor<W: Write>(out: &mut W) -> io::Result<()> {
    queue!(out, SetCursorStyle::SteadyBar)
}

pub fn render<W: Write>(out: &mut W, action: &RenderAction) -> io::Result<()> {
    match *action {
        RenderAction::Echo { byte, style } => {
            queue!(out, SetForegroundColor(style.color()))?;
            out.write_all(&[byte])
        }
        RenderAction::Separator => out.write_all(b" "),
        RenderAction::Revert(original) => {
            queue!(out, ResetColor)?;
            out.write_all(&[0x08, original])?;
            queue!(out, MoveLeft(1))
        }
        RenderAction::CursorLeft(n) => queue!(out, MoveLeft(n)),
        RenderAction::Reset => queue!(out, ResetColor, SetCursorStyle::BlinkingBlock),
    }
}

/// Write a batch of actions and flush them to the terminal.
pub fn render_all<W: Write>(out: &mut W, actions: &[RenderAction]) -> io::Result<()> {
    for action in actions {
        render(out, action)?;
    }
    out.flush()
}
