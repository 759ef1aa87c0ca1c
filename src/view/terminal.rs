//! Plain-text view for terminals.
//!
//! Cards are drawn in a grid, numbered by board position:
//!
//! ```text
//! Matches: 1
//!  0 [  ????????  ]  1 [   Mabini   ]  2 [  ????????  ]  3 [  ????????  ]
//!  4 [= Rizal    =]  ...
//! ```
//!
//! Updates are batched and drawn once per handled event in `present`.

use std::io::{BufRead, Stdin, StdinLock, Stdout, Write};

use tracing::warn;

use super::{CardView, View};
use crate::cards::{CardFace, CardId};

const CELL_WIDTH: usize = 12;

/// Terminal view reading answers from `R` and drawing to `W`.
#[derive(Debug)]
pub struct TerminalView<R, W> {
    input: R,
    output: W,
    columns: usize,
    cards: Vec<CardView>,
    counter: u32,
    win_visible: bool,
    navigated: Option<String>,
    dirty: bool,
}

impl TerminalView<StdinLock<'static>, Stdout> {
    /// View on the process's stdin and stdout.
    #[must_use]
    pub fn stdio() -> Self {
        let stdin: Stdin = std::io::stdin();
        Self::new(stdin.lock(), std::io::stdout())
    }
}

impl<R: BufRead, W: Write> TerminalView<R, W> {
    /// Create a view with four columns.
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            columns: 4,
            cards: Vec::new(),
            counter: 0,
            win_visible: false,
            navigated: None,
            dirty: false,
        }
    }

    /// Set the number of cards per row.
    #[must_use]
    pub fn with_columns(mut self, columns: usize) -> Self {
        self.columns = columns.max(1);
        self
    }

    /// Read one trimmed line of input. `None` at end of input.
    pub fn read_line(&mut self) -> Option<String> {
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(line.trim().to_string()),
            Err(err) => {
                warn!(error = %err, "failed to read terminal input");
                None
            }
        }
    }

    /// Page the player chose to continue to, if any.
    #[must_use]
    pub fn navigated(&self) -> Option<&str> {
        self.navigated.as_deref()
    }

    /// Output written so far.
    #[must_use]
    pub fn output(&self) -> &W {
        &self.output
    }

    /// Consume the view, returning the output sink.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Print a free-form message.
    pub fn message(&mut self, text: &str) {
        self.write(|out| writeln!(out, "{text}"));
    }

    fn cell(card: &CardView) -> String {
        let name: String = card.alt.chars().take(CELL_WIDTH - 2).collect();
        match card.face {
            CardFace::FaceDown => format!("[{:^w$}]", "????????", w = CELL_WIDTH),
            CardFace::FaceUp => format!("[{:^w$}]", name, w = CELL_WIDTH),
            CardFace::Matched => format!("[={:^w$}=]", name, w = CELL_WIDTH - 2),
        }
    }

    fn draw(&mut self) {
        let mut frame = String::new();
        frame.push_str(&format!("\nMatches: {}\n", self.counter));
        for row in self.cards.chunks(self.columns) {
            let line: Vec<String> = row
                .iter()
                .map(|card| format!("{:>2} {}", card.id.0, Self::cell(card)))
                .collect();
            frame.push_str(&line.join("  "));
            frame.push('\n');
        }
        if self.win_visible {
            frame.push_str("You found every pair!\n");
        }
        self.write(|out| out.write_all(frame.as_bytes()));
    }

    fn write(&mut self, f: impl FnOnce(&mut W) -> std::io::Result<()>) {
        if let Err(err) = f(&mut self.output).and_then(|()| self.output.flush()) {
            warn!(error = %err, "failed to write to terminal");
        }
    }
}

impl<R: BufRead, W: Write> View for TerminalView<R, W> {
    fn render_board(&mut self, cards: &[CardView]) {
        self.cards = cards.to_vec();
        self.dirty = true;
    }

    fn set_card_face(&mut self, id: CardId, face: CardFace) {
        if let Some(card) = self.cards.get_mut(id.index()) {
            card.set_face(face);
            self.dirty = true;
        }
    }

    fn set_counter(&mut self, matched_pairs: u32) {
        self.counter = matched_pairs;
        self.dirty = true;
    }

    fn has_win_indicator(&self) -> bool {
        true
    }

    fn set_win_visible(&mut self, visible: bool) {
        self.win_visible = visible;
        self.dirty = true;
    }

    fn confirm(&mut self, message: &str) -> bool {
        self.write(|out| write!(out, "{message} [y/N] "));
        matches!(
            self.read_line().map(|l| l.to_ascii_lowercase()).as_deref(),
            Some("y") | Some("yes")
        )
    }

    fn navigate(&mut self, page: &str) {
        self.write(|out| writeln!(out, "Continuing to {page}"));
        self.navigated = Some(page.to_string());
    }

    fn present(&mut self) {
        if self.dirty {
            self.draw();
            self.dirty = false;
        }
    }
}
