//! Crossterm renderer for session events
//!
//! Symbols are painted in their catalog colors. All terminal commands for
//! one event are queued and flushed together.

use std::io::{self, Stdout, Write};

use crossterm::{
    queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
};
use spin_core::{
    SessionEvent, SessionObserver, SessionStats, SpinGrid, SymbolCatalog, SymbolColor,
};

pub struct ConsoleRenderer<W> {
    writer: W,
    machine: String,
    catalog: SymbolCatalog,
}

impl ConsoleRenderer<Stdout> {
    /// Renderer over stdout
    pub fn stdout(machine: impl Into<String>, catalog: SymbolCatalog) -> Self {
        Self::new(io::stdout(), machine, catalog)
    }
}

impl<W: Write> ConsoleRenderer<W> {
    pub fn new(writer: W, machine: impl Into<String>, catalog: SymbolCatalog) -> Self {
        Self {
            writer,
            machine: machine.into(),
            catalog,
        }
    }

    fn render(&mut self, event: &SessionEvent) -> io::Result<()> {
        match event {
            SessionEvent::SessionStarted {
                balance,
                rows,
                columns,
            } => {
                queue!(
                    self.writer,
                    SetForegroundColor(Color::Cyan),
                    Print(format!(
                        "Welcome to {}! Spinning a {rows}x{columns} grid.\n",
                        self.machine
                    )),
                    ResetColor,
                    Print(format!("Current balance: {balance:.2}\n")),
                )?;
            }
            SessionEvent::SpinStarted { round } => {
                queue!(
                    self.writer,
                    SetForegroundColor(Color::Cyan),
                    Print(format!("\nSpin #{round} results:\n")),
                    ResetColor,
                )?;
            }
            SessionEvent::GridRevealed { grid } => self.render_grid(grid)?,
            SessionEvent::StakeRejected { reasons, .. } => {
                for reason in reasons {
                    queue!(self.writer, Print(format!("{reason}\n")))?;
                }
            }
            SessionEvent::WinsEvaluated { evaluation } => {
                for win in &evaluation.row_wins {
                    queue!(
                        self.writer,
                        Print(format!(
                            "Row {} pays {:.2} ({})\n",
                            win.row + 1,
                            win.win_amount,
                            win.symbol
                        )),
                    )?;
                }
            }
            SessionEvent::BalanceSettled { win, balance, .. } => {
                queue!(
                    self.writer,
                    SetForegroundColor(Color::Cyan),
                    Print(format!(
                        "You win {win:.2}! Current balance: {balance:.2}\n"
                    )),
                    ResetColor,
                )?;
            }
            SessionEvent::SessionEnded { stats, .. } => self.render_summary(stats)?,
        }
        self.writer.flush()
    }

    fn render_grid(&mut self, grid: &SpinGrid) -> io::Result<()> {
        for row in grid.rows() {
            for (col, &id) in row.iter().enumerate() {
                if col > 0 {
                    queue!(self.writer, Print(" "))?;
                }
                let symbol = self.catalog.symbol(id);
                queue!(
                    self.writer,
                    SetForegroundColor(paint(symbol.color)),
                    Print(symbol.name.as_str()),
                    ResetColor,
                )?;
            }
            queue!(self.writer, Print("\n"))?;
        }
        Ok(())
    }

    fn render_summary(&mut self, stats: &SessionStats) -> io::Result<()> {
        queue!(
            self.writer,
            SetForegroundColor(Color::Cyan),
            Print("\nGame over! Thanks for playing.\n"),
            ResetColor,
            Print(format!(
                "Rounds played: {}  staked: {:.2}  won: {:.2}\n",
                stats.rounds, stats.total_staked, stats.total_won
            )),
            Print(format!(
                "RTP: {:.1}%  hit rate: {:.1}%  biggest win: {:.2}\n",
                stats.rtp(),
                stats.hit_rate(),
                stats.biggest_win
            )),
        )
    }
}

impl<W: Write> SessionObserver for ConsoleRenderer<W> {
    fn on_event(&mut self, event: &SessionEvent) {
        if let Err(err) = self.render(event) {
            log::warn!("console render failed: {err}");
        }
    }
}

/// Symbol color to terminal color
fn paint(color: SymbolColor) -> Color {
    match color {
        SymbolColor::Red => Color::Red,
        SymbolColor::Green => Color::Green,
        SymbolColor::Yellow => Color::Yellow,
        SymbolColor::Blue => Color::Blue,
        SymbolColor::Magenta => Color::Magenta,
        SymbolColor::Cyan => Color::Cyan,
        SymbolColor::White => Color::White,
        SymbolColor::Grey => Color::Grey,
    }
}
