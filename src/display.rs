use anyhow::Result;
use crossterm::{
    style::{style, Attribute, Color, PrintStyledContent},
    QueueableCommand,
};

use std::io::{stdout, Write};

use connect4_minimax::{Board, Cell};

/// Draws the board to stdout, top row first, with the 1-indexed column numbers underneath
pub fn draw(board: &Board) -> Result<()> {
    let mut stdout = stdout();

    stdout.queue(PrintStyledContent(style("\n")))?;
    for row in board.snapshot() {
        for cell in row {
            stdout.queue(PrintStyledContent(
                style("O")
                    .attribute(Attribute::Bold)
                    .on(Color::DarkBlue)
                    .with(match cell {
                        Cell::Human => Color::Red,
                        Cell::Machine => Color::Yellow,
                        Cell::Empty => Color::DarkBlue,
                    }),
            ))?;
        }
        stdout.queue(PrintStyledContent(style("\n")))?;
    }

    let cols: String = (1..=board.cols()).map(|x| (x % 10).to_string()).collect();
    stdout.queue(PrintStyledContent(style(cols + "\n")))?;
    stdout.flush()?;
    Ok(())
}
