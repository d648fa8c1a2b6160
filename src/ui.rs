#![cfg(feature = "std")]

use std::fmt::Write as _;
use std::string::String;

use crate::{
    ai::DensityMap,
    board::Board,
    common::CellState,
    config::{BOARD_COLS, BOARD_ROWS},
    geometry::Cell,
};

fn row_label(row: usize) -> char {
    (b'A' + row as u8) as char
}

/// Full 12x12 grid, invalid cells included, one iterator per row.
fn grid() -> impl Iterator<Item = impl Iterator<Item = Cell>> {
    (0..BOARD_ROWS as i32).map(|r| (0..BOARD_COLS as i32).map(move |c| Cell::new(r, c)))
}

fn header(out: &mut String, width: usize) {
    out.push_str("  ");
    for c in 0..BOARD_COLS {
        let _ = write!(out, " {:>width$}", c + 1, width = width);
    }
    out.push('\n');
}

/// Render a board as text, one row per line. Invalid cells are blank.
/// `reveal` shows unhit ship cells, which only makes sense for the own board.
pub fn render_board(board: &Board, reveal: bool) -> String {
    let mut out = String::new();
    header(&mut out, 2);
    for (r, row) in grid().enumerate() {
        let _ = write!(out, "{} ", row_label(r));
        for cell in row {
            let symbol = match board.state(cell) {
                None => ' ',
                Some(CellState::Hit) => 'X',
                Some(CellState::Missed) => 'o',
                Some(CellState::Occupied) if reveal => '#',
                Some(_) => '.',
            };
            let _ = write!(out, "  {}", symbol);
        }
        out.push('\n');
    }
    out
}

/// Render a density map as percentages of the total weight.
pub fn render_density_map(density: &DensityMap) -> String {
    let matrix = density.normalized();
    let mut out = String::new();
    header(&mut out, 5);
    for (r, row) in grid().enumerate() {
        let _ = write!(out, "{} ", row_label(r));
        for cell in row {
            if cell.is_valid() {
                let p = matrix[cell.row as usize][cell.col as usize];
                let _ = write!(out, " {:5.2}", p * 100.0);
            } else {
                out.push_str("      ");
            }
        }
        out.push('\n');
    }
    out
}

pub fn print_board(board: &Board, reveal: bool) {
    std::print!("{}", render_board(board, reveal));
}

pub fn print_density_map(density: &DensityMap) {
    std::println!("\nPlacement density (%):");
    std::print!("{}", render_density_map(density));
}
