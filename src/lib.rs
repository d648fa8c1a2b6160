#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod ai;
mod bitboard;
mod board;
mod common;
mod config;
mod cover;
mod game;
mod geometry;
#[cfg(feature = "std")]
mod logging;
mod placement;
mod player;
pub mod prelude;
mod region;
mod ship;
mod targeting;
#[cfg(feature = "std")]
mod ui;

pub use ai::*;
pub use bitboard::{BitBoard, BitBoardError, CellSet, SetBits};
pub use board::*;
pub use common::*;
pub use config::*;
pub use cover::*;
pub use game::*;
pub use geometry::*;
#[cfg(feature = "std")]
pub use logging::{init_logging, LOG_ENV};
pub use placement::*;
pub use player::*;
pub use region::*;
pub use ship::*;
pub use targeting::*;
#[cfg(feature = "std")]
pub use ui::*;
