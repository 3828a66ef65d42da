//! Game rules for tic-tac-toe.
//!
//! Pure functions over a [`Board`](crate::Board). Nothing here keeps state
//! between calls, so the status of a board depends only on its cells.

pub mod draw;
pub mod lines;
pub mod status;
pub mod win;

pub use draw::is_full;
pub use lines::{Line, lines};
pub use status::{evaluate_status, status_on_lines};
pub use win::{check_winner, winner_on_lines};
