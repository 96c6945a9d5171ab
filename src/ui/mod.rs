//! egui rendering: the top bar and the plot panels.

pub mod panels;
pub mod plot;
