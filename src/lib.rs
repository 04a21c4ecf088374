//! leetstreak: LeetCode submission streak and activity heatmap

pub mod cli;
pub mod services;
pub mod tui;
pub mod types;
