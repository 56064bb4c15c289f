pub mod catalog;
pub mod leaderboard;
pub mod roster;
pub mod scoring;
pub mod team;
pub mod ws;
