// src/models/mod.rs

pub mod answer;
pub mod country;
pub mod difficulty;
pub mod question;
pub mod score;
pub mod user;
