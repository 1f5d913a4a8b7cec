// src/models/mod.rs

pub mod chat;
pub mod knowledge;
pub mod question;
pub mod quiz_result;
pub mod user;
