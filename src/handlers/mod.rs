// src/handlers/mod.rs

pub mod auth;
pub mod chat;
pub mod knowledge;
pub mod profile;
pub mod quiz;
