//! Persistence and services for the Venda marketplace.

pub mod auth;
pub mod context;
pub mod database;
pub mod domain;
pub mod health;

#[cfg(test)]
mod test;
