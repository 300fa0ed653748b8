//! # Rankboard - Concurrent Customer Leaderboard Engine
//!
//! This crate provides an in-memory, continuously-ranked leaderboard whose
//! scores are mutated by streaming signed-decimal increments. It serves point
//! updates and rank queries concurrently while guaranteeing a total order on
//! ranked output.
//!
//! ## Architecture
//!
//! The engine consists of several key components:
//! - **ScoreStore**: Sharded `customer_id -> score` map for contended updates
//! - **RankingView**: Immutable snapshot of positive-score customers in rank order
//! - **ViewCache**: Dirty-flag protocol that rebuilds the view on demand
//! - **Leaderboard**: Validating facade tying the store and cache together
//!
//! ## Features
//!
//! - **Exact decimal scores**: 128-bit decimal arithmetic, no float drift
//! - **Sharded updates**: Distinct customers never serialize against each other
//! - **Lock-free reads**: Published views are shared `Arc` snapshots
//! - **Dense ranking**: Score descending, customer id ascending on ties
//!
//! ## Example
//!
//! ```rust
//! use rankboard::engine::Leaderboard;
//! use rust_decimal::Decimal;
//!
//! let board = Leaderboard::new();
//! board.apply_delta(1, Decimal::from(100)).unwrap();
//! board.apply_delta(2, Decimal::from(250)).unwrap();
//!
//! let top = board.range(1, 10).unwrap();
//! assert_eq!(top[0].customer_id, 2);
//! assert_eq!(top[0].rank, 1);
//!
//! let window = board.neighbors(1, 1, 1).unwrap();
//! assert_eq!(window.len(), 2);
//! ```
pub mod cache;
pub mod engine;
pub mod error;
pub mod parser;
pub mod store;
pub mod view;
pub mod wire;
