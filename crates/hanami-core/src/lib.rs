pub mod config;
pub mod error;
pub mod filter;
pub mod models;
pub mod recommend;
pub mod session;
pub mod storage;
pub mod watchlist;
