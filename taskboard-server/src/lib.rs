//! `Taskboard` server library.
//!
//! Exposes the fetcher, renderer, and page composer for use in tests and
//! embedding. The server answers `/` with the task board and `/schedules`
//! with the schedule board, both rendered from remote JSON documents.

pub mod config;
pub mod fetch;
pub mod pages;
pub mod render;
