//! Circadian jet-lag recovery planning.
//!
//! Given an itinerary, [`plan::generate`] produces a day-by-day schedule of
//! light exposure, sleep, meals, and caffeine that moves the body clock to
//! the destination timezone without pushing it the wrong way.

pub mod circadian;
pub mod cli;
pub mod config;
pub mod error;
pub mod model;
pub mod plan;
pub mod schedule;
pub mod storage;
