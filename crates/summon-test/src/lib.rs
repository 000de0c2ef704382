//! Test harness for summoning
//!
//! Provides an in-memory level ([`TestCave`]), a weighted race allocator
//! ([`TestAllocator`]) and a small bestiary of fixture races, so that
//! summoning can be driven end to end without a real dungeon.

pub mod alloc;
pub mod bestiary;
pub mod cave;

pub use alloc::TestAllocator;
pub use bestiary::Bestiary;
pub use cave::{Terrain, TestCave};
