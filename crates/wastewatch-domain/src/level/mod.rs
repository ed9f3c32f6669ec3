mod ladder;

#[cfg(test)]
mod ladder_test;

pub use ladder::{LevelLadder, LevelTier, UserLevel};
