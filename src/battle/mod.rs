pub mod ai;
pub mod conditions;
pub mod damage;
pub mod engine;
pub mod rng;
pub mod runner;
pub mod state;
pub mod stats;

#[cfg(test)]
mod tests;
