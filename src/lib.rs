pub mod best_hand;
pub mod betting;
pub mod cards;
pub mod cli;
pub mod display;
pub mod engine;
pub mod equity;
pub mod error;
pub mod hand_evaluator;
pub mod history;
pub mod opponent;
pub mod play;
pub mod probabilities;
pub mod random;
pub mod session;
pub mod showdown;
