pub mod guardrails;

pub use guardrails::{screen, Screening};
