#![doc = include_str!("../README.md")]

mod contraction;
pub mod dupont;
pub mod error;
pub mod index;
pub mod primitive;
pub mod sullivan;
pub mod transfer;

pub use dupont::DupontForm;
pub use dupont_error::Error;
pub use rug::Rational;
pub use sullivan::SullivanForm;
pub use transfer::{step_collector::{StepCollector, StepCount}, Step, TransferOptions, TransferOptionsBuilder, Tree};
