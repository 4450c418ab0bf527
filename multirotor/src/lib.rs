#![no_std]

mod error;
pub use error::Error;

mod mixer;
pub use mixer::MultirotorMixer;

mod parse;
