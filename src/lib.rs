//! Jewelry image analyzer - AI-written product descriptions and captions
//!
//! Builds an instruction prompt from a tone, a length tier and optional
//! product facts, then sends it with the product photo to a multimodal chat
//! model and relays the generated text.

pub mod ai;
pub mod app;
pub mod budget;
pub mod error;
pub mod image;
pub mod models;
pub mod prompts;

pub use error::{Error, Result};
