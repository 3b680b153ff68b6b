// Debias: measure and reduce bias in pre-trained word embeddings.
//
// This is the library root. Modules are layered leaf-first: vector storage,
// cosine similarity, then the debiasing transforms and the pipeline that
// applies a curated plan to a whole table.

pub mod analysis;
pub mod config;
pub mod debias;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod similarity;
pub mod vectors;

pub use error::{DebiasError, Result};
