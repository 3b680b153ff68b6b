// Debiasing core — bias axis construction, neutralization, and equalization.

pub mod axis;
pub mod batch;
pub mod equalize;
pub mod neutralize;

pub use axis::{build_axis, BiasAxis};
pub use batch::{DebiasPlan, ItemResult};
pub use equalize::{equalize, equalize_vectors, EqualizeOptions, EqualizedPair, ScalePolicy};
pub use neutralize::{neutralize, neutralize_vector};
