// Word vector storage and the arithmetic the debiasing core is built on.

pub mod math;
pub mod table;

pub use table::VectorTable;
