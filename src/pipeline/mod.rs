// Pipelines that run the debiasing core over a whole vocabulary.

pub mod apply;
