pub mod lie;
pub mod optimizer;
