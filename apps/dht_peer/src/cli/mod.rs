pub mod bench;
pub mod prompt;

pub use bench::run_bench;
pub use prompt::run_prompt;
