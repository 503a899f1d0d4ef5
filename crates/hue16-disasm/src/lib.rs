pub mod analyze;
pub mod model;

// Re-export commonly used types/functions for the binaries
pub use analyze::{report, EdgeOut, LabelKV, Report};
pub use model::{encode_words, load_words, write_words, Image, WordFormat};

/// Install the `RUST_LOG`-driven fmt subscriber used by both binaries.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
}
