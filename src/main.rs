//! HomeCare Bot - learning keyword chatbot
//!
//! Answers from a table of learned keyword -> reply pairs and asks to be
//! taught whenever nothing matches.

// Use the library crate for all modules
use homecare_bot::cli;

fn main() -> anyhow::Result<()> {
    // Initialize logging (WARN level by default, use RUST_LOG=info for debug).
    // Logs go to stderr so they never mix with the chat on stdout.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into())
        )
        .with_writer(std::io::stderr)
        .init();

    // Run CLI
    cli::run()
}
