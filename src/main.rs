//! Prompt Wizard - Main Entry Point

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    prompt_wizard::cli::run().await
}
