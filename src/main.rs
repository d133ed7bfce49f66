/*
 * Responsibility
 * - tokio runtime entry
 * - app::run() call only (no logic here)
 */
use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    task_api::app::run().await
}
