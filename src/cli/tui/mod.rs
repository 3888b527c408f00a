//! Terminal user interface for browsing modules

pub mod app;
pub mod events;
pub mod theme;
pub mod view;

use crate::cli::commands::Context;
use crate::Result;

/// Run the interactive module browser
pub async fn run_browser(context: &Context) -> Result<()> {
    app::App::new(context.orchestrator()).run().await
}
