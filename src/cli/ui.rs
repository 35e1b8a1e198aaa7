//! Interactive wizard launcher

use anyhow::Result;

use crate::config::Config;
use crate::services::ServiceContext;
use crate::session::{Navigation, Session};
use crate::tui::{self, App};
use crate::wizard::WizardSettings;

/// Start the TUI on the auth screen or the wizard, depending on the session
pub(super) async fn cmd_wizard(config: &Config, session: Session) -> Result<Option<Navigation>> {
    let route = session.route();
    tracing::info!("Starting prompt wizard (route: {:?})", route);

    let services = ServiceContext::from_config(config, &session);
    let app = App::new(
        route,
        WizardSettings::from(config),
        services,
        config.api.auth_url.clone(),
    );

    let navigation = tui::run(app).await?;
    tracing::info!("Prompt wizard exited");
    Ok(navigation)
}
