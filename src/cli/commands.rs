//! Non-interactive subcommands

use anyhow::{Context, Result};
use std::path::Path;

use super::SubmitArgs;
use crate::api::{Collection, SubmissionGateway};
use crate::config::{Config, SecretString};
use crate::services::ServiceContext;
use crate::session::{Navigation, Session};
use crate::wizard::{
    Field, PRESET_PROMPTS, PromptWizard, SUBMIT_FAILURE_MESSAGE, Selector, SelectorItem,
    SubmitOutcome, WizardSettings,
};

/// `--config` replaces the default search path
pub(super) fn load_config(path: Option<&str>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from_path(path),
        None => Config::load(),
    }
}

/// Run the three wizard steps from command-line arguments
pub(super) fn prepare_wizard(settings: WizardSettings, args: SubmitArgs) -> Result<PromptWizard> {
    let mut wizard = PromptWizard::new(settings);

    let website_name = args.website_name.unwrap_or_else(|| args.website.clone());
    wizard.select_website(&args.website, &website_name);
    if !wizard.advance() {
        anyhow::bail!("Invalid website:\n{}", describe_errors(&wizard));
    }

    let collection_name = args
        .collection_name
        .unwrap_or_else(|| args.collection.clone());
    wizard.select_collection(&args.collection, &collection_name);
    if !wizard.advance() {
        anyhow::bail!("Invalid collection:\n{}", describe_errors(&wizard));
    }

    if args.prompt.trim().is_empty() && args.use_preset {
        wizard.insert_template();
    } else {
        wizard.set_field(Field::Prompt, args.prompt);
    }
    wizard.set_field(Field::Model, args.model);
    wizard.set_field(Field::Keywords, args.keywords);
    wizard.set_field(Field::OtherDetails, args.details);
    if let Some(category) = args.category {
        wizard.set_field(Field::Category, category);
    }
    Ok(wizard)
}

fn describe_errors(wizard: &PromptWizard) -> String {
    wizard
        .errors
        .iter()
        .map(|(field, message)| format!("  {}: {}", field.key(), message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Submit a prepared wizard and turn the outcome into CLI results
pub(super) async fn submit_prepared(
    wizard: &mut PromptWizard,
    gateway: &dyn SubmissionGateway,
    auth_url: &str,
) -> Result<Option<Navigation>> {
    match wizard.submit(gateway).await {
        SubmitOutcome::Submitted => {
            if let Some(notification) = wizard.notification.as_ref() {
                println!("{}", notification.message);
            }
            Ok(None)
        }
        SubmitOutcome::Invalid => {
            anyhow::bail!("Prompt is incomplete:\n{}", describe_errors(wizard))
        }
        SubmitOutcome::Unauthorized => Ok(Some(Navigation::Redirect(auth_url.to_string()))),
        SubmitOutcome::Failed | SubmitOutcome::Busy => anyhow::bail!(SUBMIT_FAILURE_MESSAGE),
    }
}

pub(super) async fn cmd_submit(
    config: &Config,
    session: &Session,
    args: SubmitArgs,
) -> Result<Option<Navigation>> {
    let mut wizard = prepare_wizard(WizardSettings::from(config), args)?;
    let services = ServiceContext::from_config(config, session);
    submit_prepared(&mut wizard, &*services.gateway, &config.api.auth_url).await
}

pub(super) async fn cmd_sites(config: &Config, session: &Session) -> Result<()> {
    let services = ServiceContext::from_config(config, session);
    let sites = services
        .content
        .list_sites()
        .await
        .context("Failed to list websites")?;

    if sites.is_empty() {
        println!("No websites found");
    }
    for site in &sites {
        println!("{}\t{}", site.id, site.name);
    }
    Ok(())
}

pub(super) async fn cmd_collections(
    config: &Config,
    session: &Session,
    site_id: &str,
    filter: Option<&str>,
) -> Result<()> {
    let services = ServiceContext::from_config(config, session);
    let collections = services
        .content
        .list_collections(site_id)
        .await
        .with_context(|| format!("Failed to list collections for website {}", site_id))?;

    for line in collection_lines(collections, filter) {
        println!("{}", line);
    }
    Ok(())
}

/// Same matching as the wizard's search box
fn collection_lines(collections: Vec<Collection>, filter: Option<&str>) -> Vec<String> {
    let mut selector = Selector::filterable("collections");
    selector.finish_loading(Ok(collections));
    if let Some(filter) = filter {
        selector.set_filter(filter);
    }

    let visible = selector.visible();
    if visible.is_empty() {
        return vec![selector.empty_text()];
    }
    visible
        .into_iter()
        .map(|c| format!("{}\t{}", c.id(), c.name()))
        .collect()
}

pub(super) async fn cmd_models(config: &Config, session: &Session) -> Result<()> {
    let services = ServiceContext::from_config(config, session);
    let models = services
        .content
        .list_models()
        .await
        .context("Failed to list model deployments")?;

    if models.is_empty() {
        println!("No available models found");
    }
    for model in &models {
        println!("{}", model.label());
    }
    Ok(())
}

pub(super) fn cmd_presets() {
    for preset in PRESET_PROMPTS {
        println!("{} ({})", preset.name, preset.id);
        println!("  {}", preset.description);
        println!();
        for line in preset.template.lines() {
            println!("    {}", line);
        }
        println!();
    }
}

pub(super) fn cmd_login(mut session: Session, token: String) -> Result<()> {
    session.set_token(SecretString::new(token))?;
    println!("Signed in. Session saved to {:?}", Session::default_path());
    Ok(())
}

pub(super) fn cmd_logout(mut session: Session) -> Result<()> {
    session.clear()?;
    println!("Signed out");
    Ok(())
}

pub(super) fn cmd_init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "Config file already exists at {:?}. Use --force to overwrite",
            path
        );
    }
    Config::default().save(path)?;
    println!("Wrote default configuration to {:?}", path);
    Ok(())
}

pub(super) fn cmd_config(config: &Config, show_secrets: bool) -> Result<()> {
    print!("{}", render_config(config, show_secrets)?);
    Ok(())
}

fn render_config(config: &Config, show_secrets: bool) -> Result<String> {
    let mut out = toml::to_string_pretty(config).context("Failed to serialize config")?;
    let token = match config.api.api_token.as_ref() {
        Some(token) if show_secrets => token.expose_secret().to_string(),
        Some(token) => token.masked(),
        None => "(not set)".to_string(),
    };
    out.push_str(&format!("\n# api.api_token: {}\n", token));
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ApiError, ApiResult};
    use crate::wizard::FormData;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use tempfile::TempDir;

    const BLOG_ID: &str = "66a345b2baa543bc5924b256";

    struct RecordingGateway {
        sent: Mutex<Vec<FormData>>,
        reply: fn() -> ApiResult<()>,
    }

    #[async_trait]
    impl SubmissionGateway for RecordingGateway {
        async fn submit(&self, form: &FormData) -> ApiResult<()> {
            self.sent.lock().unwrap().push(form.clone());
            (self.reply)()
        }
    }

    fn gateway(reply: fn() -> ApiResult<()>) -> RecordingGateway {
        RecordingGateway {
            sent: Mutex::new(Vec::new()),
            reply,
        }
    }

    fn args(collection: &str) -> SubmitArgs {
        SubmitArgs {
            website: "w1".into(),
            collection: collection.into(),
            prompt: "Write about Rust".into(),
            model: "d1".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_prepare_wizard_defaults_names_to_ids() {
        let wizard = prepare_wizard(WizardSettings::default(), args("c1")).unwrap();
        assert_eq!(wizard.form.selected_website_name, "w1");
        assert_eq!(wizard.form.selected_collection_name, "c1");
        assert_eq!(wizard.form.prompt, "Write about Rust");
    }

    #[test]
    fn test_prepare_wizard_rejects_blank_website() {
        let mut a = args("c1");
        a.website = "  ".into();
        let err = prepare_wizard(WizardSettings::default(), a).unwrap_err();
        assert!(err.to_string().contains("Please select a website"));
    }

    #[test]
    fn test_prepare_wizard_uses_preset() {
        let mut a = args(BLOG_ID);
        a.prompt.clear();
        a.use_preset = true;
        let wizard = prepare_wizard(WizardSettings::default(), a).unwrap();
        assert_eq!(wizard.form.prompt, wizard.preset().template);
    }

    #[tokio::test]
    async fn test_submit_prepared_success() {
        let gw = gateway(|| Ok(()));
        let mut wizard = prepare_wizard(WizardSettings::default(), args("c1")).unwrap();
        let nav = submit_prepared(&mut wizard, &gw, "http://auth").await.unwrap();
        assert!(nav.is_none());

        let sent = gw.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].selected_collection, "c1");
        assert_eq!(sent[0].category, None);
    }

    #[tokio::test]
    async fn test_submit_prepared_blog_needs_category() {
        let gw = gateway(|| Ok(()));
        let mut wizard = prepare_wizard(WizardSettings::default(), args(BLOG_ID)).unwrap();
        let err = submit_prepared(&mut wizard, &gw, "http://auth")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Category is required"));
        assert!(gw.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_submit_prepared_unauthorized_redirects() {
        let gw = gateway(|| Err(ApiError::Unauthorized));
        let mut wizard = prepare_wizard(WizardSettings::default(), args("c1")).unwrap();
        let nav = submit_prepared(&mut wizard, &gw, "http://auth").await.unwrap();
        assert_eq!(nav, Some(Navigation::Redirect("http://auth".into())));
    }

    #[tokio::test]
    async fn test_submit_prepared_failure() {
        let gw = gateway(|| Err(ApiError::NotConfigured("submission webhook")));
        let mut wizard = prepare_wizard(WizardSettings::default(), args("c1")).unwrap();
        let err = submit_prepared(&mut wizard, &gw, "http://auth")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), SUBMIT_FAILURE_MESSAGE);
        assert_eq!(wizard.form.prompt, "Write about Rust");
    }

    #[test]
    fn test_collection_lines_filter() {
        let collections = vec![
            Collection {
                id: "c1".into(),
                name: "Blog Posts".into(),
            },
            Collection {
                id: "c2".into(),
                name: "Authors".into(),
            },
        ];
        assert_eq!(
            collection_lines(collections.clone(), Some("BLOG")),
            vec!["c1\tBlog Posts".to_string()]
        );
        assert_eq!(
            collection_lines(collections, Some("zzz")),
            vec!["No collections found".to_string()]
        );
    }

    #[test]
    fn test_init_refuses_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        cmd_init(&path, false).unwrap();
        assert!(path.exists());
        assert!(cmd_init(&path, false).is_err());
        cmd_init(&path, true).unwrap();
        assert!(load_config(path.to_str()).is_ok());
    }

    #[test]
    fn test_render_config_masks_token() {
        let mut config = Config::default();
        config.api.api_token = Some(SecretString::new("abcdefghijklmnop".into()));
        let masked = render_config(&config, false).unwrap();
        assert!(!masked.contains("abcdefghijklmnop"));
        assert!(masked.contains("abcd…(16 chars)"));

        let shown = render_config(&config, true).unwrap();
        assert!(shown.contains("abcdefghijklmnop"));
    }
}
