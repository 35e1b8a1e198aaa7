use super::*;
use crate::api::{ChatReply, Collection, ModelDeploymentList, SubmissionGateway, Website};
use crate::error::{ApiError, ApiResult};
use async_trait::async_trait;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rstest::rstest;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

const BLOG_ID: &str = "66a345b2baa543bc5924b256";

/// Helper to create a KeyEvent
fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::empty())
}

fn ctrl_key(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
}

fn type_text(wizard: &mut PromptWizard, text: &str) {
    for c in text.chars() {
        wizard.handle_key(key(KeyCode::Char(c)));
    }
}

/// Wizard sitting on step 3 with website w1/Acme and the given collection
fn wizard_on_compose(collection_id: &str) -> PromptWizard {
    let mut wizard = PromptWizard::default();
    wizard.select_website("w1", "Acme");
    assert!(wizard.advance());
    wizard.select_collection(collection_id, "Some Collection");
    assert!(wizard.advance());
    wizard.enter_step();
    wizard
}

fn filled_blog_wizard() -> PromptWizard {
    let mut wizard = wizard_on_compose(BLOG_ID);
    wizard.set_field(Field::Prompt, "Write about Rust");
    wizard.set_field(Field::Model, "gpt-4o");
    wizard.set_field(Field::Category, "Engineering");
    wizard
}

/// Gateway that records what it was asked to send
struct MockGateway {
    calls: AtomicUsize,
    last: Mutex<Option<FormData>>,
    reply: fn() -> ApiResult<()>,
}

impl MockGateway {
    fn new(reply: fn() -> ApiResult<()>) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            last: Mutex::new(None),
            reply,
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SubmissionGateway for MockGateway {
    async fn submit(&self, form: &FormData) -> ApiResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last.lock().unwrap() = Some(form.clone());
        (self.reply)()
    }
}

fn accept() -> ApiResult<()> {
    Ok(())
}

fn reject() -> ApiResult<()> {
    Err(ApiError::NotConfigured("submission webhook"))
}

fn unauthorized() -> ApiResult<()> {
    Err(ApiError::Unauthorized)
}

// --- Step navigation ---

#[test]
fn test_wizard_creation() {
    let wizard = PromptWizard::default();
    assert_eq!(wizard.step, WizardStep::Website);
    assert_eq!(wizard.form, FormData::default());
    assert!(wizard.errors.is_empty());
    assert!(!wizard.is_submitting);
    assert!(wizard.notification.is_none());
}

#[rstest]
#[case(WizardStep::Website, Field::SelectedWebsite, "Please select a website")]
#[case(WizardStep::Collection, Field::SelectedCollection, "Please select a collection")]
#[case(WizardStep::Compose, Field::Prompt, "Prompt is required")]
fn test_advance_blocked_on_empty_required_field(
    #[case] step: WizardStep,
    #[case] field: Field,
    #[case] message: &str,
) {
    let mut wizard = PromptWizard::default();
    wizard.step = step;
    assert!(!wizard.advance());
    assert_eq!(wizard.step, step);
    assert_eq!(wizard.errors.get(field), Some(message));
}

#[test]
fn test_compose_requires_prompt_and_model() {
    let mut wizard = wizard_on_compose("c-pages");
    assert!(!wizard.advance());
    assert_eq!(wizard.step, WizardStep::Compose);
    assert_eq!(wizard.errors.get(Field::Prompt), Some("Prompt is required"));
    assert_eq!(wizard.errors.get(Field::Model), Some("AI Model is required"));
    assert!(!wizard.errors.contains(Field::Category));
}

#[test]
fn test_whitespace_only_is_empty() {
    let mut wizard = PromptWizard::default();
    wizard.select_website("   ", "Blank");
    assert!(!wizard.advance());
    assert_eq!(wizard.step, WizardStep::Website);
}

#[test]
fn test_advance_through_steps() {
    let mut wizard = PromptWizard::default();
    wizard.select_website("w1", "Acme");
    assert!(wizard.advance());
    assert_eq!(wizard.step, WizardStep::Collection);
    wizard.select_collection("c1", "Pages");
    assert!(wizard.advance());
    assert_eq!(wizard.step, WizardStep::Compose);
    assert!(wizard.errors.is_empty());
}

#[test]
fn test_cannot_advance_past_compose() {
    let mut wizard = filled_blog_wizard();
    assert!(!wizard.advance());
    assert_eq!(wizard.step, WizardStep::Compose);
    assert!(wizard.errors.is_empty());
}

#[test]
fn test_retreat_without_validation() {
    let mut wizard = wizard_on_compose("c1");
    wizard.form.selected_collection.clear();
    assert!(!wizard.retreat());
    assert_eq!(wizard.step, WizardStep::Collection);
    assert!(!wizard.retreat());
    assert_eq!(wizard.step, WizardStep::Website);
    // Step 1: nothing to go back to, caller should cancel
    assert!(wizard.retreat());
    assert_eq!(wizard.step, WizardStep::Website);
}

#[test]
fn test_errors_recomputed_wholesale() {
    let mut wizard = wizard_on_compose("c1");
    assert!(!wizard.validate_step(WizardStep::Compose));
    assert_eq!(wizard.errors.len(), 2);
    wizard.set_field(Field::Prompt, "hello");
    assert_eq!(wizard.errors.len(), 1);
    wizard.set_field(Field::Model, "gpt-4o");
    assert!(wizard.validate_step(WizardStep::Compose));
    assert!(wizard.errors.is_empty());
}

// --- Selection ---

#[test]
fn test_select_collection_always_resets_prompt() {
    let mut wizard = wizard_on_compose("c1");
    wizard.set_field(Field::Prompt, "Something long and careful");

    wizard.select_collection("c2", "Other");
    assert_eq!(wizard.form.prompt, "");

    wizard.set_field(Field::Prompt, "Again");
    // Re-selecting the same collection also clears it
    wizard.select_collection("c2", "Other");
    assert_eq!(wizard.form.prompt, "");
}

#[test]
fn test_select_collection_keeps_category() {
    let mut wizard = filled_blog_wizard();
    wizard.select_collection(BLOG_ID, "Blog");
    assert_eq!(wizard.form.category.as_deref(), Some("Engineering"));
}

#[test]
fn test_select_clears_field_error() {
    let mut wizard = PromptWizard::default();
    assert!(!wizard.advance());
    assert!(wizard.errors.contains(Field::SelectedWebsite));
    wizard.select_website("w1", "Acme");
    assert!(!wizard.errors.contains(Field::SelectedWebsite));
}

#[test]
fn test_changing_website_clears_collection() {
    let mut wizard = wizard_on_compose("c1");
    wizard.select_website("w1", "Acme");
    assert_eq!(wizard.form.selected_collection, "c1");

    wizard.select_website("w2", "Globex");
    assert_eq!(wizard.form.selected_website_name, "Globex");
    assert_eq!(wizard.form.selected_collection, "");
    assert_eq!(wizard.form.selected_collection_name, "");
    assert!(wizard.chat.is_none());
}

#[rstest]
#[case(BLOG_ID, true)]
#[case("c-pages", false)]
#[case("", false)]
fn test_blog_collection_requires_category(#[case] collection: &str, #[case] required: bool) {
    let mut wizard = PromptWizard::default();
    wizard.select_website("w1", "Acme");
    wizard.select_collection(collection, "Collection");
    wizard.set_field(Field::Prompt, "Write something");
    wizard.set_field(Field::Model, "gpt-4o");

    assert_eq!(wizard.validate_step(WizardStep::Compose), !required);
    assert_eq!(wizard.errors.contains(Field::Category), required);
}

#[test]
fn test_compose_form_by_collection() {
    assert_eq!(wizard_on_compose(BLOG_ID).compose_form(), ComposeForm::Blog);
    assert_eq!(wizard_on_compose("c1").compose_form(), ComposeForm::Assisted);
}

#[test]
fn test_blog_collection_id_is_configurable() {
    let settings = WizardSettings {
        blog_collection_id: "my-blog".to_string(),
        ..WizardSettings::default()
    };
    let mut wizard = PromptWizard::new(settings);
    wizard.select_collection("my-blog", "Blog");
    assert_eq!(wizard.compose_form(), ComposeForm::Blog);
    wizard.select_collection(BLOG_ID, "Old Blog");
    assert_eq!(wizard.compose_form(), ComposeForm::Assisted);
}

// --- Mounting and listings ---

#[test]
fn test_enter_steps_request_listings() {
    let mut wizard = PromptWizard::default();
    assert_eq!(wizard.enter_step(), WizardAction::LoadSites);
    assert!(wizard.websites.is_loading());

    wizard.select_website("w1", "Acme");
    wizard.advance();
    assert_eq!(
        wizard.enter_step(),
        WizardAction::LoadCollections("w1".to_string())
    );
    assert!(wizard.collections.is_loading());

    wizard.select_collection("c1", "Pages");
    wizard.advance();
    assert_eq!(wizard.enter_step(), WizardAction::LoadModels);
    assert!(wizard.models.is_loading());
    assert!(wizard.chat.is_some());
    assert_eq!(wizard.compose_focus, ComposeFocus::Chat);
}

#[test]
fn test_blog_compose_needs_no_listing() {
    let mut wizard = PromptWizard::default();
    wizard.select_website("w1", "Acme");
    wizard.advance();
    wizard.select_collection(BLOG_ID, "Blog");
    wizard.advance();
    assert_eq!(wizard.enter_step(), WizardAction::None);
    assert!(wizard.chat.is_none());
    assert_eq!(wizard.compose_focus, ComposeFocus::Prompt);
}

#[test]
fn test_empty_site_listing_shows_no_results() {
    let mut wizard = PromptWizard::default();
    wizard.enter_step();
    wizard.apply_sites(Ok(vec![]));
    assert!(wizard.websites.shows_no_results());
    assert!(wizard.websites.highlighted().is_none());
    assert!(wizard.errors.is_empty());
    assert!(wizard.notification.is_none());

    // Enter with nothing to pick surfaces the validation message only
    wizard.handle_key(key(KeyCode::Enter));
    assert_eq!(wizard.step, WizardStep::Website);
    assert_eq!(
        wizard.errors.get(Field::SelectedWebsite),
        Some("Please select a website")
    );
}

#[test]
fn test_one_succeeded_deployment_is_selectable() {
    let list: ModelDeploymentList = serde_json::from_str(
        r#"{"data":[
            {"id":"d1","model":"gpt-4","status":"failed"},
            {"id":"d2","model":"gpt-4o","status":"succeeded"}
        ],"object":"list"}"#,
    )
    .unwrap();

    let mut wizard = wizard_on_compose("c1");
    wizard.apply_models(Ok(list.available()));
    assert_eq!(wizard.models.visible().len(), 1);

    wizard.compose_focus = ComposeFocus::Model;
    wizard.handle_key(key(KeyCode::Down));
    wizard.handle_key(key(KeyCode::Enter));
    assert_eq!(wizard.form.model, "d2");
}

#[test]
fn test_stale_collections_dropped() {
    let mut wizard = PromptWizard::default();
    wizard.select_website("w1", "Acme");
    wizard.advance();
    wizard.enter_step();

    wizard.apply_collections(
        "w0",
        Ok(vec![Collection {
            id: "old".into(),
            name: "Old".into(),
        }]),
    );
    assert!(wizard.collections.is_loading());

    wizard.apply_collections(
        "w1",
        Ok(vec![Collection {
            id: "c1".into(),
            name: "Pages".into(),
        }]),
    );
    assert_eq!(wizard.collections.items().len(), 1);
}

#[test]
fn test_sites_listing_focuses_current_selection() {
    let mut wizard = PromptWizard::default();
    wizard.select_website("w2", "Globex");
    wizard.enter_step();
    wizard.apply_sites(Ok(vec![
        Website {
            id: "w1".into(),
            name: "Acme".into(),
        },
        Website {
            id: "w2".into(),
            name: "Globex".into(),
        },
    ]));
    assert_eq!(wizard.websites.cursor(), 1);
}

// --- Submission ---

#[tokio::test]
async fn test_submit_invalid_skips_gateway() {
    let gateway = MockGateway::new(accept);
    let mut wizard = wizard_on_compose(BLOG_ID);
    wizard.set_field(Field::Prompt, "Write about Rust");
    wizard.set_field(Field::Model, "gpt-4o");

    let outcome = wizard.submit(&gateway).await;
    assert_eq!(outcome, SubmitOutcome::Invalid);
    assert_eq!(gateway.calls(), 0);
    assert!(!wizard.is_submitting);
    assert_eq!(wizard.errors.get(Field::Category), Some("Category is required"));
}

#[tokio::test]
async fn test_submit_success_resets_everything() {
    let gateway = MockGateway::new(accept);
    let mut wizard = filled_blog_wizard();

    let outcome = wizard.submit(&gateway).await;
    assert_eq!(outcome, SubmitOutcome::Submitted);
    assert_eq!(gateway.calls(), 1);

    let sent = gateway.last.lock().unwrap().clone().unwrap();
    assert_eq!(sent.selected_website_name, "Acme");
    assert_eq!(sent.category.as_deref(), Some("Engineering"));

    assert_eq!(wizard.step, WizardStep::Website);
    assert_eq!(wizard.form, FormData::default());
    assert!(wizard.errors.is_empty());
    assert!(!wizard.is_submitting);
    let notification = wizard.notification.as_ref().unwrap();
    assert_eq!(notification.kind, NotificationKind::Success);
    assert_eq!(notification.message, SUBMIT_SUCCESS_MESSAGE);
}

#[tokio::test]
async fn test_submit_failure_keeps_form() {
    let gateway = MockGateway::new(reject);
    let mut wizard = filled_blog_wizard();
    let before = wizard.form.clone();

    let outcome = wizard.submit(&gateway).await;
    assert_eq!(outcome, SubmitOutcome::Failed);
    assert_eq!(gateway.calls(), 1);
    assert_eq!(wizard.form, before);
    assert_eq!(wizard.step, WizardStep::Compose);
    assert!(!wizard.is_submitting);
    let notification = wizard.notification.as_ref().unwrap();
    assert_eq!(notification.kind, NotificationKind::Error);
    assert_eq!(notification.message, SUBMIT_FAILURE_MESSAGE);
}

#[tokio::test]
async fn test_submit_unauthorized_keeps_state() {
    let gateway = MockGateway::new(unauthorized);
    let mut wizard = filled_blog_wizard();
    let before = wizard.form.clone();

    assert_eq!(wizard.submit(&gateway).await, SubmitOutcome::Unauthorized);
    assert_eq!(wizard.form, before);
    assert_eq!(wizard.step, WizardStep::Compose);
    assert!(wizard.notification.is_none());
    assert!(!wizard.is_submitting);
}

#[test]
fn test_begin_submit_while_busy() {
    let mut wizard = filled_blog_wizard();
    assert!(wizard.begin_submit().is_ok());
    assert!(wizard.is_submitting);
    assert_eq!(wizard.begin_submit(), Err(SubmitOutcome::Busy));
    assert!(!wizard.can_submit());
}

#[test]
fn test_empty_category_omitted_from_payload() {
    let mut wizard = wizard_on_compose("c1");
    wizard.set_field(Field::Prompt, "p");
    wizard.set_field(Field::Model, "m");
    wizard.set_field(Field::Category, "");
    let payload = wizard.begin_submit().unwrap();
    assert_eq!(payload.category, None);
    let json = serde_json::to_value(&payload).unwrap();
    assert!(json.get("category").is_none());
}

#[test]
fn test_assisted_submit_disabled_without_prompt() {
    let mut wizard = wizard_on_compose("c1");
    wizard.set_field(Field::Model, "d2");
    assert!(!wizard.can_submit());
    assert_eq!(wizard.submit_action(), WizardAction::None);
    assert!(wizard.errors.is_empty());

    wizard.set_field(Field::Prompt, "From chat");
    assert!(wizard.can_submit());
    assert!(matches!(wizard.submit_action(), WizardAction::Submit(_)));
}

// --- Notifications ---

#[test]
fn test_notification_expires() {
    let mut wizard = PromptWizard::default();
    wizard.notify(NotificationKind::Success, "done");
    let shown_at = wizard.notification.as_ref().unwrap().shown_at;

    wizard.expire_notification(shown_at + Duration::from_secs(4));
    assert!(wizard.notification.is_some());
    wizard.expire_notification(shown_at + Duration::from_secs(5));
    assert!(wizard.notification.is_none());
}

#[test]
fn test_notification_dismissed_with_ctrl_x() {
    let mut wizard = PromptWizard::default();
    wizard.notify(NotificationKind::Error, "nope");
    wizard.handle_key(ctrl_key('x'));
    assert!(wizard.notification.is_none());
    wizard.expire_notification(Instant::now());
}

// --- Keys ---

#[test]
fn test_esc_on_first_step_cancels() {
    let mut wizard = PromptWizard::default();
    assert_eq!(wizard.handle_key(key(KeyCode::Esc)), WizardAction::Cancel);
    assert_eq!(wizard.handle_key(ctrl_key('c')), WizardAction::Cancel);
}

#[test]
fn test_esc_goes_back_and_remounts() {
    let mut wizard = PromptWizard::default();
    wizard.select_website("w1", "Acme");
    wizard.advance();
    assert_eq!(wizard.handle_key(key(KeyCode::Esc)), WizardAction::LoadSites);
    assert_eq!(wizard.step, WizardStep::Website);
}

#[test]
fn test_enter_selects_highlighted_and_advances() {
    let mut wizard = PromptWizard::default();
    wizard.enter_step();
    wizard.apply_sites(Ok(vec![
        Website {
            id: "w1".into(),
            name: "Acme".into(),
        },
        Website {
            id: "w2".into(),
            name: "Globex".into(),
        },
    ]));
    wizard.handle_key(key(KeyCode::Down));
    let action = wizard.handle_key(key(KeyCode::Enter));

    assert_eq!(action, WizardAction::LoadCollections("w2".to_string()));
    assert_eq!(wizard.step, WizardStep::Collection);
    assert_eq!(wizard.form.selected_website_name, "Globex");
}

#[test]
fn test_collection_filter_typing() {
    let mut wizard = PromptWizard::default();
    wizard.select_website("w1", "Acme");
    wizard.advance();
    wizard.enter_step();
    wizard.apply_collections(
        "w1",
        Ok(vec![
            Collection {
                id: "c1".into(),
                name: "Blog Posts".into(),
            },
            Collection {
                id: "c2".into(),
                name: "Team".into(),
            },
        ]),
    );

    type_text(&mut wizard, "tea");
    assert_eq!(wizard.collections.visible().len(), 1);

    // First Esc clears the filter, second goes back
    assert_eq!(wizard.handle_key(key(KeyCode::Esc)), WizardAction::None);
    assert_eq!(wizard.step, WizardStep::Collection);
    assert_eq!(wizard.collections.visible().len(), 2);
    assert_eq!(wizard.handle_key(key(KeyCode::Esc)), WizardAction::LoadSites);
}

#[test]
fn test_blog_form_typing_and_focus() {
    let mut wizard = wizard_on_compose(BLOG_ID);
    type_text(&mut wizard, "Line one");
    wizard.handle_key(key(KeyCode::Enter));
    type_text(&mut wizard, "two");
    assert_eq!(wizard.form.prompt, "Line one\ntwo");

    wizard.handle_key(key(KeyCode::Tab));
    assert_eq!(wizard.compose_focus, ComposeFocus::Category);
    type_text(&mut wizard, "News");
    wizard.handle_key(key(KeyCode::Backspace));
    assert_eq!(wizard.form.category.as_deref(), Some("New"));

    wizard.handle_key(key(KeyCode::BackTab));
    wizard.handle_key(key(KeyCode::BackTab));
    assert_eq!(wizard.compose_focus, ComposeFocus::Submit);
}

#[test]
fn test_ctrl_t_inserts_template() {
    let mut wizard = wizard_on_compose(BLOG_ID);
    wizard.handle_key(ctrl_key('t'));
    assert_eq!(wizard.form.prompt, BLOG_PRESET.template);
}

#[test]
fn test_submit_key_emits_payload() {
    let mut wizard = filled_blog_wizard();
    wizard.compose_focus = ComposeFocus::Submit;
    match wizard.handle_key(key(KeyCode::Enter)) {
        WizardAction::Submit(payload) => assert_eq!(payload.prompt, "Write about Rust"),
        other => panic!("expected submit, got {other:?}"),
    }
    assert!(wizard.is_submitting);
    // Disabled while in flight
    assert_eq!(wizard.handle_key(ctrl_key('s')), WizardAction::None);

    let outcome = wizard.finish_submit(Ok(()));
    assert_eq!(outcome, SubmitOutcome::Submitted);
}

#[test]
fn test_chat_send_and_use_final_prompt() {
    let mut wizard = wizard_on_compose("c1");
    assert_eq!(wizard.compose_focus, ComposeFocus::Chat);
    let template = DEFAULT_PRESET.template;
    assert_eq!(wizard.chat.as_ref().unwrap().messages()[0].text, template);

    type_text(&mut wizard, "coffee");
    let action = wizard.handle_key(key(KeyCode::Enter));
    let WizardAction::SendChat(request) = action else {
        panic!("expected chat request");
    };
    assert_eq!(request.message, "coffee");

    wizard.apply_chat_reply(
        &request.session_id,
        Ok(ChatReply {
            response: "Here you go".to_string(),
            final_prompt: Some("Write about coffee".to_string()),
        }),
    );
    wizard.handle_key(ctrl_key('u'));
    assert_eq!(wizard.form.prompt, "Write about coffee");
}

#[test]
fn test_reply_for_previous_collection_chat_is_dropped() {
    let mut wizard = wizard_on_compose("c1");
    type_text(&mut wizard, "old topic");
    let WizardAction::SendChat(old_request) = wizard.handle_key(key(KeyCode::Enter)) else {
        panic!("expected chat request");
    };

    // Back to step 2, pick another collection, return to step 3
    wizard.handle_key(key(KeyCode::Esc));
    assert_eq!(wizard.step, WizardStep::Collection);
    wizard.select_collection("c2", "Other");
    assert!(wizard.advance());
    wizard.enter_step();

    type_text(&mut wizard, "new topic");
    let WizardAction::SendChat(new_request) = wizard.handle_key(key(KeyCode::Enter)) else {
        panic!("expected chat request");
    };
    assert_ne!(old_request.session_id, new_request.session_id);

    wizard.apply_chat_reply(
        &old_request.session_id,
        Ok(ChatReply {
            response: "Old answer".to_string(),
            final_prompt: Some("Prompt about the old topic".to_string()),
        }),
    );

    let chat = wizard.chat.as_ref().unwrap();
    assert!(chat.is_busy());
    assert_eq!(chat.final_prompt(), None);
    assert!(chat.messages().iter().all(|m| m.text != "Old answer"));

    wizard.handle_key(ctrl_key('u'));
    assert_ne!(wizard.form.prompt, "Prompt about the old topic");
}

#[test]
fn test_chat_failure_shows_fallback() {
    let mut wizard = wizard_on_compose("c1");
    type_text(&mut wizard, "hi");
    wizard.handle_key(key(KeyCode::Enter));
    let session_id = wizard.chat.as_ref().unwrap().session_id().to_string();
    wizard.apply_chat_reply(&session_id, Err(ApiError::Unauthorized));
    let chat = wizard.chat.as_ref().unwrap();
    assert_eq!(chat.messages().last().unwrap().text, CHAT_FALLBACK);
    assert!(wizard.notification.is_none());
}

#[test]
fn test_chat_minimize_toggle() {
    let mut wizard = wizard_on_compose("c1");
    wizard.handle_key(ctrl_key('n'));
    assert!(wizard.chat.as_ref().unwrap().is_minimized());
}

#[test]
fn test_paste_routes_to_focused_field() {
    let mut wizard = wizard_on_compose(BLOG_ID);
    wizard.handle_paste("first\r\nsecond");
    assert_eq!(wizard.form.prompt, "first\nsecond");

    wizard.compose_focus = ComposeFocus::Keywords;
    wizard.handle_paste("rust, tui\nignored");
    assert_eq!(wizard.form.keywords, "rust, tui");
}

#[test]
fn test_model_is_free_text_on_blog_form() {
    let mut wizard = wizard_on_compose(BLOG_ID);
    wizard.compose_focus = ComposeFocus::Model;
    type_text(&mut wizard, "gpt-4o");
    assert_eq!(wizard.form.model, "gpt-4o");
    assert!(wizard.models.items().is_empty());
}

#[test]
fn test_input_ignored_while_submitting() {
    let mut wizard = filled_blog_wizard();
    wizard.compose_focus = ComposeFocus::Prompt;
    let WizardAction::Submit(_) = wizard.submit_action() else {
        panic!("expected submit");
    };
    let before = wizard.form.clone();

    assert_eq!(wizard.handle_key(key(KeyCode::Esc)), WizardAction::None);
    assert_eq!(wizard.step, WizardStep::Compose);
    type_text(&mut wizard, "more");
    wizard.handle_key(key(KeyCode::Backspace));
    wizard.handle_key(key(KeyCode::Tab));
    wizard.handle_paste("pasted text");
    assert_eq!(wizard.form, before);
    assert_eq!(wizard.compose_focus, ComposeFocus::Prompt);

    assert_eq!(
        wizard.finish_submit(Err(ApiError::NotConfigured("submission webhook"))),
        SubmitOutcome::Failed
    );
    assert_eq!(wizard.step, WizardStep::Compose);
    assert_eq!(wizard.form, before);

    // Editing works again once the request has settled
    wizard.handle_key(key(KeyCode::Esc));
    assert_eq!(wizard.step, WizardStep::Collection);
}

#[test]
fn test_quit_and_dismiss_still_work_while_submitting() {
    let mut wizard = filled_blog_wizard();
    let WizardAction::Submit(_) = wizard.submit_action() else {
        panic!("expected submit");
    };
    wizard.notify(NotificationKind::Error, "earlier failure");

    assert_eq!(wizard.handle_key(ctrl_key('x')), WizardAction::None);
    assert!(wizard.notification.is_none());
    assert_eq!(wizard.handle_key(ctrl_key('c')), WizardAction::Cancel);
}
