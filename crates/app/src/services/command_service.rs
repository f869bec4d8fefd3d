//! Command service — one input line, fully processed.
//!
//! For each line: parse (model first when configured, rules as the fixed
//! fallback), merge the actions into the loaded state, persist the result,
//! then drive the gateway. The state is threaded explicitly through each
//! step — load → merge → persist → apply — never held in a global.
//!
//! No failure here is fatal to the loop: a dead model falls back to rules,
//! an unreadable state file loads as the default, and a hardware failure
//! happens *after* the new state is persisted so the user's intent is never
//! lost.

use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use lumo_domain::action::{ParsedCommand, Provenance};
use lumo_domain::error::LumoError;
use lumo_domain::lamp::LampState;
use tracing::{debug, error, info, warn};

use crate::ports::{CommandParser, LampGateway, StateStore};
use crate::rules::RulesParser;

/// Hardware applies allowed per rolling second.
const MAX_APPLIES_PER_SEC: usize = 4;

/// What processing one line did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Nothing recognized in the input; no state mutation, no persistence.
    NoOp,
    /// Actions merged to a state identical to the current one; nothing
    /// re-persisted or re-applied.
    Unchanged(LampState),
    /// New state persisted and driven to the lamp.
    Applied(LampState),
    /// New state persisted, but the lamp could not be reached.
    DeviceFailed(LampState),
}

/// The interactive-loop use case: parse, merge, persist, apply.
pub struct CommandService<M, S, G> {
    model: Option<M>,
    rules: RulesParser,
    store: S,
    gateway: G,
    limiter: RateLimiter,
}

impl<M: CommandParser, S: StateStore, G: LampGateway> CommandService<M, S, G> {
    /// Create the service. `model` is `None` when no credential is
    /// configured; the rules parser is always available.
    pub fn new(model: Option<M>, store: S, gateway: G) -> Self {
        Self {
            model,
            rules: RulesParser::new(),
            store,
            gateway,
            limiter: RateLimiter::new(MAX_APPLIES_PER_SEC, Duration::from_secs(1)),
        }
    }

    /// Process one line of user input.
    ///
    /// # Errors
    ///
    /// Returns a storage error when the new state cannot be persisted. All
    /// other failures recover locally: parse failures become a no-op, model
    /// failures fall back to rules, and a device failure is reported in the
    /// returned [`CommandOutcome`] after the state was persisted.
    pub async fn handle_line(&self, text: &str) -> Result<CommandOutcome, LumoError> {
        let parsed = self.parse(text).await;
        if parsed.is_empty() {
            info!("no actions recognized; doing nothing");
            return Ok(CommandOutcome::NoOp);
        }
        info!(
            provenance = %parsed.provenance,
            actions = %describe(&parsed),
            "parsed actions"
        );

        let current = self.store.load().await?;
        let next = current.apply(&parsed.actions);
        if next == current {
            info!(state = %current, "state unchanged; skipping apply");
            return Ok(CommandOutcome::Unchanged(next));
        }

        // Persist first: hardware failure must not lose the user's intent.
        self.store.save(&next).await?;

        self.limiter.acquire().await;
        match self.gateway.apply(&next).await {
            Ok(()) => {
                info!(state = %next, "applied");
                Ok(CommandOutcome::Applied(next))
            }
            Err(err) => {
                error!(error = %err, state = %next, "device write failed; state persisted");
                Ok(CommandOutcome::DeviceFailed(next))
            }
        }
    }

    /// Model first when configured, rules as the fixed fallback.
    async fn parse(&self, text: &str) -> ParsedCommand {
        if let Some(model) = &self.model {
            match model.parse(text).await {
                Ok(actions) => return ParsedCommand::new(actions, Provenance::Model),
                Err(err) => {
                    warn!(error = %err, "model parser failed; falling back to rules");
                }
            }
        }
        ParsedCommand::new(self.rules.parse_text(text), Provenance::Rules)
    }
}

fn describe(parsed: &ParsedCommand) -> String {
    parsed
        .actions
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Rolling-window limiter for hardware writes.
struct RateLimiter {
    max: usize,
    window: Duration,
    stamps: Mutex<Vec<Instant>>,
}

impl RateLimiter {
    fn new(max: usize, window: Duration) -> Self {
        Self {
            max,
            window,
            stamps: Mutex::new(Vec::new()),
        }
    }

    /// How long the caller must wait before the next apply is allowed.
    fn delay_needed(&self, now: Instant) -> Option<Duration> {
        let mut stamps = self.stamps.lock().unwrap_or_else(PoisonError::into_inner);
        stamps.retain(|stamp| now.duration_since(*stamp) < self.window);
        if stamps.len() >= self.max {
            let oldest = stamps[0];
            Some(self.window.saturating_sub(now.duration_since(oldest)))
        } else {
            None
        }
    }

    fn record(&self, now: Instant) {
        self.stamps
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(now);
    }

    async fn acquire(&self) {
        if let Some(delay) = self.delay_needed(Instant::now()) {
            if !delay.is_zero() {
                debug!(?delay, "rate limiting hardware applies");
                tokio::time::sleep(delay).await;
            }
        }
        self.record(Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::future::Future;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use lumo_domain::action::Action;
    use lumo_domain::warmth::Warmth;

    struct FakeModelParser {
        actions: Option<Vec<Action>>,
    }

    impl CommandParser for FakeModelParser {
        fn parse(
            &self,
            _text: &str,
        ) -> impl Future<Output = Result<Vec<Action>, LumoError>> + Send {
            let result = self.actions.clone().ok_or_else(|| {
                LumoError::Parser(Box::new(std::io::Error::other("model unavailable")))
            });
            async { result }
        }
    }

    struct InMemoryStore {
        state: Mutex<LampState>,
        saves: AtomicUsize,
    }

    impl InMemoryStore {
        fn with(state: LampState) -> Self {
            Self {
                state: Mutex::new(state),
                saves: AtomicUsize::new(0),
            }
        }

        fn current(&self) -> LampState {
            *self.state.lock().unwrap()
        }

        fn save_count(&self) -> usize {
            self.saves.load(Ordering::SeqCst)
        }
    }

    impl StateStore for &InMemoryStore {
        fn load(&self) -> impl Future<Output = Result<LampState, LumoError>> + Send {
            let state = self.current();
            async move { Ok(state) }
        }

        fn save(&self, state: &LampState) -> impl Future<Output = Result<(), LumoError>> + Send {
            *self.state.lock().unwrap() = *state;
            self.saves.fetch_add(1, Ordering::SeqCst);
            async { Ok(()) }
        }
    }

    struct RecordingGateway {
        applied: Mutex<Vec<LampState>>,
        fail: bool,
    }

    impl RecordingGateway {
        fn new() -> Self {
            Self {
                applied: Mutex::new(Vec::new()),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                applied: Mutex::new(Vec::new()),
                fail: true,
            }
        }

        fn applies(&self) -> Vec<LampState> {
            self.applied.lock().unwrap().clone()
        }
    }

    impl LampGateway for &RecordingGateway {
        fn apply(&self, state: &LampState) -> impl Future<Output = Result<(), LumoError>> + Send {
            let result = if self.fail {
                Err(LumoError::Device(Box::new(std::io::Error::other(
                    "lamp unreachable",
                ))))
            } else {
                self.applied.lock().unwrap().push(*state);
                Ok(())
            };
            async { result }
        }
    }

    fn service<'a>(
        model: Option<FakeModelParser>,
        store: &'a InMemoryStore,
        gateway: &'a RecordingGateway,
    ) -> CommandService<FakeModelParser, &'a InMemoryStore, &'a RecordingGateway> {
        CommandService::new(model, store, gateway)
    }

    #[tokio::test]
    async fn should_use_model_actions_when_model_parser_succeeds() {
        let store = InMemoryStore::with(LampState::default());
        let gateway = RecordingGateway::new();
        let model = FakeModelParser {
            actions: Some(vec![Action::SetBrightness { percent: 30 }]),
        };
        let svc = service(Some(model), &store, &gateway);

        let outcome = svc.handle_line("please dim a bit").await.unwrap();

        assert!(matches!(outcome, CommandOutcome::Applied(state) if state.brightness == 30));
        assert_eq!(store.current().brightness, 30);
    }

    #[tokio::test]
    async fn should_fall_back_to_rules_when_model_parser_fails() {
        let store = InMemoryStore::with(LampState::default());
        let gateway = RecordingGateway::new();
        let model = FakeModelParser { actions: None };
        let svc = service(Some(model), &store, &gateway);

        let outcome = svc.handle_line("turn off").await.unwrap();

        assert!(matches!(outcome, CommandOutcome::Applied(state) if !state.power));
        assert!(!store.current().power);
    }

    #[tokio::test]
    async fn should_use_rules_when_no_model_configured() {
        let store = InMemoryStore::with(LampState::default());
        let gateway = RecordingGateway::new();
        let svc = service(None, &store, &gateway);

        let outcome = svc.handle_line("set to 40% and warm").await.unwrap();

        let expected = LampState {
            power: true,
            brightness: 40,
            warmth: Warmth::Warm,
        };
        assert_eq!(outcome, CommandOutcome::Applied(expected));
        assert_eq!(gateway.applies(), vec![expected]);
    }

    #[tokio::test]
    async fn should_do_nothing_when_text_unrecognized() {
        let store = InMemoryStore::with(LampState::default());
        let gateway = RecordingGateway::new();
        let svc = service(None, &store, &gateway);

        let outcome = svc.handle_line("what's the weather like").await.unwrap();

        assert_eq!(outcome, CommandOutcome::NoOp);
        assert_eq!(store.save_count(), 0);
        assert!(gateway.applies().is_empty());
    }

    #[tokio::test]
    async fn should_persist_state_even_when_device_fails() {
        let store = InMemoryStore::with(LampState::default());
        let gateway = RecordingGateway::failing();
        let svc = service(None, &store, &gateway);

        let outcome = svc.handle_line("turn off").await.unwrap();

        assert!(matches!(outcome, CommandOutcome::DeviceFailed(state) if !state.power));
        assert!(!store.current().power);
        assert_eq!(store.save_count(), 1);
    }

    #[tokio::test]
    async fn should_skip_persist_and_apply_when_state_unchanged() {
        let current = LampState::default();
        let store = InMemoryStore::with(current);
        let gateway = RecordingGateway::new();
        let svc = service(None, &store, &gateway);

        // Already on: a bare "turn on" merges to an identical state.
        let outcome = svc.handle_line("turn on").await.unwrap();

        assert_eq!(outcome, CommandOutcome::Unchanged(current));
        assert_eq!(store.save_count(), 0);
        assert!(gateway.applies().is_empty());
    }

    #[tokio::test]
    async fn should_restore_prior_settings_after_off_then_on() {
        let store = InMemoryStore::with(LampState {
            power: true,
            brightness: 70,
            warmth: Warmth::Warm,
        });
        let gateway = RecordingGateway::new();
        let svc = service(None, &store, &gateway);

        svc.handle_line("turn off").await.unwrap();
        assert!(!store.current().power);
        assert_eq!(store.current().brightness, 70);

        svc.handle_line("turn on").await.unwrap();
        let restored = store.current();
        assert!(restored.power);
        assert_eq!(restored.brightness, 70);
        assert_eq!(restored.warmth, Warmth::Warm);
    }

    #[test]
    fn should_not_delay_under_rate_limit() {
        let limiter = RateLimiter::new(4, Duration::from_secs(1));
        let now = Instant::now();
        for _ in 0..3 {
            assert_eq!(limiter.delay_needed(now), None);
            limiter.record(now);
        }
    }

    #[test]
    fn should_delay_when_window_is_full() {
        let limiter = RateLimiter::new(4, Duration::from_secs(1));
        let now = Instant::now();
        for _ in 0..4 {
            limiter.record(now);
        }
        assert!(limiter.delay_needed(now).is_some());
    }

    #[test]
    fn should_forget_stamps_outside_the_window() {
        let limiter = RateLimiter::new(4, Duration::from_millis(10));
        let then = Instant::now();
        for _ in 0..4 {
            limiter.record(then);
        }
        let later = then + Duration::from_millis(20);
        assert_eq!(limiter.delay_needed(later), None);
    }
}
