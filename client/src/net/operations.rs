//! Async AI operations: generate, iterate, enhance, variations, refresh.
//!
//! SYSTEM CONTEXT
//! ==============
//! Views call these entry points from `spawn_local`. Each one resolves the
//! credential, claims the busy flag, records its starting point in undo
//! history, then turns model output into reducer actions addressed by
//! `(session id, artifact id)`.
//!
//! CONCURRENCY
//! ===========
//! Candidate streams of one operation are polled together with `join_all`.
//! A failed stream only marks its own artifact as `error`; the busy flag is
//! released after every stream has settled. Writes never consult the
//! "current" session, so a stream that outlives a session switch keeps
//! updating its own background session.
//!
//! ERROR HANDLING
//! ==============
//! Entry points return `Err` only when they refuse to start (no key, busy,
//! nothing focused). Everything after that is reported through artifact
//! status.

#[cfg(test)]
#[path = "operations_test.rs"]
mod operations_test;

use std::cell::RefCell;
use std::rc::Rc;

use futures::StreamExt;
use futures::future::{Either, LocalBoxFuture, join_all, select};
use leptos::prelude::{RwSignal, Update, WithUntracked};

use super::attachment::Attachment;
use super::config::AiConfig;
use super::generator::{self, GenerateError, GenerateRequest, Generator};
use super::prompts::{self, EnhanceKind, VARIATION_DIRECTIONS};
use crate::state::app::AppState;
use crate::state::artifacts::{SessionAction, strip_code_fences};
use crate::state::session::{ARTIFACTS_PER_SESSION, Artifact, Session, new_session_id};
use crate::util::time::now_ms;

// =============================================================================
// SEAMS
// =============================================================================

/// Access to the shared [`AppState`]. `None` means the state is gone (the
/// owning view was torn down) and the write is dropped.
pub trait StateHandle {
    fn read<R>(&self, f: impl FnOnce(&AppState) -> R) -> Option<R>;
    fn write<R>(&self, f: impl FnOnce(&mut AppState) -> R) -> Option<R>;
}

impl StateHandle for RwSignal<AppState> {
    fn read<R>(&self, f: impl FnOnce(&AppState) -> R) -> Option<R> {
        self.try_with_untracked(f)
    }

    fn write<R>(&self, f: impl FnOnce(&mut AppState) -> R) -> Option<R> {
        self.try_update(f)
    }
}

impl StateHandle for Rc<RefCell<AppState>> {
    fn read<R>(&self, f: impl FnOnce(&AppState) -> R) -> Option<R> {
        Some(f(&self.borrow()))
    }

    fn write<R>(&self, f: impl FnOnce(&mut AppState) -> R) -> Option<R> {
        Some(f(&mut self.borrow_mut()))
    }
}

/// Source of delays for the concept-name timeout.
pub trait Timer {
    fn sleep(&self, ms: u32) -> LocalBoxFuture<'static, ()>;
}

/// `setTimeout`-backed delays. Off-browser the delay never elapses.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserTimer;

impl Timer for BrowserTimer {
    fn sleep(&self, ms: u32) -> LocalBoxFuture<'static, ()> {
        #[cfg(feature = "csr")]
        {
            Box::pin(gloo_timers::future::TimeoutFuture::new(ms))
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = ms;
            Box::pin(futures::future::pending())
        }
    }
}

/// Address and pre-operation html of the artifact an operation rewrites.
#[derive(Debug, Clone)]
struct Target {
    session_id: String,
    artifact_id: String,
    html: String,
}

// =============================================================================
// OPERATIONS
// =============================================================================

#[derive(Clone, Copy, Debug)]
pub struct Operations<S, G, T> {
    state: S,
    generator: G,
    timer: T,
}

impl<S: StateHandle, G: Generator, T: Timer> Operations<S, G, T> {
    pub fn new(state: S, generator: G, timer: T) -> Self {
        Self { state, generator, timer }
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    /// Start a new session from `prompt` and an optional attachment.
    ///
    /// Returns the session id, or `None` when there was nothing to send.
    ///
    /// # Errors
    ///
    /// Fails fast with [`GenerateError::MissingApiKey`] or
    /// [`GenerateError::Busy`] before anything is written.
    pub async fn generate(&self, prompt: &str, attachment: Option<Attachment>) -> Result<Option<String>, GenerateError> {
        let prompt = prompt.trim();
        if prompt.is_empty() && attachment.is_none() {
            return Ok(None);
        }
        let config = self.begin()?;
        let settings = self.state.read(|s| s.settings.clone()).unwrap_or_default();

        let session_id = new_session_id();
        let session = Session::with_placeholders(
            session_id.clone(),
            prompts::session_prompt(prompt, attachment.as_ref()),
            now_ms(),
            ARTIFACTS_PER_SESSION,
        );
        let artifact_ids: Vec<String> = session.artifacts.iter().map(|a| a.id.clone()).collect();
        self.dispatch(SessionAction::BeginGeneration { session });
        log::info!("generation started: session_id={session_id} attachment={}", attachment.is_some());

        let styles = if attachment.is_some() {
            generator::fallback_styles(true)
        } else {
            self.style_names(&config, prompt).await
        };
        self.dispatch(SessionAction::SetStyleNames { session_id: session_id.clone(), names: styles.clone() });

        let runs = artifact_ids.iter().zip(&styles).map(|(artifact_id, style)| {
            let request = prompts::generation_request(prompt, style, &settings, attachment.as_ref());
            self.run_stream(&config, &session_id, artifact_id, request, None)
        });
        let settled = join_all(runs).await;
        self.finish("generate", &settled);
        Ok(Some(session_id))
    }

    /// Rewrite the focused artifact from a chat instruction. Revertible.
    ///
    /// # Errors
    ///
    /// Fails fast when nothing is focused, no key is configured or another
    /// operation is running.
    pub async fn iterate(&self, instruction: &str) -> Result<bool, GenerateError> {
        let instruction = instruction.trim();
        if instruction.is_empty() {
            return Ok(false);
        }
        let target = self.focused_target()?;
        let config = self.begin()?;
        self.restart(&target, true);
        log::info!("iteration started: artifact_id={}", target.artifact_id);

        let request = prompts::iteration_request(instruction, &target.html);
        let ok = self
            .run_stream(&config, &target.session_id, &target.artifact_id, request, Some(target.html.clone()))
            .await;
        self.finish("iterate", &[ok]);
        Ok(ok)
    }

    /// Apply a named enhancement to the focused artifact. Revertible; an
    /// empty model response leaves the html as it was.
    ///
    /// # Errors
    ///
    /// Same fail-fast cases as [`Operations::iterate`].
    pub async fn enhance(&self, kind: EnhanceKind, attachment: Option<Attachment>) -> Result<bool, GenerateError> {
        let target = self.focused_target()?;
        let config = self.begin()?;
        self.state.write(AppState::close_drawer);
        self.restart(&target, false);
        log::info!("enhancement started: kind={} artifact_id={}", kind.id(), target.artifact_id);

        let request = prompts::enhancement_request(kind, &target.html, attachment.as_ref());
        let result = self.generator.complete(&config, request).await;
        let ok = match result {
            Ok(text) if !strip_code_fences(&text).is_empty() => {
                self.settle(&target, text, Some(target.html.clone()));
                true
            }
            Ok(_) => {
                log::warn!("enhancement returned no html: kind={} artifact_id={}", kind.id(), target.artifact_id);
                self.settle(&target, target.html.clone(), None);
                false
            }
            Err(err) => {
                self.fail(&target.session_id, &target.artifact_id, &err, Some(target.html.clone()));
                false
            }
        };
        self.finish("enhance", &[ok]);
        Ok(ok)
    }

    /// Append two design variations of the focused artifact to its session.
    ///
    /// # Errors
    ///
    /// Same fail-fast cases as [`Operations::iterate`].
    pub async fn generate_variations(&self) -> Result<Vec<String>, GenerateError> {
        let target = self.focused_target()?;
        let config = self.begin()?;
        let (context, first_index) = self
            .state
            .read(|s| {
                s.sessions()
                    .iter()
                    .find(|session| session.id == target.session_id)
                    .map(|session| (session.prompt.clone(), session.next_artifact_index()))
            })
            .flatten()
            .unwrap_or_default();

        let placeholders: Vec<Artifact> = (0..VARIATION_DIRECTIONS.len())
            .map(|n| Artifact::placeholder(&target.session_id, first_index + n, &format!("Variation {}", n + 1)))
            .collect();
        let ids: Vec<String> = placeholders.iter().map(|a| a.id.clone()).collect();
        self.dispatch(SessionAction::AppendArtifacts { session_id: target.session_id.clone(), artifacts: placeholders });
        self.state.write(AppState::unfocus);
        log::info!("variations started: source={} count={}", target.artifact_id, ids.len());

        let runs = ids.iter().zip(VARIATION_DIRECTIONS).map(|(artifact_id, direction)| {
            let request = prompts::variation_request(direction, &context, &target.html);
            self.run_stream(&config, &target.session_id, artifact_id, request, None)
        });
        let settled = join_all(runs).await;
        self.finish("variations", &settled);
        Ok(ids)
    }

    /// Regenerate one artifact in place from its session prompt and style.
    /// Not revertible.
    ///
    /// # Errors
    ///
    /// [`GenerateError::NoTarget`] when the artifact does not exist, plus
    /// the key and busy cases.
    pub async fn refresh(&self, session_id: &str, artifact_id: &str) -> Result<bool, GenerateError> {
        let found = self
            .state
            .read(|s| {
                let session = s.sessions().iter().find(|session| session.id == session_id)?;
                let artifact = session.artifact(artifact_id)?;
                Some((session.prompt.clone(), artifact.style_name.clone(), artifact.html.clone(), s.settings.clone()))
            })
            .flatten();
        let Some((prompt, style, html, settings)) = found else {
            return Err(GenerateError::NoTarget);
        };
        let config = self.begin()?;
        let target = Target { session_id: session_id.to_owned(), artifact_id: artifact_id.to_owned(), html };
        self.restart(&target, true);
        log::info!("refresh started: artifact_id={artifact_id}");

        let request = prompts::generation_request(&prompt, &style, &settings, None);
        let ok = self.run_stream(&config, session_id, artifact_id, request, None).await;
        self.finish("refresh", &[ok]);
        Ok(ok)
    }

    // -------------------------------------------------------------------------
    // helpers
    // -------------------------------------------------------------------------

    fn begin(&self) -> Result<AiConfig, GenerateError> {
        let override_key = self.state.read(|s| s.settings.api_key.clone()).flatten();
        let config = match AiConfig::resolve(override_key.as_deref()) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("operation refused: {err}");
                self.state.write(|s| s.notice = Some(err.to_string()));
                return Err(err);
            }
        };
        if !self.state.write(AppState::try_begin_loading).unwrap_or(false) {
            return Err(GenerateError::Busy);
        }
        Ok(config)
    }

    fn finish(&self, operation: &str, settled: &[bool]) {
        let failed = settled.iter().filter(|ok| !**ok).count();
        log::info!("{operation} finished: streams={} failed={failed}", settled.len());
        self.state.write(AppState::finish_loading);
    }

    fn focused_target(&self) -> Result<Target, GenerateError> {
        self.state
            .read(|s| {
                s.focused_artifact().map(|(session, artifact)| Target {
                    session_id: session.id.clone(),
                    artifact_id: artifact.id.clone(),
                    html: artifact.html.clone(),
                })
            })
            .flatten()
            .ok_or(GenerateError::NoTarget)
    }

    fn dispatch(&self, action: SessionAction) {
        self.state.write(|s| s.dispatch(action));
    }

    fn restart(&self, target: &Target, clear_html: bool) {
        self.dispatch(SessionAction::RestartArtifact {
            session_id: target.session_id.clone(),
            artifact_id: target.artifact_id.clone(),
            clear_html,
        });
    }

    fn settle(&self, target: &Target, final_html: String, snapshot: Option<String>) {
        self.dispatch(SessionAction::FinalizeArtifact {
            session_id: target.session_id.clone(),
            artifact_id: target.artifact_id.clone(),
            final_html,
            snapshot,
        });
    }

    fn fail(&self, session_id: &str, artifact_id: &str, err: &GenerateError, snapshot: Option<String>) {
        log::warn!("artifact stream failed: session_id={session_id} artifact_id={artifact_id} error={err}");
        self.dispatch(SessionAction::FailArtifact {
            session_id: session_id.to_owned(),
            artifact_id: artifact_id.to_owned(),
            message: err.to_string(),
            snapshot,
        });
    }

    /// Concept names with fallback on error, bad shape or timeout.
    async fn style_names(&self, config: &AiConfig, prompt: &str) -> Vec<String> {
        let call = self.generator.complete(config, prompts::style_names_request(prompt));
        let timeout = self.timer.sleep(config.style_timeout_ms);
        match select(call, timeout).await {
            Either::Left((Ok(text), _)) => generator::parse_style_names(&text).unwrap_or_else(|| {
                log::warn!("style names unparseable, using fallback");
                generator::fallback_styles(false)
            }),
            Either::Left((Err(err), _)) => {
                log::warn!("style names failed, using fallback: {err}");
                generator::fallback_styles(false)
            }
            Either::Right(((), _)) => {
                log::warn!("style names timed out after {}ms, using fallback", config.style_timeout_ms);
                generator::fallback_styles(false)
            }
        }
    }

    /// Drive one stream into one artifact. Returns whether it completed.
    async fn run_stream(
        &self,
        config: &AiConfig,
        session_id: &str,
        artifact_id: &str,
        request: GenerateRequest,
        snapshot: Option<String>,
    ) -> bool {
        let mut stream = self.generator.stream(config, request);
        let mut text = String::new();
        while let Some(item) = stream.next().await {
            match item {
                Ok(delta) if delta.is_empty() => {}
                Ok(delta) => {
                    text.push_str(&delta);
                    self.dispatch(SessionAction::ApplyChunk {
                        session_id: session_id.to_owned(),
                        artifact_id: artifact_id.to_owned(),
                        delta,
                    });
                }
                Err(err) => {
                    self.fail(session_id, artifact_id, &err, snapshot);
                    return false;
                }
            }
        }
        if strip_code_fences(&text).is_empty() {
            self.fail(session_id, artifact_id, &GenerateError::EmptyResponse, snapshot);
            return false;
        }
        log::debug!("artifact stream complete: session_id={session_id} artifact_id={artifact_id} bytes={}", text.len());
        self.dispatch(SessionAction::FinalizeArtifact {
            session_id: session_id.to_owned(),
            artifact_id: artifact_id.to_owned(),
            final_html: text,
            snapshot,
        });
        true
    }
}
