use std::future::{self, Future};
use std::sync::Arc;
use std::time::Duration;

use chrono_tz::Tz;
use tracing::{debug, info, warn};

use crate::display::PreviewCard;
use crate::domain::{ComposeMode, Post, PostForm};
use crate::error::{FlowError, SubmitError};
use crate::mapping::{materialize, project};
use crate::ports::{
    BotVerifier, POST_ACTION, PostTransport, SessionProvider, SubmitPayload, SubmitReceipt,
};
use crate::validation::validate_form;

use super::state::{FlowPhase, Stage};

/// Invoked once with the submitted post.
pub type SuccessCallback = Box<dyn FnOnce(Post) + Send + Sync>;

/// External collaborators of the flow.
#[derive(Clone)]
pub struct FlowPorts {
    pub transport: Arc<dyn PostTransport>,
    pub verifier: Arc<dyn BotVerifier>,
    pub session: Arc<dyn SessionProvider>,
}

/// Flow configuration.
#[derive(Debug, Clone)]
pub struct FlowConfig {
    /// Zone garage-sale dates and times are entered in.
    pub zone: Tz,
    /// Upper bound on verification plus the backend call.
    pub submit_timeout: Duration,
    /// Text of the submit button.
    pub submit_label: String,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            zone: chrono_tz::UTC,
            submit_timeout: Duration::from_secs(30),
            submit_label: "Submit".to_string(),
        }
    }
}

/// Sequences projection, validation, materialization and submission of one
/// post.
///
/// The flow starts in [`FlowPhase::Compose`] with a form projected from the
/// post being edited (or a blank one), moves to [`FlowPhase::Preview`] once
/// a valid form is materialized, and ends in [`FlowPhase::Submitted`] when the
/// backend accepts the preview. A failed submit returns to the preview with
/// the error kept on the flow so the user can retry.
pub struct PostFlow {
    mode: ComposeMode,
    config: FlowConfig,
    ports: FlowPorts,
    stage: Stage,
    submit_error: Option<SubmitError>,
    receipt: Option<SubmitReceipt>,
    on_success: Option<SuccessCallback>,
}

impl PostFlow {
    /// Start composing a new post.
    pub fn create(ports: FlowPorts, config: FlowConfig) -> Self {
        let form = project(None, config.zone);
        Self::with_stage(ComposeMode::Create, form, ports, config)
    }

    /// Start editing a stored post. The post must carry its server id.
    pub fn edit(post: &Post, ports: FlowPorts, config: FlowConfig) -> Result<Self, FlowError> {
        let post_id = post.id.clone().ok_or(FlowError::MissingPostId)?;
        let form = project(Some(post), config.zone);
        Ok(Self::with_stage(
            ComposeMode::Edit { post_id },
            form,
            ports,
            config,
        ))
    }

    fn with_stage(mode: ComposeMode, form: PostForm, ports: FlowPorts, config: FlowConfig) -> Self {
        Self {
            mode,
            config,
            ports,
            stage: Stage::Compose { form },
            submit_error: None,
            receipt: None,
            on_success: None,
        }
    }

    /// Register the completion callback.
    pub fn on_success(mut self, callback: impl FnOnce(Post) + Send + Sync + 'static) -> Self {
        self.on_success = Some(Box::new(callback));
        self
    }

    pub fn phase(&self) -> FlowPhase {
        self.stage.phase()
    }

    pub fn mode(&self) -> &ComposeMode {
        &self.mode
    }

    pub fn submit_label(&self) -> &str {
        &self.config.submit_label
    }

    /// The form to render while composing.
    pub fn form(&self) -> Option<&PostForm> {
        match &self.stage {
            Stage::Compose { form } => Some(form),
            _ => None,
        }
    }

    /// The materialized post under review (also while it is being submitted).
    pub fn preview(&self) -> Option<&Post> {
        match &self.stage {
            Stage::Preview { preview } | Stage::Submitting { preview } => Some(preview),
            _ => None,
        }
    }

    /// Why the last submit failed, if it did.
    pub fn submit_error(&self) -> Option<&SubmitError> {
        self.submit_error.as_ref()
    }

    pub fn has_submit_error(&self) -> bool {
        self.submit_error.is_some()
    }

    /// The backend's answer to the accepted submit.
    pub fn receipt(&self) -> Option<&SubmitReceipt> {
        self.receipt.as_ref()
    }

    /// Formatted card for the preview under review.
    pub fn preview_card(&self, media_base_url: &str) -> Option<PreviewCard> {
        self.preview()
            .map(|post| PreviewCard::from_post(post, self.config.zone, media_base_url, false))
    }

    /// Validate and materialize `form`, entering the preview.
    ///
    /// On invalid input the flow stays in compose and keeps `form` so the
    /// input layer can show it again with the field errors.
    pub fn request_preview(&mut self, form: PostForm) -> Result<Post, FlowError> {
        self.expect_phase(FlowPhase::Compose, "preview")?;

        let session = self.ports.session.session();
        if let Err(errors) = validate_form(&form, &self.mode, &session, self.config.zone) {
            debug!(fields = errors.errors().len(), "Preview blocked by invalid fields");
            self.stage = Stage::Compose { form };
            return Err(errors.into());
        }

        let mut preview = materialize(&form, &session, self.config.zone);
        if self.mode.is_edit() {
            // Contact email cannot be changed through an edit.
            preview.email = None;
        }

        info!(title = %preview.title, garage_sale = preview.is_garage_sale, "Preview ready");
        self.submit_error = None;
        self.stage = Stage::Preview {
            preview: preview.clone(),
        };
        Ok(preview)
    }

    /// Leave the preview and reconstitute the form it was built from.
    ///
    /// Consent was already given for this post, so `terms` comes back set.
    pub fn back_to_edit(&mut self) -> Result<PostForm, FlowError> {
        let preview = match &self.stage {
            Stage::Preview { preview } => preview,
            other => {
                return Err(FlowError::InvalidTransition {
                    action: "return to edit",
                    phase: other.phase(),
                });
            }
        };

        let mut form = project(Some(preview), self.config.zone);
        form.terms = true;

        info!("Returning to edit");
        self.submit_error = None;
        self.stage = Stage::Compose { form: form.clone() };
        Ok(form)
    }

    /// Submit the preview.
    pub async fn submit(&mut self) -> Result<Post, FlowError> {
        self.submit_with_cancel(future::pending()).await
    }

    /// Submit the preview, giving up when `cancel` resolves first.
    ///
    /// Creation fetches a bot-verification token for the `post` action and
    /// attaches it; edits send the session token instead. The whole exchange
    /// is bounded by [`FlowConfig::submit_timeout`].
    pub async fn submit_with_cancel<C>(&mut self, cancel: C) -> Result<Post, FlowError>
    where
        C: Future<Output = ()>,
    {
        let preview = match &self.stage {
            Stage::Preview { preview } => preview.clone(),
            Stage::Submitting { .. } => return Err(FlowError::SubmitInFlight),
            other => {
                return Err(FlowError::InvalidTransition {
                    action: "submit",
                    phase: other.phase(),
                });
            }
        };

        self.submit_error = None;
        self.stage = Stage::Submitting {
            preview: preview.clone(),
        };

        let timeout = self.config.submit_timeout;
        let outcome = tokio::select! {
            result = tokio::time::timeout(timeout, self.send(&preview)) => {
                Some(result.unwrap_or(Err(SubmitError::TimedOut(timeout))))
            }
            () = cancel => None,
        };

        match outcome {
            Some(Ok(receipt)) => {
                info!(status = receipt.status, "New post successfully submitted");
                self.receipt = Some(receipt);
                self.stage = Stage::Submitted {
                    post: preview.clone(),
                };
                if let Some(callback) = self.on_success.take() {
                    callback(preview.clone());
                }
                Ok(preview)
            }
            Some(Err(err)) => {
                warn!(error = %err, "Post submission failed");
                self.submit_error = Some(err.clone());
                self.stage = Stage::Preview { preview };
                Err(err.into())
            }
            None => {
                info!("Post submission cancelled");
                self.stage = Stage::Preview { preview };
                Err(FlowError::Cancelled)
            }
        }
    }

    /// Return a stuck submission to the preview.
    ///
    /// Needed when a submit future was dropped before it finished.
    pub fn cancel_submit(&mut self) -> Result<(), FlowError> {
        let Stage::Submitting { preview } = &self.stage else {
            return Err(FlowError::InvalidTransition {
                action: "cancel submit",
                phase: self.phase(),
            });
        };

        warn!("Abandoning in-flight submission");
        self.stage = Stage::Preview {
            preview: preview.clone(),
        };
        Ok(())
    }

    async fn send(&self, preview: &Post) -> Result<SubmitReceipt, SubmitError> {
        let payload = SubmitPayload::new(preview.clone());

        match &self.mode {
            ComposeMode::Create => {
                let token = self.ports.verifier.fetch_token(POST_ACTION).await?;
                debug!("Creating post");
                let receipt = self
                    .ports
                    .transport
                    .create_post(&payload.with_verification(token))
                    .await?;
                Ok(receipt)
            }
            ComposeMode::Edit { post_id } => {
                let session = self.ports.session.session();
                let token = session.token().ok_or(SubmitError::Unauthenticated)?;
                debug!(post_id = %post_id, "Updating post");
                let receipt = self
                    .ports
                    .transport
                    .update_post(post_id, &payload, token)
                    .await?;
                Ok(receipt)
            }
        }
    }

    fn expect_phase(&self, expected: FlowPhase, action: &'static str) -> Result<(), FlowError> {
        let phase = self.phase();
        if phase == expected {
            Ok(())
        } else {
            Err(FlowError::InvalidTransition { action, phase })
        }
    }
}
