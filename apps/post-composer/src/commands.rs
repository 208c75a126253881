//! Subcommand implementations.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use serde_json::json;
use tokio::sync::oneshot;

use stoke_core::domain::{Post, PostForm};
use stoke_core::mapping::{materialize, project};
use stoke_core::ports::{PostTransport, SessionProvider};
use stoke_core::{FlowError, FlowPorts, PostFlow};
use stoke_infra::{InMemoryPostTransport, InMemorySession, StaticTokenVerifier};
use stoke_shared::PostAck;

use crate::config::AppConfig;

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("failed to parse {}", path.display()))
}

fn print_json(value: &impl serde::Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Ports for commands that never reach a backend.
fn offline_ports() -> FlowPorts {
    FlowPorts {
        transport: Arc::new(InMemoryPostTransport::new()),
        verifier: Arc::new(StaticTokenVerifier::empty()),
        session: Arc::new(InMemorySession::from_env()),
    }
}

/// Turn field errors into a readable report.
fn explain(err: FlowError) -> anyhow::Error {
    match err {
        FlowError::Validation(errors) => {
            let mut lines: Vec<String> = errors
                .field_errors()
                .into_iter()
                .flat_map(|(field, errs)| {
                    errs.iter().map(move |e| {
                        let message = e.message.as_deref().unwrap_or(&*e.code);
                        format!("  {field}: {message}")
                    })
                })
                .collect();
            lines.sort();
            anyhow::anyhow!("form is not ready for preview:\n{}", lines.join("\n"))
        }
        other => other.into(),
    }
}

pub fn project_post(config: &AppConfig, post: &Path) -> Result<()> {
    let post: Post = read_json(post)?;
    print_json(&project(Some(&post), config.zone))
}

pub fn preview(config: &AppConfig, form: &Path, edit: Option<&Path>) -> Result<()> {
    let form: PostForm = read_json(form)?;
    let ports = offline_ports();

    let mut flow = match edit {
        Some(path) => {
            let stored: Post = read_json(path)?;
            PostFlow::edit(&stored, ports, config.flow_config())?
        }
        None => PostFlow::create(ports, config.flow_config()),
    };

    let post = flow.request_preview(form).map_err(explain)?;
    let card = flow.preview_card(&config.media_base_url);
    print_json(&json!({ "card": card, "post": post }))
}

pub async fn submit(
    config: &AppConfig,
    form: &Path,
    edit: Option<String>,
    dry_run: bool,
) -> Result<()> {
    let form: PostForm = read_json(form)?;
    let session = Arc::new(InMemorySession::from_env());

    let ports = if dry_run {
        let transport = Arc::new(InMemoryPostTransport::new());
        if let Some(id) = &edit {
            // Stand in for the stored post so the update has something to hit.
            let mut seed = materialize(&form, &session.session(), config.zone);
            seed.id = Some(id.clone());
            transport.insert(seed).await;
        }
        FlowPorts {
            transport,
            verifier: Arc::new(StaticTokenVerifier::new("dry-run")),
            session,
        }
    } else {
        FlowPorts {
            transport: live_transport()?,
            verifier: Arc::new(StaticTokenVerifier::from_env()),
            session,
        }
    };

    let flow = match edit {
        Some(id) => {
            let stored = ports
                .transport
                .fetch_post(&id)
                .await
                .with_context(|| format!("failed to load post {id}"))?;
            PostFlow::edit(&stored, ports, config.flow_config())?
        }
        None => PostFlow::create(ports, config.flow_config()),
    };

    let (done_tx, done_rx) = oneshot::channel();
    let mut flow = flow.on_success(move |post| {
        let _ = done_tx.send(post);
    });

    flow.request_preview(form).map_err(explain)?;
    tracing::info!(label = flow.submit_label(), dry_run, "Submitting");

    let interrupted = async {
        let _ = tokio::signal::ctrl_c().await;
    };
    match flow.submit_with_cancel(interrupted).await {
        Ok(_) => {}
        Err(FlowError::Cancelled) => bail!("submission interrupted"),
        Err(err) => return Err(err.into()),
    }

    let post = done_rx
        .await
        .context("submission finished without reporting the post")?;

    let ack = flow
        .receipt()
        .and_then(|receipt| receipt.body.as_ref())
        .and_then(PostAck::from_body)
        .unwrap_or_default();

    print_json(&json!({ "ack": ack, "post": post }))
}

#[cfg(feature = "http")]
fn live_transport() -> Result<Arc<dyn PostTransport>> {
    let transport = stoke_infra::HttpPostTransport::from_env()?;
    Ok(Arc::new(transport))
}

#[cfg(not(feature = "http"))]
fn live_transport() -> Result<Arc<dyn PostTransport>> {
    bail!("built without the `http` feature; use --dry-run")
}
