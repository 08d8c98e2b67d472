//! fixmap - compose a procedure map scene and dump the drawn primitives

mod config;
mod events;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fixmap_core::{
    RecordingCanvas, RenderContext, SceneComposer, SceneConfig, ShapeCounts, StaticPointOverlay,
    TooltipUpdate,
};
use fixmap_stream::{HttpVectorStream, VectorClient};

use crate::config::Config;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Scene file (JSON)
    #[arg(long, default_value = "scenes/sfo.json")]
    scene: PathBuf,

    /// Pointer events to replay after composing, e.g. enter:SERFR,leave
    #[arg(long)]
    events: Option<String>,

    /// Vector endpoint base URL (overrides FIXMAP_STREAM_URL)
    #[arg(long)]
    stream_url: Option<String>,

    /// Seconds to wait for streamed vectors
    #[arg(long, default_value_t = 10)]
    wait_secs: u64,

    /// Pretty-print the output
    #[arg(long)]
    pretty: bool,
}

#[derive(Debug, Serialize)]
struct SceneDump {
    counts: ShapeCounts,
    streamed_shapes: usize,
    diagnostics: Vec<String>,
    canvas: RecordingCanvas,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("fixmap=debug".parse()?)
                .add_directive("fixmap_core=info".parse()?)
                .add_directive("fixmap_stream=info".parse()?),
        )
        .init();

    let args = Args::parse();
    let config = Config::from_env();

    let raw = std::fs::read_to_string(&args.scene)
        .with_context(|| format!("failed to read scene {}", args.scene.display()))?;
    let mut scene = SceneConfig::from_json(&raw)
        .with_context(|| format!("failed to parse scene {}", args.scene.display()))?;
    if config.trust_legend {
        scene.legend_trusted = true;
    }
    let script = match &args.events {
        Some(script) => events::parse_script(script)?,
        None => Vec::new(),
    };

    tracing::info!(
        "composing {} ({} fixes, {} procedures)",
        args.scene.display(),
        scene.waypoints.len(),
        scene.procedures.len()
    );

    let points = StaticPointOverlay::new(scene.points.clone());
    let (tx, mut rx) = mpsc::unbounded_channel();
    let stream = args.stream_url.or(config.stream_url).map(|url| {
        HttpVectorStream::new(
            VectorClient::new(&url),
            Handle::current(),
            tx,
            Duration::from_secs(config.stream_cache_secs),
        )
    });

    let mut composer = SceneComposer::new().with_point_overlay(&points);
    if let Some(stream) = &stream {
        composer = composer.with_vector_stream(stream);
    }

    let mut ctx = RenderContext::new(RecordingCanvas::new());
    let report = composer.compose(&scene, &mut ctx)?;

    let mut streamed_shapes = 0;
    if report.vector_stream_started {
        match tokio::time::timeout(Duration::from_secs(args.wait_secs), rx.recv()).await {
            Ok(Some(batch)) => streamed_shapes = ctx.apply_streamed(batch),
            Ok(None) => tracing::warn!("vector stream closed without data"),
            Err(_) => tracing::warn!("no vectors after {}s", args.wait_secs),
        }
    }

    if !script.is_empty() {
        let subscribed = ctx.canvas().subscriptions.clone();
        let updates = events::replay(&mut ctx, &subscribed, &script);
        let shown = updates
            .iter()
            .filter(|u| matches!(u, TooltipUpdate::Show { .. }))
            .count();
        tracing::info!("replayed {} pointer events, tooltip drawn {} times", script.len(), shown);
    }

    let dump = SceneDump {
        counts: report.counts,
        streamed_shapes,
        diagnostics: report
            .diagnostics
            .iter()
            .map(|d| format!("{:?}: {}", d.stage, d.error))
            .collect(),
        canvas: ctx.into_canvas(),
    };
    let out = if args.pretty {
        serde_json::to_string_pretty(&dump)?
    } else {
        serde_json::to_string(&dump)?
    };
    println!("{}", out);

    Ok(())
}
