use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use viewfinder::{
    CameraId, CameraSource, CaptureBackend, DisplayView, FrameSink, RenderLayer,
    TestPatternBackend, WebcamBackend,
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Camera device id to select (defaults to the first discovered device)
    #[arg(short, long)]
    camera: Option<String>,

    /// List discovered devices and exit
    #[arg(long)]
    list: bool,

    /// Use the synthetic test pattern instead of real hardware
    #[arg(long)]
    test_source: bool,

    /// Test pattern width
    #[arg(long, default_value_t = 1280)]
    width: u32,

    /// Test pattern height
    #[arg(long, default_value_t = 720)]
    height: u32,

    /// Test pattern frames per second
    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// How long to run the preview, in seconds (0 = until interrupted)
    #[arg(long, default_value_t = 0)]
    duration: u64,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .init();

    tracing::info!("Viewfinder starting");

    let backend: Box<dyn CaptureBackend> = if args.test_source {
        tracing::info!(
            "Using test pattern source: {}x{} at {} fps",
            args.width,
            args.height,
            args.fps
        );
        Box::new(TestPatternBackend::new(1, args.width, args.height, args.fps))
    } else {
        Box::new(WebcamBackend::new())
    };

    let view = DisplayView::new();
    let layer = view.render_layer();

    let mut source = CameraSource::new(backend, layer.clone() as Arc<dyn FrameSink>)
        .context("Failed to initialize camera source")?;

    for device in source.available_cameras() {
        tracing::info!("Found camera {}: {}", device.id(), device.label());
    }
    if args.list {
        return Ok(());
    }

    let id = match &args.camera {
        Some(raw) => CameraId::new(raw.clone()),
        None => source
            .available_cameras()
            .first()
            .map(|d| d.id().clone())
            .context("No capture devices found")?,
    };

    source
        .select_camera(&id)
        .with_context(|| format!("Failed to select camera {id}"))?;

    run_preview(&layer, args.duration)
}

/// Sample the render layer once a second and log delivery statistics
fn run_preview(layer: &RenderLayer, duration_secs: u64) -> Result<()> {
    let started = Instant::now();
    let mut last_count = 0u64;

    tracing::info!("Press Ctrl+C to stop");

    loop {
        std::thread::sleep(Duration::from_secs(1));

        let count = layer.frames_enqueued();
        match layer.latest() {
            Some(frame) => {
                let (width, height) = frame.dimensions();
                tracing::info!(
                    "Frame {}: {}x{}, {} fps",
                    frame.sequence,
                    width,
                    height,
                    count - last_count
                );
            }
            None => tracing::info!("No frames delivered yet"),
        }
        last_count = count;

        if duration_secs > 0 && started.elapsed() >= Duration::from_secs(duration_secs) {
            break;
        }
    }

    tracing::info!("Preview finished: {} frame(s) delivered", layer.frames_enqueued());
    Ok(())
}
