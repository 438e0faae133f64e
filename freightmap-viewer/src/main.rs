use anyhow::{Context, Result};
use clap::Parser;
use freightmap::{
    HeadlessProvider, HeadlessSurface, MapEvent, MapTrigger, MotionProfile, RouteMap,
    RouteMapConfig, RouteResponse, RouteVariant,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "freightmap-viewer")]
#[command(about = "Render a route response onto a headless map and print the result", long_about = None)]
struct Cli {
    /// Route response JSON file
    route: PathBuf,

    /// Variant to draw (efficient or shortest)
    #[arg(short, long, default_value = "efficient")]
    variant: RouteVariant,

    /// Configuration JSON file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Simulated surface load time in milliseconds
    #[arg(long, default_value = "0")]
    load_delay_ms: u64,

    /// Accept a missing access token
    #[arg(long)]
    no_token: bool,

    /// Jump the camera instead of animating it
    #[arg(long)]
    reduced_motion: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => RouteMapConfig::from_json_file(path)
            .with_context(|| format!("reading config {}", path.display()))?,
        None => RouteMapConfig::default(),
    }
    .apply_env();
    let config = if cli.reduced_motion {
        config.with_motion(MotionProfile::Reduced)
    } else {
        config
    };

    let json = std::fs::read_to_string(&cli.route)
        .with_context(|| format!("reading route {}", cli.route.display()))?;
    let response = RouteResponse::from_json(&json).context("parsing route response")?;

    let mut provider = HeadlessProvider::new();
    if cli.no_token {
        provider = provider.without_token_check();
    }

    let mut map: RouteMap<HeadlessSurface> = RouteMap::new(config);
    map.on("failed", |event| {
        if let MapEvent::SessionFailed { reason } = event {
            eprintln!("map unavailable: {}", reason);
        }
    });

    if !map.mount(&mut provider) {
        map.process_events();
        anyhow::bail!("map surface could not be created; set MAPBOX_ACCESS_TOKEN or pass --no-token");
    }

    // Route and variant arrive before the surface has loaded and are held
    map.set_route(Some(Arc::new(response)));
    if cli.variant != RouteVariant::default() && !map.toggle_available() {
        log::warn!(
            "both variants use the same mode; drawing {} as requested although the toggle is hidden",
            cli.variant
        );
    }
    map.select_variant(cli.variant);

    let loaded = map
        .trigger_handle()
        .post_after(MapTrigger::SurfaceLoaded, Duration::from_millis(cli.load_delay_ms));
    loaded.await.context("surface load task")?;
    map.pump();

    for event in map.process_events() {
        log::info!("{}", serde_json::to_string(&event)?);
    }

    let surface = map.surface().context("surface released early")?;
    println!("{}", serde_json::to_string_pretty(&surface.snapshot())?);

    map.unmount();
    Ok(())
}
