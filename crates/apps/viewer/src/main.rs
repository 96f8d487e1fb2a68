use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use camera::{MapAdapter, SimulatedMap};
use clap::Parser;
use tokio::io::AsyncReadExt;
use tracing::info;
use tracing_subscriber::EnvFilter;
use viewer::{Report, Viewer, ViewerConfig, parse_script, play};

#[derive(Parser, Debug)]
#[command(author, version, about = "Replays itinerary viewer events against a simulated map")]
struct Args {
    /// Event script, one event per line (reads stdin when omitted or `-`)
    script: Option<PathBuf>,

    /// Itinerary JSON file (default: $ITINERARY_PATH, else the built-in trip)
    #[arg(long)]
    itinerary: Option<PathBuf>,

    /// Zoom level the map starts at (default: the default zoom)
    #[arg(long)]
    initial_zoom: Option<u32>,

    /// Start with the map widget not yet loaded; a `load-map` line loads it
    #[arg(long)]
    map_unloaded: bool,

    /// Zoom level of the overview shown when no day is selected
    #[arg(long)]
    default_zoom: Option<u32>,

    /// Highest zoom kept while panning between days
    #[arg(long)]
    overview_zoom_cap: Option<u32>,

    /// Pause between zoom steps, in milliseconds
    #[arg(long)]
    step_settle_ms: Option<u64>,

    /// Pause after panning, in milliseconds
    #[arg(long)]
    pan_settle_ms: Option<u64>,

    /// Give up on a zoom step the map has not confirmed after this many milliseconds
    #[arg(long)]
    zoom_event_timeout_ms: Option<u64>,

    /// Highest zoom the simulated widget accepts
    #[arg(long, default_value_t = 22)]
    max_zoom: u32,

    /// Pretty-print the JSON report
    #[arg(long)]
    pretty: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    run(Args::parse()).await
}

async fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = ViewerConfig::from_env()?;
    if let Some(path) = args.itinerary {
        config.itinerary_path = Some(path);
    }
    let camera = &mut config.camera;
    if let Some(zoom) = args.default_zoom {
        camera.default_zoom = zoom;
    }
    if let Some(cap) = args.overview_zoom_cap {
        camera.overview_zoom_cap = cap;
    }
    if let Some(ms) = args.step_settle_ms {
        camera.step_settle = Duration::from_millis(ms);
    }
    if let Some(ms) = args.pan_settle_ms {
        camera.pan_settle = Duration::from_millis(ms);
    }
    if let Some(ms) = args.zoom_event_timeout_ms {
        camera.zoom_event_timeout = Duration::from_millis(ms);
    }
    config.validate()?;

    let itinerary = Arc::new(config.load_itinerary()?);
    info!(
        title = itinerary.title(),
        days = itinerary.len(),
        "itinerary loaded"
    );

    let script = match args.script.as_deref() {
        Some(path) if path.as_os_str() != "-" => tokio::fs::read_to_string(path).await?,
        _ => {
            let mut buf = String::new();
            tokio::io::stdin().read_to_string(&mut buf).await?;
            buf
        }
    };
    let steps = parse_script(&script)?;

    let start_zoom = args.initial_zoom.unwrap_or(config.camera.default_zoom);
    let center = config.camera.default_center;
    let map = if args.map_unloaded {
        SimulatedMap::unloaded(center, start_zoom)
    } else {
        SimulatedMap::new(center, start_zoom)
    };
    let map = Arc::new(map.with_zoom_range(0, args.max_zoom));

    let mut viewer = Viewer::new(Arc::clone(&itinerary), config.camera.clone());
    viewer.attach_map(Arc::clone(&map) as Arc<dyn MapAdapter>);
    play(&mut viewer, &map, &steps).await;

    let report = Report::new(&viewer, &map);
    let json = if args.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{json}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};

    use super::{Args, run};

    #[test]
    fn every_flag_is_documented() {
        let command = Args::command();
        command.clone().debug_assert();
        for arg in command.get_arguments() {
            assert!(arg.get_help().is_some(), "--{} has no help text", arg.get_id());
        }
    }

    #[tokio::test]
    async fn unreadable_script_is_returned_as_error() {
        let args = Args::try_parse_from(["itinerary-viewer", "/definitely/not/here.txt"])
            .expect("args");
        assert!(run(args).await.is_err());
    }
}
