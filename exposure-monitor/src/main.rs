//! # Exposure Monitor - Ambient Noise Exposure CLI
//!
//! The binary wiring around the headless exposure engine. It owns the three
//! collaborators the core is decoupled from:
//!
//! - **Sensor**: cpal capture on a dedicated thread, frames estimated to SPL
//!   via the level module, sampled once per second.
//! - **Storage**: a JSON file store with atomic whole-document replace.
//! - **Presentation**: a text dashboard re-rendered at a fixed interval.
//!
//! ## Architecture
//! - **Main thread**: sampling loop driven by crossbeam `select!` over the
//!   frame channel, a 1 Hz sample tick, a 60 s refresh tick and a shutdown
//!   channel fed by stdin.
//! - **Capture callback**: pushes fixed-size frames into the frame channel.
//! - **Stdin thread**: turns a `q` + Enter into a shutdown signal.

mod capture;
mod level;
mod render;
mod session;
mod store;

use std::thread;
use std::time::Duration;

use anyhow::{anyhow, Result};
use chrono::Local;

use exposure_core::{
    aggregate, retention, CalibrationOffset, CalibrationStore, Sample, SampleStore, TimeWindow,
    View,
};
use session::MonitoringSession;
use store::JsonFileStore;

/// Where the sample collection and calibration live.
const STORE_FILE: &str = "exposure_data.json";

/// Sampling cadence while monitoring is active.
const SAMPLE_INTERVAL: Duration = Duration::from_secs(1);

/// How often the dashboard is re-rendered while monitoring.
const REFRESH_INTERVAL: Duration = Duration::from_secs(60);

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let result = match args.first().map(String::as_str) {
        Some("monitor") => run_monitor(),
        Some("report") => run_report(args.get(1).map(String::as_str)),
        Some("calibrate") => run_calibrate(&args[1..]),
        Some(other) => {
            print_usage();
            Err(anyhow!("unknown command: {}", other))
        }
        None => run_default(),
    };

    if let Err(e) = result {
        eprintln!("[MAIN] Error: {:#}", e);
        std::process::exit(1);
    }
}

fn print_usage() {
    eprintln!("Usage: exposure-monitor [COMMAND]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  monitor                   Start monitoring (q + Enter to stop)");
    eprintln!("  report [VIEW]             One-shot dashboard; VIEW is one of");
    eprintln!("                            hourly, daily, ranges, ranges-week");
    eprintln!("  calibrate <SPL> <DBFS>    Store a calibration pair");
}

/// Bare invocation: auto-start monitoring when a calibration exists,
/// otherwise show usage plus a one-shot hourly report.
fn run_default() -> Result<()> {
    let store = JsonFileStore::new(STORE_FILE);
    match store.load_calibration() {
        Ok(Some(cal)) if cal.offset() != 0.0 => {
            eprintln!(
                "[MAIN] Calibration found (offset {:+.1} dB), starting monitor...",
                cal.offset()
            );
            run_monitor()
        }
        _ => {
            print_usage();
            eprintln!();
            run_report(Some("hourly"))
        }
    }
}

fn parse_view(token: Option<&str>) -> Result<View> {
    match token.unwrap_or("hourly") {
        "hourly" => Ok(View::Hourly),
        "daily" => Ok(View::Daily),
        "ranges" => Ok(View::RangeDay),
        "ranges-week" => Ok(View::RangeWeek),
        other => Err(anyhow!("unknown view: {}", other)),
    }
}

/// Loads the samples a view needs, degrading a failed load to an empty set
/// so the dashboard renders all-NoData instead of failing.
fn load_for_view(store: &JsonFileStore, view: View) -> Vec<Sample> {
    let now = Local::now();
    let window = match view {
        View::Hourly | View::RangeDay => TimeWindow::today(now),
        View::Daily | View::RangeWeek => TimeWindow::this_week(now),
    };
    match store.load_samples(&window) {
        Ok(samples) => samples,
        Err(e) => {
            eprintln!("[STORE] Load failed, rendering empty data: {:#}", e);
            Vec::new()
        }
    }
}

fn run_report(view_token: Option<&str>) -> Result<()> {
    let view = parse_view(view_token)?;
    let store = JsonFileStore::new(STORE_FILE);
    let samples = load_for_view(&store, view);
    let buckets = aggregate(&samples, view, Local::now());
    print!("{}", render::render_view(&buckets, view));
    Ok(())
}

fn run_calibrate(args: &[String]) -> Result<()> {
    let (spl, dbfs) = match args {
        [spl, dbfs] => (
            spl.parse::<f32>().map_err(|_| anyhow!("SPL must be a number"))?,
            dbfs.parse::<f32>().map_err(|_| anyhow!("dBFS must be a number"))?,
        ),
        _ => return Err(anyhow!("calibrate needs exactly <SPL> <DBFS>")),
    };

    let calibration = CalibrationOffset {
        spl_reading: spl,
        dbfs_reading: dbfs,
    };
    let mut store = JsonFileStore::new(STORE_FILE);
    store.save_calibration(&calibration)?;
    eprintln!(
        "[MAIN] Calibration saved. Offset: {:+.2} dB (dBFS -> SPL)",
        calibration.offset()
    );
    Ok(())
}

fn run_monitor() -> Result<()> {
    let mut store = JsonFileStore::new(STORE_FILE);
    let calibration = store.load_calibration().unwrap_or_else(|e| {
        eprintln!("[STORE] Calibration load failed, using raw dBFS: {:#}", e);
        None
    });
    if calibration.is_none() {
        eprintln!("[MAIN] No calibration stored; levels are uncalibrated dBFS");
    }

    let (frame_tx, frame_rx) = crossbeam_channel::unbounded::<Vec<f32>>();
    let mut session = MonitoringSession::new();
    session.start(frame_tx)?;

    let shutdown_rx = spawn_stdin_listener();
    let sample_tick = crossbeam_channel::tick(SAMPLE_INTERVAL);
    let refresh_tick = crossbeam_channel::tick(REFRESH_INTERVAL);

    eprintln!("[MAIN] Monitoring. Press q + Enter to stop.");

    let mut latest_spl: Option<f32> = None;

    loop {
        crossbeam_channel::select! {
            recv(frame_rx) -> msg => match msg {
                Ok(frame) => {
                    latest_spl = Some(level::frame_to_spl(&frame, calibration.as_ref()));
                }
                Err(_) => {
                    eprintln!("[MAIN] Audio channel closed");
                    break;
                }
            },
            recv(sample_tick) -> _ => {
                if let Some(spl) = latest_spl {
                    ingest_sample(&mut store, spl);
                }
            },
            recv(refresh_tick) -> _ => {
                let samples = load_for_view(&store, View::Hourly);
                let buckets = aggregate(&samples, View::Hourly, Local::now());
                print!("{}", render::render_view(&buckets, View::Hourly));
            },
            recv(shutdown_rx) -> _ => {
                eprintln!("[MAIN] Shutdown requested");
                break;
            },
        }
    }

    session.stop();
    Ok(())
}

/// Validates, persists and prunes around one 1 Hz reading. A non-finite
/// level is dropped before it reaches the store; storage failures are
/// logged and skipped, never fatal.
fn ingest_sample(store: &mut JsonFileStore, spl: f32) {
    let now = Local::now();
    let sample = match Sample::new(now, spl) {
        Ok(sample) => sample,
        Err(e) => {
            eprintln!("[MAIN] Dropping reading: {}", e);
            return;
        }
    };

    if let Err(e) = store.append_sample(sample) {
        eprintln!("[STORE] Append failed: {:#}", e);
        return;
    }
    if let Err(e) = store.prune_older_than(retention::horizon(now)) {
        eprintln!("[STORE] Prune failed: {:#}", e);
    }
}

/// Watches stdin on its own thread and signals shutdown on `q` or EOF.
fn spawn_stdin_listener() -> crossbeam_channel::Receiver<()> {
    let (tx, rx) = crossbeam_channel::bounded(1);
    thread::spawn(move || {
        let mut line = String::new();
        loop {
            line.clear();
            match std::io::stdin().read_line(&mut line) {
                Ok(0) => {
                    let _ = tx.send(());
                    break;
                }
                Ok(_) => {
                    if line.trim().eq_ignore_ascii_case("q") {
                        let _ = tx.send(());
                        break;
                    }
                }
                Err(e) => {
                    eprintln!("[MAIN] stdin error: {}", e);
                    let _ = tx.send(());
                    break;
                }
            }
        }
    });
    rx
}
