use host_simulator::error::SimulatorError;
use host_simulator::host::{FakeHost, HostProfile};
use host_simulator::logger::{initialize as LoggerInitialize, level_for};
use host_simulator::session::run_session;

use miniapp_bridge::bridge::run_event_pump;
use miniapp_bridge::channel::host_link;
use miniapp_bridge::{LaunchParams, Sdk, SdkConfig};

use common::ErrorLocation;

use std::env::{args, current_dir};
use std::fs::create_dir_all;
use std::panic::Location;
use std::process::ExitCode;
use std::sync::Arc;

use log::{error, info};

const DEFAULT_LAUNCH_PARAMS: &str = "tgWebAppVersion=6.4&tgWebAppPlatform=tdesktop";
const LOG_DIR_NAME: &str = "logs";

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // The logger may not be up yet
            eprintln!("{e}");
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), SimulatorError> {
    let working_dir = current_dir().map_err(|e| SimulatorError::Simulator {
        message: format!("Failed to get working directory: {e}"),
        location: ErrorLocation::from(Location::caller()),
    })?;

    let config = SdkConfig::load(&working_dir).map_err(|e| SimulatorError::Simulator {
        message: e.to_string(),
        location: ErrorLocation::from(Location::caller()),
    })?;

    let log_dir = working_dir.join(LOG_DIR_NAME);
    create_dir_all(&log_dir).map_err(|e| SimulatorError::Simulator {
        message: format!("Failed to create log directory: {e}"),
        location: ErrorLocation::from(Location::caller()),
    })?;

    // Initialize logger FIRST
    LoggerInitialize(&log_dir, level_for(config.debug))?;

    info!("Host simulator starting");
    info!("Log directory: {}", log_dir.display());

    let encoded = args()
        .nth(1)
        .unwrap_or_else(|| String::from(DEFAULT_LAUNCH_PARAMS));
    let launch = if encoded.contains("://") {
        LaunchParams::from_url(&encoded)
    } else {
        LaunchParams::parse(&encoded)
    }
    .map_err(|e| SimulatorError::Simulator {
        message: e.to_string(),
        location: ErrorLocation::from(Location::caller()),
    })?;

    let (client, host_end) = host_link();
    let host = tokio::spawn(FakeHost::new(HostProfile::default()).run(host_end));

    let mut sdk = Sdk::init(launch, &config, Arc::new(client.channel))?;
    let pump = tokio::spawn(run_event_pump(Arc::clone(sdk.bridge()), client.events));

    let report = run_session(&mut sdk).await?;

    let host = host.await.map_err(|e| SimulatorError::Simulator {
        message: format!("Fake host task failed: {e}"),
        location: ErrorLocation::from(Location::caller()),
    })?;
    // The host dropped its sender, so the pump drains and stops on its own
    pump.await.map_err(|e| SimulatorError::Simulator {
        message: format!("Event pump task failed: {e}"),
        location: ErrorLocation::from(Location::caller()),
    })?;

    info!("Host handled {} commands", host.handled());
    match serde_json::to_string_pretty(&report) {
        Ok(json) => info!("Session report:\n{json}"),
        Err(e) => error!("Failed to render session report: {e}"),
    }

    Ok(())
}
