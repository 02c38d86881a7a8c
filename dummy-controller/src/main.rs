use std::process::exit;

use controller::main_controller;
use dummy_controller_core::resources::controller::ControllerConfig;
use kube::Client;

mod controller;

#[tokio::main()]
async fn main() {
    configure_logger();

    let config = get_controller_config();
    let client = create_client().await;

    main_controller(client, config).await;
}

async fn create_client() -> Client {
    match Client::try_default().await {
        Ok(client) => client,
        Err(error) => {
            log::error!("Couldn't create client! {error:?}");
            exit(6)
        }
    }
}

fn get_controller_config() -> ControllerConfig {
    match ControllerConfig::from_env() {
        Ok(config) => config,
        Err(error) => {
            log::error!("Couldn't read controller configuration! {error}");
            exit(7)
        }
    }
}

fn configure_logger() {
    env_logger::builder()
        .default_format()
        .format_module_path(false)
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init()
}
