use log::{error, info, LevelFilter};
use conveyor::{
    device::{ConveyorBuilder, ConveyorConfig},
    namespace::AddressSpace,
    types::constants::NAMESPACE_URI,
};

#[tokio::main(flavor="current_thread")]
async fn main() {

    env_logger::Builder::new()
    .filter_level(LevelFilter::Info)
    .parse_default_env()
    .init();

    let config = match std::env::args().nth(1) {
        Some(path) => match ConveyorConfig::from_json_file(&path) {
            Ok(config) => config,
            Err(e) => {
                error!("Invalid config {path}: {e}");
                return;
            }
        },
        None => ConveyorConfig::default(),
    };

    let space = AddressSpace::new(NAMESPACE_URI);
    let conveyor = match ConveyorBuilder::new(&space).with_config(config).build() {
        Ok(conveyor) => conveyor,
        Err(e) => {
            error!("Unable to create conveyor: {e}");
            return;
        }
    };
    space.startup().await;

    match space.call(conveyor.start_request().caller("sample")).await {
        Ok(result) => info!("Start result: {result:?}"),
        Err(e) => error!("Start failed: {e}"),
    }

    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to register CTRL-C handler: {e}");
    }
    space.shutdown().await;
}
