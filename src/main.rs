#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use rtp_scanner::config::Config;

fn main() -> anyhow::Result<()> {
    let Some(config) = Config::load()? else {
        return Ok(());
    };

    simple_logger::init_with_level(config.log_level.as_level())?;

    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(rtp_scanner::start_server(config))?;

    Ok(())
}
