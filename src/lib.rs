pub mod config;
pub mod reporter;
pub mod server;
pub mod statistics;

use self::{config::Config, reporter::LineReporter, server::Listener, statistics::Statistics};

/// In order to let the integration test directly use the rtp-scanner crate
/// and start the listener, a function is opened to replace the main function.
///
/// Setup failures are returned as errors; once the socket is bound the
/// function only returns when the receive loop ends.
pub async fn start_server(config: Config) -> anyhow::Result<Statistics> {
    let listener = Listener::bind(config.listen)?;
    log::info!("rtp scanner listening: interface={}", listener.local_addr()?);

    Ok(listener.run(&mut LineReporter::stdout()).await)
}
