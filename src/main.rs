use tracing::error;

use wren::routes;
use wren::state::State;
use wren::Server;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let state = match State::new() {
        Ok(state) => state,
        Err(e) => {
            error!("failed to build application state: {e}");
            std::process::exit(1);
        }
    };

    let addr = std::env::var("WREN_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_owned());

    if let Err(e) = Server::bind(&addr).serve(routes::router(), state).await {
        error!("server error: {e}");
        std::process::exit(1);
    }
}
