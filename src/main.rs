use retail_chat::{
    api::ApiClient,
    chatbot::Dispatcher,
    config::initialize_config,
    conversation::MessageLog,
    logging::init_logging,
    repl::run_repl,
    ui::run_ui,
    App,
};
use std::error::Error;
use std::io::{self, IsTerminal};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let config = initialize_config()?;
    init_logging(&config)?;
    log::info!("retail_chat starting against {}", config.api_base);

    let message_log = Arc::new(MessageLog::new());
    let client = Arc::new(ApiClient::new(config.api_base.as_str()));
    let dispatcher = Dispatcher::new(client, message_log.clone());
    dispatcher.greet();

    let plain = std::env::args().skip(1).any(|arg| arg == "--plain") || !io::stdout().is_terminal();

    if plain {
        run_repl(dispatcher, message_log).await?;
    } else {
        let mut app = App::new(dispatcher, message_log);
        app.api_base = config.api_base.clone();
        run_ui(app).await?;
    }

    log::info!("retail_chat exiting");
    Ok(())
}
