mod auth;
mod config;
mod error;
mod handlers;
mod jobs;
mod messages;
mod messenger;
mod tasks;
mod video;

use std::process::ExitCode;
use std::sync::Arc;

use config::Config;
use dptree::deps;
use error::Error;
use jobs::JobQueue;
use teloxide::dispatching::UpdateHandler;
use teloxide::macros::BotCommands;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands as _;

#[derive(BotCommands, Clone, Debug)]
#[command(
    rename_rule = "snake_case",
    description = "These commands are supported:"
)]
enum Command {
    #[command(description = "identify the bot.")]
    Start,
    #[command(description = "show your id, your subscriptions and the usage.")]
    Help,
    #[command(description = "send the last snapshot and the last motion video.")]
    Debug,
    #[command(description = "send the snapshot every x seconds, x < 1 disables it.")]
    UpdatePhoto(String),
    #[command(description = "check for a new motion video every x seconds, x < 1 disables it.")]
    GlobalUpdateMotion(String),
}

async fn answer(
    bot: Bot,
    msg: Message,
    cmd: Command,
    config: Arc<Config>,
    jobs: JobQueue,
) -> Result<(), Error> {
    log::info!("{:?}", cmd);
    let chat_id = msg.chat.id;

    match cmd {
        Command::Start => handlers::start(&bot, chat_id).await,
        Command::Help => handlers::help(&bot, &jobs, chat_id).await,
        Command::Debug => handlers::debug(&bot, &config, chat_id).await,
        Command::UpdatePhoto(arg) => {
            handlers::update_photo(&bot, &config, &jobs, chat_id, &arg).await
        }
        Command::GlobalUpdateMotion(arg) => {
            handlers::global_update_motion(&bot, &config, &jobs, chat_id, &arg).await
        }
    }
}

fn schema() -> UpdateHandler<Error> {
    auth::gate(
        dptree::endpoint(auth::reject_update),
        Update::filter_message()
            .filter_command::<Command>()
            .endpoint(answer),
    )
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();
    log::info!("Starting bot...");

    let config = match Config::from_env() {
        Ok(config) => Arc::new(config),
        Err(e) => {
            log::error!("Invalid configuration: {e}");
            return ExitCode::FAILURE;
        }
    };
    log::info!(
        "{} authorized users, snapshot {}, video {}",
        config.authorized_users.len(),
        config.snapshot_path.display(),
        config.video_path.display()
    );

    let bot = Bot::new(config.token.clone());
    if let Err(e) = bot.set_my_commands(Command::bot_commands()).await {
        log::warn!("Couldn't register the command list: {e}");
    }

    let jobs = JobQueue::new();

    Dispatcher::builder(bot, schema())
        .dependencies(deps![config, jobs])
        .default_handler(|_| async {})
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    ExitCode::SUCCESS
}
