use teloxide::utils::command::BotCommands;

#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase", description = "Available commands:")]
pub enum MyCommands {
    #[command(description = "Start the bot and register alert monitoring.")]
    Start,
    #[command(description = "Stop alert monitoring for this chat.")]
    Stop,
    #[command(description = "View help.")]
    Help,
    #[command(description = "Select a database.")]
    Database,
    #[command(description = "View metrics in the selected database.")]
    Metrics,
    #[command(description = "List active sessions in the selected database.")]
    Activesessions,
    #[command(description = "Terminate a session by PID, e.g. /kill 4242")]
    Kill(String),
    #[command(description = "Run CHECKPOINT, then terminate all backends on the selected database.")]
    Checkpointrestart,
    #[command(description = "Get CPU usage info.")]
    Cpu,
    #[command(description = "Get disk space info.")]
    Disk,
    #[command(description = "Get RAM usage info.")]
    Ram,
    #[command(description = "Get the bot's log file.")]
    Sendlog,
}
