use crate::cli::Commands;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum OutputMode {
    Text,
    Json,
}

pub fn mode_for_command(command: &Commands) -> OutputMode {
    let json = match command {
        Commands::Import { json, .. } => *json,
        Commands::List { json, .. } => *json,
        Commands::Tags { json, .. } => *json,
        Commands::Classify { .. } => false,
    };

    if json { OutputMode::Json } else { OutputMode::Text }
}
