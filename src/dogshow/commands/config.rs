use crate::commands::{CmdMessage, CmdResult};
use crate::config::DogShowConfig;
use crate::error::Result;
use log::info;
use std::path::Path;

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

/// Shows or changes `config`. A successful set is written to `dir` right away.
pub fn run(config: &mut DogShowConfig, dir: &Path, action: ConfigAction) -> Result<CmdResult> {
    match action {
        ConfigAction::ShowAll => Ok(CmdResult::default().with_config(config.clone())),
        ConfigAction::ShowKey(key) => {
            let value = config.get(&key)?;
            Ok(CmdResult::default().with_message(CmdMessage::info(format!("{} = {}", key, value))))
        }
        ConfigAction::Set(key, value) => {
            let mut updated = config.clone();
            updated.set(&key, &value)?;
            updated.save(dir)?;
            *config = updated;
            info!("Config {} changed", key);

            let display_val = config.get(&key)?;
            Ok(CmdResult::default()
                .with_config(config.clone())
                .with_message(CmdMessage::success(format!(
                    "{} set to {}",
                    key, display_val
                ))))
        }
    }
}
