//! Interactive settings wizard.
//!
//! Prompts for the log file path, log line template and AFK threshold,
//! pre-filled with the current values, and stores the answers in the
//! preferences file.

use crate::{
    libs::{
        config::{Settings, AFK_THRESHOLD_RANGE},
        messages::Message,
    },
    msg_print, msg_success, msg_warning,
};
use anyhow::Result;
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Input};

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Remove stored preferences so that defaults apply again
    #[arg(short, long)]
    reset: bool,
}

pub fn cmd(init_args: InitArgs) -> Result<()> {
    let settings = Settings::open()?;

    if init_args.reset {
        settings.reset()?;
        msg_success!(Message::ConfigReset);
        return Ok(());
    }

    let current = settings.current();
    msg_print!(Message::ConfigModuleTracker);

    let log_file_path: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::PromptLogFilePath.to_string())
        .default(current.log_file_path.display().to_string())
        .interact_text()?;

    let log_line: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::PromptLogLine.to_string())
        .default(current.log_line)
        .interact_text()?;

    let requested: f64 = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::PromptAfkThreshold.to_string())
        .default(current.afk_threshold)
        .interact_text()?;

    let afk_threshold = clamp_threshold(requested);
    if afk_threshold != requested {
        msg_warning!(Message::AfkThresholdClamped(requested, afk_threshold));
    }

    settings.set_log_file_path(log_file_path.trim())?;
    settings.set_log_line(&log_line)?;
    settings.set_afk_threshold(afk_threshold)?;

    msg_success!(Message::ConfigSaved);
    Ok(())
}

/// Limits a threshold to the range offered by the wizard.
fn clamp_threshold(seconds: f64) -> f64 {
    if seconds.is_nan() {
        return *AFK_THRESHOLD_RANGE.start();
    }
    seconds.clamp(*AFK_THRESHOLD_RANGE.start(), *AFK_THRESHOLD_RANGE.end())
}

#[cfg(test)]
mod tests {
    use super::clamp_threshold;

    #[test]
    fn thresholds_are_clamped_to_wizard_range() {
        assert_eq!(clamp_threshold(10.0), 30.0);
        assert_eq!(clamp_threshold(90.0), 90.0);
        assert_eq!(clamp_threshold(5000.0), 1800.0);
        assert_eq!(clamp_threshold(f64::NAN), 30.0);
    }
}
