use std::fmt;

use teloxide::types::UserId;

pub const START: &str = "homewebcamssurveillance_9581_bot start()";

pub const USAGE: &str = "Usage:
/debug - send last snapshot made by motion program and last motion capture video recorded
/help - send this message
/update_photo x - send the last snapshot every x seconds, x < 1 disables it
/global_update_motion x - check for a new motion video every x seconds and send it to everyone, x < 1 disables it";

pub const NO_NEW_VIDEO: &str = "No new motion video.";

fn state(enabled: bool) -> &'static str {
    if enabled {
        "ENABLED"
    } else {
        "DISABLED"
    }
}

pub fn user_id(user: UserId) -> String {
    user.0.to_string()
}

pub fn status(photo_enabled: bool, motion_enabled: bool) -> String {
    format!(
        "Snapshot auto-send for this chat: {}\nGlobal motion video check: {}",
        state(photo_enabled),
        state(motion_enabled)
    )
}

pub fn photo_enabled(interval: i64) -> String {
    format!("Snapshot auto-send ENABLED, every {interval} s.")
}

pub fn photo_disabled() -> String {
    String::from("Snapshot auto-send DISABLED.")
}

pub fn motion_enabled(interval: i64) -> String {
    format!("Global motion video check ENABLED, every {interval} s.")
}

pub fn motion_disabled() -> String {
    String::from("Global motion video check DISABLED.")
}

pub fn usage_error(command: &str, error: &impl fmt::Display) -> String {
    format!("/{command}: {error}\nUsage: /{command} <seconds>")
}
