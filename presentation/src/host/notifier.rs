//! Console notifications

use colored::Colorize;
use openflux_application::ports::host::{NotificationLevel, NotifierPort};

/// Prints notifications to the terminal. Errors and warnings go to stderr.
pub struct ConsoleNotifier;

impl ConsoleNotifier {
    pub fn format(level: NotificationLevel, message: &str) -> String {
        match level {
            NotificationLevel::Info => format!("{} {}", "v".green(), message),
            NotificationLevel::Warning => format!("{} {}", "!".yellow(), message.yellow()),
            NotificationLevel::Error => format!("{} {}", "x".red(), message.red()),
        }
    }
}

impl NotifierPort for ConsoleNotifier {
    fn notify(&self, level: NotificationLevel, message: &str) {
        let line = Self::format(level, message);
        match level {
            NotificationLevel::Info => println!("{}", line),
            NotificationLevel::Warning | NotificationLevel::Error => eprintln!("{}", line),
        }
    }
}
