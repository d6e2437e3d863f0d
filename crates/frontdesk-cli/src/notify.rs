use anyhow::Result;
use frontdesk_config::{NotificationBackend, NotificationsConfig};
use tracing::warn;

pub trait Notifier {
    fn send(&self, title: &str, body: &str) -> Result<()>;
}

pub struct StdoutNotifier;

impl Notifier for StdoutNotifier {
    fn send(&self, title: &str, body: &str) -> Result<()> {
        println!("{title}: {body}");
        Ok(())
    }
}

#[cfg(feature = "desktop-notify")]
pub struct DesktopNotifier;

#[cfg(feature = "desktop-notify")]
impl Notifier for DesktopNotifier {
    fn send(&self, title: &str, body: &str) -> Result<()> {
        notify_rust::Notification::new()
            .summary(title)
            .body(body)
            .show()?;
        Ok(())
    }
}

pub fn build_notifier(config: &NotificationsConfig, json: bool) -> Option<Box<dyn Notifier>> {
    if !config.enabled || json {
        return None;
    }
    match config.backend {
        NotificationBackend::Stdout => Some(Box::new(StdoutNotifier)),
        #[cfg(feature = "desktop-notify")]
        NotificationBackend::Desktop => Some(Box::new(DesktopNotifier)),
        #[cfg(not(feature = "desktop-notify"))]
        NotificationBackend::Desktop => {
            warn!("desktop notifications require the desktop-notify feature, using stdout");
            Some(Box::new(StdoutNotifier))
        }
    }
}

pub fn send_quietly(notifier: &dyn Notifier, title: &str, body: &str) {
    if let Err(err) = notifier.send(title, body) {
        warn!(error = %err, "notification failed");
    }
}
