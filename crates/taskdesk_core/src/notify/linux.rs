use crate::error::AppError;
use crate::notify::{APP_NAME, Notice, Notifier};
use notify_rust::{Notification, Urgency};

pub struct LinuxNotifier;

impl Notifier for LinuxNotifier {
    fn notify(&self, notice: &Notice) -> Result<(), AppError> {
        let mut notification = Notification::new();
        notification.appname(APP_NAME);
        notification.summary(APP_NAME);
        notification.body(&notice.message);
        if notice.is_error() {
            notification.urgency(Urgency::Critical);
        }

        notification
            .show()
            .map_err(|err| AppError::io(err.to_string()))?;
        Ok(())
    }
}
