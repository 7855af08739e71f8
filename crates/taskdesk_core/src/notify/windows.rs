use crate::error::AppError;
use crate::notify::{APP_NAME, Notice, Notifier};
use tauri_winrt_notification::Toast;

pub struct WindowsNotifier;

impl Notifier for WindowsNotifier {
    fn notify(&self, notice: &Notice) -> Result<(), AppError> {
        let heading = if notice.is_error() { "Error" } else { "Done" };
        Toast::new(Toast::POWERSHELL_APP_ID)
            .title(APP_NAME)
            .text1(heading)
            .text2(&notice.message)
            .show()
            .map_err(|err| AppError::io(err.to_string()))?;
        Ok(())
    }
}
