use std::io::{BufRead, Write};
use taskdesk_core::AppError;
use taskdesk_core::config::Palette;
use taskdesk_core::deletion::Confirmer;
use taskdesk_core::notify::{Notice, Notifier};

/// Prints notices on stderr, keeping stdout for command output, and forwards
/// them to the desktop notifier.
pub struct ConsoleNotifier {
    palette: Palette,
    desktop: Box<dyn Notifier>,
}

impl ConsoleNotifier {
    pub fn new(palette: Palette, desktop: Box<dyn Notifier>) -> Self {
        Self { palette, desktop }
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, notice: &Notice) -> Result<(), AppError> {
        let line = if notice.is_error() {
            self.palette.alertize(&notice.message)
        } else {
            self.palette.accentize(&notice.message)
        };
        eprintln!("{line}");
        self.desktop.notify(notice)
    }
}

/// Asks a yes/no question on `output` and reads the answer from `input`.
/// Anything but `y`/`yes`, including end of input, counts as no.
pub struct PromptConfirmer<'a> {
    input: &'a mut dyn BufRead,
    output: &'a mut dyn Write,
}

impl<'a> PromptConfirmer<'a> {
    pub fn new(input: &'a mut dyn BufRead, output: &'a mut dyn Write) -> Self {
        Self { input, output }
    }
}

impl Confirmer for PromptConfirmer<'_> {
    fn confirm(&mut self, message: &str) -> Result<bool, AppError> {
        write!(self.output, "{message} [y/N] ").map_err(|err| AppError::io(err.to_string()))?;
        self.output
            .flush()
            .map_err(|err| AppError::io(err.to_string()))?;

        let mut answer = String::new();
        self.input
            .read_line(&mut answer)
            .map_err(|err| AppError::io(err.to_string()))?;

        let answer = answer.trim();
        Ok(answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes"))
    }
}
