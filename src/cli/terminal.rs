//! Terminal rendering of the login page collaborators. Navigation goes to
//! stdout so it can be piped; messages for the user go to stderr.

use crate::ui::{Control, Destination, FieldId, Navigator, Ui};
use std::{
    io::{self, Write},
    sync::Mutex,
};
use tracing::{debug, warn};

type Sink = Mutex<Box<dyn Write + Send>>;

pub struct Terminal {
    out: Sink,
    err: Sink,
}

impl Terminal {
    #[must_use]
    pub fn new() -> Self {
        Self::with_writers(Box::new(io::stdout()), Box::new(io::stderr()))
    }

    #[must_use]
    pub fn with_writers(out: Box<dyn Write + Send>, err: Box<dyn Write + Send>) -> Self {
        Self {
            out: Mutex::new(out),
            err: Mutex::new(err),
        }
    }

    fn write_line(sink: &Sink, line: &str) {
        let Ok(mut writer) = sink.lock() else {
            warn!("terminal writer lock poisoned");
            return;
        };
        if let Err(err) = writeln!(writer, "{line}").and_then(|()| writer.flush()) {
            warn!("failed to write to terminal: {err}");
        }
    }
}

impl Default for Terminal {
    fn default() -> Self {
        Self::new()
    }
}

impl Ui for Terminal {
    fn set_valid(&self, field: FieldId, validity: Option<bool>) {
        match validity {
            None => debug!(field = %field, "field reset"),
            Some(true) => debug!(field = %field, "field valid"),
            Some(false) => {
                debug!(field = %field, "field invalid");
                Self::write_line(&self.err, &format!("{field}: invalid"));
            }
        }
    }

    fn show_error(&self, message: &str) {
        Self::write_line(&self.err, &format!("error: {message}"));
    }

    fn add_loading(&self, control: Control) {
        debug!(control = %control, "loading");
    }

    fn remove_loading(&self, control: Control) {
        debug!(control = %control, "loading done");
    }

    fn set_addon_style(&self, rules: &str) {
        debug!(rules, "addon style updated");
    }
}

impl Navigator for Terminal {
    fn navigate(&self, destination: Destination) {
        Self::write_line(&self.out, &destination.to_string());
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::ui::Page;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct Buffer(Arc<Mutex<Vec<u8>>>);

    impl Buffer {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl Write for Buffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn terminal() -> (Terminal, Buffer, Buffer) {
        let out = Buffer::default();
        let err = Buffer::default();
        let terminal = Terminal::with_writers(Box::new(out.clone()), Box::new(err.clone()));
        (terminal, out, err)
    }

    #[test]
    fn navigation_goes_to_stdout() {
        let (terminal, out, err) = terminal();
        terminal.navigate(Destination::Page(Page::Home));
        terminal.navigate(Destination::Url(
            url::Url::parse("https://judge.example.com/dashboard").unwrap(),
        ));
        assert_eq!(
            out.contents(),
            "Home\nhttps://judge.example.com/dashboard\n"
        );
        assert!(err.contents().is_empty());
    }

    #[test]
    fn errors_go_to_stderr() {
        let (terminal, out, err) = terminal();
        terminal.show_error("Wrong password");
        terminal.set_valid(FieldId::Password, Some(false));
        terminal.set_valid(FieldId::Username, Some(true));
        terminal.set_valid(FieldId::Username, None);
        assert_eq!(
            err.contents(),
            "error: Wrong password\nLoginPasswordInput: invalid\n"
        );
        assert!(out.contents().is_empty());
    }
}
