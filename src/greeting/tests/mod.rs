//! Test modules for the greeting system
//!
//! Tests are organized by functional area. Console output is captured with
//! [`CapturedConsole`] so every byte the service writes can be asserted.

mod lifecycle;

use crate::greeting::service::GreetingService;
use std::io::Write;
use std::sync::{Arc, Mutex};

/// Cloneable in-memory console shared between a service and its test
#[derive(Clone, Default)]
pub(super) struct CapturedConsole(Arc<Mutex<Vec<u8>>>);

impl CapturedConsole {
    pub(super) fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }

    pub(super) fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }
}

impl Write for CapturedConsole {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Fresh uninitialized service plus a handle on everything it prints
pub(super) fn captured_service() -> (GreetingService, CapturedConsole) {
    let console = CapturedConsole::default();
    let service = GreetingService::with_console(Box::new(console.clone()));
    (service, console)
}
