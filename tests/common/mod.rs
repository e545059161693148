//! Common test utilities and helpers
//!
//! Shared console capture so integration tests can assert exact output.

#![allow(dead_code)]

use greeter::greeting::api::GreetingService;
use std::io::Write;
use std::sync::{Arc, Mutex};

/// Cloneable in-memory console shared between a service and its test
#[derive(Clone, Default)]
pub struct CapturedConsole(Arc<Mutex<Vec<u8>>>);

impl CapturedConsole {
    pub fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }

    pub fn lines(&self) -> Vec<String> {
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
pub fn captured_service() -> (GreetingService, CapturedConsole) {
    let console = CapturedConsole::default();
    let service = GreetingService::with_console(Box::new(console.clone()));
    (service, console)
}
