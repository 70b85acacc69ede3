use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

/// Thin abstraction over the process streams so `print` and fatal
/// diagnostics can be redirected when the runtime is embedded.
pub trait Platform {
    fn write_stdout(&mut self, text: &str) -> io::Result<()>;
    fn write_stderr(&mut self, text: &str) -> io::Result<()>;
}

pub struct StdPlatform;

impl Platform for StdPlatform {
    fn write_stdout(&mut self, text: &str) -> io::Result<()> {
        let mut out = io::stdout().lock();
        out.write_all(text.as_bytes())?;
        out.flush()
    }

    fn write_stderr(&mut self, text: &str) -> io::Result<()> {
        let mut err = io::stderr().lock();
        err.write_all(text.as_bytes())?;
        err.flush()
    }
}

/// Buffers both streams in memory. Clones share the same buffers, so a
/// handle kept outside the runtime sees everything written through it.
#[derive(Clone, Default)]
pub struct CapturePlatform {
    stdout: Rc<RefCell<String>>,
    stderr: Rc<RefCell<String>>,
}

impl CapturePlatform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stdout(&self) -> String {
        self.stdout.borrow().clone()
    }

    pub fn stderr(&self) -> String {
        self.stderr.borrow().clone()
    }
}

impl Platform for CapturePlatform {
    fn write_stdout(&mut self, text: &str) -> io::Result<()> {
        self.stdout.borrow_mut().push_str(text);
        Ok(())
    }

    fn write_stderr(&mut self, text: &str) -> io::Result<()> {
        self.stderr.borrow_mut().push_str(text);
        Ok(())
    }
}
