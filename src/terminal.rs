//! Raw-mode control of the controlling terminal.
//!
//! The session only ever talks to a [`TerminalPort`], so the keystroke loop can
//! run against [`MemoryTerminal`] in tests and against [`FdTerminal`] on stdin
//! in production. [`RawModeGuard`] owns the captured attributes and puts them
//! back exactly once, whether the session ends normally, by interrupt, by error
//! or by panic.

use std::cell::{Cell, RefCell};
use std::os::fd::AsFd;

use nix::errno::Errno;
use nix::sys::termios::{
    self, ControlFlags, InputFlags, LocalFlags, SetArg, SpecialCharacterIndices, Termios,
};
use tracing::{debug, error, warn};

use crate::error::{Error, Result};

/// Terminal attributes that know how to turn themselves into raw mode.
pub trait RawMode: Clone {
    fn make_raw(&mut self);
}

impl RawMode for Termios {
    fn make_raw(&mut self) {
        self.input_flags &= !(InputFlags::ICRNL
            | InputFlags::INLCR
            | InputFlags::IGNCR
            | InputFlags::IXON
            | InputFlags::IXOFF);
        self.local_flags &=
            !(LocalFlags::ECHO | LocalFlags::ICANON | LocalFlags::IEXTEN | LocalFlags::ISIG);
        self.control_flags &= !(ControlFlags::CSIZE | ControlFlags::PARENB);
        self.control_flags |= ControlFlags::CS8;
        // one byte per read, no timeout
        self.control_chars[SpecialCharacterIndices::VMIN as usize] = 1;
        self.control_chars[SpecialCharacterIndices::VTIME as usize] = 0;
    }
}

/// Minimal platform capability needed to enter and leave raw mode.
pub trait TerminalPort {
    type Attributes: RawMode;

    fn get_attributes(&self) -> Result<Self::Attributes>;
    fn set_attributes(&self, attributes: &Self::Attributes) -> Result<()>;
}

/// termios on a file descriptor, normally stdin.
#[derive(Debug)]
pub struct FdTerminal<F: AsFd> {
    fd: F,
}

impl<F: AsFd> FdTerminal<F> {
    pub fn new(fd: F) -> Self {
        Self { fd }
    }
}

impl FdTerminal<std::io::Stdin> {
    pub fn stdin() -> Self {
        Self::new(std::io::stdin())
    }
}

impl<F: AsFd> TerminalPort for FdTerminal<F> {
    type Attributes = Termios;

    fn get_attributes(&self) -> Result<Termios> {
        termios::tcgetattr(self.fd.as_fd()).map_err(|source| Error::TerminalControl {
            operation: "get",
            source,
        })
    }

    fn set_attributes(&self, attributes: &Termios) -> Result<()> {
        termios::tcsetattr(self.fd.as_fd(), SetArg::TCSANOW, attributes).map_err(|source| {
            Error::TerminalControl {
                operation: "set",
                source,
            }
        })
    }
}

/// Attribute state of a [`MemoryTerminal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MemoryAttributes {
    pub raw: bool,
}

impl RawMode for MemoryAttributes {
    fn make_raw(&mut self) {
        self.raw = true;
    }
}

/// In-memory terminal for headless runs. Counts attribute writes and can be
/// told to reject reads or a particular write.
#[derive(Debug, Default)]
pub struct MemoryTerminal {
    current: Cell<MemoryAttributes>,
    writes: Cell<usize>,
    history: RefCell<Vec<MemoryAttributes>>,
    fail_get: bool,
    fail_write: Option<usize>,
}

impl MemoryTerminal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every `get_attributes` call fails, as on a non-tty.
    pub fn failing_get() -> Self {
        Self {
            fail_get: true,
            ..Self::default()
        }
    }

    /// The `n`th attribute write (1-based) fails.
    pub fn failing_write(n: usize) -> Self {
        Self {
            fail_write: Some(n),
            ..Self::default()
        }
    }

    pub fn is_raw(&self) -> bool {
        self.current.get().raw
    }

    /// Number of attempted attribute writes, failed ones included.
    pub fn writes(&self) -> usize {
        self.writes.get()
    }

    /// Attributes of every successful write, oldest first.
    pub fn history(&self) -> Vec<MemoryAttributes> {
        self.history.borrow().clone()
    }
}

impl TerminalPort for MemoryTerminal {
    type Attributes = MemoryAttributes;

    fn get_attributes(&self) -> Result<MemoryAttributes> {
        if self.fail_get {
            return Err(Error::TerminalControl {
                operation: "get",
                source: Errno::ENOTTY,
            });
        }
        Ok(self.current.get())
    }

    fn set_attributes(&self, attributes: &MemoryAttributes) -> Result<()> {
        let n = self.writes.get() + 1;
        self.writes.set(n);
        if self.fail_write == Some(n) {
            return Err(Error::TerminalControl {
                operation: "set",
                source: Errno::EIO,
            });
        }
        self.current.set(*attributes);
        self.history.borrow_mut().push(*attributes);
        Ok(())
    }
}

/// Raw mode for as long as the guard lives.
pub struct RawModeGuard<'a, P: TerminalPort> {
    port: &'a P,
    snapshot: Option<P::Attributes>,
}

impl<'a, P: TerminalPort> RawModeGuard<'a, P> {
    /// Capture the current attributes and switch to raw mode.
    ///
    /// If the switch is rejected the captured attributes are written back
    /// (best effort) before the error is returned.
    pub fn acquire(port: &'a P) -> Result<Self> {
        let snapshot = port.get_attributes()?;
        let mut raw = snapshot.clone();
        raw.make_raw();

        if let Err(err) = port.set_attributes(&raw) {
            if let Err(restore_err) = port.set_attributes(&snapshot) {
                warn!("could not restore terminal after failed raw switch: {restore_err}");
            }
            return Err(err);
        }

        debug!("terminal in raw mode");
        Ok(Self {
            port,
            snapshot: Some(snapshot),
        })
    }

    /// Restore the captured attributes now and report the outcome.
    pub fn release(mut self) -> Result<()> {
        self.restore()
    }

    fn restore(&mut self) -> Result<()> {
        match self.snapshot.take() {
            Some(snapshot) => {
                self.port.set_attributes(&snapshot)?;
                debug!("terminal restored");
                Ok(())
            }
            None => Ok(()),
        }
    }
}

impl<P: TerminalPort> Drop for RawModeGuard<'_, P> {
    fn drop(&mut self) {
        if let Err(err) = self.restore() {
            error!("failed to restore terminal: {err}");
        }
    }
}
