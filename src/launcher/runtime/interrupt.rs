//! Console interrupts absorbed while the interpreter owns the terminal.
//!
//! Ctrl-C reaches every process in the foreground group. The launcher listens for it so
//! the default disposition does not kill it; the interpreter decides how to react.

use std::io;

#[cfg(unix)]
use tokio::signal::unix::{signal, Signal, SignalKind};
#[cfg(windows)]
use tokio::signal::windows::{ctrl_break, ctrl_c, CtrlBreak, CtrlC};

/// Registered interrupt listener. Registration happens in [`Interrupts::listen`], so
/// signals arriving before the first `recv` are still absorbed.
pub struct Interrupts {
    #[cfg(unix)]
    interrupt: Signal,
    #[cfg(windows)]
    ctrl_c: CtrlC,
    #[cfg(windows)]
    ctrl_break: CtrlBreak,
}

impl Interrupts {
    pub fn listen() -> io::Result<Self> {
        #[cfg(unix)]
        {
            Ok(Self {
                interrupt: signal(SignalKind::interrupt())?,
            })
        }
        #[cfg(windows)]
        {
            Ok(Self {
                ctrl_c: ctrl_c()?,
                ctrl_break: ctrl_break()?,
            })
        }
    }

    /// Resolves on the next interrupt; `None` once the listener can no longer receive.
    pub async fn recv(&mut self) -> Option<()> {
        #[cfg(unix)]
        {
            self.interrupt.recv().await
        }
        #[cfg(windows)]
        {
            tokio::select! {
                received = self.ctrl_c.recv() => received,
                received = self.ctrl_break.recv() => received,
            }
        }
    }
}
