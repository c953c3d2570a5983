use std::io::{self, IsTerminal, Write};

use tokio::io::{AsyncBufReadExt, BufReader};

use crate::{launcher::runtime::Interrupts, lib::errors::Remediation};

const ACKNOWLEDGE_PROMPT: &str = "Press Enter to exit...";

/// The person at the console, as seen by the remediation step.
#[allow(async_fn_in_trait)]
pub trait Operator {
    fn stdin_is_terminal(&self) -> bool;
    fn show(&mut self, remediation: &Remediation);
    /// Block until the operator confirms they have read the message.
    async fn acknowledge(&mut self) -> io::Result<()>;
}

/// Operator backed by the launcher's own stdin and stderr.
pub struct ConsoleOperator;

impl Operator for ConsoleOperator {
    fn stdin_is_terminal(&self) -> bool {
        io::stdin().is_terminal()
    }

    fn show(&mut self, remediation: &Remediation) {
        eprintln!("{}", remediation.headline);
        eprintln!("{}", remediation.guidance);
    }

    async fn acknowledge(&mut self) -> io::Result<()> {
        let mut stderr = io::stderr();
        write!(stderr, "{ACKNOWLEDGE_PROMPT}")?;
        stderr.flush()?;

        // Interrupts are no longer fatal once listened for, so Ctrl-C also dismisses the prompt.
        let mut interrupts = Interrupts::listen()?;
        let mut line = String::new();
        let mut stdin = BufReader::new(tokio::io::stdin());
        tokio::select! {
            read = stdin.read_line(&mut line) => read.map(|_| ()),
            _ = interrupts.recv() => {
                writeln!(io::stderr())?;
                Ok(())
            }
        }
    }
}
