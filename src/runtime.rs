use std::io::{Read, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::keystroke::{KeystrokeProcessor, INTERRUPT};
use crate::render::{self, RenderAction};
use crate::score::Score;
use crate::session::Phase;
use crate::terminal::{RawModeGuard, TerminalPort};

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionOutcome {
    Finished(Score),
    Interrupted,
}

/// Register a SIGINT handler that only raises the returned flag.
///
/// Raw mode turns Ctrl-C into an ordinary 0x03 byte, so this only matters for
/// a signal sent from outside (`kill -INT`). It keeps the process alive until
/// the next keystroke, which is then handled as an interrupt.
pub fn register_interrupt_signal() -> Arc<AtomicBool> {
    let flag = Arc::new(AtomicBool::new(false));
    let handler_flag = Arc::clone(&flag);
    if let Err(err) = ctrlc::set_handler(move || handler_flag.store(true, Ordering::SeqCst)) {
        warn!("could not register interrupt handler: {err}");
    }
    flag
}

/// Block until exactly one byte is available.
pub fn read_byte<R: Read>(input: &mut R) -> Result<u8> {
    let mut buf = [0u8; 1];
    input.read_exact(&mut buf).map_err(Error::InputRead)?;
    Ok(buf[0])
}

/// Read and dispatch bytes until the sentence is finished or interrupted.
///
/// Each byte is fully processed and its output flushed before the next read.
pub fn run_session<R: Read, W: Write>(
    processor: &mut KeystrokeProcessor,
    mut input: R,
    output: &mut W,
    interrupt: &AtomicBool,
) -> Result<SessionOutcome> {
    while !processor.is_done() {
        let mut byte = read_byte(&mut input)?;
        if interrupt.swap(false, Ordering::SeqCst) {
            debug!("interrupt signal pending, treating keystroke as Ctrl-C");
            byte = INTERRUPT;
        }

        let actions = processor.process(byte, Instant::now());
        render::render_all(output, &actions).map_err(Error::Output)?;
    }

    let state = processor.state();
    match state.phase {
        Phase::Interrupted => Ok(SessionOutcome::Interrupted),
        _ => {
            let elapsed = state.started_at.map(|t| t.elapsed()).unwrap_or_default();
            Ok(SessionOutcome::Finished(Score::new(state.typed, elapsed)))
        }
    }
}

/// Show the sentence, take it in raw mode, then report.
///
/// The terminal is restored before anything is reported, on every path out
/// of the input loop.
pub fn run<P, R, W>(
    port: &P,
    words: Vec<String>,
    input: R,
    output: &mut W,
    interrupt: &AtomicBool,
) -> Result<SessionOutcome>
where
    P: TerminalPort,
    R: Read,
    W: Write,
{
    let prompt: String = words.iter().map(|w| format!("{w} ")).collect();
    write!(output, "{prompt}\r").map_err(Error::Output)?;
    render::typing_cursor(output).map_err(Error::Output)?;
    output.flush().map_err(Error::Output)?;

    let mut processor = KeystrokeProcessor::new(words);
    let guard = RawModeGuard::acquire(port)?;
    info!(words = processor.words().len(), "session started");

    let result = run_session(&mut processor, input, output, interrupt);
    if result.is_err() {
        let _ = render::render_all(output, &[RenderAction::Reset]);
    }
    let released = guard.release();
    let outcome = result?;
    released?;

    match outcome {
        SessionOutcome::Finished(score) => {
            info!(typed = score.typed, wpm = score.wpm(), "session finished");
            write!(output, "\n{score}").map_err(Error::Output)?;
        }
        SessionOutcome::Interrupted => {
            info!("session interrupted");
            writeln!(output, "\nReceived interrupt. Exiting.").map_err(Error::Output)?;
        }
    }
    output.flush().map_err(Error::Output)?;
    Ok(outcome)
}
