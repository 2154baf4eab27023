use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CEvent, KeyEvent, KeyEventKind};

#[derive(Debug, PartialEq)]
pub enum Event {
    Key(KeyEvent),
    /// New terminal size as `(columns, rows)`; the next draw picks it up.
    Resize(u16, u16),
    /// Drives toast expiry, the reveal animation and the midnight rollover.
    Tick,
}

/// Map a crossterm event to what the calendar reacts to. Key releases and
/// repeats reported by some terminals are dropped here.
fn translate(ev: CEvent) -> Option<Event> {
    match ev {
        CEvent::Key(key) if key.kind == KeyEventKind::Press => Some(Event::Key(key)),
        CEvent::Resize(columns, rows) => Some(Event::Resize(columns, rows)),
        _ => None,
    }
}

/// Input and tick pump running on its own thread until the handler is dropped.
pub struct EventHandler {
    rx: mpsc::Receiver<Event>,
    stop: Arc<AtomicBool>,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::channel();
        let stop = Arc::new(AtomicBool::new(false));
        let stop_flag = Arc::clone(&stop);

        thread::spawn(move || {
            let mut next_tick = Instant::now() + tick_rate;
            while !stop_flag.load(Ordering::Relaxed) {
                let timeout = next_tick.saturating_duration_since(Instant::now());

                match event::poll(timeout) {
                    Ok(true) => match event::read() {
                        Ok(ev) => {
                            if let Some(ev) = translate(ev) {
                                if tx.send(ev).is_err() {
                                    return;
                                }
                            }
                        }
                        Err(e) => {
                            log::warn!("Reading terminal event failed: {}", e);
                            return;
                        }
                    },
                    Ok(false) => {}
                    Err(e) => {
                        log::warn!("Polling terminal events failed: {}", e);
                        return;
                    }
                }

                if Instant::now() >= next_tick {
                    if tx.send(Event::Tick).is_err() {
                        return;
                    }
                    next_tick = Instant::now() + tick_rate;
                }
            }
        });

        Self { rx, stop }
    }

    pub fn next(&self) -> Result<Event, mpsc::RecvError> {
        self.rx.recv()
    }
}

impl Drop for EventHandler {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
    }
}
