use std::{
    sync::mpsc::{self, RecvTimeoutError},
    thread::{self, JoinHandle},
    time::{Duration, Instant},
};

use golife::{Game, Mode, Set};
use log::{debug, error};
use rand::Rng;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("the session thread has stopped")]
    Disconnected,

    #[error(transparent)]
    Game(#[from] golife::Error),
}

/// One generation as seen from outside the session.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub index: usize,
    /// history length when the frame was taken.
    pub len: usize,
    pub cells: Set,
    pub playing: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Info {
    pub grid_size: (u32, u32),
    pub mode: Mode,
}

struct State<R> {
    game: Game<R>,
    playing: bool,
    interval: Duration,
}

impl<R> State<R>
where
    R: Rng,
{
    fn frame(&self, index: usize) -> golife::Result<Frame> {
        let cells = self.game.generation(index)?.clone();
        Ok(Frame {
            index,
            len: self.game.len(),
            cells,
            playing: self.playing,
        })
    }

    fn latest(&self) -> Frame {
        Frame {
            index: self.game.len() - 1,
            len: self.game.len(),
            cells: self.game.latest().clone(),
            playing: self.playing,
        }
    }

    fn step(&mut self) -> Frame {
        self.game.next_generation();
        self.latest()
    }

    /// returns false once the session should stop.
    fn handle(&mut self, cmd: SessionCmd) -> bool {
        // replies to a requester that went away are dropped
        match cmd {
            SessionCmd::Info(sender) => {
                let info = Info {
                    grid_size: self.game.grid_size(),
                    mode: self.game.mode(),
                };
                sender.send(info).ok();
            }
            SessionCmd::Next(sender) => {
                sender.send(self.step()).ok();
            }
            SessionCmd::Generation(index, sender) => {
                sender.send(self.frame(index)).ok();
            }
            SessionCmd::Latest(sender) => {
                sender.send(self.latest()).ok();
            }
            SessionCmd::Play(playing) => self.playing = playing,
            SessionCmd::Faster => self.interval = (self.interval / 2).max(MIN_TICK_INTERVAL),
            SessionCmd::Slower => self.interval = (self.interval * 2).min(MAX_TICK_INTERVAL),
            SessionCmd::Shutdown => return false,
        }
        true
    }
}

pub enum SessionCmd {
    Info(mpsc::Sender<Info>),
    Next(mpsc::Sender<Frame>),
    Generation(usize, mpsc::Sender<golife::Result<Frame>>),
    Latest(mpsc::Sender<Frame>),
    Play(bool),
    Faster,
    Slower,
    Shutdown,
}

#[derive(Debug, Clone)]
pub struct SessionHandle {
    sender: mpsc::Sender<SessionCmd>,
}

impl SessionHandle {
    fn send(&self, cmd: SessionCmd) -> Result<(), SessionError> {
        self.sender.send(cmd).map_err(|_| SessionError::Disconnected)
    }

    fn request<T>(&self, cmd: impl FnOnce(mpsc::Sender<T>) -> SessionCmd) -> Result<T, SessionError> {
        let (sender, receiver) = mpsc::channel();
        self.send(cmd(sender))?;
        receiver.recv().map_err(|_| SessionError::Disconnected)
    }

    pub fn info(&self) -> Result<Info, SessionError> {
        self.request(SessionCmd::Info)
    }

    /// steps the game once.
    pub fn next(&self) -> Result<Frame, SessionError> {
        self.request(SessionCmd::Next)
    }

    pub fn generation(&self, index: usize) -> Result<Frame, SessionError> {
        Ok(self.request(|sender| SessionCmd::Generation(index, sender))??)
    }

    pub fn latest(&self) -> Result<Frame, SessionError> {
        self.request(SessionCmd::Latest)
    }

    pub fn play(&self, playing: bool) -> Result<(), SessionError> {
        self.send(SessionCmd::Play(playing))
    }

    pub fn faster(&self) -> Result<(), SessionError> {
        self.send(SessionCmd::Faster)
    }

    pub fn slower(&self) -> Result<(), SessionError> {
        self.send(SessionCmd::Slower)
    }
}

/// A thread owning one game and serving it over a channel.
#[derive(Debug)]
pub struct Session {
    thread: JoinHandle<()>,
    sender: mpsc::Sender<SessionCmd>,
}

impl Session {
    pub fn spawn<R>(game: Game<R>, interval: Duration) -> Self
    where
        R: Rng + Send + 'static,
    {
        let state = State {
            game,
            playing: false,
            interval: interval.clamp(MIN_TICK_INTERVAL, MAX_TICK_INTERVAL),
        };

        let (sender, receiver) = mpsc::channel();
        let thread = thread::spawn(move || session_loop(receiver, state));

        Self { thread, sender }
    }

    pub fn handle(&self) -> SessionHandle {
        let sender = self.sender.clone();
        SessionHandle { sender }
    }

    /// stops the session and waits for its thread.
    pub fn shutdown(self) {
        self.sender.send(SessionCmd::Shutdown).ok();
        if self.thread.join().is_err() {
            error!("session thread panicked");
        }
    }
}

const EVT_CHECK_TIMEOUT: Duration = Duration::from_millis(10);
const MIN_TICK_INTERVAL: Duration = Duration::from_millis(25);
const MAX_TICK_INTERVAL: Duration = Duration::from_secs(2);

fn session_loop<R>(receiver: mpsc::Receiver<SessionCmd>, mut state: State<R>)
where
    R: Rng,
{
    let mut last_update = Instant::now();

    loop {
        match receiver.recv_timeout(EVT_CHECK_TIMEOUT) {
            Ok(cmd) => {
                if !state.handle(cmd) {
                    break;
                }
            }
            Err(RecvTimeoutError::Timeout) => (),
            Err(RecvTimeoutError::Disconnected) => break,
        }

        if state.playing && last_update.elapsed() >= state.interval {
            state.step();
            last_update = Instant::now();
        }
    }
    debug!("session stopped after {} generations", state.game.len());
}

#[cfg(test)]
mod tests {
    use golife::point;
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    fn blinker_session() -> Session {
        let blinker = [point!(1, 1), point!(1, 2), point!(1, 3)];
        let game = Game::new(blinker, 5, 5, Mode::Deterministic, StdRng::seed_from_u64(0));
        Session::spawn(game.unwrap(), Duration::from_millis(200))
    }

    #[test]
    fn test_step_and_lookup() {
        let session = blinker_session();
        let handle = session.handle();

        let first = handle.latest().unwrap();
        assert_eq!((first.index, first.len), (0, 1));

        let next = handle.next().unwrap();
        assert_eq!((next.index, next.len), (1, 2));
        let expected: Set = [point!(0, 2), point!(1, 2), point!(2, 2)].into_iter().collect();
        assert_eq!(next.cells, expected);

        assert_eq!(handle.generation(0).unwrap().cells, first.cells);
        assert!(matches!(
            handle.generation(2),
            Err(SessionError::Game(golife::Error::IndexOutOfRange { index: 2, len: 2 }))
        ));

        let info = handle.info().unwrap();
        assert_eq!(info.grid_size, (5, 5));
        assert_eq!(info.mode, Mode::Deterministic);

        session.shutdown();
        assert!(matches!(handle.latest(), Err(SessionError::Disconnected)));
    }

    #[test]
    fn test_autoplay_advances() {
        let session = blinker_session();
        let handle = session.handle();
        for _ in 0..4 {
            handle.faster().unwrap();
        }
        handle.play(true).unwrap();
        thread::sleep(Duration::from_millis(300));
        handle.play(false).unwrap();

        let frame = handle.latest().unwrap();
        assert!(frame.len > 1);
        assert!(!frame.playing);
        session.shutdown();
    }
}
