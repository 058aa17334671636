use std::{
    io::{stdin, stdout, Write},
    sync::mpsc,
    thread::{self, JoinHandle},
    time::Duration,
};

use golife::{pos, Mode, Point, Pos};
use log::error;
use termion::{event::Key, input::TermRead, raw::IntoRawMode};

use crate::sim::{Frame, Info, SessionError, SessionHandle};

pub use canvas::Canvas;
mod canvas;

pub struct View {
    thread: JoinHandle<()>,
}

impl View {
    pub fn spawn(handle: SessionHandle) -> Self {
        let thread = thread::spawn(|| view_loop(handle));
        Self { thread }
    }

    pub fn join(self) {
        if self.thread.join().is_err() {
            error!("view thread panicked");
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dir {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputCmd {
    Exit,
    Move(Dir),
    Next,
    Previous,
    Newest,
    TogglePlay,
    Accelerate,
    Decelerate,
}

fn input_cmd(key: Key) -> Option<InputCmd> {
    let command = match key {
        Key::Char('q') | Key::Ctrl('c') => InputCmd::Exit,
        Key::Up => InputCmd::Move(Dir::Up),
        Key::Down => InputCmd::Move(Dir::Down),
        Key::Left => InputCmd::Move(Dir::Left),
        Key::Right => InputCmd::Move(Dir::Right),
        Key::Char('n') => InputCmd::Next,
        Key::Char('p') => InputCmd::Previous,
        Key::Char('g') => InputCmd::Newest,
        Key::Char(' ') => InputCmd::TogglePlay,
        Key::Char('+') => InputCmd::Accelerate,
        Key::Char('-') => InputCmd::Decelerate,
        _ => return None,
    };
    Some(command)
}

fn input_loop(sender: mpsc::Sender<InputCmd>) {
    for key in stdin().keys() {
        let Ok(key) = key else { break };
        let Some(command) = input_cmd(key) else {
            continue;
        };
        if sender.send(command).is_err() {
            break;
        }
    }
}

const VIEW_REFRESH_INTERVAL: Duration = Duration::from_millis(50);
const PAN_STEP: i64 = 4;

/// What the viewer shows: a screen offset and which generation.
#[derive(Debug)]
struct Viewer {
    origin: Pos,
    /// `None` follows the newest generation.
    cursor: Option<usize>,
    shown: Option<Frame>,
}

impl Viewer {
    fn new() -> Self {
        Self {
            origin: pos!(-1, -1),
            cursor: None,
            shown: None,
        }
    }

    /// applies one input, returns false on exit.
    fn apply(&mut self, cmd: InputCmd, handle: &SessionHandle) -> Result<bool, SessionError> {
        match cmd {
            InputCmd::Exit => return Ok(false),
            InputCmd::Move(direction) => {
                self.origin = self.origin
                    + match direction {
                        Dir::Up => pos!(0, -PAN_STEP),
                        Dir::Down => pos!(0, PAN_STEP),
                        Dir::Left => pos!(-PAN_STEP, 0),
                        Dir::Right => pos!(PAN_STEP, 0),
                    }
            }
            InputCmd::Next => match &self.shown {
                Some(frame) if frame.index + 1 < frame.len => self.cursor = Some(frame.index + 1),
                _ => {
                    handle.next()?;
                    self.cursor = None;
                }
            },
            InputCmd::Previous => {
                if let Some(frame) = &self.shown {
                    self.cursor = Some(frame.index.saturating_sub(1));
                }
            }
            InputCmd::Newest => self.cursor = None,
            InputCmd::TogglePlay => {
                let playing = self.shown.as_ref().is_some_and(|frame| frame.playing);
                handle.play(!playing)?;
                if !playing {
                    self.cursor = None;
                }
            }
            InputCmd::Accelerate => handle.faster()?,
            InputCmd::Decelerate => handle.slower()?,
        }
        Ok(true)
    }

    fn refresh(&mut self, handle: &SessionHandle) -> Result<&Frame, SessionError> {
        let frame = match self.cursor {
            None => handle.latest()?,
            Some(index) => handle.generation(index)?,
        };
        Ok(self.shown.insert(frame))
    }
}

fn status_line(frame: &Frame, info: &Info) -> String {
    let (x, y) = info.grid_size;
    let mode = match info.mode {
        Mode::Deterministic => "deterministic",
        Mode::Stochastic => "stochastic",
    };
    let play = if frame.playing { "playing" } else { "paused" };
    format!(
        "gen {}/{} | {} alive | {}x{} {mode} | {play} | q quit, n/p step, g newest, space play, +/- speed",
        frame.index,
        frame.len - 1,
        frame.cells.len(),
        x,
        y,
    )
}

/// the glyph of a board cell at screen position `screen`, if on the board.
fn glyph(origin: Pos, screen: Pos, frame: &Frame, info: &Info) -> Option<char> {
    let (max_x, max_y) = info.grid_size;
    let point = Point::try_from(origin + screen).ok()?;
    if point.x > max_x || point.y > max_y {
        return None;
    }
    Some(if frame.cells.contains(point) { '#' } else { '·' })
}

fn view_loop(handle: SessionHandle) {
    let (sender, receiver) = mpsc::channel();
    let _input_handle = thread::spawn(|| input_loop(sender));

    let mut stdout = match stdout().into_raw_mode() {
        Ok(stdout) => stdout,
        Err(err) => {
            error!("cannot switch the terminal to raw mode: {err}");
            return;
        }
    };
    write!(stdout, "{}", termion::cursor::Hide).ok();

    if let Err(err) = run(&handle, &receiver, &mut stdout) {
        error!("viewer stopped: {err}");
    }

    let clear = termion::clear::All;
    let home = termion::cursor::Goto(1, 1);
    let show = termion::cursor::Show;
    write!(stdout, "{clear}{home}{show}").ok();
    stdout.flush().ok();
}

#[derive(Debug, thiserror::Error)]
enum ViewError {
    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("terminal error: {0}")]
    Io(#[from] std::io::Error),
}

fn run(
    handle: &SessionHandle,
    receiver: &mpsc::Receiver<InputCmd>,
    out: &mut impl Write,
) -> Result<(), ViewError> {
    let info = handle.info()?;
    let mut viewer = Viewer::new();

    loop {
        while let Ok(cmd) = receiver.try_recv() {
            if !viewer.apply(cmd, handle)? {
                return Ok(());
            }
        }

        let origin = viewer.origin;
        let frame = viewer.refresh(handle)?;
        let mut canvas = Canvas::from_screen()?;
        canvas.layer(|screen| glyph(origin, screen, frame, &info));
        canvas.display(out, &status_line(frame, &info))?;

        thread::sleep(VIEW_REFRESH_INTERVAL);
    }
}
