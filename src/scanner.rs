//! Single pass, byte driven scanner for Quake 3 Arena server logs.
//!
//! A log line looks like ` 20:37 Kill: 1022 2 22: Isgalamido killed Mocinha by MOD_ROCKET`.
//! The scanner only recognizes `InitGame`, `ShutdownGame` and `Kill` lines and hands
//! each of them to a sink as soon as the line is read. Everything else is skipped.
use std::io::{self, BufReader, Read};

/// Longest event name kept, in bytes. Extra bytes are dropped.
pub const EVENT_NAME_MAX: usize = 63;
/// Longest Kill payload kept, in bytes (not counting dropped `\r`).
pub const PAYLOAD_MAX: usize = 1023;

/// Something that hands out one byte per call, `None` once exhausted.
pub trait CharSource {
    fn next_char(&mut self) -> Option<u8>;
}

impl CharSource for &[u8] {
    fn next_char(&mut self) -> Option<u8> {
        let (&ch, rest) = self.split_first()?;
        *self = rest;
        Some(ch)
    }
}

/// Source backed by a closure, see [`from_fn`].
pub struct FromFn<F>(F);

/// Wrap a closure as a [`CharSource`].
pub fn from_fn<F>(f: F) -> FromFn<F>
where
    F: FnMut() -> Option<u8>,
{
    FromFn(f)
}

impl<F> CharSource for FromFn<F>
where
    F: FnMut() -> Option<u8>,
{
    fn next_char(&mut self) -> Option<u8> {
        (self.0)()
    }
}

/**
 * Buffered source over any reader (a file, a socket, stdin).
 * A read error ends the stream; the error is kept for the caller to pick up
 * with `take_error` once scanning is done.
 */
pub struct ReaderSource<R: Read> {
    bytes: io::Bytes<BufReader<R>>,
    error: Option<io::Error>,
}

impl<R: Read> ReaderSource<R> {
    pub fn new(inner: R) -> Self {
        ReaderSource {
            bytes: BufReader::new(inner).bytes(),
            error: None,
        }
    }

    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }
}

impl<R: Read> CharSource for ReaderSource<R> {
    fn next_char(&mut self) -> Option<u8> {
        if self.error.is_some() {
            return None;
        }
        loop {
            match self.bytes.next()? {
                Ok(ch) => return Some(ch),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.error = Some(e);
                    return None;
                }
            }
        }
    }
}

/// One recognized log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    InitGame,
    ShutdownGame,
    Kill { raw_text: String },
}

impl Event {
    pub fn name(&self) -> &'static str {
        match self {
            Event::InitGame => "InitGame",
            Event::ShutdownGame => "ShutdownGame",
            Event::Kill { .. } => "Kill",
        }
    }

    /// Text after the Kill sub-header; empty for the other events.
    pub fn payload(&self) -> &str {
        match self {
            Event::Kill { raw_text } => raw_text,
            _ => "",
        }
    }
}

// Pulls from the source until the first end-of-stream, then keeps answering None.
struct Cursor<'s, S: CharSource + ?Sized> {
    source: &'s mut S,
    done: bool,
}

impl<'s, S: CharSource + ?Sized> Cursor<'s, S> {
    fn bump(&mut self) -> Option<u8> {
        if self.done {
            return None;
        }
        let ch = self.source.next_char();
        self.done = ch.is_none();
        ch
    }

    // Reads a fresh byte and keeps going while it is a space.
    fn skip_spaces(&mut self) -> Option<u8> {
        loop {
            match self.bump() {
                Some(b' ') => continue,
                other => return other,
            }
        }
    }

    fn skip_until(&mut self, mut ch: Option<u8>, stop: u8) -> Option<u8> {
        while let Some(c) = ch {
            if c == stop {
                break;
            }
            ch = self.bump();
        }
        ch
    }
}

/**
 * Scan `source` to exhaustion, calling `on_event` for each event in stream order.
 *
 * Per line: skip spaces, the timestamp token and spaces again. A `-` there marks a
 * separator line. Otherwise the event name runs up to the first `:`. Kill lines
 * carry a second `<killer> <victim> <weapon>:` header before the payload text.
 * Data left dangling at the end of the stream without a `:` is discarded.
 */
pub fn scan<S, F>(source: &mut S, mut on_event: F)
where
    S: CharSource + ?Sized,
    F: FnMut(Event),
{
    let mut cur = Cursor {
        source,
        done: false,
    };
    let mut name: Vec<u8> = Vec::with_capacity(EVENT_NAME_MAX);
    let mut text: Vec<u8> = Vec::with_capacity(PAYLOAD_MAX);

    loop {
        let ch = cur.skip_spaces();
        // timestamp, whatever its format; newlines don't end it
        cur.skip_until(ch, b' ');
        let mut ch = cur.skip_spaces();

        if ch == Some(b'-') {
            if cur.skip_until(ch, b'\n').is_none() {
                return;
            }
            continue;
        }

        name.clear();
        loop {
            match ch {
                None => return,
                Some(b':') => break,
                Some(c) => {
                    if name.len() < EVENT_NAME_MAX {
                        name.push(c);
                    }
                    ch = cur.bump();
                }
            }
        }
        ch = cur.bump();

        match &name[..] {
            b"InitGame" => on_event(Event::InitGame),
            b"ShutdownGame" => on_event(Event::ShutdownGame),
            _ => (),
        }
        if ch.is_none() {
            return;
        }

        if &name[..] != b"Kill" {
            if cur.skip_until(ch, b'\n').is_none() {
                return;
            }
            continue;
        }

        // `<killer_id> <victim_id> <weapon_id>:`
        if cur.skip_until(ch, b':').is_none() {
            return;
        }
        ch = cur.skip_spaces();

        text.clear();
        while let Some(c) = ch {
            if c == b'\n' {
                break;
            }
            if c != b'\r' && text.len() < PAYLOAD_MAX {
                text.push(c);
            }
            ch = cur.bump();
        }
        on_event(Event::Kill {
            raw_text: String::from_utf8_lossy(&text).into_owned(),
        });

        if ch.is_none() {
            return;
        }
    }
}

/// Collect every event of `source`.
pub fn events<S: CharSource + ?Sized>(source: &mut S) -> Vec<Event> {
    let mut out = Vec::new();
    scan(source, |e| out.push(e));
    out
}
