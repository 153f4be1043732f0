//! Optional sound effects. No device or no files means silence.
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};
use std::io::Cursor;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::core::flashlight::FlashlightEvent;
use crate::core::level::LevelEvent;

fn load_bytes_any(paths: &[&str]) -> Option<Arc<Vec<u8>>> {
    for p in paths {
        if let Ok(b) = std::fs::read(p) {
            debug!(path = p, "loaded sound");
            return Some(Arc::new(b));
        }
    }
    None
}

pub struct AudioManager {
    _stream: OutputStream,
    handle: OutputStreamHandle,
    bg_sink: Option<Sink>,
    sfx_sink: Sink,
    pickup: Option<Arc<Vec<u8>>>,
    caught: Option<Arc<Vec<u8>>>,
    click: Option<Arc<Vec<u8>>>,
    escape: Option<Arc<Vec<u8>>>,
    sfx_volume: f32,
}

impl AudioManager {
    pub fn new() -> Option<Self> {
        let (_stream, handle) = match OutputStream::try_default() {
            Ok(s) => s,
            Err(e) => {
                warn!(error = %e, "no audio output, running silent");
                return None;
            }
        };
        let sfx_sink = Sink::try_new(&handle).ok()?;
        Some(Self {
            _stream,
            handle,
            bg_sink: None,
            sfx_sink,
            pickup: None,
            caught: None,
            click: None,
            escape: None,
            sfx_volume: 0.8,
        })
    }

    pub fn load_sfx_auto(&mut self) {
        self.pickup = load_bytes_any(&["assets/sfx_candle.wav", "assets/sounds/pickup.wav"]);
        self.caught = load_bytes_any(&["assets/sfx_caught.wav", "assets/sounds/caught.wav"]);
        self.click = load_bytes_any(&["assets/sfx_flashlight.wav", "assets/sounds/click.wav"]);
        self.escape = load_bytes_any(&["assets/sfx_escape.wav", "assets/sounds/escape.wav"]);
    }

    fn play(&self, data: &Option<Arc<Vec<u8>>>) {
        if let Some(d) = data {
            if let Ok(dec) = Decoder::new(Cursor::new(d.as_ref().clone())) {
                self.sfx_sink.append(dec.amplify(self.sfx_volume));
            }
        }
    }

    /// One-shot on its own sink so it is not queued behind a click.
    fn play_detached(&self, data: &Option<Arc<Vec<u8>>>) {
        if let Some(d) = data {
            if let Ok(dec) = Decoder::new(Cursor::new(d.as_ref().clone())) {
                if let Ok(sink) = Sink::try_new(&self.handle) {
                    sink.append(dec.amplify(self.sfx_volume));
                    sink.detach();
                }
            }
        }
    }

    pub fn play_music_loop_auto(&mut self) {
        if self.bg_sink.is_some() {
            return;
        }
        let Some(bytes) = load_bytes_any(&["assets/music_bg.ogg", "assets/music_bg.wav"]) else {
            return;
        };
        if let Ok(dec) = Decoder::new_looped(Cursor::new(bytes.as_ref().clone())) {
            if let Ok(sink) = Sink::try_new(&self.handle) {
                sink.append(dec);
                sink.set_volume(0.3);
                self.bg_sink = Some(sink);
            }
        }
    }

    pub fn handle_events(&self, events: &[LevelEvent]) {
        for ev in events {
            match ev {
                LevelEvent::CandleCollected => self.play_detached(&self.pickup),
                LevelEvent::Caught => self.play_detached(&self.caught),
                LevelEvent::Escaped => self.play_detached(&self.escape),
                LevelEvent::Flashlight(FlashlightEvent::SwitchedOn | FlashlightEvent::SwitchedOff) => {
                    self.play(&self.click)
                }
                LevelEvent::Flashlight(_) => {}
            }
        }
    }
}
