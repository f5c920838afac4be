use log::warn;
use rodio::{
    Decoder, OutputStream, OutputStreamHandle, Sink, Source,
    source::{Buffered, SineWave},
};
use std::fs::File;
use std::io::BufReader;
use std::time::Duration;

use crate::sim::GameEvent;

/// Sample played for every volley, when present
pub const VOLLEY_SOUND_PATH: &str = "assets/sounds/volley.wav";

/// A synthesized blip: pitch in Hz and length in milliseconds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub frequency: f32,
    pub millis: u64,
}

/// Which sound, if any, an event should make
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cue {
    Volley,
    Tone(Tone),
}

pub fn cue_for(event: &GameEvent) -> Option<Cue> {
    match event {
        GameEvent::VolleyFired { .. } => Some(Cue::Volley),
        GameEvent::PowerUpCollected { .. } => Some(Cue::Tone(Tone {
            frequency: 1320.0,
            millis: 120,
        })),
        GameEvent::EnemyReachedPlayer { .. } => Some(Cue::Tone(Tone {
            frequency: 110.0,
            millis: 250,
        })),
        _ => None,
    }
}

/// Audio manager for playing sound effects. Without an output device every call is a no-op.
pub struct AudioManager {
    output: Option<(OutputStream, OutputStreamHandle)>,
    /// Pre-loaded and buffered volley sample (None falls back to a synthesized blip)
    volley_sound: Option<Buffered<Decoder<BufReader<File>>>>,
    volume: f32,
}

impl AudioManager {
    pub fn new() -> Self {
        let output = match OutputStream::try_default() {
            Ok(output) => Some(output),
            Err(err) => {
                warn!("No audio output, continuing without sound: {}", err);
                None
            }
        };

        let volley_sound = match load_sample(VOLLEY_SOUND_PATH) {
            Ok(sound) => Some(sound),
            Err(err) => {
                warn!("Could not load {}, using a synthesized cue: {}", VOLLEY_SOUND_PATH, err);
                None
            }
        };

        Self {
            output,
            volley_sound,
            volume: 0.05,
        }
    }

    /// Play whatever cue belongs to `event`
    pub fn play_event(&self, event: &GameEvent) {
        match cue_for(event) {
            Some(Cue::Volley) => self.play_volley(),
            Some(Cue::Tone(tone)) => self.play_tone(tone),
            None => {}
        }
    }

    pub fn play_volley(&self) {
        match &self.volley_sound {
            Some(sound) => {
                if let Some(sink) = self.sink() {
                    sink.append(sound.clone());
                    sink.detach();
                }
            }
            None => self.play_tone(Tone {
                frequency: 880.0,
                millis: 40,
            }),
        }
    }

    pub fn play_tone(&self, tone: Tone) {
        if let Some(sink) = self.sink() {
            sink.append(
                SineWave::new(tone.frequency).take_duration(Duration::from_millis(tone.millis)),
            );
            sink.detach();
        }
    }

    /// Fresh sink at the effect volume; `None` when playback is unavailable
    fn sink(&self) -> Option<Sink> {
        let (_, handle) = self.output.as_ref()?;
        let sink = Sink::try_new(handle).ok()?;
        sink.set_volume(self.volume);
        Some(sink)
    }
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

fn load_sample(path: &str) -> color_eyre::Result<Buffered<Decoder<BufReader<File>>>> {
    let file = File::open(path)?;
    let source = Decoder::new(BufReader::new(file))?;
    Ok(source.buffered())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::PowerUpKind;

    #[test]
    fn test_cues() {
        assert_eq!(
            cue_for(&GameEvent::VolleyFired { projectiles: 3 }),
            Some(Cue::Volley)
        );
        assert!(matches!(
            cue_for(&GameEvent::PowerUpCollected {
                kind: PowerUpKind::UnitGain
            }),
            Some(Cue::Tone(_))
        ));
        assert_eq!(cue_for(&GameEvent::EnemyHit { id: 1, health_left: 2 }), None);
    }

    #[test]
    fn test_missing_sample_is_an_error() {
        assert!(load_sample("does/not/exist.wav").is_err());
    }
}
