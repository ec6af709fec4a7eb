//! Audio cues
//!
//! The simulation only emits `GameEvent`s; this module decides which of
//! them make a sound. On wasm32 the tones are generated procedurally with
//! the Web Audio API - no external files needed!

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Food eaten
    Eat,
    /// Snake hit a wall or itself
    Collision,
    /// Score crossed a level boundary
    LevelUp,
}

impl SoundEffect {
    /// Sound to play for an event, if any
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::AteFood { .. } => Some(SoundEffect::Eat),
            GameEvent::LeveledUp { .. } => Some(SoundEffect::LevelUp),
            GameEvent::CollidedWall | GameEvent::CollidedSelf => Some(SoundEffect::Collision),
            GameEvent::GridFilled | GameEvent::GameOver { .. } => None,
        }
    }
}

/// True if background music should stop after this event
pub fn stops_music(event: &GameEvent) -> bool {
    event.is_terminal()
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::SoundEffect;
    use crate::Settings;

    /// Bass line for the background loop (Hz), one note per beat
    const MUSIC_NOTES: [f32; 8] = [110.0, 110.0, 146.8, 130.8, 110.0, 98.0, 130.8, 123.5];
    const MUSIC_BEAT_SECS: f64 = 0.25;
    /// How far ahead music notes are scheduled
    const MUSIC_LOOKAHEAD_SECS: f64 = 0.5;

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        sfx_volume: f32,
        music_volume: f32,
        music_playing: bool,
        /// Context time of the next unscheduled note
        next_note_time: f64,
        next_note: usize,
    }

    impl AudioManager {
        pub fn new(settings: &Settings) -> Self {
            // Try to create audio context (may fail if not in secure context)
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                sfx_volume: settings.effective_sfx_volume(),
                music_volume: settings.effective_music_volume(),
                music_playing: false,
                next_note_time: 0.0,
                next_note: 0,
            }
        }

        /// Pick up volume changes from settings
        pub fn apply_settings(&mut self, settings: &Settings) {
            self.sfx_volume = settings.effective_sfx_volume();
            self.music_volume = settings.effective_music_volume();
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        /// Play a sound effect
        pub fn play(&self, effect: SoundEffect) {
            let vol = self.sfx_volume;
            if vol <= 0.0 {
                return;
            }

            let Some(ctx) = &self.ctx else { return };

            // Resume context if suspended (browsers require user gesture)
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            match effect {
                SoundEffect::Eat => self.play_eat(ctx, vol),
                SoundEffect::Collision => self.play_collision(ctx, vol),
                SoundEffect::LevelUp => self.play_level_up(ctx, vol),
            }
        }

        pub fn start_music(&mut self) {
            if let Some(ctx) = &self.ctx {
                self.music_playing = true;
                self.next_note_time = ctx.current_time();
                self.next_note = 0;
            }
        }

        /// Stop scheduling notes; already scheduled ones fade out on their own
        pub fn stop_music(&mut self) {
            self.music_playing = false;
        }

        /// Keep the music loop fed (call once per frame)
        pub fn update_music(&mut self) {
            if !self.music_playing || self.music_volume <= 0.0 {
                return;
            }
            let Some(ctx) = self.ctx.clone() else { return };

            let horizon = ctx.current_time() + MUSIC_LOOKAHEAD_SECS;
            while self.next_note_time < horizon {
                let freq = MUSIC_NOTES[self.next_note % MUSIC_NOTES.len()];
                self.play_music_note(&ctx, freq, self.next_note_time);
                self.next_note += 1;
                self.next_note_time += MUSIC_BEAT_SECS;
            }
        }

        // === Sound generators ===

        /// Create an oscillator with gain envelope
        fn create_osc(
            &self,
            ctx: &AudioContext,
            freq: f32,
            osc_type: OscillatorType,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }

        /// Eat - short rising blip
        fn play_eat(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 440.0, OscillatorType::Square) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.2, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.08)
                .ok();
            osc.frequency().set_value_at_time(440.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(880.0, t + 0.06)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.1).ok();
        }

        /// Collision - falling buzz with a thump under it
        fn play_collision(&self, ctx: &AudioContext, vol: f32) {
            let t = ctx.current_time();

            if let Some((osc, gain)) = self.create_osc(ctx, 300.0, OscillatorType::Sawtooth) {
                gain.gain().set_value_at_time(vol * 0.35, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.4)
                    .ok();
                osc.frequency().set_value_at_time(300.0, t).ok();
                osc.frequency()
                    .exponential_ramp_to_value_at_time(40.0, t + 0.4)
                    .ok();
                osc.start().ok();
                osc.stop_with_when(t + 0.45).ok();
            }

            if let Some((osc, gain)) = self.create_osc(ctx, 60.0, OscillatorType::Sine) {
                gain.gain().set_value_at_time(vol * 0.4, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.2)
                    .ok();
                osc.start().ok();
                osc.stop_with_when(t + 0.25).ok();
            }
        }

        /// Level up - quick major arpeggio
        fn play_level_up(&self, ctx: &AudioContext, vol: f32) {
            let t = ctx.current_time();
            for (i, freq) in [523.3f32, 659.3, 784.0, 1046.5].iter().enumerate() {
                let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Triangle)
                else {
                    continue;
                };
                let start = t + i as f64 * 0.07;
                gain.gain().set_value_at_time(0.0, t).ok();
                gain.gain().set_value_at_time(vol * 0.25, start).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, start + 0.15)
                    .ok();
                osc.start_with_when(start).ok();
                osc.stop_with_when(start + 0.2).ok();
            }
        }

        fn play_music_note(&self, ctx: &AudioContext, freq: f32, at: f64) {
            let Some((osc, gain)) = self.create_osc(ctx, freq, OscillatorType::Triangle) else {
                return;
            };
            gain.gain().set_value_at_time(self.music_volume * 0.12, at).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.001, at + MUSIC_BEAT_SECS * 0.9)
                .ok();
            osc.start_with_when(at).ok();
            osc.stop_with_when(at + MUSIC_BEAT_SECS).ok();
        }
    }
}
