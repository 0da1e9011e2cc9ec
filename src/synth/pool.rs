use super::voice::Voice;

/// Fixed-capacity set of voices. Allocated once; never grows.
#[derive(Debug, Clone)]
pub struct VoicePool {
    voices: Vec<Voice>,
}

impl VoicePool {
    pub fn new(capacity: usize) -> Self {
        Self {
            voices: (0..capacity.max(1)).map(Voice::new).collect(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.voices.len()
    }

    pub fn active_count(&self) -> usize {
        self.voices.iter().filter(|v| v.is_active()).count()
    }

    pub fn voice(&self, slot: usize) -> Option<&Voice> {
        self.voices.get(slot)
    }

    pub fn voices(&self) -> &[Voice] {
        &self.voices
    }

    pub(crate) fn voices_mut(&mut self) -> &mut [Voice] {
        &mut self.voices
    }

    /// First inactive slot.
    fn find_free_voice(&self) -> Option<usize> {
        self.voices.iter().position(|voice| !voice.is_active())
    }

    /// Slot with the lowest envelope level; the lowest index wins ties.
    fn steal_voice(&self) -> usize {
        let mut quietest = 0;
        for (slot, voice) in self.voices.iter().enumerate().skip(1) {
            if voice.level() < self.voices[quietest].level() {
                quietest = slot;
            }
        }
        log::debug!(
            "stealing voice {} (note {}, level {:.4})",
            quietest,
            self.voices[quietest].note(),
            self.voices[quietest].level()
        );
        quietest
    }

    /// Start `note` on a free or stolen voice and return its slot.
    pub fn note_on(&mut self, note: u8, velocity: u8, phase_increment: f32) -> usize {
        let slot = match self.find_free_voice() {
            Some(slot) => slot,
            None => self.steal_voice(),
        };
        self.voices[slot].activate(note, velocity, phase_increment);
        slot
    }

    /// Release every active voice playing `note`. Returns how many were released.
    pub fn note_off(&mut self, note: u8) -> usize {
        let mut released = 0;
        for voice in self.voices.iter_mut() {
            if voice.is_active() && voice.note() == note && !voice.is_releasing() {
                voice.release();
                released += 1;
            }
        }
        released
    }

    pub fn reset(&mut self) {
        self.voices.iter_mut().for_each(Voice::reset);
    }
}
