/// Level below which a releasing envelope snaps to silence.
pub const RELEASE_FLOOR: f32 = 0.001;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnvelopeStage {
    #[default]
    Idle,
    Attack,
    Decay,
    Sustain,
    Release,
}

/// Stage times in seconds plus the sustain level, read fresh every sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvelopeParams {
    pub attack: f32,
    pub decay: f32,
    pub sustain: f32,
    pub release: f32,
}

impl Default for EnvelopeParams {
    fn default() -> Self {
        Self {
            attack: 0.01,
            decay: 0.1,
            sustain: 0.7,
            release: 0.3,
        }
    }
}

/// Per-sample ADSR state machine.
///
/// Attack and decay are linear ramps; release removes a fixed fraction of
/// the current level each sample, so it decays exponentially.
#[derive(Debug, Clone, Default)]
pub struct Envelope {
    level: f32,
    stage: EnvelopeStage,
}

impl Envelope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn level(&self) -> f32 {
        self.level
    }

    pub fn stage(&self) -> EnvelopeStage {
        self.stage
    }

    pub fn is_idle(&self) -> bool {
        self.stage == EnvelopeStage::Idle
    }

    /// Restart from silence in the attack stage, whatever the prior stage.
    pub fn trigger(&mut self) {
        self.level = 0.0;
        self.stage = EnvelopeStage::Attack;
    }

    /// Enter release unless idle or already releasing.
    pub fn release(&mut self) {
        if !matches!(self.stage, EnvelopeStage::Idle | EnvelopeStage::Release) {
            self.stage = EnvelopeStage::Release;
        }
    }

    pub fn reset(&mut self) {
        self.level = 0.0;
        self.stage = EnvelopeStage::Idle;
    }

    /// Advance one sample. Returns `true` when this step finished the release.
    pub fn advance(&mut self, params: &EnvelopeParams, sample_rate: f32) -> bool {
        match self.stage {
            EnvelopeStage::Idle | EnvelopeStage::Sustain => {}
            EnvelopeStage::Attack => {
                self.level += 1.0 / (params.attack * sample_rate);
                if self.level >= 1.0 {
                    self.level = 1.0;
                    self.stage = EnvelopeStage::Decay;
                }
            }
            EnvelopeStage::Decay => {
                self.level -= (1.0 - params.sustain) / (params.decay * sample_rate);
                if self.level <= params.sustain {
                    self.level = params.sustain;
                    self.stage = EnvelopeStage::Sustain;
                }
            }
            EnvelopeStage::Release => {
                self.level -= self.level / (params.release * sample_rate);
                if self.level <= RELEASE_FLOOR {
                    self.level = 0.0;
                    self.stage = EnvelopeStage::Idle;
                    return true;
                }
            }
        }
        false
    }
}
