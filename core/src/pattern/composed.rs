use crate::muscle::Muscle;
use serde::{Deserialize, Serialize};

/// One muscle's pulse inside a composed pattern.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PulseSpec {
    pub muscle: Muscle,
    /// Effective intensity in percent, after per-muscle overrides.
    pub intensity: u32,
    pub frequency: u32,
    pub duration: f32,
    pub ramp_up: f32,
    pub ramp_down: f32,
    pub exit_delay: f32,
    /// Pulses sharing a segment play together; segments play in order.
    pub segment: usize,
}

impl PulseSpec {
    /// Time the segment occupies before the next one may start.
    pub fn span(&self) -> f32 {
        self.duration + self.exit_delay
    }
}

/// Ordered per-muscle pulse sequence ready to hand to a device client.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComposedPattern {
    pulses: Vec<PulseSpec>,
}

impl ComposedPattern {
    pub fn new(pulses: Vec<PulseSpec>) -> Self {
        Self { pulses }
    }

    pub fn pulses(&self) -> &[PulseSpec] {
        &self.pulses
    }

    pub fn into_pulses(self) -> Vec<PulseSpec> {
        self.pulses
    }

    pub fn len(&self) -> usize {
        self.pulses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pulses.is_empty()
    }

    pub fn segment_count(&self) -> usize {
        self.pulses
            .iter()
            .map(|pulse| pulse.segment + 1)
            .max()
            .unwrap_or(0)
    }

    pub fn segment(&self, index: usize) -> impl Iterator<Item = &PulseSpec> {
        self.pulses.iter().filter(move |pulse| pulse.segment == index)
    }

    /// Playback length: the longest span of each segment, summed.
    pub fn total_duration(&self) -> f32 {
        (0..self.segment_count())
            .map(|index| {
                self.segment(index)
                    .map(PulseSpec::span)
                    .fold(0.0_f32, f32::max)
            })
            .sum()
    }

    pub fn muscles(&self) -> impl Iterator<Item = Muscle> + '_ {
        self.pulses.iter().map(|pulse| pulse.muscle)
    }
}
