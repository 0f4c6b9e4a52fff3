//! Attack/decay gain envelope for cue tones

/// Linear rise time from silence to peak
pub const ATTACK_SECS: f32 = 0.01;

/// Peak gain before the master volume is applied
pub const PEAK_GAIN: f32 = 0.3;

/// Gain at `t` seconds into a tone lasting `duration` seconds.
///
/// Rises linearly to [`PEAK_GAIN`] over [`ATTACK_SECS`], then falls linearly
/// to silence at `duration`.
pub fn envelope_gain(t: f32, duration: f32) -> f32 {
    if t < 0.0 || t >= duration {
        return 0.0;
    }
    let attack = ATTACK_SECS.min(duration);
    if t < attack {
        return PEAK_GAIN * t / attack;
    }
    let decay = duration - attack;
    if decay <= 0.0 {
        return 0.0;
    }
    PEAK_GAIN * (duration - t) / decay
}
