//! Volume control
//!
//! Volume range is 0-100%, handed to the media output as a linear gain in
//! 0.0-1.0. Mute keeps the level so unmuting restores it.

/// Volume controller
#[derive(Debug, Clone)]
pub struct Volume {
    /// Volume level (0-100)
    level: u8,

    /// Mute state (preserves volume level)
    muted: bool,
}

impl Volume {
    /// Create new volume controller, clamping `level` to 100
    pub fn new(level: u8) -> Self {
        Self {
            level: level.min(100),
            muted: false,
        }
    }

    /// Set volume level (0-100)
    pub fn set_level(&mut self, level: u8) {
        self.level = level.min(100);
    }

    /// Get current volume level (0-100)
    pub fn level(&self) -> u8 {
        self.level
    }

    /// Toggle mute state
    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Gain for the media output
    ///
    /// Returns 0.0 if muted, otherwise `level / 100`
    pub fn gain(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            f32::from(self.level) / 100.0
        }
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::new(70)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_seventy_percent() {
        let volume = Volume::default();
        assert_eq!(volume.level(), 70);
        assert!((volume.gain() - 0.7).abs() < f32::EPSILON);
    }

    #[test]
    fn level_is_clamped() {
        let mut volume = Volume::new(150);
        assert_eq!(volume.level(), 100);
        volume.set_level(255);
        assert_eq!(volume.level(), 100);
        assert_eq!(volume.gain(), 1.0);
    }

    #[test]
    fn mute_preserves_level() {
        let mut volume = Volume::new(40);
        volume.toggle_mute();
        assert!(volume.is_muted());
        assert_eq!(volume.gain(), 0.0);
        assert_eq!(volume.level(), 40);

        volume.toggle_mute();
        assert!((volume.gain() - 0.4).abs() < f32::EPSILON);
    }

    #[test]
    fn zero_is_silent() {
        assert_eq!(Volume::new(0).gain(), 0.0);
    }
}
