/// The delay and sound timers. Both count down towards zero at whatever
/// cadence the host calls [Timers::tick] (60Hz on real hardware) and stop
/// there.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Timers {
    pub delay: u8,
    pub sound: u8,
}

impl Timers {
    pub fn new() -> Self {
        Timers { delay: 0, sound: 0 }
    }

    pub fn tick(&mut self) {
        self.delay = self.delay.saturating_sub(1);
        self.sound = self.sound.saturating_sub(1);
    }

    /// the host should be making a noise
    pub fn sound_active(&self) -> bool {
        self.sound > 0
    }
}
