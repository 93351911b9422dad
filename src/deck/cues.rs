use crate::audio::{CUE_SLOTS, Player};

/// Four hot cue markers for one deck. An unset slot is `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HotCues {
    slots: [Option<f64>; CUE_SLOTS],
}

impl HotCues {
    /// Handle a press on `slot`.
    ///
    /// A modifier press clears the slot. Otherwise an unset slot stores the
    /// current position and a set one jumps back to it.
    pub fn press(&mut self, slot: usize, modifier: bool, player: &mut Player) {
        let Some(cue) = self.slots.get_mut(slot) else {
            log::warn!("No hot cue slot {}", slot + 1);
            return;
        };

        if modifier {
            *cue = None;
            return;
        }
        match *cue {
            None => {
                let at = player.position_seconds();
                log::debug!("Hot cue {} set at {:.2}s", slot + 1, at);
                *cue = Some(at);
            }
            Some(at) => player.set_position(at),
        }
    }

    pub fn get(&self, slot: usize) -> Option<f64> {
        self.slots.get(slot).copied().flatten()
    }

    pub fn slots(&self) -> &[Option<f64>; CUE_SLOTS] {
        &self.slots
    }

    pub fn reset(&mut self) {
        self.slots = [None; CUE_SLOTS];
    }
}
