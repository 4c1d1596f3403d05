//! Per-tick input snapshot supplied by the front-end.

/// Held state of every control for one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub fire: bool,
    /// Confirm key went up since the previous tick
    pub confirm_released: bool,
}

impl InputSnapshot {
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn firing() -> Self {
        Self {
            fire: true,
            ..Self::default()
        }
    }

    /// Unit-less movement direction, each axis in {-1, 0, 1}.
    pub fn axis(&self) -> (f32, f32) {
        let x = (self.right as i8 - self.left as i8) as f32;
        let y = (self.down as i8 - self.up as i8) as f32;
        (x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_keys_cancel() {
        let input = InputSnapshot {
            left: true,
            right: true,
            up: true,
            ..InputSnapshot::default()
        };
        assert_eq!(input.axis(), (0.0, -1.0));
    }
}
