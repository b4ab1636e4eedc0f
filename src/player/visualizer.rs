use rand::Rng;

pub const BAR_COUNT: usize = 50;
/// Tallest bar a refresh can produce
pub const BAR_MAX: u64 = 60;

const DECAY: f64 = 0.7;

/// Decorative level meter, not tied to the actual audio signal
#[derive(Debug, Clone)]
pub struct Visualizer {
    bars: Vec<u64>,
}

impl Visualizer {
    pub fn new() -> Self {
        Self {
            bars: vec![0; BAR_COUNT],
        }
    }

    pub fn bars(&self) -> &[u64] {
        &self.bars
    }

    /// One frame: fresh random levels while playing, decay toward zero otherwise
    pub fn refresh<R: Rng>(&mut self, playing: bool, rng: &mut R) {
        if playing {
            for bar in &mut self.bars {
                *bar = rng.gen_range(10..BAR_MAX);
            }
        } else {
            for bar in &mut self.bars {
                *bar = (*bar as f64 * DECAY).floor() as u64;
            }
        }
    }
}

impl Default for Visualizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_playing_fills_bars() {
        let mut viz = Visualizer::new();
        viz.refresh(true, &mut StdRng::seed_from_u64(1));
        assert_eq!(viz.bars().len(), BAR_COUNT);
        assert!(viz.bars().iter().all(|b| (10..BAR_MAX).contains(b)));
    }

    #[test]
    fn test_paused_bars_decay_to_zero() {
        let mut viz = Visualizer::new();
        let mut rng = StdRng::seed_from_u64(1);
        viz.refresh(true, &mut rng);
        for _ in 0..20 {
            viz.refresh(false, &mut rng);
        }
        assert!(viz.bars().iter().all(|b| *b == 0));
    }
}
