use anyhow::Result;
use fantoccini::elements::Element;
use rand::rngs::OsRng;
use rand::Rng;
use std::time::Duration;
use tokio::time::sleep;

/// Base delay ranges at full speed, in milliseconds.
const ACTION_DELAY_MS: (u64, u64) = (150, 600);
const KEYSTROKE_DELAY_MS: (u64, u64) = (30, 150);

#[derive(Debug, Clone)]
/// Spaces interactions out the way a person would. The speed factor scales
/// every delay: 0.5 runs the whole flow at half speed.
pub struct Pacing {
    speed: f64,
}

impl Pacing {
    /// `speed` is clamped to [0.05, 1.0] so the scale stays finite for raw
    /// constructor calls; configuration validation is stricter.
    pub fn new(speed: f64) -> Self {
        Self {
            speed: speed.clamp(0.05, 1.0),
        }
    }

    fn scaled_bounds(&self, (min, max): (u64, u64)) -> (u64, u64) {
        let scale = 1.0 / self.speed;
        ((min as f64 * scale) as u64, (max as f64 * scale) as u64)
    }

    async fn random_delay(&self, bounds: (u64, u64)) {
        let (min, max) = self.scaled_bounds(bounds);
        let mut rng = OsRng;
        let ms = rng.gen_range(min..=max);
        sleep(Duration::from_millis(ms)).await;
    }

    /// Pause before a navigation or click.
    pub async fn action_delay(&self) {
        self.random_delay(ACTION_DELAY_MS).await;
    }

    /// Type `text` into `element` with per-character delays.
    pub async fn type_text(&self, element: &Element, text: &str) -> Result<()> {
        for ch in text.chars() {
            element.send_keys(&ch.to_string()).await?;
            self.random_delay(KEYSTROKE_DELAY_MS).await;
        }
        Ok(())
    }
}
