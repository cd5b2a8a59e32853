//! The single shared color value.

use huecast_types::{ColorError, ColorValue};
use tokio::sync::RwLock;

/// Holds the current [`ColorValue`].
///
/// Reads never fail. Writes are validated and serialized by the lock, so
/// the stored value is always exactly one submitted color and never a
/// mix of channels from concurrent writers.
#[derive(Debug)]
pub struct StateStore {
    current: RwLock<ColorValue>,
}

impl StateStore {
    /// Create a store holding `initial`.
    pub fn new(initial: ColorValue) -> Self {
        Self {
            current: RwLock::new(initial),
        }
    }

    /// The current color.
    pub async fn get(&self) -> ColorValue {
        *self.current.read().await
    }

    /// Replace the current color after validating it.
    ///
    /// On error the stored value is left untouched.
    pub async fn set(&self, color: ColorValue) -> Result<ColorValue, ColorError> {
        color.check()?;
        *self.current.write().await = color;
        Ok(color)
    }
}

impl Default for StateStore {
    fn default() -> Self {
        Self::new(ColorValue::WHITE)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    const PURPLE: ColorValue = ColorValue {
        r: 0.5,
        g: 0.2,
        b: 0.9,
    };

    #[tokio::test]
    async fn starts_white_by_default() {
        let store = StateStore::default();
        assert_eq!(store.get().await, ColorValue::WHITE);
    }

    #[tokio::test]
    async fn set_then_get_returns_same_value() {
        let store = StateStore::default();
        let stored = store.set(PURPLE).await;
        assert_eq!(stored, Ok(PURPLE));
        assert_eq!(store.get().await, PURPLE);
    }

    #[tokio::test]
    async fn rejected_set_leaves_value_unchanged() {
        let store = StateStore::new(PURPLE);
        let bad = ColorValue {
            r: 2.0,
            g: 0.0,
            b: 0.0,
        };
        assert!(store.set(bad).await.is_err());
        assert_eq!(store.get().await, PURPLE);
    }

    #[tokio::test]
    async fn concurrent_sets_never_mix_channels() {
        let store = Arc::new(StateStore::default());
        let candidates = [ColorValue::BLACK, ColorValue::WHITE, PURPLE];

        let mut tasks = Vec::new();
        for _ in 0..16 {
            for color in candidates {
                let store = Arc::clone(&store);
                tasks.push(tokio::spawn(async move { store.set(color).await }));
            }
        }
        for task in tasks {
            assert!(matches!(task.await, Ok(Ok(_))));
        }

        let last = store.get().await;
        assert!(candidates.contains(&last));
    }
}
