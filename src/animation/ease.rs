/// Easing curves used to map normalized scroll progress.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ease {
    /// Constant scroll speed.
    Linear,
    /// Cosine ease-in/out: `0.5 * (1 - cos(t * pi))`.
    #[default]
    #[serde(alias = "cosine_ease_in_out", alias = "in_out_sine")]
    Cosine,
}

impl Ease {
    /// Apply this easing function to normalized progress `t`, clamped to `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::Cosine => 0.5 * (1.0 - (t * std::f64::consts::PI).cos()),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
