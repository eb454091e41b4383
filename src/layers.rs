use rand::Rng;
use std::collections::VecDeque;

/// Most layers kept on screen at once; pushing past this evicts the oldest.
pub const MAX_LAYERS: usize = 20;
/// Scale and opacity lost per depth rank (rank 0 is the newest layer).
pub const DEPTH_FALLOFF: f64 = 0.05;
/// Scale a layer spawns at before settling to 1.
pub const SPAWN_SCALE: f64 = 5.0;
/// Opacity a layer spawns at before fading in.
pub const SPAWN_OPACITY: f64 = 0.0;
/// Band (percent of the viewport, both axes) a layer's label lands in.
pub const POSITION_MIN: f64 = 20.0;
pub const POSITION_MAX: f64 = 70.0;

/// One rendered entry: a scored action and where its label sits.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub label: String,
    pub points: i64,
    pub top: f64,
    pub left: f64,
}

impl Layer {
    pub fn new(label: impl Into<String>, points: i64) -> Self {
        let mut rng = rand::rng();
        let top = rng.random_range(POSITION_MIN..POSITION_MAX);
        let left = rng.random_range(POSITION_MIN..POSITION_MAX);
        Self::with_position(label, points, top, left)
    }

    pub fn with_position(label: impl Into<String>, points: i64, top: f64, left: f64) -> Self {
        Self {
            label: label.into(),
            points,
            top,
            left,
        }
    }
}

/// Scale and opacity a layer renders at for its depth rank.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepthStyle {
    pub scale: f64,
    pub opacity: f64,
}

pub fn depth_style(rank: usize) -> DepthStyle {
    let fade = 1.0 - rank as f64 * DEPTH_FALLOFF;
    DepthStyle {
        scale: fade,
        opacity: fade,
    }
}

/// Fixed-capacity display stack, newest first. Pure model of what the page
/// renders; the browser side applies the same policy with the same constants.
#[derive(Debug, Default)]
pub struct LayerStack {
    layers: VecDeque<Layer>,
}

impl LayerStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert at rank 0. Returns the evicted oldest layer once the stack is
    /// past capacity.
    pub fn push(&mut self, layer: Layer) -> Option<Layer> {
        self.layers.push_front(layer);
        if self.layers.len() > MAX_LAYERS {
            self.layers.pop_back()
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Layers newest-first, each with its depth falloff applied.
    pub fn iter(&self) -> impl Iterator<Item = (&Layer, DepthStyle)> {
        self.layers
            .iter()
            .enumerate()
            .map(|(rank, layer)| (layer, depth_style(rank)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stack_never_exceeds_capacity() {
        let mut stack = LayerStack::new();
        for i in 0..50 {
            stack.push(Layer::new(format!("deed {i}"), i));
            assert!(stack.len() <= MAX_LAYERS);
        }
        assert_eq!(stack.len(), MAX_LAYERS);
    }

    #[test]
    fn push_evicts_the_oldest_entry() {
        let mut stack = LayerStack::new();
        for i in 0..MAX_LAYERS {
            assert!(stack.push(Layer::new(format!("deed {i}"), 0)).is_none());
        }
        let evicted = stack.push(Layer::new("one too many", 0)).unwrap();
        assert_eq!(evicted.label, "deed 0");
        let evicted = stack.push(Layer::new("and another", 0)).unwrap();
        assert_eq!(evicted.label, "deed 1");
    }

    #[test]
    fn newest_layer_sits_at_rank_zero() {
        let mut stack = LayerStack::new();
        stack.push(Layer::new("first", 1));
        stack.push(Layer::new("second", 2));
        let labels: Vec<_> = stack.iter().map(|(layer, _)| layer.label.as_str()).collect();
        assert_eq!(labels, ["second", "first"]);
    }

    #[test]
    fn depth_falloff_fades_by_rank() {
        assert_eq!(depth_style(0), DepthStyle { scale: 1.0, opacity: 1.0 });
        assert_eq!(depth_style(1), DepthStyle { scale: 0.95, opacity: 0.95 });
        let deepest = depth_style(MAX_LAYERS - 1);
        assert!((deepest.scale - 0.05).abs() < 1e-9);
        assert!((deepest.opacity - 0.05).abs() < 1e-9);
    }

    #[test]
    fn spawn_positions_stay_inside_the_band() {
        for _ in 0..200 {
            let layer = Layer::new("deed", 0);
            assert!(layer.top >= POSITION_MIN && layer.top < POSITION_MAX);
            assert!(layer.left >= POSITION_MIN && layer.left < POSITION_MAX);
        }
    }
}
