//! Dice: the weighted source of move distances.
//!
//! The traditional throw is four cowrie shells. The number of shells landing
//! open is the move distance, and no open shell scores 8. With fair shells
//! the counts follow a binomial distribution, which gives the default
//! weights `1:4, 2:6, 3:4, 4:1, 8:1`.

use rand::distributions::WeightedIndex;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::error::ConfigError;
use super::rng::GameRng;

/// Largest face value a die may carry.
pub const MAX_FACE: u8 = 12;

/// Which distribution rolls are drawn from.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DiceKind {
    /// Four cowrie shells: faces {1, 2, 3, 4, 8}, weights {4, 6, 4, 1, 1}.
    #[default]
    Cowrie,
    /// A fair die with faces `1..=faces`.
    Uniform { faces: u8 },
    /// Arbitrary faces with integer weights.
    Weighted { faces: Vec<u8>, weights: Vec<u32> },
}

impl DiceKind {
    /// The classic six-sided die.
    #[must_use]
    pub fn d6() -> Self {
        DiceKind::Uniform { faces: 6 }
    }

    fn table(&self) -> (SmallVec<[u8; 8]>, SmallVec<[u32; 8]>) {
        match self {
            DiceKind::Cowrie => (
                SmallVec::from_slice(&[1, 2, 3, 4, 8]),
                SmallVec::from_slice(&[4, 6, 4, 1, 1]),
            ),
            DiceKind::Uniform { faces } => ((1..=*faces).collect(), (1..=*faces).map(|_| 1).collect()),
            DiceKind::Weighted { faces, weights } => {
                (SmallVec::from_slice(faces), SmallVec::from_slice(weights))
            }
        }
    }
}

/// A prepared dice distribution.
#[derive(Clone, Debug)]
pub struct Dice {
    faces: SmallVec<[u8; 8]>,
    weights: SmallVec<[u32; 8]>,
    dist: WeightedIndex<u32>,
}

impl Dice {
    /// Build the distribution for `kind`.
    pub fn new(kind: &DiceKind) -> Result<Self, ConfigError> {
        let (faces, weights) = kind.table();

        if faces.is_empty() {
            return Err(ConfigError::NoFaces);
        }
        if faces.len() != weights.len() {
            return Err(ConfigError::WeightCount {
                faces: faces.len(),
                weights: weights.len(),
            });
        }
        if let Some(&bad) = faces.iter().find(|&&f| f == 0 || f > MAX_FACE) {
            return Err(ConfigError::FaceOutOfRange(bad));
        }

        weights
            .iter()
            .try_fold(0u32, |total, &w| total.checked_add(w))
            .ok_or_else(|| ConfigError::Weights("total weight overflows u32".into()))?;

        let dist = WeightedIndex::new(weights.iter().copied())
            .map_err(|e| ConfigError::Weights(e.to_string()))?;

        Ok(Self { faces, weights, dist })
    }

    /// Draw one roll.
    pub fn roll(&self, rng: &mut GameRng) -> u8 {
        self.faces[rng.sample_weighted(&self.dist)]
    }

    /// Faces that can come up, in table order.
    #[must_use]
    pub fn faces(&self) -> &[u8] {
        &self.faces
    }

    /// Faces with a non-zero chance of being rolled.
    pub fn possible_faces(&self) -> impl Iterator<Item = u8> + '_ {
        self.faces
            .iter()
            .zip(self.weights.iter())
            .filter(|&(_, &w)| w > 0)
            .map(|(&f, _)| f)
    }

    /// Largest face with a non-zero weight.
    #[must_use]
    pub fn max_face(&self) -> u8 {
        self.possible_faces().max().unwrap_or(0)
    }

    /// Probability of rolling `face`.
    #[must_use]
    pub fn probability(&self, face: u8) -> f64 {
        let total: u32 = self.weights.iter().sum();
        let hits: u32 = self
            .faces
            .iter()
            .zip(self.weights.iter())
            .filter(|&(&f, _)| f == face)
            .map(|(_, &w)| w)
            .sum();
        f64::from(hits) / f64::from(total)
    }
}
