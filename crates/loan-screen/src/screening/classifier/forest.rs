use serde::{Deserialize, Serialize};

use super::{ensure_width, Classifier, ClassifierError};
use crate::screening::rules::Outcome;
use crate::screening::store::ArtifactLoadError;

/// Node of a fitted decision tree. Children are stored after their parent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TreeNode {
    /// Go to `left` when `x[feature] <= threshold`, otherwise `right`.
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    /// Class weights `[reject, approve]`.
    Leaf { value: [f64; 2] },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    nodes: Vec<TreeNode>,
}

impl DecisionTree {
    pub fn new(nodes: Vec<TreeNode>) -> Self {
        Self { nodes }
    }

    fn validate(&self, n_features: usize) -> Result<(), String> {
        if self.nodes.is_empty() {
            return Err("tree has no nodes".to_string());
        }

        for (index, node) in self.nodes.iter().enumerate() {
            match node {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if *feature >= n_features {
                        return Err(format!(
                            "node {index} splits on feature {feature} of {n_features}"
                        ));
                    }
                    if !threshold.is_finite() {
                        return Err(format!("node {index} has a non-finite threshold"));
                    }
                    for child in [left, right] {
                        if *child <= index || *child >= self.nodes.len() {
                            return Err(format!("node {index} points at invalid child {child}"));
                        }
                    }
                }
                TreeNode::Leaf { value } => {
                    let total = value[0] + value[1];
                    if value.iter().any(|weight| !weight.is_finite() || *weight < 0.0)
                        || total <= 0.0
                    {
                        return Err(format!("leaf {index} has invalid class weights"));
                    }
                }
            }
        }

        Ok(())
    }

    /// Class probabilities `[reject, approve]` of the leaf `input` lands in.
    fn leaf_probabilities(&self, input: &[f64]) -> [f64; 2] {
        let mut index = 0;
        loop {
            match &self.nodes[index] {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    index = if input[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
                TreeNode::Leaf { value } => {
                    let total = value[0] + value[1];
                    return [value[0] / total, value[1] / total];
                }
            }
        }
    }
}

/// Ensemble of trees whose leaf probabilities are averaged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ForestArtifact")]
pub struct RandomForest {
    n_features: usize,
    trees: Vec<DecisionTree>,
}

#[derive(Deserialize)]
struct ForestArtifact {
    n_features: usize,
    trees: Vec<DecisionTree>,
}

impl TryFrom<ForestArtifact> for RandomForest {
    type Error = ArtifactLoadError;

    fn try_from(artifact: ForestArtifact) -> Result<Self, Self::Error> {
        Self::new(artifact.n_features, artifact.trees)
    }
}

impl RandomForest {
    pub fn new(n_features: usize, trees: Vec<DecisionTree>) -> Result<Self, ArtifactLoadError> {
        if n_features == 0 {
            return Err(ArtifactLoadError::invalid("random forest", "no features"));
        }
        if trees.is_empty() {
            return Err(ArtifactLoadError::invalid("random forest", "no trees"));
        }
        for (index, tree) in trees.iter().enumerate() {
            tree.validate(n_features).map_err(|reason| {
                ArtifactLoadError::invalid("random forest", format!("tree {index}: {reason}"))
            })?;
        }

        Ok(Self { n_features, trees })
    }

    /// Mean class probabilities `[reject, approve]` across the ensemble.
    pub fn predict_proba(&self, input: &[f64]) -> Result<[f64; 2], ClassifierError> {
        ensure_width(self.n_features, input)?;
        let mut sum = [0.0; 2];
        for tree in &self.trees {
            let proba = tree.leaf_probabilities(input);
            sum[0] += proba[0];
            sum[1] += proba[1];
        }
        let count = self.trees.len() as f64;
        Ok([sum[0] / count, sum[1] / count])
    }
}

impl Classifier for RandomForest {
    fn input_width(&self) -> usize {
        self.n_features
    }

    fn predict(&self, input: &[f64]) -> Result<Outcome, ClassifierError> {
        let [reject, approve] = self.predict_proba(input)?;
        // Ties go to the first class.
        Ok(if approve > reject {
            Outcome::Approved
        } else {
            Outcome::Rejected
        })
    }
}
