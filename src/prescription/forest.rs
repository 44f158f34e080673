//! Random forest classifier loaded from a JSON export
//!
//! The export mirrors the per-tree arrays of a fitted scikit-learn forest
//! (`children_left`, `children_right`, `feature`, `threshold`, `value`) plus
//! the class labels. Traversal goes left when `x[feature] <= threshold`; a
//! node whose left child is `-1` is a leaf. The forest votes by averaging the
//! normalized leaf distributions of every tree.

use std::path::Path;

use anyhow::{bail, ensure, Context, Result as AnyResult};
use serde::Deserialize;

use crate::error::{DiagnosticError, Result};
use crate::prescription::PrescriptionClassifier;

/// Marker for "no child" in the exported arrays
const TREE_LEAF: i64 = -1;

#[derive(Debug, Clone, Deserialize)]
pub struct TreeExport {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    /// Per-node class counts (or fractions); one row per node
    pub value: Vec<Vec<f64>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForestExport {
    pub n_features: usize,
    pub classes: Vec<String>,
    pub trees: Vec<TreeExport>,
}

#[derive(Debug, Clone)]
enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        /// Class distribution summing to 1
        distribution: Vec<f64>,
    },
}

#[derive(Debug, Clone)]
pub struct DecisionTree {
    nodes: Vec<Node>,
}

impl DecisionTree {
    fn from_export(tree: &TreeExport, n_features: usize, n_classes: usize) -> AnyResult<Self> {
        let n = tree.children_left.len();
        ensure!(n > 0, "tree has no nodes");
        ensure!(
            tree.children_right.len() == n
                && tree.feature.len() == n
                && tree.threshold.len() == n
                && tree.value.len() == n,
            "tree arrays differ in length (expected {} nodes)",
            n
        );

        let mut nodes = Vec::with_capacity(n);
        for idx in 0..n {
            let left = tree.children_left[idx];
            let right = tree.children_right[idx];

            if left == TREE_LEAF {
                let counts = &tree.value[idx];
                ensure!(
                    counts.len() == n_classes,
                    "node {}: {} class counts for {} classes",
                    idx,
                    counts.len(),
                    n_classes
                );
                let total: f64 = counts.iter().sum();
                ensure!(total > 0.0, "node {}: leaf has an empty class distribution", idx);
                nodes.push(Node::Leaf {
                    distribution: counts.iter().map(|c| c / total).collect(),
                });
                continue;
            }

            // Children always come after their parent, which also rules out cycles
            let in_range = |c: i64| c > idx as i64 && (c as usize) < n;
            ensure!(
                in_range(left) && in_range(right),
                "node {}: child index out of range (left {}, right {})",
                idx,
                left,
                right
            );
            let feature = tree.feature[idx];
            ensure!(
                feature >= 0 && (feature as usize) < n_features,
                "node {}: feature index {} outside 0..{}",
                idx,
                feature,
                n_features
            );

            nodes.push(Node::Split {
                feature: feature as usize,
                threshold: tree.threshold[idx],
                left: left as usize,
                right: right as usize,
            });
        }

        Ok(Self { nodes })
    }

    fn leaf_distribution(&self, features: &[f64]) -> &[f64] {
        let mut idx = 0;
        loop {
            match &self.nodes[idx] {
                Node::Leaf { distribution } => return distribution,
                Node::Split { feature, threshold, left, right } => {
                    idx = if features[*feature] <= *threshold { *left } else { *right };
                }
            }
        }
    }
}

/// Pre-trained forest; immutable after loading
#[derive(Debug, Clone)]
pub struct ForestClassifier {
    n_features: usize,
    classes: Vec<String>,
    trees: Vec<DecisionTree>,
}

impl ForestClassifier {
    pub fn from_json_file(path: impl AsRef<Path>) -> AnyResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read model file: {}", path.display()))?;
        Self::from_json_str(&contents)
            .with_context(|| format!("Invalid model file: {}", path.display()))
    }

    pub fn from_json_str(json: &str) -> AnyResult<Self> {
        let export: ForestExport = serde_json::from_str(json).context("Failed to parse forest JSON")?;
        Self::from_export(&export)
    }

    pub fn from_export(export: &ForestExport) -> AnyResult<Self> {
        if export.classes.is_empty() {
            bail!("forest has no classes");
        }
        if export.trees.is_empty() {
            bail!("forest has no trees");
        }

        let trees = export
            .trees
            .iter()
            .enumerate()
            .map(|(i, t)| {
                DecisionTree::from_export(t, export.n_features, export.classes.len())
                    .with_context(|| format!("tree {}", i))
            })
            .collect::<AnyResult<Vec<_>>>()?;

        Ok(Self {
            n_features: export.n_features,
            classes: export.classes.clone(),
            trees,
        })
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Mean class distribution across trees
    pub fn predict_proba(&self, features: &[f64]) -> Option<Vec<f64>> {
        if features.len() != self.n_features {
            return None;
        }

        let mut proba = vec![0.0; self.classes.len()];
        for tree in &self.trees {
            for (acc, p) in proba.iter_mut().zip(tree.leaf_distribution(features)) {
                *acc += p;
            }
        }
        let n = self.trees.len() as f64;
        proba.iter_mut().for_each(|p| *p /= n);
        Some(proba)
    }

    /// Index of the winning class; ties go to the lowest index
    pub fn predict_class(&self, features: &[f64]) -> Option<usize> {
        let proba = self.predict_proba(features)?;
        let mut best = 0;
        for (idx, p) in proba.iter().enumerate() {
            if *p > proba[best] {
                best = idx;
            }
        }
        Some(best)
    }
}

impl PrescriptionClassifier for ForestClassifier {
    fn predict(&self, features: [f64; 2]) -> Result<String> {
        let class = self.predict_class(&features).ok_or_else(|| {
            DiagnosticError::CollaboratorFailure(format!(
                "model expects {} features, got {}",
                self.n_features,
                features.len()
            ))
        })?;
        Ok(self.classes[class].clone())
    }

    fn name(&self) -> String {
        format!("random forest ({} trees, {} classes)", self.trees.len(), self.classes.len())
    }
}
