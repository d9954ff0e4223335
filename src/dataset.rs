//! Data structures and methods for dealing with datasets.

use crate::error::{DataLoadError, Error, Result};

pub mod reader;

/// The inputs of a single sample.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector(Vec<f64>);

/// The expected output of a single sample. Scalar labels have length 1.
#[derive(Debug, Clone, PartialEq)]
pub struct Label(Vec<f64>);

vector_newtype!(FeatureVector);
vector_newtype!(Label);

impl Label {
    /// Create a label holding a single value.
    pub fn scalar(value: f64) -> Self {
        Self(vec![value])
    }
}

impl From<FeatureVector> for Label {
    fn from(features: FeatureVector) -> Self {
        Self(features.0)
    }
}

/// A feature vector with its label. The label may be attached after construction.
#[derive(Debug, Clone)]
pub struct Instance {
    features: FeatureVector,
    label: Option<Label>,
}

impl Instance {
    /// Create an unlabeled instance.
    pub fn new(features: impl Into<FeatureVector>) -> Self {
        Self {
            features: features.into(),
            label: None,
        }
    }

    /// Create a labeled instance.
    pub fn labeled(features: impl Into<FeatureVector>, label: Label) -> Self {
        Self {
            features: features.into(),
            label: Some(label),
        }
    }

    /// The inputs of the instance.
    pub fn features(&self) -> &FeatureVector {
        &self.features
    }

    /// The label of the instance, if one was attached.
    pub fn label(&self) -> Option<&Label> {
        self.label.as_ref()
    }

    /// Attach a label, replacing the previous one.
    pub fn set_label(&mut self, label: Label) {
        self.label = Some(label);
    }
}

/// An ordered, non-empty sequence of instances sharing one feature length.
#[derive(Debug, Clone)]
pub struct DataSet {
    instances: Vec<Instance>,
}

impl DataSet {
    /// Create a data set, checking that it is non-empty and that every instance has the same
    /// number of features.
    pub fn new(instances: Vec<Instance>) -> Result<Self> {
        let first = instances
            .first()
            .ok_or_else(|| Error::configuration("a data set needs at least one instance"))?;
        let width = first.features.len();
        for instance in &instances {
            Error::check_dimension(width, instance.features.len())?;
        }
        Ok(Self { instances })
    }

    /// Get the number of instances.
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    /// Always false, data sets are never empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Number of features of every instance.
    pub fn feature_len(&self) -> usize {
        self.instances[0].features.len()
    }

    /// Borrow the instances in order.
    pub fn instances(&self) -> &[Instance] {
        &self.instances
    }

    /// Iterate over the instances in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Instance> {
        self.instances.iter()
    }

    /// Attach labels by position. There must be exactly one label per instance.
    pub fn attach_labels(&mut self, labels: Vec<Label>) -> Result<()> {
        if labels.len() != self.instances.len() {
            return Err(DataLoadError::LengthMismatch {
                features: self.instances.len(),
                labels: labels.len(),
            }
            .into());
        }
        for (instance, label) in self.instances.iter_mut().zip(labels) {
            instance.set_label(label);
        }
        Ok(())
    }

    /// Check that every instance carries a label and that all labels have the same length.
    /// Returns that length.
    pub fn ensure_labeled(&self) -> Result<usize> {
        let mut width = None;
        for (index, instance) in self.instances.iter().enumerate() {
            let label = instance
                .label()
                .ok_or(DataLoadError::MissingLabel { index })?;
            match width {
                None => width = Some(label.len()),
                Some(w) => Error::check_dimension(w, label.len())?,
            }
        }
        Ok(width.unwrap_or_default())
    }

    /// Replace every scalar label by `0.0` when it is below `cutoff` and `1.0` otherwise.
    pub fn binarize_labels(&mut self, cutoff: f64) {
        for instance in &mut self.instances {
            if let Some(label) = instance.label.as_mut() {
                label
                    .0
                    .iter_mut()
                    .for_each(|v| *v = if *v < cutoff { 0.0 } else { 1.0 });
            }
        }
    }
}

impl<'a> IntoIterator for &'a DataSet {
    type Item = &'a Instance;
    type IntoIter = std::slice::Iter<'a, Instance>;

    fn into_iter(self) -> Self::IntoIter {
        self.instances.iter()
    }
}
