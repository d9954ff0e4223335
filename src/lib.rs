//! Randomized optimization of the weights of a fixed-topology feed-forward network.
//!
//! The weights of a [`network::Network`] are treated as a point in a search space and scored by
//! a [`problem::NetworkProblem`]. Search strategies implement [`search::SearchAlgorithm`] and are
//! compared by a [`harness::ExperimentRun`] using the same topology, error measure, train/test
//! split and iteration budget.

#![deny(unsafe_code, rust_2018_idioms, rust_2021_compatibility)]
#![warn(missing_docs)]

/// Implements the common accessors of a newtype wrapping `Vec<f64>`.
macro_rules! vector_newtype {
    ($name:ident) => {
        impl $name {
            /// Get the number of components.
            pub fn len(&self) -> usize {
                self.0.len()
            }

            /// Check if there are no components.
            #[must_use]
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }

            /// Borrow the components.
            pub fn as_slice(&self) -> &[f64] {
                &self.0
            }

            /// Take ownership of the components.
            pub fn into_inner(self) -> Vec<f64> {
                self.0
            }
        }

        impl From<Vec<f64>> for $name {
            fn from(values: Vec<f64>) -> Self {
                Self(values)
            }
        }

        impl From<&[f64]> for $name {
            fn from(values: &[f64]) -> Self {
                Self(values.to_vec())
            }
        }

        impl AsRef<[f64]> for $name {
            fn as_ref(&self) -> &[f64] {
                &self.0
            }
        }
    };
}

pub mod config;
pub mod dataset;
pub mod error;
pub mod harness;
pub mod measure;
pub mod network;
pub mod problem;
pub mod report;
pub mod search;

pub use error::{DataLoadError, Error, Result};
