//! LifeOS Line Classifier
//!
//! Turns journal lines into typed candidate records.
//!
//! The classifier is a fixed registry of detectors, one per category. Each
//! detector is a case-insensitive pattern plus, for work hours, a quantity
//! rule that must also extract a number. Detection is non-exclusive: every
//! matching detector yields its own candidate. Classification is pure and
//! never touches the store.
//!
//! # Examples
//!
//! ```
//! use chrono::NaiveDate;
//! use lifeos_classifier::{Classifier, ClassifierConfig};
//! use lifeos_domain::Category;
//!
//! let classifier = Classifier::new(&ClassifierConfig::default()).unwrap();
//! let date = NaiveDate::from_ymd_opt(2026, 2, 14).unwrap();
//!
//! let records = classifier.classify_line("Walked Bailey, then shipped the release", date);
//! let categories: Vec<Category> = records.iter().map(|r| r.category()).collect();
//! assert_eq!(categories, vec![Category::Walk, Category::Win]);
//! ```

#![warn(missing_docs)]

mod classifier;
mod config;
mod error;
mod registry;

pub use classifier::{Candidate, Classifier};
pub use config::ClassifierConfig;
pub use error::ClassifierError;
pub use registry::{Detection, Detector, DetectorRegistry, QuantityRule};
