//! Detector registry - one data-driven rule per category

use crate::{ClassifierConfig, ClassifierError};
use lifeos_domain::Category;
use regex::{Regex, RegexBuilder};

const MEAL_PATTERN: &str =
    r"(?:ate|eat|eating|had|lunch|dinner|breakfast|meal).*(?:food|at|burger|pizza|salad|restaurant)";
const WIN_PATTERN: &str = r"(?:✅|win|success|accomplished|completed|finished|shipped|deployed)";
const CHALLENGE_PATTERN: &str = r"(?:⛔|❌|stuck|blocked|issue|problem|error|challenge|bug|failed)";
const MOOD_PATTERN: &str =
    r"(?:mood|feeling|felt).*(?:great|good|okay|bad|terrible|amazing|stressed|happy|sad|anxious)";
const WORK_HOURS_PATTERN: &str =
    r"(?:worked|working|coding|building|developing|shipped).*(?:[0-9]+\s*(?:hours?|hrs?))";
const HOURS_QUANTITY: &str = r"([0-9]+)\s*(?:hours?|hrs?)";

fn compile(category: Category, pattern: &str) -> Result<Regex, ClassifierError> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|source| ClassifierError::Pattern {
            category: category.to_string(),
            source,
        })
}

/// Extracts a number from a line; the first capture group of the first match wins
#[derive(Debug, Clone)]
pub struct QuantityRule {
    pattern: Regex,
}

impl QuantityRule {
    /// Build a rule; `pattern` must have a capture group around the number
    pub fn new(category: Category, pattern: &str) -> Result<Self, ClassifierError> {
        Ok(Self {
            pattern: compile(category, pattern)?,
        })
    }

    /// The hour count preceding an hour unit (`hours`, `hour`, `hrs`, `hr`)
    pub fn hours() -> Result<Self, ClassifierError> {
        Self::new(Category::WorkHours, HOURS_QUANTITY)
    }

    /// Extract the quantity from `line`
    pub fn extract(&self, line: &str) -> Option<f64> {
        self.pattern
            .captures(line)?
            .get(1)?
            .as_str()
            .parse::<f64>()
            .ok()
    }
}

/// A single category detector
#[derive(Debug, Clone)]
pub struct Detector {
    category: Category,
    pattern: Regex,
    quantity: Option<QuantityRule>,
}

/// Outcome of a detector that fired on a line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Detection {
    /// Category detected
    pub category: Category,
    /// Extracted quantity, when the detector has a quantity rule
    pub quantity: Option<f64>,
}

impl Detector {
    /// Detector matching `pattern` case-insensitively
    pub fn new(category: Category, pattern: &str) -> Result<Self, ClassifierError> {
        Ok(Self {
            category,
            pattern: compile(category, pattern)?,
            quantity: None,
        })
    }

    /// Require a quantity to be extracted as well (joint condition)
    pub fn with_quantity(mut self, rule: QuantityRule) -> Self {
        self.quantity = Some(rule);
        self
    }

    /// Category this detector produces
    pub fn category(&self) -> Category {
        self.category
    }

    /// Evaluate the detector against one line
    ///
    /// With a quantity rule, the pattern and the extraction must both succeed.
    pub fn detect(&self, line: &str) -> Option<Detection> {
        if !self.pattern.is_match(line) {
            return None;
        }
        let quantity = match &self.quantity {
            Some(rule) => Some(rule.extract(line)?),
            None => None,
        };
        Some(Detection {
            category: self.category,
            quantity,
        })
    }
}

/// Ordered set of detectors
#[derive(Debug, Clone, Default)]
pub struct DetectorRegistry {
    detectors: Vec<Detector>,
}

impl DetectorRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard LifeOS vocabulary
    pub fn standard(config: &ClassifierConfig) -> Result<Self, ClassifierError> {
        config.validate()?;
        let companion = regex::escape(config.walk_companion.trim());
        let walk = format!(
            r"(?:walked?|walk)\s+{c}|{c}.*(?:walk|walked)",
            c = companion
        );

        let mut registry = Self::new();
        registry.register(Detector::new(Category::Walk, &walk)?);
        registry.register(Detector::new(Category::Meal, MEAL_PATTERN)?);
        registry.register(Detector::new(Category::Win, WIN_PATTERN)?);
        registry.register(Detector::new(Category::Challenge, CHALLENGE_PATTERN)?);
        registry.register(Detector::new(Category::Mood, MOOD_PATTERN)?);
        registry.register(
            Detector::new(Category::WorkHours, WORK_HOURS_PATTERN)?.with_quantity(QuantityRule::hours()?),
        );
        Ok(registry)
    }

    /// Append a detector; evaluation follows registration order
    pub fn register(&mut self, detector: Detector) {
        self.detectors.push(detector);
    }

    /// Registered detectors in evaluation order
    pub fn detectors(&self) -> &[Detector] {
        &self.detectors
    }

    /// Every detection on `line`
    pub fn detect_all(&self, line: &str) -> Vec<Detection> {
        self.detectors.iter().filter_map(|d| d.detect(line)).collect()
    }
}
