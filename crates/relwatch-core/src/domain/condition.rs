//! Status conditions on the managed release.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The closed set of condition types this controller reads or writes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ConditionType {
    /// Aggregate readiness, owned by the summarizer.
    Ready,
    /// The object cannot make progress without a spec change.
    Stalled,
    /// A reconciliation is in progress.
    Reconciling,
    /// The last release action succeeded or failed.
    Released,
    /// The last test action succeeded or failed.
    TestSuccess,
    /// A remediation (rollback, uninstall) was performed.
    Remediated,
}

impl ConditionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConditionType::Ready => "Ready",
            ConditionType::Stalled => "Stalled",
            ConditionType::Reconciling => "Reconciling",
            ConditionType::Released => "Released",
            ConditionType::TestSuccess => "TestSuccess",
            ConditionType::Remediated => "Remediated",
        }
    }
}

impl std::fmt::Display for ConditionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ConditionStatus {
    True,
    False,
    #[default]
    Unknown,
}

impl ConditionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConditionStatus::True => "True",
            ConditionStatus::False => "False",
            ConditionStatus::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for ConditionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single generation-stamped status signal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Condition {
    #[serde(rename = "type")]
    pub condition_type: ConditionType,
    pub status: ConditionStatus,
    pub reason: String,
    pub message: String,
    /// Generation of the object when this condition was computed.
    pub observed_generation: i64,
    pub last_transition_time: DateTime<Utc>,
}

impl Condition {
    pub fn new(
        condition_type: ConditionType,
        status: ConditionStatus,
        reason: impl Into<String>,
        message: impl Into<String>,
        observed_generation: i64,
    ) -> Self {
        Self {
            condition_type,
            status,
            reason: reason.into(),
            message: message.into(),
            observed_generation,
            last_transition_time: Utc::now(),
        }
    }

    pub fn is_true(&self) -> bool {
        self.status == ConditionStatus::True
    }

    /// Same type, status, generation, reason and message.
    fn has_same_state(&self, other: &Condition) -> bool {
        self.condition_type == other.condition_type
            && self.status == other.status
            && self.observed_generation == other.observed_generation
            && self.reason == other.reason
            && self.message == other.message
    }
}

/// The conditions of an object, at most one per [`ConditionType`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Conditions(Vec<Condition>);

impl Conditions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, condition_type: ConditionType) -> Option<&Condition> {
        self.0.iter().find(|c| c.condition_type == condition_type)
    }

    pub fn is_true(&self, condition_type: ConditionType) -> bool {
        self.get(condition_type).is_some_and(Condition::is_true)
    }

    /// Set a condition, replacing any existing one of the same type.
    ///
    /// An unchanged condition keeps its original `last_transition_time`.
    /// Conditions are kept with `Ready` first, the rest ordered by type name.
    pub fn set(&mut self, condition: Condition) {
        match self
            .0
            .iter_mut()
            .find(|c| c.condition_type == condition.condition_type)
        {
            Some(existing) if existing.has_same_state(&condition) => {}
            Some(existing) => *existing = condition,
            None => self.0.push(condition),
        }
        self.canonicalize();
    }

    fn canonicalize(&mut self) {
        self.0.sort_by(|a, b| {
            let a_ready = a.condition_type == ConditionType::Ready;
            let b_ready = b.condition_type == ConditionType::Ready;
            b_ready
                .cmp(&a_ready)
                .then_with(|| a.condition_type.as_str().cmp(b.condition_type.as_str()))
        });
    }

    /// Remove the condition of the given type. Returns whether one was removed.
    pub fn delete(&mut self, condition_type: ConditionType) -> bool {
        let before = self.0.len();
        self.0.retain(|c| c.condition_type != condition_type);
        self.0.len() != before
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn first(&self) -> Option<&Condition> {
        self.0.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Condition> {
        self.0.iter()
    }

    /// Stable insertion sort driven by a strict "less" predicate.
    ///
    /// `less` is not required to be a total order, which `slice::sort_by`
    /// would demand.
    pub fn sort_stable_by_less<F>(&mut self, mut less: F)
    where
        F: FnMut(&Condition, &Condition) -> bool,
    {
        for i in 1..self.0.len() {
            let mut j = i;
            while j > 0 && less(&self.0[j], &self.0[j - 1]) {
                self.0.swap(j, j - 1);
                j -= 1;
            }
        }
    }
}

impl From<Vec<Condition>> for Conditions {
    fn from(conditions: Vec<Condition>) -> Self {
        let mut conditions = Self(conditions);
        conditions.canonicalize();
        conditions
    }
}

impl<'a> IntoIterator for &'a Conditions {
    type Item = &'a Condition;
    type IntoIter = std::slice::Iter<'a, Condition>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
