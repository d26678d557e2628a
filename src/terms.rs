use std::collections::btree_map::{self, BTreeMap};
use std::sync::Arc;

use crate::error::{FuzzyError, Result};
use crate::membership::MembershipFunction;

pub type SharedMembership = Arc<dyn MembershipFunction>;

/// The linguistic labels of one variable, each with its membership function.
#[derive(Clone, Debug, Default)]
pub struct Terms(pub(crate) BTreeMap<String, SharedMembership>);

impl Terms {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Adds a label; labels are unique.
    pub fn insert(&mut self, label: impl Into<String>, membership: impl MembershipFunction + 'static) -> Result<()> {
        self.insert_shared(label, Arc::new(membership))
    }

    pub fn insert_shared(&mut self, label: impl Into<String>, membership: SharedMembership) -> Result<()> {
        match self.0.entry(label.into()) {
            btree_map::Entry::Occupied(entry) => Err(FuzzyError::DuplicateLabel(entry.key().clone())),
            btree_map::Entry::Vacant(entry) => {
                entry.insert(membership);
                Ok(())
            },
        }
    }

    /// Builder form of `insert`.
    pub fn with(mut self, label: impl Into<String>, membership: impl MembershipFunction + 'static) -> Result<Self> {
        self.insert(label, membership)?;

        Ok(self)
    }

    pub fn get(&self, label: &str) -> Option<&dyn MembershipFunction> {
        self.0.get(label).map(|mf| &**mf)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &dyn MembershipFunction)> {
        self.0.iter().map(|(label, mf)| (label.as_str(), &**mf))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[test]
fn test_terms_reject_duplicate_labels() {
    use crate::membership::Triangular;

    let terms = Terms::new()
        .with("cold", Triangular::new(0., 10., 25.).unwrap())
        .unwrap();
    let err = terms
        .with("cold", Triangular::new(0., 5., 10.).unwrap())
        .unwrap_err();

    assert_eq!(err, FuzzyError::DuplicateLabel("cold".into()));
}

#[test]
fn test_terms_lookup() {
    use crate::membership::Triangular;

    let terms = Terms::new()
        .with("warm", Triangular::new(20., 25., 30.).unwrap())
        .unwrap()
        .with("cold", Triangular::new(0., 10., 25.).unwrap())
        .unwrap();

    assert_eq!(terms.len(), 2);
    assert_eq!(terms.labels().collect::<Vec<_>>(), vec!["cold", "warm"]);
    assert_eq!(terms.get("warm").map(|mf| mf.evaluate(25.)), Some(1.));
    assert!(terms.get("hot").is_none());
}
