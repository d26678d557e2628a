use std::collections::BTreeMap;
use std::fmt;

/// A conjunction of `variable is label` propositions, used both as a
/// rule's antecedent and as its consequent. Each variable appears at most
/// once.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Clause(pub(crate) BTreeMap<String, String>);

/// `is("temp", "COLD")` reads as "temp is COLD".
pub fn is(variable: impl Into<String>, label: impl Into<String>) -> Clause {
    Clause::new().and_is(variable, label)
}

impl Clause {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn and(mut self, rhs: Clause) -> Self {
        self.0.extend(rhs.0);
        self
    }

    pub fn and_is(mut self, variable: impl Into<String>, label: impl Into<String>) -> Self {
        self.0.insert(variable.into(), label.into());
        self
    }

    pub fn label(&self, variable: &str) -> Option<&str> {
        self.0.get(variable).map(String::as_str)
    }

    pub fn propositions(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(var, label)| (var.as_str(), label.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<V: Into<String>, L: Into<String>> FromIterator<(V, L)> for Clause {
    fn from_iter<It: IntoIterator<Item = (V, L)>>(iter: It) -> Self {
        Self(iter.into_iter().map(|(v, l)| (v.into(), l.into())).collect())
    }
}

impl<V: Into<String>, L: Into<String>, const N: usize> From<[(V, L); N]> for Clause {
    fn from(props: [(V, L); N]) -> Self {
        props.into_iter().collect()
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (var, label)) in self.propositions().enumerate() {
            if i > 0 {
                f.write_str(" AND ")?;
            }

            write!(f, "{var} is {label}")?;
        }

        Ok(())
    }
}

#[test]
fn test_clause_builders_agree() {
    let built = is("temp", "HOT").and(is("humidity", "HIGH"));
    let from_array = Clause::from([("humidity", "HIGH"), ("temp", "HOT")]);

    assert_eq!(built, from_array);
    assert_eq!(built.label("temp"), Some("HOT"));
    assert_eq!(built.to_string(), "humidity is HIGH AND temp is HOT");
}

#[test]
fn test_clause_later_proposition_wins() {
    let clause = is("temp", "HOT").and_is("temp", "WARM");

    assert_eq!(clause.len(), 1);
    assert_eq!(clause.label("temp"), Some("WARM"));
}
