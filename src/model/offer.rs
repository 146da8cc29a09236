use serde::{Deserialize, Serialize};

/// The product a batch of leads is scored against.
///
/// Stored once per scoring session and shared read-only (usually as
/// `Arc<Offer>`) by the rule evaluator and the prompt builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offer {
    pub name: String,
    #[serde(default)]
    pub value_props: Vec<String>,
    #[serde(default)]
    pub ideal_use_cases: Vec<String>,
}

impl Offer {
    /// Builds an offer, trimming list entries and dropping blank ones.
    pub fn new<V, U>(name: impl Into<String>, value_props: V, ideal_use_cases: U) -> Self
    where
        V: IntoIterator,
        V::Item: Into<String>,
        U: IntoIterator,
        U::Item: Into<String>,
    {
        Self {
            name: name.into().trim().to_string(),
            value_props: clean_list(value_props),
            ideal_use_cases: clean_list(ideal_use_cases),
        }
    }

    /// Re-applies the trimming rules of [`Offer::new`] to a deserialized offer.
    pub fn normalized(self) -> Self {
        Self::new(self.name, self.value_props, self.ideal_use_cases)
    }
}

fn clean_list<I>(items: I) -> Vec<String>
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    items
        .into_iter()
        .map(|item| item.into().trim().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}
