use std::collections::BTreeSet;

/// An ordered set of attribute ids.
pub type AttributeSet = BTreeSet<String>;

/// Attribute requirements a visit puts on a shift team.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AttributeRequirements {
    /// Attributes a team must have.
    pub required: AttributeSet,
    /// Attributes a team should have.
    pub preferred: AttributeSet,
    /// Attributes a team must not have.
    pub forbidden: AttributeSet,
    /// Attributes a team should not have.
    pub unwanted: AttributeSet,
}

impl AttributeRequirements {
    /// Creates requirements with required and forbidden attributes only.
    pub fn new_strict(required: AttributeSet, forbidden: AttributeSet) -> Self {
        Self { required, forbidden, ..Self::default() }
    }
}

/// Collects string-like attribute ids into an [`AttributeSet`].
pub fn to_attribute_set<I, S>(attributes: I) -> AttributeSet
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    attributes.into_iter().map(|attribute| attribute.into()).collect()
}
