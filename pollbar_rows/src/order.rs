// Copyright 2025 the Pollbar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Category ordering for categorical axes.
//!
//! Survey answers often have a natural order ("Never" < "Sometimes" < "Always")
//! that the data-fetch layer does not preserve. The order is resolved in three
//! tiers, first match wins:
//!
//! 1. an explicit, configured category list ([`ExplicitOrder`]),
//! 2. a named ordinal template that matches every category exactly
//!    ([`OrdinalTemplate`]),
//! 3. a keyword classifier over the same templates ([`KeywordHeuristic`]).
//!
//! If none applies the input order is kept. The heuristic is isolated behind
//! [`CategoryOrdering`] so it can be swapped without touching placement code.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use hashbrown::HashMap;

/// A strategy assigning sort ranks to category labels.
pub trait CategoryOrdering {
    /// Returns the rank of `category`, or `None` if this ordering does not know it.
    fn rank(&self, category: &str) -> Option<usize>;
}

/// Errors returned when building an [`ExplicitOrder`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OrderError {
    /// The configured list is empty.
    #[error("explicit category order is empty")]
    Empty,
    /// A category appears twice (compared case-insensitively).
    #[error("category `{0}` appears more than once in the explicit order")]
    DuplicateCategory(String),
}

/// A configured category list; ranks follow list position.
#[derive(Clone, Debug)]
pub struct ExplicitOrder {
    ranks: HashMap<String, usize>,
}

impl ExplicitOrder {
    /// Builds an order from a list of category labels.
    pub fn new<I, S>(categories: I) -> Result<Self, OrderError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut ranks = HashMap::new();
        for (i, c) in categories.into_iter().enumerate() {
            let key = normalize(c.as_ref());
            if ranks.insert(key, i).is_some() {
                tracing::debug!(category = c.as_ref(), "duplicate category in explicit order");
                return Err(OrderError::DuplicateCategory(c.as_ref().to_string()));
            }
        }
        if ranks.is_empty() {
            return Err(OrderError::Empty);
        }
        Ok(Self { ranks })
    }

    /// Number of configured categories.
    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    /// Always `false`; empty orders are rejected by [`ExplicitOrder::new`].
    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }
}

impl CategoryOrdering for ExplicitOrder {
    fn rank(&self, category: &str) -> Option<usize> {
        self.ranks.get(&normalize(category)).copied()
    }
}

/// Named ordinal answer scales.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OrdinalTemplate {
    /// Never .. Always.
    Frequency,
    /// Strongly disagree .. Strongly agree.
    Agreement,
    /// Very easy .. Very difficult.
    Difficulty,
    /// Very dissatisfied .. Very satisfied.
    Satisfaction,
    /// Not at all important .. Extremely important.
    Importance,
    /// Very unlikely .. Very likely.
    Likelihood,
}

impl OrdinalTemplate {
    /// Every template, in the order they are tried.
    pub const ALL: [Self; 6] = [
        Self::Frequency,
        Self::Agreement,
        Self::Difficulty,
        Self::Satisfaction,
        Self::Importance,
        Self::Likelihood,
    ];

    /// The template's answers, lowest first.
    pub fn entries(self) -> &'static [&'static str] {
        match self {
            Self::Frequency => &["Never", "Rarely", "Sometimes", "Often", "Very often", "Always"],
            Self::Agreement => &[
                "Strongly disagree",
                "Disagree",
                "Neutral",
                "Agree",
                "Strongly agree",
            ],
            Self::Difficulty => &["Very easy", "Easy", "Neutral", "Difficult", "Very difficult"],
            Self::Satisfaction => &[
                "Very dissatisfied",
                "Dissatisfied",
                "Neutral",
                "Satisfied",
                "Very satisfied",
            ],
            Self::Importance => &[
                "Not at all important",
                "Slightly important",
                "Moderately important",
                "Very important",
                "Extremely important",
            ],
            Self::Likelihood => &["Very unlikely", "Unlikely", "Neutral", "Likely", "Very likely"],
        }
    }

    /// Keyword fragments and their ranks, longest phrases first.
    fn keywords(self) -> &'static [(&'static str, usize)] {
        match self {
            Self::Frequency => &[
                ("very often", 4),
                ("never", 0),
                ("rarely", 1),
                ("seldom", 1),
                ("sometimes", 2),
                ("occasionally", 2),
                ("often", 3),
                ("frequently", 3),
                ("always", 5),
            ],
            Self::Agreement => &[
                ("strongly disagree", 0),
                ("strongly agree", 4),
                ("disagree", 1),
                ("neither", 2),
                ("neutral", 2),
                ("agree", 3),
            ],
            Self::Difficulty => &[
                ("very easy", 0),
                ("very difficult", 4),
                ("very hard", 4),
                ("easy", 1),
                ("neutral", 2),
                ("difficult", 3),
                ("hard", 3),
            ],
            Self::Satisfaction => &[
                ("very dissatisfied", 0),
                ("very satisfied", 4),
                ("dissatisfied", 1),
                ("unsatisfied", 1),
                ("neutral", 2),
                ("satisfied", 3),
            ],
            Self::Importance => &[
                ("not at all", 0),
                ("not important", 0),
                ("slightly", 1),
                ("moderately", 2),
                ("very", 3),
                ("extremely", 4),
            ],
            Self::Likelihood => &[
                ("very unlikely", 0),
                ("very likely", 4),
                ("unlikely", 1),
                ("neutral", 2),
                ("likely", 3),
            ],
        }
    }

    /// Whether every category is one of this template's answers.
    pub fn matches_all(self, categories: &[&str]) -> bool {
        !categories.is_empty() && categories.iter().all(|c| self.rank(c).is_some())
    }
}

impl CategoryOrdering for OrdinalTemplate {
    fn rank(&self, category: &str) -> Option<usize> {
        let category = category.trim();
        self.entries()
            .iter()
            .position(|e| e.eq_ignore_ascii_case(category))
    }
}

/// Keyword-based fallback classifier over the [`OrdinalTemplate`] scales.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeywordHeuristic {
    template: OrdinalTemplate,
}

impl KeywordHeuristic {
    /// Uses the keywords of `template`.
    pub fn new(template: OrdinalTemplate) -> Self {
        Self { template }
    }

    /// The template whose keywords this heuristic matches.
    pub fn template(&self) -> OrdinalTemplate {
        self.template
    }

    /// Picks the template whose keywords hit the most categories.
    ///
    /// At least half of the categories must hit; ties go to the earlier template.
    pub fn detect(categories: &[&str]) -> Option<Self> {
        let mut best: Option<(usize, OrdinalTemplate)> = None;
        for template in OrdinalTemplate::ALL {
            let h = Self::new(template);
            let hits = categories.iter().filter(|c| h.rank(c).is_some()).count();
            if hits > 0 && best.is_none_or(|(b, _)| hits > b) {
                best = Some((hits, template));
            }
        }
        let (hits, template) = best?;
        (hits * 2 >= categories.len()).then(|| Self::new(template))
    }
}

impl CategoryOrdering for KeywordHeuristic {
    fn rank(&self, category: &str) -> Option<usize> {
        let category = normalize(category);
        self.template
            .keywords()
            .iter()
            .find(|(kw, _)| category.contains(kw))
            .map(|(_, rank)| *rank)
    }
}

/// Which tier supplied an order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OrderSource {
    /// The configured explicit list.
    Explicit,
    /// A template that matched every category.
    Template(OrdinalTemplate),
    /// The keyword classifier.
    Heuristic(OrdinalTemplate),
    /// No ordering applied; input order kept.
    Input,
}

/// Resolves and applies category ordering.
#[derive(Clone, Debug)]
pub struct OrderResolver {
    explicit: Option<ExplicitOrder>,
    heuristic: bool,
}

impl Default for OrderResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderResolver {
    /// A resolver with templates and the keyword heuristic enabled.
    pub fn new() -> Self {
        Self {
            explicit: None,
            heuristic: true,
        }
    }

    /// Sets a configured order, which takes precedence over everything else.
    #[must_use]
    pub fn with_explicit(mut self, order: ExplicitOrder) -> Self {
        self.explicit = Some(order);
        self
    }

    /// Disables the keyword heuristic.
    #[must_use]
    pub fn without_heuristic(mut self) -> Self {
        self.heuristic = false;
        self
    }

    /// Determines which tier applies to `categories`.
    pub fn resolve(&self, categories: &[&str]) -> OrderSource {
        if self.explicit.is_some() {
            return OrderSource::Explicit;
        }
        if let Some(t) = OrdinalTemplate::ALL
            .into_iter()
            .find(|t| t.matches_all(categories))
        {
            return OrderSource::Template(t);
        }
        if self.heuristic
            && let Some(h) = KeywordHeuristic::detect(categories)
        {
            return OrderSource::Heuristic(h.template());
        }
        OrderSource::Input
    }

    /// Sorts `items` in place by category rank.
    ///
    /// The sort is stable; categories the chosen ordering does not rank keep their
    /// relative input order after all ranked ones.
    pub fn sort<T>(&self, items: &mut Vec<T>, category: impl Fn(&T) -> &str) -> OrderSource {
        let labels: Vec<&str> = items.iter().map(&category).collect();
        let source = self.resolve(&labels);

        let heuristic;
        let ordering: &dyn CategoryOrdering = match (&source, &self.explicit) {
            (OrderSource::Explicit, Some(explicit)) => explicit,
            (OrderSource::Template(t), _) => t,
            (OrderSource::Heuristic(t), _) => {
                heuristic = KeywordHeuristic::new(*t);
                &heuristic
            }
            _ => return OrderSource::Input,
        };

        let mut keyed: Vec<(Option<usize>, T)> = items
            .drain(..)
            .map(|item| (ordering.rank(category(&item)), item))
            .collect();
        keyed.sort_by_key(|(rank, _)| (rank.is_none(), *rank));
        items.extend(keyed.into_iter().map(|(_, item)| item));
        source
    }
}

fn normalize(category: &str) -> String {
    category.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    fn sorted(
        resolver: &OrderResolver,
        input: &[&'static str],
    ) -> (Vec<&'static str>, OrderSource) {
        let mut items = input.to_vec();
        let source = resolver.sort(&mut items, |s| *s);
        (items, source)
    }

    #[test]
    fn explicit_order_wins_and_unknowns_trail() {
        let order = ExplicitOrder::new(["Gamma", "alpha"]).unwrap();
        let resolver = OrderResolver::new().with_explicit(order);
        let (items, source) = sorted(&resolver, &["Alpha", "Zeta", "gamma", "Beta"]);
        assert_eq!(source, OrderSource::Explicit);
        assert_eq!(items, vec!["gamma", "Alpha", "Zeta", "Beta"]);
    }

    #[test]
    fn explicit_order_rejects_duplicates_and_empty() {
        assert_eq!(
            ExplicitOrder::new(["Yes", "yes "]).unwrap_err(),
            OrderError::DuplicateCategory("yes ".into())
        );
        assert_eq!(
            ExplicitOrder::new(Vec::<&str>::new()).unwrap_err(),
            OrderError::Empty
        );
    }

    #[test]
    fn exact_template_match_orders_scale() {
        let (items, source) = sorted(
            &OrderResolver::new(),
            &["Agree", "strongly disagree", "Neutral", "Strongly agree", "Disagree"],
        );
        assert_eq!(source, OrderSource::Template(OrdinalTemplate::Agreement));
        assert_eq!(
            items,
            vec!["strongly disagree", "Disagree", "Neutral", "Agree", "Strongly agree"]
        );
    }

    #[test]
    fn heuristic_orders_paraphrased_scale() {
        let (items, source) = sorted(
            &OrderResolver::new(),
            &["Almost always", "Once in a while", "Never used it", "Rarely"],
        );
        assert_eq!(source, OrderSource::Heuristic(OrdinalTemplate::Frequency));
        assert_eq!(
            items,
            vec!["Never used it", "Rarely", "Almost always", "Once in a while"]
        );
    }

    #[test]
    fn unrelated_labels_keep_input_order() {
        let resolver = OrderResolver::new();
        let (items, source) = sorted(&resolver, &["Discord", "Forum", "Reddit"]);
        assert_eq!(source, OrderSource::Input);
        assert_eq!(items, vec!["Discord", "Forum", "Reddit"]);

        let (_, source) = sorted(
            &resolver.clone().without_heuristic(),
            &["Almost always", "Never used it"],
        );
        assert_eq!(source, OrderSource::Input);
    }
}
