//! Display-title derivation for derived and arithmetic measures.
//!
//! Derived (PoP / previous period) measures render as their master's title
//! plus a per-kind suffix; arithmetic measures render from an
//! operator-specific template over their first two operand titles. Masters
//! may themselves be derived, so resolution runs in dependency order:
//! measures form a graph (master → dependent) resolved with Kahn's
//! algorithm. A measure whose master is missing resolves to no title (the
//! caller renders its local identifier or a placeholder); a dependency
//! cycle is reported as an explicit error naming the cycle members.

use std::collections::VecDeque;

use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::error_codes;
use crate::measure::{ArithmeticOperator, Measure, MeasureDefinition};
use crate::visualization::VisualizationObject;

#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum TitleError {
    #[error(
        "[INSIGHT_TITLE_001] cyclic measure derivation: {}. Suggestion: break the reference chain between these measures.",
        members.join(" -> ")
    )]
    CyclicDerivation { members: Vec<String> },

    #[error("[INSIGHT_TITLE_002] duplicate measure local identifier '{local_identifier}'")]
    DuplicateLocalIdentifier { local_identifier: String },
}

impl TitleError {
    pub fn code(&self) -> &'static str {
        match self {
            TitleError::CyclicDerivation { .. } => error_codes::TITLE_CYCLIC_DERIVATION,
            TitleError::DuplicateLocalIdentifier { .. } => error_codes::TITLE_DUPLICATE_LOCAL_ID,
        }
    }
}

/// Suffixes appended to the master title, per derivation kind.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedTitleSuffixes {
    pub pop: String,
    pub previous_period: String,
}

impl Default for DerivedTitleSuffixes {
    fn default() -> Self {
        DerivedTitleSuffixes {
            pop: " - SP year ago".to_string(),
            previous_period: " - period ago".to_string(),
        }
    }
}

impl DerivedTitleSuffixes {
    /// The same suffix for both derivation kinds.
    pub fn uniform(suffix: &str) -> DerivedTitleSuffixes {
        DerivedTitleSuffixes {
            pop: suffix.to_string(),
            previous_period: suffix.to_string(),
        }
    }
}

/// Templates for arithmetic measure titles; `{0}` and `{1}` expand to the
/// first two operand titles.
#[derive(Debug, Clone, PartialEq)]
pub struct ArithmeticTitleTemplates {
    pub sum: String,
    pub difference: String,
    pub multiplication: String,
    pub ratio: String,
    pub change: String,
}

impl Default for ArithmeticTitleTemplates {
    fn default() -> Self {
        ArithmeticTitleTemplates {
            sum: "Sum of {0} and {1}".to_string(),
            difference: "Difference of {0} and {1}".to_string(),
            multiplication: "Product of {0} and {1}".to_string(),
            ratio: "Ratio of {0} and {1}".to_string(),
            change: "Change from {1} to {0}".to_string(),
        }
    }
}

impl ArithmeticTitleTemplates {
    fn render(&self, operator: ArithmeticOperator, first: &str, second: &str) -> String {
        let template = match operator {
            ArithmeticOperator::Sum => &self.sum,
            ArithmeticOperator::Difference => &self.difference,
            ArithmeticOperator::Multiplication => &self.multiplication,
            ArithmeticOperator::Ratio => &self.ratio,
            ArithmeticOperator::Change => &self.change,
        };
        template.replace("{0}", first).replace("{1}", second)
    }
}

/// A resolved display title. `title == None` is the "cannot resolve"
/// sentinel: the master is missing, untitled, or an arithmetic operand list
/// is too short.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedTitle {
    pub local_identifier: String,
    pub title: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct TitleResolver {
    pub suffixes: DerivedTitleSuffixes,
    pub templates: ArithmeticTitleTemplates,
}

impl TitleResolver {
    pub fn with_uniform_suffix(suffix: &str) -> TitleResolver {
        TitleResolver {
            suffixes: DerivedTitleSuffixes::uniform(suffix),
            templates: ArithmeticTitleTemplates::default(),
        }
    }

    /// Resolves display titles for all measures in dependency order.
    ///
    /// The result has one entry per input measure, in input order.
    pub fn resolve(&self, measures: &[Measure]) -> Result<Vec<ResolvedTitle>, TitleError> {
        let mut index: FxHashMap<&str, usize> = FxHashMap::default();
        for (pos, measure) in measures.iter().enumerate() {
            if index.insert(measure.local_identifier.as_str(), pos).is_some() {
                return Err(TitleError::DuplicateLocalIdentifier {
                    local_identifier: measure.local_identifier.clone(),
                });
            }
        }

        // master position -> dependent positions; indegree counts only
        // dependencies that resolve to measures actually present.
        let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); measures.len()];
        let mut indegree: Vec<usize> = vec![0; measures.len()];
        for (pos, measure) in measures.iter().enumerate() {
            for master in dependency_identifiers(measure) {
                if let Some(&master_pos) = index.get(master) {
                    dependents[master_pos].push(pos);
                    indegree[pos] += 1;
                }
            }
        }

        let mut titles: Vec<Option<String>> = vec![None; measures.len()];
        let mut queue: VecDeque<usize> = indegree
            .iter()
            .enumerate()
            .filter(|(_, &deg)| deg == 0)
            .map(|(pos, _)| pos)
            .collect();
        let mut processed = 0usize;

        while let Some(pos) = queue.pop_front() {
            processed += 1;
            titles[pos] = self.title_of(&measures[pos], &index, &titles);
            for &dependent in &dependents[pos] {
                indegree[dependent] -= 1;
                if indegree[dependent] == 0 {
                    queue.push_back(dependent);
                }
            }
        }

        if processed != measures.len() {
            let members: Vec<String> = indegree
                .iter()
                .enumerate()
                .filter(|(_, &deg)| deg > 0)
                .map(|(pos, _)| measures[pos].local_identifier.clone())
                .collect();
            return Err(TitleError::CyclicDerivation { members });
        }

        Ok(measures
            .iter()
            .zip(titles)
            .map(|(measure, title)| ResolvedTitle {
                local_identifier: measure.local_identifier.clone(),
                title,
            })
            .collect())
    }

    fn title_of(
        &self,
        measure: &Measure,
        index: &FxHashMap<&str, usize>,
        titles: &[Option<String>],
    ) -> Option<String> {
        // An explicit alias always wins, even on derived measures.
        if let Some(alias) = &measure.alias {
            return Some(alias.clone());
        }

        let resolved = |local_id: &str| -> Option<String> {
            index.get(local_id).and_then(|&pos| titles[pos].clone())
        };

        match &measure.definition {
            MeasureDefinition::Simple(_) => measure.title.clone(),
            MeasureDefinition::Pop(def) => resolved(&def.measure_identifier)
                .map(|master| format!("{master}{}", self.suffixes.pop)),
            MeasureDefinition::PreviousPeriod(def) => resolved(&def.measure_identifier)
                .map(|master| format!("{master}{}", self.suffixes.previous_period)),
            MeasureDefinition::Arithmetic(def) => {
                if def.measure_identifiers.len() < 2 {
                    return None;
                }
                let first = resolved(&def.measure_identifiers[0])?;
                let second = resolved(&def.measure_identifiers[1])?;
                Some(self.templates.render(def.operator, &first, &second))
            }
        }
    }
}

/// Local identifiers a measure's title depends on.
fn dependency_identifiers(measure: &Measure) -> Vec<&str> {
    match &measure.definition {
        MeasureDefinition::Simple(_) => Vec::new(),
        MeasureDefinition::Pop(def) => vec![def.measure_identifier.as_str()],
        MeasureDefinition::PreviousPeriod(def) => vec![def.measure_identifier.as_str()],
        MeasureDefinition::Arithmetic(def) => {
            def.measure_identifiers.iter().map(String::as_str).collect()
        }
    }
}

/// Fills titles of derived and arithmetic measures in a visualization,
/// appending `suffix` to each derived measure's master title. Explicitly
/// titled or aliased measures keep their text; only untitled derived
/// measures gain one. Returns a new visualization object.
pub fn fill_derived_titles(
    vis: &VisualizationObject,
    suffix: &str,
) -> Result<VisualizationObject, TitleError> {
    let measures: Vec<Measure> = vis.measures().cloned().collect();
    let resolver = TitleResolver::with_uniform_suffix(suffix);
    let resolved = resolver.resolve(&measures)?;
    let by_id: FxHashMap<&str, &ResolvedTitle> = resolved
        .iter()
        .map(|t| (t.local_identifier.as_str(), t))
        .collect();

    let mut filled = vis.clone();
    for bucket in &mut filled.buckets {
        for item in &mut bucket.items {
            if let crate::bucket::BucketItem::Measure(measure) = item {
                if measure.title.is_some() || measure.is_simple() {
                    continue;
                }
                if let Some(resolved) = by_id.get(measure.local_identifier.as_str()) {
                    measure.title = resolved.title.clone();
                }
            }
        }
    }
    Ok(filled)
}
