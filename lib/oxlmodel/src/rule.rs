use crate::quad::QuadPattern;
use std::fmt;

/// A rule loaded from a rule document.
///
/// The antecedents and consequents are split along two axes: the graph they apply to (the
/// meta graph or the source/target graph) and their polarity. Negative antecedents are kept
/// grouped: each group is a conjunction that must not match as a whole.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct Rule {
    pub iri: String,
    pub distinct: bool,
    pub antecedent_source_positives: Vec<QuadPattern>,
    pub antecedent_meta_positives: Vec<QuadPattern>,
    pub antecedent_source_negatives: Vec<Vec<QuadPattern>>,
    pub antecedent_meta_negatives: Vec<Vec<QuadPattern>>,
    pub consequent_target_positives: Vec<QuadPattern>,
    pub consequent_meta_positives: Vec<QuadPattern>,
    pub consequent_target_negatives: Vec<QuadPattern>,
    pub consequent_meta_negatives: Vec<QuadPattern>,
}

impl Rule {
    pub fn new(iri: impl Into<String>, distinct: bool) -> Self {
        Self {
            iri: iri.into(),
            distinct,
            ..Self::default()
        }
    }

    /// Number of patterns in the rule, all groups included.
    pub fn len(&self) -> usize {
        self.antecedent_source_positives.len()
            + self.antecedent_meta_positives.len()
            + self
                .antecedent_source_negatives
                .iter()
                .map(Vec::len)
                .sum::<usize>()
            + self
                .antecedent_meta_negatives
                .iter()
                .map(Vec::len)
                .sum::<usize>()
            + self.consequent_target_positives.len()
            + self.consequent_meta_positives.len()
            + self.consequent_target_negatives.len()
            + self.consequent_meta_negatives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rule <{}>", self.iri)?;
        if self.distinct {
            f.write_str(" distinct")?;
        }
        f.write_str(" {")?;
        for pattern in &self.antecedent_source_positives {
            write!(f, " {pattern}")?;
        }
        for pattern in &self.antecedent_meta_positives {
            write!(f, " meta {pattern}")?;
        }
        for group in &self.antecedent_source_negatives {
            write_group(f, "not", group)?;
        }
        for group in &self.antecedent_meta_negatives {
            write_group(f, "not meta", group)?;
        }
        f.write_str(" } => {")?;
        for pattern in &self.consequent_target_positives {
            write!(f, " {pattern}")?;
        }
        for pattern in &self.consequent_meta_positives {
            write!(f, " meta {pattern}")?;
        }
        for pattern in &self.consequent_target_negatives {
            write!(f, " not {pattern}")?;
        }
        for pattern in &self.consequent_meta_negatives {
            write!(f, " not meta {pattern}")?;
        }
        f.write_str(" }")
    }
}

fn write_group(f: &mut fmt::Formatter<'_>, markers: &str, group: &[QuadPattern]) -> fmt::Result {
    write!(f, " {markers} {{")?;
    for pattern in group {
        write!(f, " {pattern}")?;
    }
    f.write_str(" }")
}
