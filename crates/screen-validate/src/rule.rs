//! Rules as values: an optional guard, a body and the rule's metadata.

use polars::prelude::DataFrame;

use screen_ingest::{bool_values, filter_rows};
use screen_model::columns::VALID_IC;
use screen_model::{Category, RuleContext, RuleId};
use screen_transform::{general_view, lesion_view};

use crate::error::Result;
use crate::rules;

/// A rule body: returns the rows of the view that fail the rule, together with
/// any working columns the rule computed.
pub type RuleBody = fn(&DataFrame, &RuleContext) -> Result<DataFrame>;

/// Row filter applied before a rule body runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guard {
    /// Keep only rows whose IC number is valid.
    ValidIc,
}

impl Guard {
    pub fn apply(self, view: &DataFrame) -> Result<DataFrame> {
        match self {
            Self::ValidIc => {
                let mask: Vec<bool> = bool_values(view, VALID_IC)?
                    .into_iter()
                    .map(|valid| valid == Some(true))
                    .collect();
                Ok(filter_rows(view, &mask)?)
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub id: RuleId,
    pub guard: Option<Guard>,
    pub body: RuleBody,
    /// Columns whose values explain a failure, in report order.
    pub explain: &'static [&'static str],
}

impl Rule {
    pub const fn new(id: RuleId, body: RuleBody, explain: &'static [&'static str]) -> Self {
        Self {
            id,
            guard: None,
            body,
            explain,
        }
    }

    pub const fn guarded(mut self, guard: Guard) -> Self {
        self.guard = Some(guard);
        self
    }

    /// Run the guard, then the body.
    pub fn evaluate(&self, view: &DataFrame, ctx: &RuleContext) -> Result<DataFrame> {
        match self.guard {
            Some(guard) => (self.body)(&guard.apply(view)?, ctx),
            None => (self.body)(view, ctx),
        }
    }
}

/// Rules sharing one record view and one store category.
#[derive(Debug, Clone, Copy)]
pub struct RuleGroup {
    pub category: Category,
    /// Rules in catalogue order.
    pub rules: &'static [Rule],
}

impl RuleGroup {
    pub fn general() -> Self {
        Self {
            category: Category::General,
            rules: rules::GENERAL_RULES,
        }
    }

    pub fn lesion() -> Self {
        Self {
            category: Category::Lesion,
            rules: rules::LESION_RULES,
        }
    }

    /// Groups in evaluation order.
    pub fn all() -> [Self; 2] {
        [Self::general(), Self::lesion()]
    }

    pub fn for_category(category: Category) -> Self {
        match category {
            Category::General => Self::general(),
            Category::Lesion => Self::lesion(),
        }
    }

    /// Build the record view this group's rules read.
    pub fn build_view(&self, table: &DataFrame, ctx: &RuleContext) -> Result<DataFrame> {
        let view = match self.category {
            Category::General => general_view(table, ctx)?,
            Category::Lesion => lesion_view(table, &ctx.reshape)?,
        };
        Ok(view)
    }

    pub fn rule(&self, id: RuleId) -> Option<&'static Rule> {
        self.rules.iter().find(|rule| rule.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_partition_the_catalogue() {
        let mut ids: Vec<RuleId> = RuleGroup::all()
            .iter()
            .flat_map(|group| group.rules.iter().map(|rule| rule.id))
            .collect();
        ids.sort();
        assert_eq!(ids, RuleId::all().to_vec());
    }

    #[test]
    fn rules_follow_catalogue_order_and_category() {
        for group in RuleGroup::all() {
            let ordinals: Vec<u16> = group.rules.iter().map(|rule| rule.id.ordinal()).collect();
            assert!(ordinals.windows(2).all(|pair| pair[0] < pair[1]));
            assert!(group.rules.iter().all(|rule| rule.id.category() == group.category));
        }
    }

    #[test]
    fn ic_rules_are_guarded() {
        let general = RuleGroup::general();
        for id in [RuleId::IcVsGender, RuleId::IcVsDatebirth] {
            assert_eq!(general.rule(id).unwrap().guard, Some(Guard::ValidIc));
        }
        assert_eq!(general.rule(RuleId::ValidIc).unwrap().guard, None);
    }
}
