use schema::{ActorId, TrainingType};
use tracing::debug;

// Form key carrying the chosen training type
const TRAINING_TYPE_FIELD: &str = "training";

/// Proposed experience for one selected pokemon
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedShare {
    pub member: ActorId,
    pub amount: u32,
}

/// Ordered member -> experience proposals for one training cycle
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExperiencePlan {
    shares: Vec<PlannedShare>,
}

impl ExperiencePlan {
    /// Spread `instances` instances of `per_instance` experience across `members`.
    ///
    /// Every member gets `per_instance × ⌊instances / K⌋`; the first
    /// `instances mod K` members in selection order get one extra instance.
    /// Returns `None` when nobody is selected.
    pub fn distribute(per_instance: u32, instances: usize, members: &[ActorId]) -> Option<Self> {
        if members.is_empty() {
            return None;
        }
        let count = members.len();
        let whole = u32::try_from(instances / count).unwrap_or(u32::MAX);
        let base = per_instance.saturating_mul(whole);
        let remainder = instances % count;

        let shares = members
            .iter()
            .enumerate()
            .map(|(position, member)| PlannedShare {
                member: member.clone(),
                amount: if position < remainder {
                    base.saturating_add(per_instance)
                } else {
                    base
                },
            })
            .collect();

        debug!(per_instance, instances, count, base, remainder, "Planned training experience");
        Some(Self { shares })
    }

    /// A plan from manually entered amounts, kept in the order given
    pub fn from_amounts(amounts: impl IntoIterator<Item = (ActorId, u32)>) -> Self {
        let mut plan = Self::default();
        for (member, amount) in amounts {
            plan.set_amount(member, amount);
        }
        plan
    }

    pub fn shares(&self) -> &[PlannedShare] {
        &self.shares
    }

    pub fn len(&self) -> usize {
        self.shares.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shares.is_empty()
    }

    pub fn amount_for(&self, member: &ActorId) -> Option<u32> {
        self.shares
            .iter()
            .find(|share| &share.member == member)
            .map(|share| share.amount)
    }

    /// Replace a member's amount, appending the member if it is new
    pub fn set_amount(&mut self, member: ActorId, amount: u32) {
        match self.shares.iter_mut().find(|share| share.member == member) {
            Some(share) => share.amount = amount,
            None => self.shares.push(PlannedShare { member, amount }),
        }
    }

    pub fn total(&self) -> u64 {
        self.shares.iter().map(|share| u64::from(share.amount)).sum()
    }
}

/// A submitted training form: the chosen type and the (possibly edited) amounts
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrainingSubmission {
    pub training_type: TrainingType,
    pub plan: ExperiencePlan,
}

impl TrainingSubmission {
    /// Parse `field -> text` pairs in submission order. The `training` field
    /// picks the type; every other field is a member id with an amount.
    pub fn from_form<'a>(fields: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut submission = Self::default();
        for (field, value) in fields {
            if field == TRAINING_TYPE_FIELD {
                submission.training_type = TrainingType::from_form_value(value);
            } else {
                submission
                    .plan
                    .set_amount(ActorId::from(field), parse_amount(value));
            }
        }
        submission
    }
}

/// Leading digits of `text` as an amount. Blank, non-numeric and negative
/// input all count as zero.
pub fn parse_amount(text: &str) -> u32 {
    let text = text.trim_start();
    if text.starts_with('-') {
        return 0;
    }
    let digits: String = text
        .trim_start_matches('+')
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    if digits.is_empty() {
        return 0;
    }
    digits.parse().unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn members(count: usize) -> Vec<ActorId> {
        (0..count).map(|i| ActorId::new(format!("mon-{}", i))).collect()
    }

    fn amounts(plan: &ExperiencePlan) -> Vec<u32> {
        plan.shares().iter().map(|share| share.amount).collect()
    }

    #[test]
    fn test_nobody_selected_yields_no_plan() {
        assert_eq!(ExperiencePlan::distribute(10, 6, &[]), None);
    }

    #[test]
    fn test_four_members_over_six_instances() {
        let plan = ExperiencePlan::distribute(10, 6, &members(4)).unwrap();
        assert_eq!(amounts(&plan), vec![20, 20, 10, 10]);
        assert_eq!(plan.total(), 60);
    }

    #[rstest]
    #[case(10, 6, 1, vec![60])]
    #[case(10, 6, 2, vec![30, 30])]
    #[case(7, 6, 5, vec![14, 7, 7, 7, 7])]
    #[case(10, 6, 6, vec![10; 6])]
    #[case(12, 4, 3, vec![24, 12, 12])]
    fn test_distribution_table(
        #[case] per_instance: u32,
        #[case] instances: usize,
        #[case] selected: usize,
        #[case] expected: Vec<u32>,
    ) {
        let plan = ExperiencePlan::distribute(per_instance, instances, &members(selected)).unwrap();
        assert_eq!(amounts(&plan), expected);
        assert_eq!(plan.total(), u64::from(per_instance) * instances as u64);
    }

    #[test]
    fn test_more_members_than_instances() {
        // Base share is zero; only the first N members train
        let plan = ExperiencePlan::distribute(10, 2, &members(3)).unwrap();
        assert_eq!(amounts(&plan), vec![10, 10, 0]);
    }

    #[test]
    fn test_shares_never_increase_by_position() {
        for selected in 1..=8 {
            let plan = ExperiencePlan::distribute(9, 6, &members(selected)).unwrap();
            let amounts = amounts(&plan);
            assert!(amounts.windows(2).all(|pair| pair[0] >= pair[1]), "{:?}", amounts);
        }
    }

    #[test]
    fn test_manual_edit_replaces_amount() {
        let mut plan = ExperiencePlan::distribute(10, 6, &members(2)).unwrap();
        plan.set_amount("mon-1".into(), 5);
        assert_eq!(plan.amount_for(&"mon-1".into()), Some(5));
        assert_eq!(plan.len(), 2);
        assert_eq!(plan.total(), 35);
    }

    #[rstest]
    #[case("25", 25)]
    #[case("  25  ", 25)]
    #[case("12abc", 12)]
    #[case("+8", 8)]
    #[case("abc", 0)]
    #[case("", 0)]
    #[case("-5", 0)]
    #[case("99999999999", u32::MAX)]
    fn test_parse_amount(#[case] text: &str, #[case] expected: u32) {
        assert_eq!(parse_amount(text), expected);
    }

    #[test]
    fn test_form_submission() {
        let submission = TrainingSubmission::from_form([
            ("pikachu", "20"),
            ("training", "brutal-training"),
            ("onix", "oops"),
        ]);

        assert_eq!(submission.training_type, TrainingType::BrutalTraining);
        assert_eq!(
            submission.plan.shares(),
            &[
                PlannedShare {
                    member: "pikachu".into(),
                    amount: 20
                },
                PlannedShare {
                    member: "onix".into(),
                    amount: 0
                },
            ]
        );
    }
}
