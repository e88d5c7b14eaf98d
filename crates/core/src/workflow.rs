//! Onboarding workflow statuses and transition rules.
//!
//! The workflow is a fixed DAG of eleven statuses. A move is checked in
//! order: plan gating, privileged bypass, the LinkedIn side channel, then
//! the transition table. See [`check_transition`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::plan::Plan;
use crate::roles::can_move_any;

/// A status in the client onboarding workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnboardingStatus {
    ResumeInProgress,
    ResumeInReview,
    ResumeApproved,
    LinkedinInProgress,
    LinkedinInReview,
    LinkedinApproved,
    PortalSetup,
    ApplicationsInProgress,
    InterviewPrep,
    Placement,
    Completed,
}

use OnboardingStatus::*;

/// All workflow statuses in phase order.
pub const ALL_STATUSES: &[OnboardingStatus] = &[
    ResumeInProgress,
    ResumeInReview,
    ResumeApproved,
    LinkedinInProgress,
    LinkedinInReview,
    LinkedinApproved,
    PortalSetup,
    ApplicationsInProgress,
    InterviewPrep,
    Placement,
    Completed,
];

/// Legal forward transitions. A move from A to B is legal iff B appears in
/// the entry for A. Statuses without an entry are terminal.
pub const VALID_TRANSITIONS: &[(OnboardingStatus, &[OnboardingStatus])] = &[
    (ResumeInProgress, &[ResumeInReview]),
    (ResumeInReview, &[ResumeApproved]),
    (ResumeApproved, &[LinkedinInProgress, PortalSetup]),
    (LinkedinInProgress, &[LinkedinInReview]),
    (LinkedinInReview, &[LinkedinApproved]),
    (LinkedinApproved, &[PortalSetup]),
    (PortalSetup, &[ApplicationsInProgress]),
    (ApplicationsInProgress, &[InterviewPrep, Completed]),
    (InterviewPrep, &[Placement, Completed]),
    (Placement, &[Completed]),
    (Completed, &[]),
];

/// Statuses reachable on the ignite tier: resume phase plus the application
/// pipeline, no LinkedIn work and no interview/placement support.
const IGNITE_STATUSES: &[OnboardingStatus] = &[
    ResumeInProgress,
    ResumeInReview,
    ResumeApproved,
    PortalSetup,
    ApplicationsInProgress,
    Completed,
];

/// Statuses reachable on the professional tier: ignite plus the LinkedIn
/// sub-phase and interview prep.
const PROFESSIONAL_STATUSES: &[OnboardingStatus] = &[
    ResumeInProgress,
    ResumeInReview,
    ResumeApproved,
    LinkedinInProgress,
    LinkedinInReview,
    LinkedinApproved,
    PortalSetup,
    ApplicationsInProgress,
    InterviewPrep,
    Completed,
];

/// Statuses reachable on the executive and prime tiers: everything.
const EXECUTIVE_STATUSES: &[OnboardingStatus] = ALL_STATUSES;

impl OnboardingStatus {
    /// The stored string form (matches the `onboarding_jobs.status` column).
    pub fn as_str(self) -> &'static str {
        match self {
            ResumeInProgress => "resume_in_progress",
            ResumeInReview => "resume_in_review",
            ResumeApproved => "resume_approved",
            LinkedinInProgress => "linkedin_in_progress",
            LinkedinInReview => "linkedin_in_review",
            LinkedinApproved => "linkedin_approved",
            PortalSetup => "portal_setup",
            ApplicationsInProgress => "applications_in_progress",
            InterviewPrep => "interview_prep",
            Placement => "placement",
            Completed => "completed",
        }
    }

    /// Position in the overall phase order, used by the LinkedIn side channel
    /// to decide whether `resume_approved` has been reached.
    fn ordinal(self) -> usize {
        ALL_STATUSES
            .iter()
            .position(|s| *s == self)
            .unwrap_or(usize::MAX)
    }

    /// True if this status is at or past `other` in phase order.
    pub fn has_reached(self, other: OnboardingStatus) -> bool {
        self.ordinal() >= other.ordinal()
    }

    /// Direct successors in the transition table.
    pub fn successors(self) -> &'static [OnboardingStatus] {
        VALID_TRANSITIONS
            .iter()
            .find(|(from, _)| *from == self)
            .map(|(_, to)| *to)
            .unwrap_or(&[])
    }
}

impl fmt::Display for OnboardingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OnboardingStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_STATUSES
            .iter()
            .find(|status| status.as_str() == s)
            .copied()
            .ok_or_else(|| {
                CoreError::Validation(format!("Invalid onboarding status '{s}'"))
            })
    }
}

/// Statuses reachable under the given plan tier.
pub fn plan_allowed_statuses(plan: Plan) -> &'static [OnboardingStatus] {
    match plan {
        Plan::Ignite => IGNITE_STATUSES,
        Plan::Professional => PROFESSIONAL_STATUSES,
        Plan::Executive | Plan::Prime => EXECUTIVE_STATUSES,
    }
}

/// True if the plan tier allows the status at all.
pub fn plan_allows(plan: Plan, status: OnboardingStatus) -> bool {
    plan_allowed_statuses(plan).contains(&status)
}

/// Check whether a mover with `role` may take an onboarding job from `from`
/// to `to` under the client's `plan`.
///
/// Rules, in order:
/// 1. The target must be inside the plan's allow-list. This binds everyone,
///    including privileged roles.
/// 2. Admin, CSM, and team-lead roles may then move between any two statuses.
/// 3. A move into `linkedin_in_progress` is legal from any status at or past
///    `resume_approved` once the job's LinkedIn phase has been started.
/// 4. Otherwise `to` must appear in `VALID_TRANSITIONS[from]`.
pub fn check_transition(
    from: OnboardingStatus,
    to: OnboardingStatus,
    plan: Plan,
    role: &str,
    linkedin_phase_started: bool,
) -> Result<(), CoreError> {
    if !plan_allows(plan, to) {
        return Err(CoreError::Validation(format!(
            "Status '{to}' is not available on the {plan} plan"
        )));
    }

    if can_move_any(role) {
        return Ok(());
    }

    if to == LinkedinInProgress && linkedin_phase_started && from.has_reached(ResumeApproved) {
        return Ok(());
    }

    if from.successors().contains(&to) {
        return Ok(());
    }

    Err(CoreError::Validation(format!(
        "Invalid transition from '{from}' to '{to}'"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roles::{ROLE_ADMIN, ROLE_CSM, ROLE_OPERATOR, ROLE_TEAM_LEAD};
    use assert_matches::assert_matches;

    #[test]
    fn test_round_trip_all_statuses() {
        for status in ALL_STATUSES {
            let parsed: OnboardingStatus =
                status.as_str().parse().expect("stored form must parse");
            assert_eq!(parsed, *status);
        }
    }

    #[test]
    fn test_unknown_status_rejected() {
        let result = OnboardingStatus::from_str("resume_done");
        assert_matches!(result, Err(CoreError::Validation(_)));
    }

    /// Every pair in the transition table succeeds for a non-privileged mover
    /// on a plan that allows everything.
    #[test]
    fn test_all_table_transitions_allowed_for_operator() {
        for (from, targets) in VALID_TRANSITIONS {
            for to in *targets {
                check_transition(*from, *to, Plan::Prime, ROLE_OPERATOR, false)
                    .unwrap_or_else(|e| panic!("{from} -> {to} should be legal: {e}"));
            }
        }
    }

    /// Every pair NOT in the transition table fails for a non-privileged
    /// mover (excluding the LinkedIn side channel, which is off here).
    #[test]
    fn test_non_table_transitions_rejected_for_operator() {
        for from in ALL_STATUSES {
            for to in ALL_STATUSES {
                if from.successors().contains(to) {
                    continue;
                }
                let result =
                    check_transition(*from, *to, Plan::Prime, ROLE_OPERATOR, false);
                assert_matches!(
                    result,
                    Err(CoreError::Validation(_)),
                    "{from} -> {to} should be rejected"
                );
            }
        }
    }

    /// Privileged roles may move between any two statuses the plan allows.
    #[test]
    fn test_privileged_roles_bypass_table() {
        for role in [ROLE_ADMIN, ROLE_CSM, ROLE_TEAM_LEAD] {
            check_transition(Completed, ResumeInProgress, Plan::Prime, role, false)
                .expect("privileged roles may move backwards");
            check_transition(ResumeInProgress, Placement, Plan::Prime, role, false)
                .expect("privileged roles may skip ahead");
        }
    }

    /// Plan gating runs before the bypass: even an admin cannot move an
    /// ignite client into the LinkedIn sub-phase.
    #[test]
    fn test_plan_gate_binds_privileged_roles() {
        let result = check_transition(
            ResumeApproved,
            LinkedinInProgress,
            Plan::Ignite,
            ROLE_ADMIN,
            true,
        );
        assert_matches!(result, Err(CoreError::Validation(_)));
    }

    /// With the flag set, any status at or past resume_approved may jump
    /// into linkedin_in_progress regardless of the table.
    #[test]
    fn test_linkedin_side_channel() {
        check_transition(
            PortalSetup,
            LinkedinInProgress,
            Plan::Professional,
            ROLE_OPERATOR,
            true,
        )
        .expect("side channel should allow the jump once the flag is set");

        // Flag not set: the same move is rejected.
        let result = check_transition(
            PortalSetup,
            LinkedinInProgress,
            Plan::Professional,
            ROLE_OPERATOR,
            false,
        );
        assert_matches!(result, Err(CoreError::Validation(_)));

        // Flag set but resume not yet approved: rejected.
        let result = check_transition(
            ResumeInReview,
            LinkedinInProgress,
            Plan::Professional,
            ROLE_OPERATOR,
            true,
        );
        assert_matches!(result, Err(CoreError::Validation(_)));
    }

    /// The three allow-lists nest: ignite ⊂ professional ⊂ executive.
    #[test]
    fn test_plan_allow_lists_nest() {
        for status in plan_allowed_statuses(Plan::Ignite) {
            assert!(plan_allows(Plan::Professional, *status));
        }
        for status in plan_allowed_statuses(Plan::Professional) {
            assert!(plan_allows(Plan::Executive, *status));
        }
        assert_eq!(
            plan_allowed_statuses(Plan::Executive),
            plan_allowed_statuses(Plan::Prime)
        );
    }

    /// The transition table is acyclic: every edge moves forward in phase
    /// order.
    #[test]
    fn test_transition_table_is_forward_only() {
        for (from, targets) in VALID_TRANSITIONS {
            for to in *targets {
                assert!(
                    to.has_reached(*from) && to != from,
                    "{from} -> {to} is not a forward edge"
                );
            }
        }
    }
}
