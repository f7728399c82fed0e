use shared::domain::ParticipationMode;

/// The kinds of screen the registration flow is made of, in template order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepKind {
    Participation,
    Personal,
    Contact,
    Academic,
    Institute,
    Submission,
    Finish,
}

pub const STEP_TEMPLATE: [StepKind; 7] = [
    StepKind::Participation,
    StepKind::Personal,
    StepKind::Contact,
    StepKind::Academic,
    StepKind::Institute,
    StepKind::Submission,
    StepKind::Finish,
];

impl StepKind {
    pub fn title(self) -> &'static str {
        match self {
            StepKind::Participation => "Participation Mode",
            StepKind::Personal => "Personal Info",
            StepKind::Contact => "Contact Details",
            StepKind::Academic => "Academic Info",
            StepKind::Institute => "Institute Details",
            StepKind::Submission => "Review & Submit",
            StepKind::Finish => "All Done!",
        }
    }

    /// Steps that collect per-participant data and appear once per
    /// participant in duo mode.
    pub fn repeats_per_participant(self) -> bool {
        matches!(
            self,
            StepKind::Personal | StepKind::Contact | StepKind::Academic
        )
    }
}

/// One concrete screen: a step kind bound to the participant it collects for.
/// Steps that are not per-participant are bound to participant 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub kind: StepKind,
    pub participant: usize,
}

impl Step {
    pub fn label(&self, mode: ParticipationMode) -> String {
        if mode == ParticipationMode::Duo && self.kind.repeats_per_participant() {
            format!("{} (Participant {})", self.kind.title(), self.participant + 1)
        } else {
            self.kind.title().to_string()
        }
    }
}

/// Expands the template into the concrete step sequence for a mode. A
/// repeated kind keeps its participants consecutive, so in duo mode both
/// personal screens come before the first contact screen.
pub fn expand_steps(mode: ParticipationMode) -> Vec<Step> {
    let mut steps = Vec::new();
    for kind in STEP_TEMPLATE {
        if kind.repeats_per_participant() {
            for participant in 0..mode.participant_count() {
                steps.push(Step { kind, participant });
            }
        } else {
            steps.push(Step {
                kind,
                participant: 0,
            });
        }
    }
    steps
}
