/// What currently owns the sheet position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    /// The header drag moves the sheet.
    MasterDragging,
    /// A released sheet springs toward a snap point. `handoff` marks a spring
    /// taken over from a content drag, which suppresses content decay.
    MasterSpringing { handoff: bool },
    /// The content drag scrolls content. `coupled` once it has also moved the
    /// sheet during this gesture.
    InnerDragging { coupled: bool },
    /// Released content coasts to a stop.
    InnerDecaying,
    /// The spring heads for a target requested through the imperative API.
    ManuallySnapping,
}

impl Phase {
    pub fn is_dragging(self) -> bool {
        matches!(self, Phase::MasterDragging | Phase::InnerDragging { .. })
    }

    pub fn is_springing(self) -> bool {
        matches!(self, Phase::MasterSpringing { .. } | Phase::ManuallySnapping)
    }

    /// Transition table.
    ///
    /// A master drag may take over from any phase. Content drags start only
    /// while nothing else holds the sheet or a motor they may stop is running.
    pub fn allows(self, next: Phase) -> bool {
        use Phase::*;
        if next == MasterDragging {
            return true;
        }
        match self {
            Idle => matches!(next, InnerDragging { .. } | ManuallySnapping),
            MasterDragging => matches!(next, MasterSpringing { .. } | ManuallySnapping),
            MasterSpringing { .. } => {
                matches!(next, Idle | InnerDragging { .. } | ManuallySnapping)
            }
            InnerDragging { .. } => matches!(
                next,
                Idle | InnerDragging { .. } | InnerDecaying | MasterSpringing { .. } | ManuallySnapping
            ),
            InnerDecaying => matches!(next, Idle | InnerDragging { .. } | ManuallySnapping),
            ManuallySnapping => matches!(next, Idle | ManuallySnapping),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Phase; 8] = [
        Phase::Idle,
        Phase::MasterDragging,
        Phase::MasterSpringing { handoff: false },
        Phase::MasterSpringing { handoff: true },
        Phase::InnerDragging { coupled: false },
        Phase::InnerDragging { coupled: true },
        Phase::InnerDecaying,
        Phase::ManuallySnapping,
    ];

    #[test]
    fn master_drag_preempts_everything() {
        for phase in ALL {
            assert!(phase.allows(Phase::MasterDragging), "{phase:?}");
        }
    }

    #[test]
    fn content_cannot_interrupt_master_or_manual_snap() {
        let inner = Phase::InnerDragging { coupled: false };
        assert!(!Phase::MasterDragging.allows(inner));
        assert!(!Phase::ManuallySnapping.allows(inner));
        assert!(Phase::Idle.allows(inner));
        assert!(Phase::MasterSpringing { handoff: false }.allows(inner));
        assert!(Phase::InnerDecaying.allows(inner));
    }

    #[test]
    fn only_content_drags_decay() {
        for phase in ALL {
            let allowed = phase.allows(Phase::InnerDecaying);
            assert_eq!(
                allowed,
                matches!(phase, Phase::InnerDragging { .. }),
                "{phase:?}"
            );
        }
    }

    #[test]
    fn drags_never_end_in_place() {
        assert!(!Phase::MasterDragging.allows(Phase::Idle));
        assert!(Phase::InnerDragging { coupled: true }.allows(Phase::Idle));
        assert!(!Phase::Idle.allows(Phase::MasterSpringing { handoff: false }));
    }

    #[test]
    fn helpers() {
        assert!(Phase::MasterDragging.is_dragging());
        assert!(Phase::InnerDragging { coupled: true }.is_dragging());
        assert!(Phase::ManuallySnapping.is_springing());
        assert!(!Phase::InnerDecaying.is_springing());
        assert_eq!(Phase::default(), Phase::Idle);
    }
}
