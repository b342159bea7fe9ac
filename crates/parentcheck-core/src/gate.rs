use crate::domain::ParentId;

/// Modal guard in front of the delete call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ConfirmGate {
    #[default]
    Hidden,
    Visible { parent_id: ParentId },
}

impl ConfirmGate {
    pub fn is_visible(&self) -> bool {
        matches!(self, ConfirmGate::Visible { .. })
    }

    pub fn target(&self) -> Option<&ParentId> {
        match self {
            ConfirmGate::Visible { parent_id } => Some(parent_id),
            ConfirmGate::Hidden => None,
        }
    }

    pub fn open(&mut self, parent_id: ParentId) {
        *self = ConfirmGate::Visible { parent_id };
    }

    pub fn close(&mut self) {
        *self = ConfirmGate::Hidden;
    }
}
