use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque key returned by the lookup endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParentId(String);

impl ParentId {
    pub fn new(raw: impl Into<String>) -> Result<Self, CoreError> {
        let value = raw.into();
        if value.is_empty() {
            return Err(CoreError::EmptyParentId);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ParentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::ParentId;
    use crate::error::CoreError;

    #[test]
    fn parent_id_rejects_empty() {
        assert_eq!(ParentId::new(""), Err(CoreError::EmptyParentId));
    }

    #[test]
    fn parent_id_keeps_value_verbatim() {
        let id = ParentId::new(" p1 ").expect("id");
        assert_eq!(id.as_str(), " p1 ");
    }
}
