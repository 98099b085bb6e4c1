//! Qubit indices.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of a qubit within a circuit.
///
/// Serializes as a bare integer so the JSON shape stays `"targets": [0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QubitId(pub u32);

impl QubitId {
    /// The index as a `usize`, for slice access.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

impl From<u32> for QubitId {
    fn from(id: u32) -> Self {
        QubitId(id)
    }
}

impl TryFrom<usize> for QubitId {
    type Error = std::num::TryFromIntError;

    fn try_from(id: usize) -> Result<Self, Self::Error> {
        u32::try_from(id).map(QubitId)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_and_serde() {
        let q = QubitId(3);
        assert_eq!(q.to_string(), "q3");
        assert_eq!(serde_json::to_string(&q).unwrap(), "3");
        let back: QubitId = serde_json::from_str("7").unwrap();
        assert_eq!(back, QubitId(7));
    }

    #[test]
    fn test_try_from_usize() {
        assert_eq!(QubitId::try_from(5usize).unwrap(), QubitId(5));
        assert!(QubitId::try_from(usize::MAX).is_err() || usize::BITS == 32);
    }
}
