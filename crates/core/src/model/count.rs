use crate::error::ValidationError;

/// How many similar problems to request in one generation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SimilarCount(u32);

impl SimilarCount {
    pub const MIN: u32 = 1;
    pub const MAX: u32 = 20;

    /// # Errors
    ///
    /// Returns `ValidationError::CountOutOfRange` unless `MIN <= count <= MAX`.
    pub fn new(count: u32) -> Result<Self, ValidationError> {
        if (Self::MIN..=Self::MAX).contains(&count) {
            Ok(Self(count))
        } else {
            Err(ValidationError::CountOutOfRange {
                count: i64::from(count),
                min: Self::MIN,
                max: Self::MAX,
            })
        }
    }

    /// Clamp raw control input into range; used for the editable spinner and
    /// for syncing the control with the detected problem count.
    #[must_use]
    pub fn clamped(raw: i64) -> Self {
        let value = raw.clamp(i64::from(Self::MIN), i64::from(Self::MAX));
        Self(u32::try_from(value).unwrap_or(Self::MIN))
    }

    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl Default for SimilarCount {
    fn default() -> Self {
        Self(Self::MIN)
    }
}
