use crate::capacity::ResizePolicy;

/// Options for hiding a secret in a cover image
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HideOptions {
    /// How the cover is sized before the secret goes in.
    /// Capacity is checked against the resulting carrier in any case.
    pub resize: ResizePolicy,
}

impl HideOptions {
    pub fn with_resize(mut self, resize: ResizePolicy) -> Self {
        self.resize = resize;
        self
    }
}
