//! Display helpers shared by every renderer.

/// Renders a tri-state flag.
///
/// The three strings are part of the output contract: `Yes`, `No`, and
/// `N/A` for a flag the service did not determine.
pub fn tri_state(value: Option<bool>) -> &'static str {
    match value {
        Some(true) => "Yes",
        Some(false) => "No",
        None => "N/A",
    }
}

/// Colour family of a status badge or chart bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusTone {
    /// Green.
    Positive,
    /// Yellow.
    Caution,
    /// Red.
    Negative,
    /// Grey.
    Neutral,
    /// Blue; used for aggregate figures.
    Accent,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tri_state_strings() {
        assert_eq!(tri_state(Some(true)), "Yes");
        assert_eq!(tri_state(Some(false)), "No");
        assert_eq!(tri_state(None), "N/A");
    }
}
