//! Email column inference from header names.

/// Header fragments that mark an email column (English and Norwegian).
///
/// `e-mail` is listed separately because the hyphen breaks the `email`
/// substring.
pub const EMAIL_HEADER_TOKENS: [&str; 4] = ["email", "e-mail", "e-post", "epost"];

/// Outcome of column inference.
///
/// `NotFound` leaves the choice to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnMatch {
    Found(usize),
    NotFound,
}

impl ColumnMatch {
    pub fn index(&self) -> Option<usize> {
        match self {
            ColumnMatch::Found(index) => Some(*index),
            ColumnMatch::NotFound => None,
        }
    }
}

/// Finds the first header whose lowercased text contains one of
/// [`EMAIL_HEADER_TOKENS`].
pub fn infer_email_column<S: AsRef<str>>(headers: &[S]) -> ColumnMatch {
    headers
        .iter()
        .position(|header| {
            let lowered = header.as_ref().to_lowercase();
            EMAIL_HEADER_TOKENS
                .iter()
                .any(|token| lowered.contains(token))
        })
        .map_or(ColumnMatch::NotFound, ColumnMatch::Found)
}
