//! Event parameter extraction.
//!
//! Hosting log frameworks hand the sink an unordered bag of stringly
//! `key=value` parameters alongside the base64 payload. [`WriteOptions`] is
//! the typed form the sink core consumes; [`WriteOptions::from_params`] is the
//! compatibility adapter that scans such a bag.
//!
//! Matching rules, per role (`overlay`, `path`, `filename`):
//! - the first parameter (in iteration order) whose lowercased string form
//!   *contains* the role substring carries the role;
//! - the value is everything after the first `=` in that parameter;
//! - a matching parameter without any `=` yields no value (the role is
//!   absent), rather than failing.

/// Typed per-event options for an image write.
///
/// Populated either directly by the caller, from a log record's structured
/// key-values (see [`ImageLogger`](crate::ImageLogger)), or from a stringly
/// parameter bag via [`WriteOptions::from_params`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteOptions {
    /// Text to composite in red at the image's top-left corner.
    /// `None` or empty: the image is written unmodified.
    pub overlay: Option<String>,

    /// Relative sub-path joined onto the sink's base directory.
    /// Missing intermediate directories are created.
    pub sub_path: Option<String>,

    /// Output filename, used verbatim (no extension appended or validated).
    /// `None`: a local-timestamp filename (`yyyyMMddHHmmssffff.jpg`) is used.
    pub filename: Option<String>,
}

impl WriteOptions {
    /// Scan a parameter bag for the three recognized roles.
    pub fn from_params<S: AsRef<str>>(params: &[S]) -> Self {
        Self {
            overlay: find_role(params, "overlay"),
            sub_path: find_role(params, "path"),
            filename: find_role(params, "filename"),
        }
    }

    /// Set the overlay text.
    pub fn overlay(mut self, text: impl Into<String>) -> Self {
        self.overlay = Some(text.into());
        self
    }

    /// Set the relative sub-path under the base directory.
    pub fn sub_path(mut self, path: impl Into<String>) -> Self {
        self.sub_path = Some(path.into());
        self
    }

    /// Set the output filename.
    pub fn filename(mut self, name: impl Into<String>) -> Self {
        self.filename = Some(name.into());
        self
    }
}

/// First parameter whose lowercased form contains `role`, split at the first
/// `=`. No `=` in the matching parameter means the role has no value.
fn find_role<S: AsRef<str>>(params: &[S], role: &str) -> Option<String> {
    params
        .iter()
        .map(|p| p.as_ref())
        .find(|p| p.to_lowercase().contains(role))
        .and_then(|p| p.split_once('='))
        .map(|(_, value)| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_all_three_roles() {
        let params = ["overlay=MOH12345", "path=user/session", "filename=shot.jpg"];
        let opts = WriteOptions::from_params(&params);
        assert_eq!(opts.overlay.as_deref(), Some("MOH12345"));
        assert_eq!(opts.sub_path.as_deref(), Some("user/session"));
        assert_eq!(opts.filename.as_deref(), Some("shot.jpg"));
    }

    #[test]
    fn missing_roles_are_absent() {
        let params = ["overlay=X"];
        let opts = WriteOptions::from_params(&params);
        assert_eq!(opts.overlay.as_deref(), Some("X"));
        assert!(opts.sub_path.is_none());
        assert!(opts.filename.is_none());
    }

    #[test]
    fn matching_is_case_insensitive_substring() {
        // Role carriers are matched on the whole lowercased string form, so
        // "Overlay=x" and "my_filename=f" both count.
        let params = ["Overlay=hello", "my_filename=custom.png"];
        let opts = WriteOptions::from_params(&params);
        assert_eq!(opts.overlay.as_deref(), Some("hello"));
        assert_eq!(opts.filename.as_deref(), Some("custom.png"));
    }

    #[test]
    fn first_matching_parameter_wins() {
        let params = ["path=first", "path=second"];
        let opts = WriteOptions::from_params(&params);
        assert_eq!(opts.sub_path.as_deref(), Some("first"));
    }

    #[test]
    fn value_is_everything_after_the_first_equals() {
        let params = ["overlay=a=b=c"];
        let opts = WriteOptions::from_params(&params);
        assert_eq!(opts.overlay.as_deref(), Some("a=b=c"));
    }

    #[test]
    fn parameter_without_equals_yields_no_value() {
        // "overlay" matches the role substring but carries no value; the role
        // is treated as absent instead of panicking on a missing separator.
        let params = ["overlay", "filename=real.jpg"];
        let opts = WriteOptions::from_params(&params);
        assert!(opts.overlay.is_none());
        assert_eq!(opts.filename.as_deref(), Some("real.jpg"));
    }

    #[test]
    fn empty_value_is_preserved_as_empty_string() {
        let params = ["overlay="];
        let opts = WriteOptions::from_params(&params);
        assert_eq!(opts.overlay.as_deref(), Some(""));
    }

    #[test]
    fn one_parameter_can_carry_multiple_roles() {
        // Substring matching over the whole parameter means a value containing
        // another role's name is picked up for that role too. Observed
        // behavior, kept for compatibility.
        let params = ["overlay=c:/path/x"];
        let opts = WriteOptions::from_params(&params);
        assert_eq!(opts.overlay.as_deref(), Some("c:/path/x"));
        assert_eq!(opts.sub_path.as_deref(), Some("c:/path/x"));
    }

    #[test]
    fn builder_style_population() {
        let opts = WriteOptions::default()
            .overlay("who")
            .sub_path("a/b")
            .filename("f.jpg");
        assert_eq!(opts.overlay.as_deref(), Some("who"));
        assert_eq!(opts.sub_path.as_deref(), Some("a/b"));
        assert_eq!(opts.filename.as_deref(), Some("f.jpg"));
    }
}
