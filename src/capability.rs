//! Capability seam shared by the text, image, vector and OpenAI façades.

/// A named group of operations mounted under a fixed path prefix.
///
/// Implementors are independent structs holding only a handle to the
/// retrying transport; there is no shared base state.
pub trait Capability {
    /// Path prefix for every endpoint of this capability (may be empty).
    fn base_path(&self) -> &'static str;

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_path(), path)
    }
}
