//! Speaker entity.

/// A conference speaker.
///
/// Speakers exist independently of camps; a speaker is associated with a
/// camp only through the talks they give there.
#[derive(Debug, Clone, PartialEq)]
pub struct Speaker {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub company: Option<String>,
    pub blog_url: Option<String>,
    pub twitter: Option<String>,
    pub github: Option<String>,
}

impl Speaker {
    /// Full display name, `"First Last"`.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
