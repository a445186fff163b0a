//! Resource URL generation for `Location` headers.

/// Builds resource URLs from route templates and route parameters.
///
/// Paths are rooted at the API prefix the router mounts (normally `/api`),
/// so a generated value resolves against the same server that produced it.
#[derive(Debug, Clone)]
pub struct LinkGenerator {
    base_path: String,
}

impl LinkGenerator {
    pub fn new(base_path: impl Into<String>) -> Self {
        let mut base_path = base_path.into();
        while base_path.ends_with('/') {
            base_path.pop();
        }
        Self { base_path }
    }

    /// URL of a camp's Get endpoint.
    pub fn camp_location(&self, moniker: &str) -> String {
        format!("{}/camps/{}", self.base_path, moniker)
    }

    /// URL of a talk's Get endpoint.
    pub fn talk_location(&self, moniker: &str, talk_id: i32) -> String {
        format!("{}/camps/{}/talks/{}", self.base_path, moniker, talk_id)
    }
}
