/// A row in the security panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SecurityRow {
    pub title: &'static str,
    pub detail: &'static str,
    /// Backed by the in-memory two-factor switch.
    pub toggles_two_factor: bool,
}

pub const SECURITY_ROWS: [SecurityRow; 3] = [
    SecurityRow {
        title: "Change Password",
        detail: "Last updated 3 months ago",
        toggles_two_factor: false,
    },
    SecurityRow {
        title: "Two-Factor Authentication",
        detail: "Add an extra layer of security",
        toggles_two_factor: true,
    },
    SecurityRow {
        title: "Login Sessions",
        detail: "Manage your active sessions",
        toggles_two_factor: false,
    },
];

/// Static account details shown on the settings profile tab. Edits stay in
/// memory and are never sent anywhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub full_name: String,
    pub username: String,
    pub email: String,
    pub location: String,
    pub two_factor: bool,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            full_name: "Anita Kam".to_string(),
            username: "Nita".to_string(),
            email: "Anitakam@gmail.com".to_string(),
            location: "Lagos".to_string(),
            two_factor: false,
        }
    }
}

impl Profile {
    /// Label/value pairs in display order.
    pub fn fields(&self) -> [(&'static str, &str); 4] {
        [
            ("Full Name", self.full_name.as_str()),
            ("Username", self.username.as_str()),
            ("Email", self.email.as_str()),
            ("Location", self.location.as_str()),
        ]
    }

    pub fn toggle_two_factor(&mut self) -> bool {
        self.two_factor = !self.two_factor;
        self.two_factor
    }
}
