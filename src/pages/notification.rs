use crate::fetch::MountId;

pub const EMPTY_TITLE: &str = "No new notifications";
pub const EMPTY_HINT: &str = "We'll let you know when something new comes up.";

/// Static page. Fetches nothing and is never loading.
#[derive(Debug)]
pub struct NotificationPage {
    mount: MountId,
}

impl NotificationPage {
    pub fn mount(mount: MountId) -> Self {
        Self { mount }
    }

    pub fn mount_id(&self) -> MountId {
        self.mount
    }
}
