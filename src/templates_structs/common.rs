use crate::dashboard::Identity;

pub const APP_NAME: &str = "PrepWise";

/// Common context shared by all pages. Templates access these as `ctx.app_name`, etc.
pub struct PageContext {
    pub app_name: String,
    pub viewer_name: Option<String>,
    pub avatar_initial: String,
}

impl PageContext {
    pub fn new(identity: &Identity) -> Self {
        let viewer_name = match identity {
            Identity::Known(v) => Some(v.name.clone()),
            Identity::Guest => None,
        };
        let avatar_initial = viewer_name
            .as_deref()
            .and_then(|n| n.chars().next())
            .unwrap_or('?')
            .to_uppercase()
            .to_string();
        Self {
            app_name: APP_NAME.to_string(),
            viewer_name,
            avatar_initial,
        }
    }

    pub fn is_signed_in(&self) -> bool {
        self.viewer_name.is_some()
    }
}
