use actix_session::Session;
use async_trait::async_trait;
use serde::Serialize;

use crate::auth::session;
use crate::errors::AppError;

/// The signed-in person looking at the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Viewer {
    pub id: String,
    pub name: String,
}

/// Who is asking. `Guest` is an explicit state, not a missing id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Identity {
    Known(Viewer),
    Guest,
}

impl Identity {
    pub fn known(id: impl Into<String>, name: impl Into<String>) -> Self {
        Identity::Known(Viewer { id: id.into(), name: name.into() })
    }

    pub fn viewer_id(&self) -> Option<&str> {
        match self {
            Identity::Known(v) => Some(&v.id),
            Identity::Guest => None,
        }
    }

    pub fn is_guest(&self) -> bool {
        matches!(self, Identity::Guest)
    }
}

/// Source of the current request's identity.
#[async_trait(?Send)]
pub trait IdentityResolver {
    async fn resolve(&self) -> Result<Identity, AppError>;
}

/// A fixed identity resolves to itself.
#[async_trait(?Send)]
impl IdentityResolver for Identity {
    async fn resolve(&self) -> Result<Identity, AppError> {
        Ok(self.clone())
    }
}

/// Reads the identity the sign-in service stored in the cookie session.
pub struct SessionIdentityResolver<'a> {
    session: &'a Session,
}

impl<'a> SessionIdentityResolver<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }
}

#[async_trait(?Send)]
impl IdentityResolver for SessionIdentityResolver<'_> {
    async fn resolve(&self) -> Result<Identity, AppError> {
        let id = match session::get_user_id(self.session) {
            Ok(Some(id)) if !id.is_empty() => id,
            Ok(_) => return Ok(Identity::Guest),
            Err(e) => {
                // An unreadable cookie value is treated as signed out.
                log::warn!("Ignoring unreadable session identity: {e}");
                return Ok(Identity::Guest);
            }
        };
        let name = session::get_user_name(self.session).unwrap_or_else(|| id.clone());
        Ok(Identity::known(id, name))
    }
}
