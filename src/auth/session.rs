use actix_session::{Session, SessionGetError, SessionInsertError};

/// Session keys written by the sign-in service that shares our cookie key.
pub const USER_ID_KEY: &str = "user_id";
pub const USER_NAME_KEY: &str = "user_name";

pub fn get_user_id(session: &Session) -> Result<Option<String>, SessionGetError> {
    session.get::<String>(USER_ID_KEY)
}

pub fn get_user_name(session: &Session) -> Option<String> {
    session.get::<String>(USER_NAME_KEY).unwrap_or(None)
}

/// Store a signed-in identity. Renews the session id to avoid fixation.
pub fn set_identity(session: &Session, user_id: &str, user_name: &str) -> Result<(), SessionInsertError> {
    session.renew();
    session.insert(USER_ID_KEY, user_id)?;
    session.insert(USER_NAME_KEY, user_name)?;
    Ok(())
}

pub fn clear_identity(session: &Session) {
    session.purge();
}
