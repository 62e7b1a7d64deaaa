use crate::domain::user::User;
use crate::repository::errors::RepositoryResult;
use crate::repository::{ADMIN_AUTH_KEY, SessionReader, SessionWriter, StoreRepository, USER_KEY};
use crate::storage::KeyValueStore;

impl<S: KeyValueStore> SessionReader for StoreRepository<S> {
    fn current_user(&self) -> RepositoryResult<Option<User>> {
        self.read_json(USER_KEY)
    }

    fn is_admin_authenticated(&self) -> RepositoryResult<bool> {
        let flag = self.storage.get(ADMIN_AUTH_KEY)?;
        Ok(flag.as_deref() == Some("true"))
    }
}

impl<S: KeyValueStore> SessionWriter for StoreRepository<S> {
    fn save_user(&self, user: &User) -> RepositoryResult<()> {
        self.write_json(USER_KEY, user)
    }

    fn clear_user(&self) -> RepositoryResult<()> {
        self.remove_key(USER_KEY)
    }

    fn set_admin_authenticated(&self, authenticated: bool) -> RepositoryResult<()> {
        if authenticated {
            Ok(self.storage.set(ADMIN_AUTH_KEY, "true")?)
        } else {
            self.remove_key(ADMIN_AUTH_KEY)
        }
    }
}
