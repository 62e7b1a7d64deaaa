use crate::config::StorefrontConfig;
use crate::domain::user::{User, UserRole};
use crate::forms::auth::{AdminLoginForm, LoginForm, SignUpForm};
use crate::ids::IdGenerator;
use crate::repository::{SessionReader, SessionWriter};
use crate::services::{simulate_latency, ServiceError, ServiceResult};
use crate::ADMIN_USER_ID;

/// Everything persisted about who is using the storefront.
#[derive(Debug, Clone, Default)]
pub struct Session {
    /// Signed-in shopper, if any.
    pub user: Option<User>,
    /// Whether the admin console is unlocked.
    pub admin: bool,
}

/// Loads the persisted session state.
pub fn current_session<R>(repo: &R) -> ServiceResult<Session>
where
    R: SessionReader + ?Sized,
{
    Ok(Session {
        user: repo.current_user().map_err(ServiceError::from)?,
        admin: repo.is_admin_authenticated().map_err(ServiceError::from)?,
    })
}

/// Signs a shopper in.
///
/// Authentication is simulated: any well-formed credentials produce a
/// fresh account whose name falls back to the email prefix.
pub fn sign_in<R, G>(repo: &R, ids: &G, form: LoginForm) -> ServiceResult<User>
where
    R: SessionWriter + ?Sized,
    G: IdGenerator,
{
    let new_user = form
        .into_new_user()
        .map_err(|err| ServiceError::Form(err.to_string()))?;
    let user = new_user.into_user(ids.record_id());
    repo.save_user(&user).map_err(ServiceError::from)?;

    Ok(user)
}

/// Creates an account and signs it in. The supplied name is required.
pub fn register<R, G>(repo: &R, ids: &G, form: SignUpForm) -> ServiceResult<User>
where
    R: SessionWriter + ?Sized,
    G: IdGenerator,
{
    let new_user = form
        .into_new_user()
        .map_err(|err| ServiceError::Form(err.to_string()))?;
    let user = new_user.into_user(ids.record_id());
    repo.save_user(&user).map_err(ServiceError::from)?;

    Ok(user)
}

/// Drops the signed-in shopper.
pub fn sign_out<R>(repo: &R) -> ServiceResult<()>
where
    R: SessionWriter + ?Sized,
{
    repo.clear_user().map_err(ServiceError::from)
}

/// Unlocks the admin console.
///
/// The email is compared case-insensitively, the security key exactly.
/// Success persists the unlocked flag and hands back the merchant
/// identity for display; the shopper session is left untouched.
pub fn admin_sign_in<R>(
    repo: &R,
    config: &StorefrontConfig,
    form: AdminLoginForm,
) -> ServiceResult<User>
where
    R: SessionWriter + ?Sized,
{
    let credentials = form
        .into_credentials()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    simulate_latency(config.admin_login_delay);

    let accepted = credentials.email.eq_ignore_ascii_case(&config.admin_email)
        && credentials.security_key == config.admin_security_key;
    if !accepted {
        return Err(ServiceError::InvalidAdminCredentials);
    }

    repo.set_admin_authenticated(true)
        .map_err(ServiceError::from)?;

    Ok(User {
        id: ADMIN_USER_ID.to_string(),
        name: "Chief Merchant".to_string(),
        email: config.admin_email.clone(),
        role: UserRole::Admin,
        points: 0,
        orders: Vec::new(),
        wishlist: Vec::new(),
    })
}

/// Locks the admin console again.
pub fn admin_sign_out<R>(repo: &R) -> ServiceResult<()>
where
    R: SessionWriter + ?Sized,
{
    repo.set_admin_authenticated(false)
        .map_err(ServiceError::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::ids::SequentialIds;
    use crate::repository::errors::RepositoryResult;
    use crate::repository::mock::{MockSessionReader, MockSessionWriter};

    struct FakeRepo {
        session_reader: MockSessionReader,
        session_writer: MockSessionWriter,
    }

    impl FakeRepo {
        fn new() -> Self {
            Self {
                session_reader: MockSessionReader::new(),
                session_writer: MockSessionWriter::new(),
            }
        }
    }

    impl SessionReader for FakeRepo {
        fn current_user(&self) -> RepositoryResult<Option<User>> {
            self.session_reader.current_user()
        }

        fn is_admin_authenticated(&self) -> RepositoryResult<bool> {
            self.session_reader.is_admin_authenticated()
        }
    }

    impl SessionWriter for FakeRepo {
        fn save_user(&self, user: &User) -> RepositoryResult<()> {
            self.session_writer.save_user(user)
        }

        fn clear_user(&self) -> RepositoryResult<()> {
            self.session_writer.clear_user()
        }

        fn set_admin_authenticated(&self, authenticated: bool) -> RepositoryResult<()> {
            self.session_writer.set_admin_authenticated(authenticated)
        }
    }

    fn login_form(email: &str) -> LoginForm {
        LoginForm {
            email: email.to_string(),
            password: "secret".to_string(),
        }
    }

    fn admin_form(email: &str, security_key: &str) -> AdminLoginForm {
        AdminLoginForm {
            email: email.to_string(),
            security_key: security_key.to_string(),
        }
    }

    #[test]
    fn sign_in_builds_and_persists_a_user() {
        let ids = SequentialIds::new();
        let mut repo = FakeRepo::new();
        repo.session_writer
            .expect_save_user()
            .times(1)
            .withf(|user| {
                assert_eq!(user.id, "rec-1");
                assert_eq!(user.name, "anika");
                assert_eq!(user.email, "anika@example.com");
                assert_eq!(user.role, UserRole::User);
                true
            })
            .returning(|_| Ok(()));

        let user = sign_in(&repo, &ids, login_form("anika@example.com")).expect("expected a user");

        assert_eq!(user.name, "anika");
        assert!(user.orders.is_empty());
        assert_eq!(user.points, 0);
    }

    #[test]
    fn sign_in_rejects_a_malformed_email() {
        let ids = SequentialIds::new();
        let repo = FakeRepo::new();

        let result = sign_in(&repo, &ids, login_form("not-an-email"));

        assert!(matches!(result, Err(ServiceError::Form(_))));
    }

    #[test]
    fn register_keeps_the_supplied_name() {
        let ids = SequentialIds::new();
        let mut repo = FakeRepo::new();
        repo.session_writer
            .expect_save_user()
            .times(1)
            .returning(|_| Ok(()));

        let form = SignUpForm {
            name: " Anika Rahman ".to_string(),
            email: "anika@example.com".to_string(),
            password: "secret".to_string(),
        };
        let user = register(&repo, &ids, form).expect("expected a user");

        assert_eq!(user.name, "Anika Rahman");
    }

    #[test]
    fn register_requires_a_name() {
        let ids = SequentialIds::new();
        let repo = FakeRepo::new();

        let form = SignUpForm {
            name: "  ".to_string(),
            email: "anika@example.com".to_string(),
            password: "secret".to_string(),
        };
        let result = register(&repo, &ids, form);

        assert!(matches!(result, Err(ServiceError::Form(_))));
    }

    #[test]
    fn sign_out_drops_the_session_user() {
        let mut repo = FakeRepo::new();
        repo.session_writer
            .expect_clear_user()
            .times(1)
            .returning(|| Ok(()));

        sign_out(&repo).expect("expected success");
    }

    #[test]
    fn current_session_reads_user_and_admin_flag() {
        let mut repo = FakeRepo::new();
        repo.session_reader
            .expect_current_user()
            .times(1)
            .returning(|| Ok(None));
        repo.session_reader
            .expect_is_admin_authenticated()
            .times(1)
            .returning(|| Ok(true));

        let session = current_session(&repo).expect("expected a session");

        assert!(session.user.is_none());
        assert!(session.admin);
    }

    #[test]
    fn admin_sign_in_accepts_the_configured_credentials() {
        let config = StorefrontConfig::without_simulated_delays();
        let mut repo = FakeRepo::new();
        repo.session_writer
            .expect_set_admin_authenticated()
            .times(1)
            .withf(|authenticated| *authenticated)
            .returning(|_| Ok(()));

        let form = admin_form("Provatkarmoker44@GMAIL.com", "moment@2025");
        let admin = admin_sign_in(&repo, &config, form).expect("expected the merchant");

        assert_eq!(admin.id, ADMIN_USER_ID);
        assert_eq!(admin.name, "Chief Merchant");
        assert_eq!(admin.email, config.admin_email);
        assert!(admin.is_admin());
    }

    #[test]
    fn admin_sign_in_rejects_a_wrong_security_key() {
        let config = StorefrontConfig::without_simulated_delays();
        let repo = FakeRepo::new();

        let form = admin_form("provatkarmoker44@gmail.com", "Moment@2025");
        let result = admin_sign_in(&repo, &config, form);

        assert!(matches!(result, Err(ServiceError::InvalidAdminCredentials)));
    }

    #[test]
    fn admin_sign_in_rejects_a_wrong_email() {
        let config = StorefrontConfig::without_simulated_delays();
        let repo = FakeRepo::new();

        let form = admin_form("someone@else.com", "moment@2025");
        let result = admin_sign_in(&repo, &config, form);

        assert!(matches!(result, Err(ServiceError::InvalidAdminCredentials)));
    }

    #[test]
    fn admin_sign_out_locks_the_console() {
        let mut repo = FakeRepo::new();
        repo.session_writer
            .expect_set_admin_authenticated()
            .times(1)
            .withf(|authenticated| !*authenticated)
            .returning(|_| Ok(()));

        admin_sign_out(&repo).expect("expected success");
    }
}
