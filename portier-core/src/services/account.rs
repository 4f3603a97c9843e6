use std::sync::Arc;

use chrono::Duration;
use tracing::{debug, info, warn};

use crate::{
    Error, NewUser, PendingVerification, ProfileChanges, ProfileUpdate, Registration, User,
    UserId,
    clock::{Clock, SystemClock},
    crypto::{
        Argon2PasswordHasher, CodeGenerator, NumericCodeGenerator, PasswordHasher,
        constant_time_compare,
    },
    error::{
        AuthError, ConflictError, NotFoundError, ValidationError, VerificationError,
        utilities::RequiredFieldExt,
    },
    phone::{PhoneNormalizer, RegionPhoneNormalizer},
    repositories::UserRepository,
    services::mailer::EmailSender,
    token::TokenIssuer,
    validation::{is_valid_email, validate_email, validate_name, validate_password},
};

/// How long a freshly generated verification code is advertised as valid.
pub const VERIFICATION_CODE_TTL_MINUTES: i64 = 15;

/// Extra time a verification code is still accepted after its stated expiry.
pub const VERIFICATION_GRACE_PERIOD_HOURS: i64 = 2;

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub user: User,
    pub access_token: String,
}

/// Account lifecycle: registration, email verification, login and profile updates.
///
/// Collaborators are injected at construction and shared through `Arc`s; the service itself
/// holds no mutable state and can be shared across request tasks.
pub struct AccountService<R: UserRepository> {
    repository: Arc<R>,
    token_issuer: Arc<dyn TokenIssuer>,
    email_sender: Arc<dyn EmailSender>,
    password_hasher: Arc<dyn PasswordHasher>,
    phone_normalizer: Arc<dyn PhoneNormalizer>,
    code_generator: Arc<dyn CodeGenerator>,
    clock: Arc<dyn Clock>,
}

impl<R: UserRepository> AccountService<R> {
    /// Create a service with Argon2 hashing, French phone rules, six digit codes and the
    /// system clock.
    pub fn new(
        repository: Arc<R>,
        token_issuer: Arc<dyn TokenIssuer>,
        email_sender: Arc<dyn EmailSender>,
    ) -> Self {
        Self {
            repository,
            token_issuer,
            email_sender,
            password_hasher: Arc::new(Argon2PasswordHasher),
            phone_normalizer: Arc::new(RegionPhoneNormalizer::default()),
            code_generator: Arc::new(NumericCodeGenerator::default()),
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_password_hasher(mut self, hasher: Arc<dyn PasswordHasher>) -> Self {
        self.password_hasher = hasher;
        self
    }

    pub fn with_phone_normalizer(mut self, normalizer: Arc<dyn PhoneNormalizer>) -> Self {
        self.phone_normalizer = normalizer;
        self
    }

    pub fn with_code_generator(mut self, generator: Arc<dyn CodeGenerator>) -> Self {
        self.code_generator = generator;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Register a new, unverified user and email them a verification code.
    ///
    /// The user is only persisted once the verification email has been accepted by the
    /// transport. An invalid phone number does not block registration; it is dropped.
    pub async fn register(&self, registration: Registration) -> Result<User, Error> {
        let first_name = registration.first_name.require_field("First name")?;
        let last_name = registration.last_name.require_field("Last name")?;
        let email = registration.email.require_field("Email")?;
        let password = registration.password.require_field("Password")?;
        let civility = registration.civility.require_field("Civility")?;

        validate_email(&email)?;
        validate_password(&password)?;

        let phone_number = match non_blank(registration.phone_number) {
            Some(raw) => {
                let normalized = self.phone_normalizer.normalize(&raw);
                if !normalized.is_valid {
                    warn!(email = %email, "Phone number is not valid for the configured region");
                }
                normalized.number
            }
            None => None,
        };

        if self.repository.find_by_email(&email).await?.is_some() {
            debug!(email = %email, "Registration rejected, email already in use");
            return Err(ConflictError::EmailTaken.into());
        }

        let password_hash = self.password_hasher.hash(&password)?;

        let pending = PendingVerification {
            code: self.code_generator.generate(),
            expires_at: self.clock.minutes_from_now(VERIFICATION_CODE_TTL_MINUTES),
        };

        if let Err(e) = self
            .email_sender
            .send_verification_email(&email, &pending.code, Some(&first_name))
            .await
        {
            warn!(email = %email, error = %e, "Failed to send verification email");
            return Err(e);
        }

        let new_user = NewUser::builder()
            .first_name(first_name)
            .last_name(last_name)
            .email(email)
            .phone_number(phone_number)
            .civility(civility)
            .newsletter(registration.newsletter.unwrap_or(false))
            .password_hash(password_hash)
            .pending_verification(pending)
            .build()?;

        let user = self.repository.create(new_user).await?;

        info!(user_id = %user.id, "User registered");

        Ok(user)
    }

    /// Confirm ownership of an email address with the code sent at registration.
    pub async fn verify_email(&self, email: &str, code: &str) -> Result<(), Error> {
        let user = self
            .repository
            .find_by_email(email)
            .await?
            .ok_or(NotFoundError::User)?;

        let Some(pending) = &user.pending_verification else {
            debug!(user_id = %user.id, "No verification code pending");
            return Err(VerificationError::CodeMissing.into());
        };

        let deadline = pending.expires_at + Duration::hours(VERIFICATION_GRACE_PERIOD_HOURS);
        if self.clock.now() > deadline {
            debug!(user_id = %user.id, "Verification code expired");
            return Err(VerificationError::CodeExpired.into());
        }

        if !constant_time_compare(pending.code.as_bytes(), code.as_bytes()) {
            debug!(user_id = %user.id, "Verification code mismatch");
            return Err(VerificationError::CodeMismatch.into());
        }

        self.repository.mark_email_verified(&user.id).await?;

        info!(user_id = %user.id, "Email verified");

        Ok(())
    }

    /// Check credentials and issue a fresh access token.
    ///
    /// An unknown email and a wrong password both yield [`AuthError::InvalidCredentials`].
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginOutcome, Error> {
        let email = Some(email).require_field("Email")?;
        // Only an empty password counts as missing
        if password.is_empty() {
            return Err(ValidationError::MissingField("Password is required".to_string()).into());
        }

        let user = if is_valid_email(email) {
            self.repository.find_by_email(email).await?
        } else {
            None
        };

        let Some(mut user) =
            user.filter(|user| self.password_hasher.verify(password, &user.password_hash))
        else {
            debug!("Login rejected");
            return Err(AuthError::InvalidCredentials.into());
        };

        let access_token = self.token_issuer.issue(&user, self.clock.now())?;
        self.repository
            .set_access_token(&user.id, &access_token)
            .await?;

        info!(user_id = %user.id, "User logged in");

        user.access_token = Some(access_token.clone());
        Ok(LoginOutcome { user, access_token })
    }

    /// Apply a partial profile update.
    ///
    /// Absent or blank fields keep their stored value. Names and email are validated on
    /// their effective value after the merge; a supplied phone number must be valid.
    pub async fn update_profile(&self, id: &str, changes: ProfileChanges) -> Result<User, Error> {
        let id = UserId::parse(id)?;

        let user = self
            .repository
            .find_by_id(&id)
            .await?
            .ok_or(NotFoundError::User)?;

        let first_name = non_blank(changes.first_name).unwrap_or(user.first_name);
        let last_name = non_blank(changes.last_name).unwrap_or(user.last_name);
        let email = non_blank(changes.email).unwrap_or(user.email);

        validate_name("First name", &first_name)?;
        validate_name("Last name", &last_name)?;
        validate_email(&email)?;

        let phone_number = match non_blank(changes.phone_number) {
            Some(raw) => {
                let normalized = self.phone_normalizer.normalize(&raw);
                match normalized.number {
                    Some(number) if normalized.is_valid => Some(number),
                    _ => return Err(ValidationError::InvalidPhone(raw).into()),
                }
            }
            None => user.phone_number,
        };

        let update = ProfileUpdate {
            first_name,
            last_name,
            email,
            phone_number,
        };

        let updated = self.repository.update_profile(&id, &update).await?;

        info!(user_id = %id, "Profile updated");

        Ok(updated)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::MailError,
        token::{JwtConfig, JwtTokenIssuer},
    };
    use async_trait::async_trait;
    use chrono::{DateTime, Utc};
    use std::collections::HashMap;
    use tokio::sync::Mutex;

    #[derive(Default)]
    struct MockUserRepository {
        users: Mutex<HashMap<i64, User>>,
        next_id: Mutex<i64>,
    }

    impl MockUserRepository {
        async fn count(&self) -> usize {
            self.users.lock().await.len()
        }

        async fn get(&self, id: i64) -> User {
            self.users.lock().await.get(&id).cloned().unwrap()
        }
    }

    #[async_trait]
    impl UserRepository for MockUserRepository {
        async fn create(&self, new_user: NewUser) -> Result<User, Error> {
            let mut users = self.users.lock().await;
            if users.values().any(|u| u.email == new_user.email) {
                return Err(ConflictError::EmailTaken.into());
            }

            let mut next_id = self.next_id.lock().await;
            *next_id += 1;

            let now = Utc::now();
            let user = User {
                id: UserId::new(*next_id),
                first_name: new_user.first_name,
                last_name: new_user.last_name,
                email: new_user.email,
                phone_number: new_user.phone_number,
                civility: new_user.civility,
                newsletter: new_user.newsletter,
                password_hash: new_user.password_hash,
                is_verified: false,
                pending_verification: Some(new_user.pending_verification),
                access_token: None,
                created_at: now,
                updated_at: now,
            };
            users.insert(*next_id, user.clone());
            Ok(user)
        }

        async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, Error> {
            Ok(self.users.lock().await.get(&id.as_i64()).cloned())
        }

        async fn find_by_email(&self, email: &str) -> Result<Option<User>, Error> {
            Ok(self
                .users
                .lock()
                .await
                .values()
                .find(|u| u.email == email)
                .cloned())
        }

        async fn mark_email_verified(&self, id: &UserId) -> Result<(), Error> {
            let mut users = self.users.lock().await;
            let user = users.get_mut(&id.as_i64()).ok_or(NotFoundError::User)?;
            user.is_verified = true;
            user.pending_verification = None;
            Ok(())
        }

        async fn set_access_token(&self, id: &UserId, token: &str) -> Result<(), Error> {
            let mut users = self.users.lock().await;
            let user = users.get_mut(&id.as_i64()).ok_or(NotFoundError::User)?;
            user.access_token = Some(token.to_string());
            Ok(())
        }

        async fn update_profile(&self, id: &UserId, update: &ProfileUpdate) -> Result<User, Error> {
            let mut users = self.users.lock().await;
            if users
                .values()
                .any(|u| u.id != *id && u.email == update.email)
            {
                return Err(ConflictError::EmailTaken.into());
            }

            let user = users.get_mut(&id.as_i64()).ok_or(NotFoundError::User)?;
            user.first_name = update.first_name.clone();
            user.last_name = update.last_name.clone();
            user.email = update.email.clone();
            user.phone_number = update.phone_number.clone();
            user.updated_at = Utc::now();
            Ok(user.clone())
        }
    }

    /// Records every verification email along with the number of stored users at send time.
    struct MockEmailSender {
        repository: Arc<MockUserRepository>,
        sent: Mutex<Vec<(String, String, usize)>>,
        fail: bool,
    }

    #[async_trait]
    impl EmailSender for MockEmailSender {
        async fn send_verification_email(
            &self,
            to: &str,
            code: &str,
            _user_name: Option<&str>,
        ) -> Result<(), Error> {
            if self.fail {
                return Err(MailError::Delivery("connection refused".to_string()).into());
            }
            let stored = self.repository.count().await;
            self.sent
                .lock()
                .await
                .push((to.to_string(), code.to_string(), stored));
            Ok(())
        }
    }

    struct PlainHasher;

    impl PasswordHasher for PlainHasher {
        fn hash(&self, password: &str) -> Result<String, Error> {
            Ok(format!("hashed:{password}"))
        }

        fn verify(&self, password: &str, hash: &str) -> bool {
            hash == format!("hashed:{password}")
        }
    }

    struct FixedCode;

    impl CodeGenerator for FixedCode {
        fn generate(&self) -> String {
            "123456".to_string()
        }
    }

    struct FixedClock(std::sync::Mutex<DateTime<Utc>>);

    impl FixedClock {
        fn set(&self, now: DateTime<Utc>) {
            *self.0.lock().unwrap() = now;
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            *self.0.lock().unwrap()
        }
    }

    struct Harness {
        service: AccountService<MockUserRepository>,
        repository: Arc<MockUserRepository>,
        sender: Arc<MockEmailSender>,
        clock: Arc<FixedClock>,
        tokens: Arc<JwtTokenIssuer>,
    }

    fn harness_with(fail_email: bool) -> Harness {
        let repository = Arc::new(MockUserRepository::default());
        let sender = Arc::new(MockEmailSender {
            repository: repository.clone(),
            sent: Mutex::new(Vec::new()),
            fail: fail_email,
        });
        let clock = Arc::new(FixedClock(std::sync::Mutex::new(Utc::now())));
        let tokens = Arc::new(JwtTokenIssuer::new(JwtConfig::new_hs256(
            b"account-service-test-secret".to_vec(),
        )));

        let service = AccountService::new(repository.clone(), tokens.clone(), sender.clone())
            .with_password_hasher(Arc::new(PlainHasher))
            .with_code_generator(Arc::new(FixedCode))
            .with_clock(clock.clone());

        Harness {
            service,
            repository,
            sender,
            clock,
            tokens,
        }
    }

    fn harness() -> Harness {
        harness_with(false)
    }

    fn registration() -> Registration {
        Registration {
            first_name: Some("Jean".to_string()),
            last_name: Some("Dupont".to_string()),
            email: Some("jean.dupont@example.fr".to_string()),
            password: Some("Passw0rd".to_string()),
            phone_number: Some("07 69 66 63 70".to_string()),
            civility: Some("Mr".to_string()),
            newsletter: None,
        }
    }

    #[tokio::test]
    async fn test_register_creates_unverified_user_after_email() {
        let h = harness();
        let user = h.service.register(registration()).await.unwrap();

        assert!(!user.is_verified);
        assert!(!user.newsletter);
        assert_eq!(user.phone_number.as_deref(), Some("+33769666370"));
        assert_eq!(user.password_hash, "hashed:Passw0rd");
        assert_eq!(user.verification_code(), Some("123456"));
        assert_eq!(
            user.verification_expires_at(),
            Some(h.clock.now() + Duration::minutes(15))
        );
        assert_eq!(h.repository.count().await, 1);

        let sent = h.sender.sent.lock().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "jean.dupont@example.fr");
        assert_eq!(sent[0].1, "123456");
        // Email dispatched before the record existed
        assert_eq!(sent[0].2, 0);
    }

    #[tokio::test]
    async fn test_register_email_failure_persists_nothing() {
        let h = harness_with(true);
        let result = h.service.register(registration()).await;

        assert!(matches!(result, Err(Error::Mail(_))));
        assert!(result.unwrap_err().is_dependency_error());
        assert_eq!(h.repository.count().await, 0);
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let h = harness();
        h.service.register(registration()).await.unwrap();

        let result = h.service.register(registration()).await;
        assert!(matches!(
            result,
            Err(Error::Conflict(ConflictError::EmailTaken))
        ));
        assert_eq!(h.repository.count().await, 1);
        assert_eq!(h.sender.sent.lock().await.len(), 1);
    }

    #[tokio::test]
    async fn test_register_missing_fields() {
        let h = harness();

        for registration in [
            Registration {
                first_name: None,
                ..registration()
            },
            Registration {
                last_name: Some("   ".to_string()),
                ..registration()
            },
            Registration {
                email: Some(String::new()),
                ..registration()
            },
            Registration {
                password: None,
                ..registration()
            },
            Registration {
                civility: None,
                ..registration()
            },
        ] {
            let result = h.service.register(registration).await;
            assert!(matches!(
                result,
                Err(Error::Validation(ValidationError::MissingField(_)))
            ));
        }

        assert_eq!(h.repository.count().await, 0);
        assert!(h.sender.sent.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_register_password_policy() {
        let h = harness();

        for weak in ["password", "PASS123", "short1A"] {
            let result = h
                .service
                .register(Registration {
                    password: Some(weak.to_string()),
                    ..registration()
                })
                .await;
            assert!(matches!(
                result,
                Err(Error::Validation(ValidationError::WeakPassword))
            ));
        }

        assert!(h.service.register(registration()).await.is_ok());
    }

    #[tokio::test]
    async fn test_register_rejects_malformed_email() {
        let h = harness();
        let result = h
            .service
            .register(Registration {
                email: Some("jean.dupont@example".to_string()),
                ..registration()
            })
            .await;

        assert!(matches!(
            result,
            Err(Error::Validation(ValidationError::InvalidEmail(_)))
        ));
    }

    #[tokio::test]
    async fn test_register_drops_invalid_phone() {
        let h = harness();
        let user = h
            .service
            .register(Registration {
                phone_number: Some("12345".to_string()),
                newsletter: Some(true),
                ..registration()
            })
            .await
            .unwrap();

        assert!(user.phone_number.is_none());
        assert!(user.newsletter);
    }

    #[tokio::test]
    async fn test_verify_email_once() {
        let h = harness();
        let user = h.service.register(registration()).await.unwrap();

        h.service
            .verify_email("jean.dupont@example.fr", "123456")
            .await
            .unwrap();

        let stored = h.repository.get(user.id.as_i64()).await;
        assert!(stored.is_verified);
        assert!(stored.pending_verification.is_none());

        let second = h
            .service
            .verify_email("jean.dupont@example.fr", "123456")
            .await;
        assert!(matches!(
            second,
            Err(Error::Verification(VerificationError::CodeMissing))
        ));
    }

    #[tokio::test]
    async fn test_verify_email_grace_window_boundary() {
        let h = harness();
        let user = h.service.register(registration()).await.unwrap();
        let expires_at = user.verification_expires_at().unwrap();

        h.clock
            .set(expires_at + Duration::hours(2) + Duration::seconds(1));
        let late = h
            .service
            .verify_email("jean.dupont@example.fr", "123456")
            .await;
        assert!(matches!(
            late,
            Err(Error::Verification(VerificationError::CodeExpired))
        ));

        h.clock.set(expires_at + Duration::hours(2));
        h.service
            .verify_email("jean.dupont@example.fr", "123456")
            .await
            .unwrap();
        assert!(h.repository.get(user.id.as_i64()).await.is_verified);
    }

    #[tokio::test]
    async fn test_verify_email_wrong_code() {
        let h = harness();
        let user = h.service.register(registration()).await.unwrap();

        let result = h
            .service
            .verify_email("jean.dupont@example.fr", "654321")
            .await;
        assert!(matches!(
            result,
            Err(Error::Verification(VerificationError::CodeMismatch))
        ));
        assert!(!h.repository.get(user.id.as_i64()).await.is_verified);
    }

    #[tokio::test]
    async fn test_verify_email_unknown_user() {
        let h = harness();
        let result = h.service.verify_email("nobody@example.fr", "123456").await;
        assert!(matches!(result, Err(Error::NotFound(NotFoundError::User))));
    }

    #[tokio::test]
    async fn test_login_issues_and_persists_token() {
        let h = harness();
        let user = h.service.register(registration()).await.unwrap();

        let outcome = h
            .service
            .login("jean.dupont@example.fr", "Passw0rd")
            .await
            .unwrap();

        let claims = h.tokens.verify(&outcome.access_token).unwrap();
        assert_eq!(claims.sub, user.id.to_string());
        assert_eq!(claims.firstname, "Jean");
        assert_eq!(claims.email, "jean.dupont@example.fr");

        let stored = h.repository.get(user.id.as_i64()).await;
        assert_eq!(stored.access_token, Some(outcome.access_token.clone()));
        assert_eq!(outcome.user.access_token, Some(outcome.access_token));
    }

    #[tokio::test]
    async fn test_login_does_not_reveal_which_credential_failed() {
        let h = harness();
        h.service.register(registration()).await.unwrap();

        let wrong_password = h
            .service
            .login("jean.dupont@example.fr", "Wrongpass1")
            .await
            .unwrap_err();
        let unknown_email = h
            .service
            .login("nobody@example.fr", "Passw0rd")
            .await
            .unwrap_err();
        let malformed_email = h
            .service
            .login("not-an-email", "Passw0rd")
            .await
            .unwrap_err();

        assert!(wrong_password.is_auth_error());
        assert!(unknown_email.is_auth_error());
        assert!(malformed_email.is_auth_error());
        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
        assert_eq!(wrong_password.to_string(), malformed_email.to_string());
    }

    #[tokio::test]
    async fn test_login_missing_fields() {
        let h = harness();
        assert!(h.service.login("", "Passw0rd").await.unwrap_err().is_validation_error());
        assert!(
            h.service
                .login("jean.dupont@example.fr", "")
                .await
                .unwrap_err()
                .is_validation_error()
        );
        assert!(
            h.service
                .login("jean.dupont@example.fr", "   ")
                .await
                .unwrap_err()
                .is_auth_error()
        );
    }

    #[tokio::test]
    async fn test_update_profile_partial() {
        let h = harness();
        let user = h.service.register(registration()).await.unwrap();

        let updated = h
            .service
            .update_profile(
                &user.id.to_string(),
                ProfileChanges {
                    last_name: Some("Martin".to_string()),
                    email: Some(String::new()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.first_name, "Jean");
        assert_eq!(updated.last_name, "Martin");
        assert_eq!(updated.email, "jean.dupont@example.fr");
        assert_eq!(updated.phone_number.as_deref(), Some("+33769666370"));
    }

    #[tokio::test]
    async fn test_update_profile_rejects_invalid_name_without_mutation() {
        let h = harness();
        let user = h.service.register(registration()).await.unwrap();

        let result = h
            .service
            .update_profile(
                &user.id.to_string(),
                ProfileChanges {
                    first_name: Some("Jean2".to_string()),
                    email: Some("jean.martin@example.fr".to_string()),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(
            result,
            Err(Error::Validation(ValidationError::InvalidName(_)))
        ));
        let stored = h.repository.get(user.id.as_i64()).await;
        assert_eq!(stored.first_name, "Jean");
        assert_eq!(stored.email, "jean.dupont@example.fr");
    }

    #[tokio::test]
    async fn test_update_profile_is_idempotent() {
        let h = harness();
        let user = h.service.register(registration()).await.unwrap();
        let changes = ProfileChanges {
            first_name: Some("Paul".to_string()),
            phone_number: Some("+33612345678".to_string()),
            ..Default::default()
        };

        let first = h
            .service
            .update_profile(&user.id.to_string(), changes.clone())
            .await
            .unwrap();
        let second = h
            .service
            .update_profile(&user.id.to_string(), changes)
            .await
            .unwrap();

        assert_eq!(first.first_name, second.first_name);
        assert_eq!(first.last_name, second.last_name);
        assert_eq!(first.email, second.email);
        assert_eq!(first.phone_number, second.phone_number);
        assert_eq!(second.phone_number.as_deref(), Some("+33612345678"));
    }

    #[tokio::test]
    async fn test_update_profile_rejects_invalid_phone() {
        let h = harness();
        let user = h.service.register(registration()).await.unwrap();

        let result = h
            .service
            .update_profile(
                &user.id.to_string(),
                ProfileChanges {
                    phone_number: Some("12345".to_string()),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(
            result,
            Err(Error::Validation(ValidationError::InvalidPhone(_)))
        ));
    }

    #[tokio::test]
    async fn test_update_profile_identifier_errors() {
        let h = harness();

        let invalid = h
            .service
            .update_profile("abc", ProfileChanges::default())
            .await;
        assert!(matches!(
            invalid,
            Err(Error::Validation(ValidationError::InvalidUserId(_)))
        ));

        let missing = h
            .service
            .update_profile("", ProfileChanges::default())
            .await;
        assert!(missing.unwrap_err().is_validation_error());

        let unknown = h
            .service
            .update_profile("99", ProfileChanges::default())
            .await;
        assert!(matches!(unknown, Err(Error::NotFound(NotFoundError::User))));
    }

    #[tokio::test]
    async fn test_update_profile_email_taken_by_another_user() {
        let h = harness();
        h.service.register(registration()).await.unwrap();
        let other = h
            .service
            .register(Registration {
                email: Some("paul@example.fr".to_string()),
                ..registration()
            })
            .await
            .unwrap();

        let result = h
            .service
            .update_profile(
                &other.id.to_string(),
                ProfileChanges {
                    email: Some("jean.dupont@example.fr".to_string()),
                    ..Default::default()
                },
            )
            .await;

        assert!(result.unwrap_err().is_conflict_error());
    }
}
