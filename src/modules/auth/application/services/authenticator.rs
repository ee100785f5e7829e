use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::modules::auth::application::domain::entities::User;
use crate::modules::auth::application::ports::outgoing::{
    secret_hasher::SecretHasher, user_repository::UserRepository,
};
use crate::shared::error::ApiError;

/// Plain HTTP-Basic credentials as carried by a request.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// The resolved caller of a request.
#[derive(Debug, Clone)]
pub enum Principal {
    Root(User),
    Node(User),
    User(User),
}

impl Principal {
    /// The regular user behind the principal; system principals have none.
    pub fn as_user(&self) -> Option<&User> {
        match self {
            Principal::User(user) => Some(user),
            _ => None,
        }
    }

    pub fn user_id(&self) -> Uuid {
        match self {
            Principal::Root(u) | Principal::Node(u) | Principal::User(u) => u.id,
        }
    }

    /// Root counts as a platform administrator everywhere.
    pub fn is_platform_admin(&self) -> bool {
        match self {
            Principal::Root(_) => true,
            Principal::Node(_) => false,
            Principal::User(user) => user.admin_platform,
        }
    }
}

/// One clause of a route's access policy; clauses are evaluated left to
/// right and the first match wins.
#[derive(Debug, Clone)]
pub enum AccessRule {
    AllowRoot,
    AllowNode,
    AllowAny,
    Role(&'static str),
    Id(Uuid),
    Mail(String),
}

/// Resolves HTTP-Basic credentials into a principal and enforces per-route
/// rule sets. Root and node are fixed system users compared against the
/// configured secrets; everything else is a stored user identified by mail.
pub struct Authenticator {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn SecretHasher>,
    root_secret: String,
    node_secret: String,
}

impl Authenticator {
    pub fn new(
        users: Arc<dyn UserRepository>,
        hasher: Arc<dyn SecretHasher>,
        root_secret: &str,
        node_secret: &str,
    ) -> Self {
        Self {
            users,
            hasher,
            root_secret: root_secret.to_string(),
            node_secret: node_secret.to_string(),
        }
    }

    async fn authenticate(&self, credentials: &Credentials) -> Result<Principal, ApiError> {
        if credentials.username == "root"
            && !self.root_secret.is_empty()
            && credentials.password == self.root_secret
        {
            return Ok(Principal::Root(User::root(&self.root_secret)));
        }
        if credentials.username == "node"
            && !self.node_secret.is_empty()
            && credentials.password == self.node_secret
        {
            return Ok(Principal::Node(User::node(&self.node_secret)));
        }
        let mail = credentials.username.to_lowercase();
        let user = self
            .users
            .find_by_mail(&mail)
            .await
            .map_err(ApiError::from)?
            .filter(|user| {
                self.hasher
                    .verify(&credentials.password, &user.secret)
                    .unwrap_or(false)
            });
        match user {
            Some(user) => Ok(Principal::User(user)),
            None => Err(ApiError::unauthorized("Authentication Failed.")),
        }
    }

    /// Authenticate and evaluate `rules` in order; no match is a 403.
    pub async fn require(
        &self,
        credentials: &Credentials,
        rules: &[AccessRule],
    ) -> Result<Principal, ApiError> {
        let principal = self.authenticate(credentials).await?;
        for rule in rules {
            match (rule, &principal) {
                (AccessRule::AllowRoot, Principal::Root(_)) => {
                    info!("Allowed authenticated root");
                    return Ok(principal);
                }
                (AccessRule::AllowNode, Principal::Node(_)) => {
                    info!("Allowed authenticated worker/node");
                    return Ok(principal);
                }
                (AccessRule::AllowAny, Principal::User(user)) => {
                    info!(user = %user.name(), "Allowed authenticated user");
                    return Ok(principal);
                }
                (AccessRule::Role(role), Principal::User(user)) => {
                    if *role == "admin_platform" && user.admin_platform {
                        info!(user = %user.name(), role, "Allowed authenticated user with role");
                        return Ok(principal);
                    }
                }
                (AccessRule::Id(id), Principal::User(user)) => {
                    if user.id == *id {
                        info!(user = %user.name(), %id, "Allowed authenticated user with id");
                        return Ok(principal);
                    }
                }
                (AccessRule::Mail(mail), Principal::User(user)) => {
                    if user.mail == *mail {
                        info!(user = %user.name(), mail, "Allowed authenticated user with mail");
                        return Ok(principal);
                    }
                }
                _ => {}
            }
        }
        Err(ApiError::forbidden(format!(
            "Insufficient rights for {}.",
            credentials.username
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::auth::adapter::outgoing::user_repository_memory::InMemoryUserRepository;
    use crate::modules::auth::application::services::argon2_hasher::Argon2SecretHasher;

    async fn authenticator_with_user() -> (Authenticator, User) {
        let repo = Arc::new(InMemoryUserRepository::new());
        let hasher = Arc::new(Argon2SecretHasher::new());
        let mut user = User::new("Tabby", "Fischer", "t@f.com", "", false);
        user.secret = hasher.hash("miaow").unwrap();
        repo.save(&user).await.unwrap();
        (Authenticator::new(repo, hasher, "r00t", "n0de"), user)
    }

    fn creds(username: &str, password: &str) -> Credentials {
        Credentials {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn root_matches_only_its_rule() {
        let (auth, _) = authenticator_with_user().await;
        let ok = auth
            .require(&creds("root", "r00t"), &[AccessRule::AllowRoot])
            .await;
        assert!(matches!(ok, Ok(Principal::Root(_))));

        let forbidden = auth
            .require(&creds("root", "r00t"), &[AccessRule::AllowAny])
            .await;
        assert!(matches!(forbidden, Err(ApiError::Forbidden(_))));
    }

    #[tokio::test]
    async fn node_is_not_a_regular_user() {
        let (auth, _) = authenticator_with_user().await;
        let ok = auth
            .require(&creds("node", "n0de"), &[AccessRule::AllowNode])
            .await;
        assert!(matches!(ok, Ok(Principal::Node(_))));

        let forbidden = auth
            .require(&creds("node", "n0de"), &[AccessRule::AllowAny])
            .await;
        assert!(matches!(forbidden, Err(ApiError::Forbidden(_))));
    }

    #[tokio::test]
    async fn user_credentials_are_verified_against_the_hash() {
        let (auth, user) = authenticator_with_user().await;
        let ok = auth
            .require(&creds("t@f.com", "miaow"), &[AccessRule::AllowAny])
            .await
            .unwrap();
        assert_eq!(ok.user_id(), user.id);

        let bad = auth
            .require(&creds("t@f.com", "meow"), &[AccessRule::AllowAny])
            .await;
        assert!(matches!(bad, Err(ApiError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn first_matching_rule_wins() {
        let (auth, user) = authenticator_with_user().await;
        let rules = [
            AccessRule::AllowRoot,
            AccessRule::Role("admin_platform"),
            AccessRule::Id(user.id),
        ];
        let ok = auth.require(&creds("t@f.com", "miaow"), &rules).await;
        assert!(ok.is_ok(), "id clause should match a non-admin user");
    }

    #[tokio::test]
    async fn unknown_user_is_unauthorized() {
        let (auth, _) = authenticator_with_user().await;
        let err = auth
            .require(&creds("charlie", "passw0rd"), &[AccessRule::AllowAny])
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn empty_configured_secret_never_matches() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let hasher = Arc::new(Argon2SecretHasher::new());
        let auth = Authenticator::new(repo, hasher, "", "");
        let err = auth
            .require(&creds("root", ""), &[AccessRule::AllowRoot])
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized(_)));
    }
}
