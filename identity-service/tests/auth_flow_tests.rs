use std::sync::Arc;

use auth::Authenticator;
use chrono::Duration;
use chrono::Utc;
use futures::future::join_all;
use identity_service::domain::identity::errors::AuthError;
use identity_service::domain::identity::models::CredentialPolicy;
use identity_service::domain::identity::ports::AuthServicePort;
use identity_service::domain::identity::service::AuthService;
use identity_service::outbound::repositories::InMemoryCredentialStore;

const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

struct Harness {
    service: Arc<AuthService<InMemoryCredentialStore>>,
    store: Arc<InMemoryCredentialStore>,
    authenticator: Arc<Authenticator>,
}

fn harness() -> Harness {
    let store = Arc::new(InMemoryCredentialStore::new());
    let authenticator = Arc::new(
        Authenticator::new(JWT_SECRET, Duration::hours(1))
            .expect("Failed to build authenticator"),
    );
    let service = Arc::new(AuthService::new(
        Arc::clone(&store),
        Arc::clone(&authenticator),
        CredentialPolicy::default(),
    ));

    Harness {
        service,
        store,
        authenticator,
    }
}

#[tokio::test]
async fn test_register_login_authorize_scenario() {
    let Harness {
        service,
        authenticator,
        ..
    } = harness();

    let alice = service
        .register("alice", "secret1")
        .await
        .expect("First registration failed");
    let record = serde_json::to_value(&alice).unwrap();
    assert!(record.get("secret_hash").is_none());
    assert!(record.get("password").is_none());

    assert_eq!(
        service.register("alice", "secret2").await.unwrap_err(),
        AuthError::DuplicateIdentity
    );

    assert_eq!(
        service.login("alice", "wrongpass").await.unwrap_err(),
        AuthError::InvalidCredentials
    );

    let token = service
        .login("alice", "secret1")
        .await
        .expect("Login failed");

    let authenticated = service
        .authorize(Some(&token.access_token))
        .expect("Guard rejected a fresh token");
    assert_eq!(authenticated.subject, alice.id);
    assert_eq!(authenticated.identifier, "alice");

    let expired = authenticator
        .issuer()
        .issue_at(alice.id, "alice", Utc::now() - Duration::hours(1))
        .unwrap();
    assert_eq!(
        service.authorize(Some(&expired.access_token)).unwrap_err(),
        AuthError::InvalidCredential
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_registrations_yield_one_identity() {
    let Harness { service, store, .. } = harness();

    let attempts = (0..8).map(|i| {
        let service = Arc::clone(&service);
        tokio::spawn(async move { service.register("alice", &format!("secret{}", i)).await })
    });

    let results: Vec<_> = join_all(attempts)
        .await
        .into_iter()
        .map(|joined| joined.expect("Registration task panicked"))
        .collect();

    let successes = results.iter().filter(|r| r.is_ok()).count();
    let duplicates = results
        .iter()
        .filter(|r| matches!(r, Err(AuthError::DuplicateIdentity)))
        .count();

    assert_eq!(successes, 1);
    assert_eq!(duplicates, results.len() - 1);
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn test_login_after_register_returns_matching_subject() {
    let Harness { service, .. } = harness();

    for (identifier, secret) in [
        ("bob", "hunter22"),
        ("carol@example.com", "correct horse"),
        ("dave_99", "p@ssw0rd!"),
    ] {
        let registered = service.register(identifier, secret).await.unwrap();
        let token = service.login(identifier, secret).await.unwrap();
        let claims = service.authorize(Some(&token.access_token)).unwrap();

        assert_eq!(claims.subject, registered.id);
        assert_eq!(claims.identifier, identifier);
    }
}
