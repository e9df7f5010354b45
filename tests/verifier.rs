// ABOUTME: Integration tests for the external process verifier.
// ABOUTME: Runs real shell commands to exercise spawn, pass, and fail paths.

use stratos::verifier::{ProcessVerifier, VerifierOps, VerifyError};

#[tokio::test]
async fn passing_command_yields_success() {
    let verifier = ProcessVerifier::new(vec![
        "sh".to_string(),
        "-c".to_string(),
        "exit 0".to_string(),
    ]);

    let report = verifier.verify("https://example.com").await.unwrap();
    assert!(report.success);
    assert_eq!(report.exit_code, Some(0));
}

#[tokio::test]
async fn failing_command_yields_failure_with_code() {
    let verifier = ProcessVerifier::new(vec![
        "sh".to_string(),
        "-c".to_string(),
        "exit 3".to_string(),
    ]);

    let report = verifier.verify("https://example.com").await.unwrap();
    assert!(!report.success);
    assert_eq!(report.exit_code, Some(3));
}

#[tokio::test]
async fn stdout_is_captured() {
    let verifier = ProcessVerifier::new(vec![
        "sh".to_string(),
        "-c".to_string(),
        "echo checked $0".to_string(),
        "{url}".to_string(),
    ]);

    let report = verifier.verify("https://d111.cloudfront.net").await.unwrap();
    assert!(report.success);
    assert_eq!(report.stdout.trim(), "checked https://d111.cloudfront.net");
}

#[tokio::test]
async fn missing_program_is_a_spawn_error() {
    let verifier = ProcessVerifier::new(vec!["definitely-not-a-real-binary".to_string()]);

    let err = verifier.verify("https://example.com").await.unwrap_err();
    assert!(matches!(err, VerifyError::Spawn(_)));
}
