#[cfg(test)]
mod tests {
    use super::super::*;
    use async_trait::async_trait;
    use error::{DomainError, SubmissionError};
    use ports::SubmissionPort;
    use registration_sdk::{FieldId, NewRegistration, RegistrationInput, SubmissionStatus};
    use service::{RegistrationService, ServiceConfig, SubmissionGate};
    use std::sync::{Arc, Mutex};
    use tokio::sync::Notify;
    use tracing_test::traced_test;

    // Mock submission port for testing
    struct MockPort {
        result: Result<(), SubmissionError>,
        sent: Mutex<Vec<NewRegistration>>,
    }

    impl MockPort {
        fn returning(result: Result<(), SubmissionError>) -> Arc<Self> {
            Arc::new(Self {
                result,
                sent: Mutex::new(Vec::new()),
            })
        }

        fn sent(&self) -> Vec<NewRegistration> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl SubmissionPort for MockPort {
        async fn submit(&self, body: &NewRegistration) -> Result<(), SubmissionError> {
            self.sent.lock().unwrap().push(body.clone());
            self.result.clone()
        }
    }

    // Holds the request open until released
    #[derive(Default)]
    struct BlockingPort {
        started: Notify,
        release: Notify,
    }

    #[async_trait]
    impl SubmissionPort for BlockingPort {
        async fn submit(&self, _body: &NewRegistration) -> Result<(), SubmissionError> {
            self.started.notify_one();
            self.release.notified().await;
            Ok(())
        }
    }

    fn valid_input() -> RegistrationInput {
        RegistrationInput {
            name: "Cristian Trindade".to_owned(),
            email: "teste@teste.com".to_owned(),
            password: "S3nh@!123".to_owned(),
            password_confirmation: "S3nh@!123".to_owned(),
            access_code: "ABC-123".to_owned(),
        }
    }

    fn service_with(port: Arc<dyn SubmissionPort>) -> RegistrationService {
        RegistrationService::new(port, ServiceConfig::default())
    }

    #[tokio::test]
    async fn test_success_sets_configured_message() {
        let port = MockPort::returning(Ok(()));
        let service = service_with(port.clone());

        let status = service.register(&valid_input()).await.unwrap();

        assert_eq!(
            status,
            SubmissionStatus::succeeded("Registration completed successfully")
        );
        assert_eq!(port.sent(), vec![NewRegistration::from(&valid_input())]);
    }

    #[tokio::test]
    async fn test_rejection_shows_server_message() {
        let port = MockPort::returning(Err(SubmissionError::rejected(
            400,
            Some("Usu\u{e1}rio j\u{e1} existe".to_owned()),
        )));
        let service = service_with(port);

        let status = service.register(&valid_input()).await.unwrap();

        assert!(status.failed);
        assert_eq!(status.message, "Usu\u{e1}rio j\u{e1} existe");
    }

    #[tokio::test]
    async fn test_rejection_without_message_uses_fallback() {
        let port = MockPort::returning(Err(SubmissionError::rejected(500, None)));
        let service = RegistrationService::new(
            port,
            ServiceConfig {
                fallback_error_message: "Try later".to_owned(),
                ..ServiceConfig::default()
            },
        );

        let status = service.register(&valid_input()).await.unwrap();

        assert_eq!(status, SubmissionStatus::failed("Try later"));
    }

    #[tokio::test]
    #[traced_test]
    async fn test_transport_failure_is_a_failed_status() {
        let port = MockPort::returning(Err(SubmissionError::transport("connection refused")));
        let service = service_with(port.clone());

        let status = service.register(&valid_input()).await.unwrap();

        assert_eq!(
            status,
            SubmissionStatus::failed("Registration failed. Please try again.")
        );
        assert_eq!(port.sent().len(), 1, "no retry");
        assert!(logs_contain("registration request failed"));
        assert!(!logs_contain("S3nh@!123"));
    }

    #[tokio::test]
    async fn test_invalid_form_is_not_sent() {
        let port = MockPort::returning(Ok(()));
        let service = service_with(port.clone());
        let input = RegistrationInput {
            email: "user@incomplete".to_owned(),
            ..valid_input()
        };

        let err = service.register(&input).await.unwrap_err();

        assert_eq!(
            err,
            DomainError::validation(FieldId::Email, "Invalid e-mail format")
        );
        assert!(port.sent().is_empty());
    }

    #[tokio::test]
    async fn test_body_reflects_values_at_submit_time() {
        let port = MockPort::returning(Ok(()));
        let service = service_with(port.clone());
        let mut form = service.new_form();
        form.fill(&valid_input());
        form.set(FieldId::AccessCode, "ZZZ-9");

        service
            .submit(&SubmissionGate::default(), &form)
            .await
            .unwrap();

        let sent = port.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].code_access, "ZZZ-9");
    }

    #[tokio::test]
    async fn test_second_submit_while_pending_is_rejected() {
        let port = Arc::new(BlockingPort::default());
        let service = service_with(port.clone());
        let gate = SubmissionGate::default();
        let mut form = service.new_form();
        form.fill(&valid_input());

        let first = service.submit(&gate, &form);
        let second = async {
            port.started.notified().await;
            assert!(gate.is_pending());
            let result = service.submit(&gate, &form).await;
            port.release.notify_one();
            result
        };
        let (first, second) = tokio::join!(first, second);

        assert!(!first.unwrap().failed);
        assert_eq!(second.unwrap_err(), DomainError::SubmissionInFlight);
        assert!(!gate.is_pending());
    }

    #[tokio::test]
    async fn test_gate_is_released_after_failure() {
        let port = MockPort::returning(Err(SubmissionError::rejected(409, None)));
        let service = service_with(port.clone());
        let gate = SubmissionGate::default();
        let mut form = service.new_form();
        form.fill(&valid_input());

        service.submit(&gate, &form).await.unwrap();
        service.submit(&gate, &form).await.unwrap();

        assert!(!gate.is_pending());
        assert_eq!(port.sent().len(), 2);
    }
}
