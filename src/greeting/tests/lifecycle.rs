//! Tests for service init/cleanup transitions

#[cfg(test)]
mod tests {
    use super::super::captured_service;
    use crate::greeting::config::{Configuration, DEFAULT_MESSAGE};
    use crate::greeting::error::ErrorCode;

    #[test]
    fn test_service_starts_uninitialized() {
        let (service, _console) = captured_service();
        assert!(!service.is_initialized());
        assert!(service.active_config().is_none());
    }

    #[test]
    fn test_init_without_config_uses_defaults() {
        let (service, _console) = captured_service();
        service.init(None).unwrap();

        assert!(service.is_initialized());
        let active = service.active_config().unwrap();
        assert_eq!(active, Configuration::create_default());
        assert_eq!(active.message, DEFAULT_MESSAGE);
    }

    #[test]
    fn test_reinit_replaces_configuration() {
        let (service, _console) = captured_service();
        service
            .init(Some(Configuration::create_default().with_message("first")))
            .unwrap();
        service
            .init(Some(Configuration::create_default().with_message("second")))
            .unwrap();

        assert_eq!(service.active_config().unwrap().message, "second");
    }

    #[test]
    fn test_invalid_config_is_rejected_and_state_kept() {
        let (service, _console) = captured_service();
        service
            .init(Some(Configuration::create_default().with_message("kept")))
            .unwrap();

        let err = service
            .init(Some(Configuration::create_default().with_message("line\nbreak")))
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidConfig);
        assert_eq!(service.active_config().unwrap().message, "kept");
    }

    #[test]
    fn test_cleanup_twice_is_harmless() {
        let (service, _console) = captured_service();
        service.init(None).unwrap();

        assert!(service.cleanup().is_ok());
        assert!(service.cleanup().is_ok());
        assert!(!service.is_initialized());
        assert!(service.active_config().is_none());
    }

    #[test]
    fn test_cleanup_before_init_is_harmless() {
        let (service, _console) = captured_service();
        assert!(service.cleanup().is_ok());
        assert!(!service.is_initialized());
    }

    #[test]
    fn test_service_can_be_reinitialized_after_cleanup() {
        let (service, console) = captured_service();
        for round in 0..3 {
            let message = format!("round {}", round);
            service
                .init(Some(Configuration::create_default().with_message(&message)))
                .unwrap();
            service.print(None).unwrap();
            service.cleanup().unwrap();
        }
        assert_eq!(console.lines(), vec!["round 0", "round 1", "round 2"]);
    }

    #[test]
    fn test_set_message_requires_init() {
        let (service, _console) = captured_service();
        let err = service.set_message("too early").unwrap_err();
        assert_eq!(err.code(), ErrorCode::NotInitialized);
        assert!(!service.is_initialized());
    }

    #[test]
    fn test_set_message_rejects_line_breaks_without_mutation() {
        let (service, _console) = captured_service();
        service.init(None).unwrap();

        let err = service.set_message("a\nb").unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidConfig);
        assert_eq!(service.active_config().unwrap().message, DEFAULT_MESSAGE);
    }

    #[test]
    fn test_version_matches_api_version() {
        let (service, _console) = captured_service();
        assert_eq!(service.get_version(), crate::core::version::api_version());
        assert_eq!(service.get_version(), crate::greeting::api::version());
    }

    #[test]
    fn test_service_is_shareable_across_threads() {
        use std::sync::Arc;
        use std::thread;

        let (service, console) = captured_service();
        let service = Arc::new(service);
        service.init(None).unwrap();

        let handles: Vec<_> = (0..4)
            .map(|i| {
                let service = Arc::clone(&service);
                thread::spawn(move || {
                    for _ in 0..10 {
                        service.print(Some(&format!("thread {}", i))).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let lines = console.lines();
        assert_eq!(lines.len(), 40);
        assert!(lines.iter().all(|l| l.starts_with("thread ")));
    }
}
