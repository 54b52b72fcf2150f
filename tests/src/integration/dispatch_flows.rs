//! # Dispatch Flows
//!
//! Every response type dispatched through one initialized executor, checking
//! the controller calls made, the published report and the mode transitions.

#[cfg(test)]
mod tests {
    use super::super::{ready_executor, wait_for_report};
    use rand::Rng;
    use response_executor::adapters::ControllerCall;
    use response_executor::sequences::CRITICAL_SERVICES;
    use response_executor::{
        validate, DispatchError, ExecutorConfig, ResponseExecutorApi, ResponseRequest,
        ResponseType, SystemMode, ValidationError, ZoneMask,
    };

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    fn request(response_type: ResponseType, zones: ZoneMask, timestamp: u64) -> ResponseRequest {
        ResponseRequest::new(response_type, 6, zones, "integration drill").with_timestamp(timestamp)
    }

    // =============================================================================
    // FULL LIFECYCLE
    // =============================================================================

    #[tokio::test]
    async fn test_every_supported_type_reports_its_steps() {
        let (executor, controllers) = ready_executor(ExecutorConfig::for_testing()).await;
        let zones = ZoneMask::from_zones(&[1, 4]);

        let expected_steps = [
            (ResponseType::Lockdown, 4),
            (ResponseType::NetworkIsolate, 3),
            (ResponseType::ServiceFailover, 8),
            (ResponseType::Evacuation, 4),
            (ResponseType::BackupActivate, 1),
            (ResponseType::PartialContain, 1),
            (ResponseType::FullRecovery, 1),
        ];

        for (i, (response_type, steps)) in expected_steps.into_iter().enumerate() {
            let timestamp = 1_000 + i as u64;
            executor
                .dispatch(request(response_type, zones, timestamp))
                .await
                .unwrap_or_else(|e| panic!("{response_type} failed: {e}"));

            let report = executor.last_report();
            assert_eq!(report.response_id, timestamp);
            assert!(report.is_success(), "{response_type}: {report:?}");
            assert_eq!(report.sub_operations, steps, "{response_type}");
            assert_eq!(report.success_count, steps, "{response_type}");
            assert_eq!(report.failed_count, 0);
            assert!(report.end_time >= report.start_time);
        }

        assert_eq!(
            controllers.count(|c| matches!(c, ControllerCall::IsolateZone { .. })),
            2
        );
        assert_eq!(
            controllers.count(|c| matches!(c, ControllerCall::StartBackup { .. })),
            CRITICAL_SERVICES.len()
        );
        // Recovery was the last dispatch
        assert_eq!(executor.system_status(), SystemMode::Recovery);
    }

    #[tokio::test]
    async fn test_network_isolation_visits_zones_in_order() {
        let (executor, controllers) = ready_executor(ExecutorConfig::for_testing()).await;
        let zones = ZoneMask::from_zones(&[9, 0, 31]);

        executor
            .dispatch(request(ResponseType::NetworkIsolate, zones, 5))
            .await
            .unwrap();

        assert_eq!(
            controllers.sequence_calls(),
            vec![
                ControllerCall::PrepareRuleSet,
                ControllerCall::IsolateZone { zone: 0 },
                ControllerCall::IsolateZone { zone: 9 },
                ControllerCall::IsolateZone { zone: 31 },
                ControllerCall::ActivateRuleSet,
            ]
        );
        assert_eq!(executor.system_status(), SystemMode::HeightenedSecurity);
    }

    #[tokio::test]
    async fn test_one_failed_zone_does_not_stop_the_rest() {
        let (executor, controllers) = ready_executor(ExecutorConfig::for_testing()).await;
        controllers.fail_when(|c| matches!(c, ControllerCall::IsolateZone { zone: 2 }));

        let err = executor
            .dispatch(request(
                ResponseType::NetworkIsolate,
                ZoneMask::from_zones(&[1, 2, 3]),
                6,
            ))
            .await
            .unwrap_err();

        assert!(matches!(err, DispatchError::StepFailed { .. }));
        let report = executor.last_report();
        assert_eq!(report.sub_operations, 4);
        assert_eq!(report.success_count, 3);
        assert_eq!(report.failed_count, 1);
        assert!(report.error_details.contains("zone-isolation[2]"));
        assert_eq!(
            controllers.count(|c| *c == ControllerCall::ActivateRuleSet),
            1
        );
        // A failed dispatch never raises the mode
        assert_eq!(executor.system_status(), SystemMode::Normal);
    }

    #[tokio::test]
    async fn test_lockdown_then_recovery_round_trip() {
        let (executor, _controllers) = ready_executor(ExecutorConfig::for_testing()).await;

        executor
            .dispatch(request(ResponseType::Lockdown, ZoneMask::ALL, 10).with_duration(600))
            .await
            .unwrap();
        assert_eq!(executor.system_status(), SystemMode::Lockdown);

        // Lesser responses keep the lockdown in place
        executor
            .dispatch(request(ResponseType::BackupActivate, ZoneMask::NONE, 11))
            .await
            .unwrap();
        assert_eq!(executor.system_status(), SystemMode::Lockdown);

        executor
            .dispatch(request(ResponseType::FullRecovery, ZoneMask::ALL, 12))
            .await
            .unwrap();
        assert_eq!(executor.system_status(), SystemMode::Recovery);
        assert_eq!(executor.last_report().system_mode, SystemMode::Recovery);
    }

    #[tokio::test]
    async fn test_cleanup_then_reinit() {
        let (executor, controllers) = ready_executor(ExecutorConfig::for_testing()).await;
        executor
            .dispatch(request(ResponseType::Lockdown, ZoneMask::ALL, 20))
            .await
            .unwrap();

        executor.cleanup().await;
        assert!(!executor.is_initialized());
        assert_eq!(executor.system_status(), SystemMode::Normal);

        let err = executor
            .dispatch(request(ResponseType::Lockdown, ZoneMask::ALL, 21))
            .await
            .unwrap_err();
        assert_eq!(err, DispatchError::NotInitialized);
        // The last report survives cleanup
        assert_eq!(executor.last_report().response_id, 20);

        executor.init().await.unwrap();
        controllers.clear_calls();
        executor
            .dispatch(request(ResponseType::Evacuation, ZoneMask::ALL, 22))
            .await
            .unwrap();
        assert_eq!(wait_for_report(&executor, 22).await.sub_operations, 4);
    }

    #[tokio::test]
    async fn test_unsupported_type_touches_no_controller() {
        let (executor, controllers) = ready_executor(ExecutorConfig::for_testing()).await;

        let err = executor
            .dispatch(request(ResponseType::CommsPriority, ZoneMask::ALL, 30))
            .await
            .unwrap_err();

        assert_eq!(err.code(), -99);
        assert!(controllers.calls().is_empty());
        assert_eq!(executor.last_report().overall_result, -99);
    }

    // =============================================================================
    // VALIDATION
    // =============================================================================

    #[test]
    fn test_random_requests_validate_by_range() {
        let mut rng = rand::thread_rng();

        for _ in 0..500 {
            let severity: u8 = rng.gen();
            let auth_level: u8 = rng.gen_range(0..8);
            let zones = ZoneMask::new(rng.gen());
            let response_type = ResponseType::ALL[rng.gen_range(0..ResponseType::ALL.len())];

            let request = ResponseRequest::new(response_type, severity, zones, "fuzz")
                .with_auth_level(auth_level);
            let result = validate(&request);

            if !(1..=10).contains(&severity) {
                assert_eq!(result, Err(ValidationError::SeverityOutOfRange(severity)));
            } else if !(1..=5).contains(&auth_level) {
                assert_eq!(result, Err(ValidationError::AuthLevelOutOfRange(auth_level)));
            } else if response_type.is_zone_scoped() && zones.is_empty() {
                assert_eq!(result, Err(ValidationError::MissingTargetZones(response_type)));
            } else {
                assert_eq!(result, Ok(()));
            }
        }
    }

    #[tokio::test]
    async fn test_executor_validation_matches_domain() {
        let (executor, _controllers) = ready_executor(ExecutorConfig::for_testing()).await;

        let good = request(ResponseType::Lockdown, ZoneMask::ALL, 1);
        let no_zones = request(ResponseType::Lockdown, ZoneMask::NONE, 1);
        let too_severe = ResponseRequest::new(ResponseType::BackupActivate, 11, ZoneMask::NONE, "x");

        assert!(executor.validate_parameters(&good));
        assert!(!executor.validate_parameters(&no_zones));
        assert!(!executor.validate_parameters(&too_severe));
    }
}
