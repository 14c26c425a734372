#[cfg(test)]
mod tests {
    use crate::builders::records::{PaymentMethod, PaymentOutcome};
    use crate::builders::scheduler::BookingRequest;
    use crate::core::config::ConfigManager;
    use crate::core::engine::ClinicEngine;
    use crate::core::error::ClinicError;
    use tempfile::TempDir;

    fn setup_workspace() -> (TempDir, ClinicEngine) {
        let dir = tempfile::tempdir().unwrap();
        let config_manager = ConfigManager::new_at(dir.path().to_path_buf());
        config_manager.initialize().unwrap();
        let engine = ClinicEngine::new(&config_manager).unwrap();
        (dir, engine)
    }

    fn booking(patient: &str, doctor: &str, date: &str, time: &str) -> BookingRequest {
        BookingRequest {
            patient_name: patient.to_string(),
            patient_id: None,
            doctor_id: doctor.to_string(),
            date: date.to_string(),
            time: time.to_string(),
        }
    }

    #[test]
    fn test_register_and_list_patients_sorted_by_name() {
        let (_dir, engine) = setup_workspace();

        engine
            .register_patient("Zoe Vargas", "11112222", "3001234567", "1990-01-15")
            .unwrap();
        engine
            .register_patient("Ana Gil", "33334444", "3107654321", "1985-06-02")
            .unwrap();

        let patients = engine.list_patients().unwrap();
        assert_eq!(patients.len(), 2);
        assert_eq!(patients[0].name, "Ana Gil");
        assert_eq!(patients[1].name, "Zoe Vargas");
    }

    #[test]
    fn test_short_national_id_writes_nothing() {
        let (_dir, engine) = setup_workspace();

        let result = engine.register_patient("Ana Gil", "1234567", "3001234567", "1985-06-02");
        assert!(matches!(result, Err(ClinicError::Validation(_))));
        assert!(engine.list_patients().unwrap().is_empty());
    }

    #[test]
    fn test_search_matches_national_id_substring() {
        let (_dir, engine) = setup_workspace();

        engine
            .register_patient("Ana Gil", "33334444", "3107654321", "1985-06-02")
            .unwrap();
        engine
            .register_patient("Zoe Vargas", "11112222", "3001234567", "1990-01-15")
            .unwrap();

        let by_id = engine.search_patients("3334").unwrap();
        assert_eq!(by_id.len(), 1);
        assert_eq!(by_id[0].name, "Ana Gil");

        let by_name = engine.search_patients("Var").unwrap();
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].name, "Zoe Vargas");
    }

    #[test]
    fn test_delete_patient_by_id() {
        let (_dir, engine) = setup_workspace();

        let id = engine
            .register_patient("Ana Gil", "33334444", "3107654321", "1985-06-02")
            .unwrap();
        engine.delete_patient(&id).unwrap();
        assert!(engine.list_patients().unwrap().is_empty());
    }

    #[test]
    fn test_same_slot_conflicts_regardless_of_patient() {
        let (_dir, engine) = setup_workspace();

        engine
            .schedule_appointment(&booking("Ana Gil", "D01", "2024-05-01", "09:00"))
            .unwrap();

        let second = engine.schedule_appointment(&booking("Zoe Vargas", "D01", "2024-05-01", "09:00"));
        match second {
            Err(ClinicError::Conflict(msg)) => {
                assert!(msg.contains("09:00"));
                assert!(msg.contains("2024-05-01"));
                assert!(msg.contains("Juan Perez"));
            }
            other => panic!("expected conflict, got {other:?}"),
        }

        // Only the first booking landed.
        assert_eq!(engine.list_appointments().unwrap().len(), 1);
    }

    #[test]
    fn test_same_time_different_doctor_is_fine() {
        let (_dir, engine) = setup_workspace();

        engine
            .schedule_appointment(&booking("Ana Gil", "D01", "2024-05-01", "09:00"))
            .unwrap();
        engine
            .schedule_appointment(&booking("Ana Gil", "D02", "2024-05-01", "09:00"))
            .unwrap();

        assert_eq!(engine.list_appointments().unwrap().len(), 2);
    }

    #[test]
    fn test_appointments_listed_by_date_then_time() {
        let (_dir, engine) = setup_workspace();

        engine
            .schedule_appointment(&booking("Ana Gil", "D01", "2024-05-01", "09:00"))
            .unwrap();
        engine
            .schedule_appointment(&booking("Zoe Vargas", "D01", "2024-03-01", "08:00"))
            .unwrap();

        let appointments = engine.list_appointments().unwrap();
        assert_eq!(appointments[0].date, "2024-03-01");
        assert_eq!(appointments[1].date, "2024-05-01");
    }

    #[test]
    fn test_cancelling_frees_the_slot() {
        let (_dir, engine) = setup_workspace();

        let id = engine
            .schedule_appointment(&booking("Ana Gil", "D03", "2024-05-01", "10:30"))
            .unwrap();
        engine.delete_appointment(&id).unwrap();

        // Same slot can be rebooked once the original is gone.
        engine
            .schedule_appointment(&booking("Zoe Vargas", "D03", "2024-05-01", "10:30"))
            .unwrap();
        assert_eq!(engine.list_appointments().unwrap().len(), 1);
    }

    #[test]
    fn test_card_payment_approves_test_card_and_records_cents() {
        let (_dir, engine) = setup_workspace();

        let receipt = engine
            .pay(
                "Ana Gil",
                "10.00",
                &PaymentMethod::Card {
                    number: "4242424242424242".to_string(),
                    exp_month: "12".to_string(),
                    exp_year: "2030".to_string(),
                    cvc: "123".to_string(),
                },
            )
            .unwrap();

        assert_eq!(receipt.outcome, PaymentOutcome::Approved);
        assert!(receipt.reference.starts_with("CC-SUCC-"));

        let payments = engine.list_payments().unwrap();
        assert_eq!(payments.len(), 1);
        assert_eq!(payments[0].amount_cents, 1000);
        assert_eq!(payments[0].result, PaymentOutcome::Approved);
    }

    #[test]
    fn test_declined_card_still_writes_one_row() {
        let (_dir, engine) = setup_workspace();

        // Luhn-valid but not the test card: the attempt is valid, the mock
        // authorizer just says no.
        let receipt = engine
            .pay(
                "Ana Gil",
                "10.00",
                &PaymentMethod::Card {
                    number: "4111111111111111".to_string(),
                    exp_month: "12".to_string(),
                    exp_year: "2030".to_string(),
                    cvc: "123".to_string(),
                },
            )
            .unwrap();

        assert_eq!(receipt.outcome, PaymentOutcome::Declined);
        assert!(receipt.reference.starts_with("CC-DECL-"));
        assert_eq!(engine.list_payments().unwrap().len(), 1);
    }

    #[test]
    fn test_card_failing_luhn_writes_nothing() {
        let (_dir, engine) = setup_workspace();

        let result = engine.pay(
            "Ana Gil",
            "10.00",
            &PaymentMethod::Card {
                number: "1234567812345678".to_string(),
                exp_month: "12".to_string(),
                exp_year: "2030".to_string(),
                cvc: "123".to_string(),
            },
        );

        assert!(matches!(result, Err(ClinicError::Validation(_))));
        assert!(engine.list_payments().unwrap().is_empty());
    }

    #[test]
    fn test_paypal_approves_and_prefixes_reference() {
        let (_dir, engine) = setup_workspace();

        let receipt = engine
            .pay(
                "Ana Gil",
                "25.50",
                &PaymentMethod::PayPal {
                    email: "ana@example.com".to_string(),
                },
            )
            .unwrap();

        assert_eq!(receipt.outcome, PaymentOutcome::Approved);
        assert!(receipt.reference.starts_with("PP-"));

        let payments = engine.list_payments().unwrap();
        assert_eq!(payments[0].amount_cents, 2550);
    }

    #[test]
    fn test_short_transfer_reference_writes_nothing() {
        let (_dir, engine) = setup_workspace();

        let result = engine.pay(
            "Ana Gil",
            "5.00",
            &PaymentMethod::Transfer {
                reference: "ab".to_string(),
            },
        );

        assert!(matches!(result, Err(ClinicError::Validation(_))));
        assert!(engine.list_payments().unwrap().is_empty());
    }

    #[test]
    fn test_transfer_is_pending_never_approved() {
        let (_dir, engine) = setup_workspace();

        let receipt = engine
            .pay(
                "Ana Gil",
                "5.00",
                &PaymentMethod::Transfer {
                    reference: "BANK-42".to_string(),
                },
            )
            .unwrap();

        assert_eq!(receipt.outcome, PaymentOutcome::Pending);
        assert_eq!(receipt.reference, "TRANSF-BANK-42");
    }

    #[test]
    fn test_zero_amount_is_rejected_for_every_method() {
        let (_dir, engine) = setup_workspace();

        let result = engine.pay(
            "Ana Gil",
            "0",
            &PaymentMethod::PayPal {
                email: "ana@example.com".to_string(),
            },
        );
        assert!(matches!(result, Err(ClinicError::Validation(_))));
        assert!(engine.list_payments().unwrap().is_empty());
    }

    #[test]
    fn test_export_json_contains_inserted_rows() {
        let (dir, engine) = setup_workspace();

        engine
            .register_patient("Ana Gil", "33334444", "3107654321", "1985-06-02")
            .unwrap();
        engine
            .schedule_appointment(&booking("Ana Gil", "D04", "2024-07-10", "14:00"))
            .unwrap();

        let export_path = dir.path().join("records.json");
        engine
            .export_records(export_path.to_str().unwrap(), "json")
            .unwrap();

        let content = std::fs::read_to_string(&export_path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value["patients"][0]["national_id"], "33334444");
        assert_eq!(value["appointments"][0]["doctor_id"], "D04");
    }
}
