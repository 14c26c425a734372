use clinic_desk::builders::records::{PaymentMethod, PaymentOutcome};
use clinic_desk::builders::scheduler::BookingRequest;
use clinic_desk::core::config::{ConfigManager, ConfigProvider, Doctor};
use clinic_desk::core::engine::ClinicEngine;
use clinic_desk::core::error::ClinicError;
use tempfile::TempDir;

fn setup_workspace() -> (TempDir, ConfigManager) {
    let dir = tempfile::tempdir().unwrap();
    let config_manager = ConfigManager::new_at(dir.path().to_path_buf());
    config_manager.initialize().unwrap();
    (dir, config_manager)
}

#[test]
fn test_front_desk_workflow() {
    let (_dir, config_manager) = setup_workspace();
    let engine = ClinicEngine::new(&config_manager).unwrap();

    // 1. Register a patient.
    let patient_id = engine
        .register_patient("Ana Gil", "33334444", "3107654321", "1985-06-02")
        .unwrap();

    // 2. Book her an appointment, linked by id.
    let appointment_id = engine
        .schedule_appointment(&BookingRequest {
            patient_name: "Ana Gil".to_string(),
            patient_id: Some(patient_id.clone()),
            doctor_id: "D02".to_string(),
            date: "2024-06-15".to_string(),
            time: "11:00".to_string(),
        })
        .unwrap();

    let appointments = engine.list_appointments().unwrap();
    assert_eq!(appointments.len(), 1);
    assert_eq!(appointments[0].id, appointment_id);
    assert_eq!(appointments[0].patient_id.as_deref(), Some(patient_id.as_str()));
    assert!(appointments[0].doctor_name.contains("Pediatrics"));

    // 3. A second booking for the same slot is rejected with a conflict,
    //    even for a different patient.
    let conflict = engine.schedule_appointment(&BookingRequest {
        patient_name: "Zoe Vargas".to_string(),
        patient_id: None,
        doctor_id: "D02".to_string(),
        date: "2024-06-15".to_string(),
        time: "11:00".to_string(),
    });
    assert!(matches!(conflict, Err(ClinicError::Conflict(_))));

    // 4. Take a card payment for the visit.
    let receipt = engine
        .pay(
            "Ana Gil",
            "35.00",
            &PaymentMethod::Card {
                number: "4242 4242 4242 4242".to_string(),
                exp_month: "09".to_string(),
                exp_year: "2031".to_string(),
                cvc: "987".to_string(),
            },
        )
        .unwrap();
    assert_eq!(receipt.outcome, PaymentOutcome::Approved);

    let payments = engine.list_payments().unwrap();
    assert_eq!(payments.len(), 1);
    assert_eq!(payments[0].amount_cents, 3500);

    // 5. The visit is over; the appointment is cancelled, the payment stays.
    engine.delete_appointment(&appointment_id).unwrap();
    assert!(engine.list_appointments().unwrap().is_empty());
    assert_eq!(engine.list_payments().unwrap().len(), 1);
}

#[test]
fn test_roster_is_swappable_per_deployment() {
    let (_dir, config_manager) = setup_workspace();

    // A deployment edits clinic.toml to carry its own roster; no code change.
    let mut config = config_manager.load_config().unwrap();
    config.roster = vec![Doctor {
        code: "X01".to_string(),
        name: "Dr. House - Diagnostics".to_string(),
    }];
    config_manager.save_config(&config).unwrap();

    let engine = ClinicEngine::new(&config_manager).unwrap();
    assert_eq!(engine.roster().len(), 1);

    // The stock codes are gone; only the deployment's roster books.
    let stock = engine.schedule_appointment(&BookingRequest {
        patient_name: "Ana Gil".to_string(),
        patient_id: None,
        doctor_id: "D01".to_string(),
        date: "2024-06-15".to_string(),
        time: "11:00".to_string(),
    });
    assert!(matches!(stock, Err(ClinicError::Validation(_))));

    engine
        .schedule_appointment(&BookingRequest {
            patient_name: "Ana Gil".to_string(),
            patient_id: None,
            doctor_id: "X01".to_string(),
            date: "2024-06-15".to_string(),
            time: "11:00".to_string(),
        })
        .unwrap();
}

#[test]
fn test_records_survive_engine_reopen() {
    let (_dir, config_manager) = setup_workspace();

    {
        let engine = ClinicEngine::new(&config_manager).unwrap();
        engine
            .register_patient("Zoe Vargas", "11112222", "3001234567", "1990-01-15")
            .unwrap();
    }

    // A fresh engine on the same workspace sees the stored rows.
    let engine = ClinicEngine::new(&config_manager).unwrap();
    let patients = engine.list_patients().unwrap();
    assert_eq!(patients.len(), 1);
    assert_eq!(patients[0].national_id, "11112222");
}

#[test]
fn test_export_round_trips_through_all_formats() {
    let (dir, config_manager) = setup_workspace();
    let engine = ClinicEngine::new(&config_manager).unwrap();

    engine
        .register_patient("Ana Gil", "33334444", "3107654321", "1985-06-02")
        .unwrap();
    engine
        .pay(
            "Ana Gil",
            "12.00",
            &PaymentMethod::Transfer {
                reference: "BANK-0099".to_string(),
            },
        )
        .unwrap();

    for format in ["json", "yaml", "toml"] {
        let path = dir.path().join(format!("records.{format}"));
        engine
            .export_records(path.to_str().unwrap(), format)
            .unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("33334444"), "{format} export missing patient");
        assert!(content.contains("TRANSF-BANK-0099"), "{format} export missing payment");
    }
}
