use anyhow::Result;
use clap::{Parser, Subcommand};

use clinic_desk::builders::records::PaymentMethod;
use clinic_desk::utils;

#[derive(Parser)]
#[command(name = "clinic-desk")]
#[command(about = "A small clinic front-desk toolset: patients, appointments, mock payments")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a clinic workspace in the current directory
    Init,
    /// Check the workspace configuration for problems
    ValidateConfig,

    /// Register a new patient
    AddPatient {
        /// Patient's full name
        name: String,
        /// National ID, exactly 8 digits
        national_id: String,
        /// Phone number, at least 10 digits
        phone: String,
        /// Birth date, YYYY-MM-DD
        birth_date: String,
    },
    /// List all patients, sorted by name
    ListPatients,
    /// Search patients by name or national ID substring
    SearchPatients {
        text: String,
    },
    /// Delete a patient by id
    RemovePatient {
        id: String,
    },

    /// Book an appointment
    Schedule {
        /// Patient name as it should appear on the agenda
        patient_name: String,
        /// Doctor roster code (see `doctors`)
        doctor: String,
        /// Appointment date, YYYY-MM-DD
        date: String,
        /// Appointment time, HH:MM (24h)
        time: String,
        /// Optional id of a registered patient
        #[arg(long)]
        patient_id: Option<String>,
    },
    /// List all appointments, sorted by date and time
    ListAppointments,
    /// Cancel an appointment by id
    CancelAppointment {
        id: String,
    },

    /// Process a mock payment
    Pay {
        #[command(subcommand)]
        method: PayMethod,
    },
    /// List all recorded payments, newest first
    ListPayments,

    /// Show the configured doctor roster
    Doctors,
    /// Show a summary of the workspace
    Status,
    /// Export all records to a file
    Export {
        /// Destination file path
        file: String,
        /// Output format: json, yaml, or toml
        #[arg(long, default_value = "toml")]
        format: String,
    },
}

#[derive(Subcommand)]
enum PayMethod {
    /// Pay by credit card (mock: only the 4242... test card approves)
    Card {
        patient_name: String,
        /// Amount in major units, e.g. 10.00
        amount: String,
        /// Card number; spaces and dashes are ignored
        number: String,
        /// CVC, at least 3 digits
        cvc: String,
        /// Expiry month (captured, not validated)
        #[arg(long, default_value = "")]
        exp_month: String,
        /// Expiry year (captured, not validated)
        #[arg(long, default_value = "")]
        exp_year: String,
    },
    /// Pay by PayPal (mock: always approves a plausible email)
    Paypal {
        patient_name: String,
        amount: String,
        email: String,
    },
    /// Pay by bank transfer (mock: always pending)
    Transfer {
        patient_name: String,
        amount: String,
        /// Bank reference, at least 5 characters
        reference: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Init => utils::initialize_workspace(),
        Commands::ValidateConfig => utils::validate_config(),
        Commands::AddPatient {
            name,
            national_id,
            phone,
            birth_date,
        } => utils::register_patient(&name, &national_id, &phone, &birth_date),
        Commands::ListPatients => utils::list_patients(),
        Commands::SearchPatients { text } => utils::search_patients(&text),
        Commands::RemovePatient { id } => utils::remove_patient(&id),
        Commands::Schedule {
            patient_name,
            doctor,
            date,
            time,
            patient_id,
        } => {
            utils::schedule_appointment(&patient_name, patient_id.as_deref(), &doctor, &date, &time)
        }
        Commands::ListAppointments => utils::list_appointments(),
        Commands::CancelAppointment { id } => utils::cancel_appointment(&id),
        Commands::Pay { method } => match method {
            PayMethod::Card {
                patient_name,
                amount,
                number,
                cvc,
                exp_month,
                exp_year,
            } => utils::pay(
                &patient_name,
                &amount,
                PaymentMethod::Card {
                    number,
                    exp_month,
                    exp_year,
                    cvc,
                },
            ),
            PayMethod::Paypal {
                patient_name,
                amount,
                email,
            } => utils::pay(&patient_name, &amount, PaymentMethod::PayPal { email }),
            PayMethod::Transfer {
                patient_name,
                amount,
                reference,
            } => utils::pay(&patient_name, &amount, PaymentMethod::Transfer { reference }),
        },
        Commands::ListPayments => utils::list_payments(),
        Commands::Doctors => utils::list_doctors(),
        Commands::Status => utils::show_status(),
        Commands::Export { file, format } => utils::export_records(&file, &format),
    }
}
