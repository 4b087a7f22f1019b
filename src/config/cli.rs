use crate::core::requests::{RequestForm, RequesterDetails};
use crate::core::users::UserForm;
use crate::domain::model::UrgencyLevel;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "blood-bank")]
#[command(about = "Blood bank administration client: stock, issue requests, users and HemoBot")]
pub struct CliArgs {
    /// TOML configuration file; built-in defaults are used when omitted
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Overrides `api.base_url` from the configuration file
    #[arg(long)]
    pub api_base_url: Option<String>,

    #[arg(long, short = 'v', help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Show stock per blood group
    Stock,
    /// List issue requests
    Requests,
    /// Submit a new issue request
    RequestCreate(RequestCreateArgs),
    /// List registered users
    Users {
        /// Case-insensitive filter over name, email and blood group
        #[arg(long, default_value = "")]
        search: String,
    },
    /// Register a user
    UserCreate(UserCreateArgs),
    /// Ask HemoBot a single question
    Chat {
        message: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RequesterKind {
    Receiver,
    Donor,
}

#[derive(Debug, Clone, Args)]
pub struct RequestCreateArgs {
    #[arg(long, value_enum, default_value = "receiver")]
    pub user_type: RequesterKind,
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub name: String,
    #[arg(long, default_value = "A+")]
    pub blood_group: String,
    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    pub quantity: i64,
    #[arg(long, default_value = "Normal")]
    pub urgency: UrgencyLevel,
    #[arg(long, default_value = "")]
    pub hospital: String,
    #[arg(long, default_value = "")]
    pub referred_by: String,
    #[arg(long, default_value = "")]
    pub purpose: String,
    /// Donor requests only; defaults to 0
    #[arg(long)]
    pub total_amount: Option<u64>,
}

impl RequestCreateArgs {
    /// 命令列參數轉成申請表單；欄位檢查交給 `build_request_payload`
    pub fn to_form(&self) -> RequestForm {
        let requester = RequesterDetails {
            email: self.email.clone(),
            user_name: self.name.clone(),
            blood_group: self.blood_group.clone(),
            quantity: self.quantity,
            urgency: self.urgency,
        };

        match self.user_type {
            RequesterKind::Receiver => RequestForm::Receiver {
                requester,
                hospital: self.hospital.clone(),
                referred_by: self.referred_by.clone(),
                purpose: self.purpose.clone(),
            },
            RequesterKind::Donor => RequestForm::Donor {
                requester,
                total_amount: self.total_amount,
            },
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct UserCreateArgs {
    #[arg(long)]
    pub full_name: String,
    #[arg(long, default_value_t = 18, allow_negative_numbers = true)]
    pub age: i64,
    #[arg(long, default_value = "Male")]
    pub sex: String,
    #[arg(long, default_value = "O+")]
    pub blood_group: String,
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub phone: String,
    #[arg(long)]
    pub address: String,
}

impl UserCreateArgs {
    pub fn to_form(&self) -> UserForm {
        UserForm {
            full_name: self.full_name.clone(),
            age: self.age,
            sex: self.sex.clone(),
            blood_group: self.blood_group.clone(),
            email: self.email.clone(),
            phone_number: self.phone.clone(),
            full_address: self.address.clone(),
        }
    }
}
