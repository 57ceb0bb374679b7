use crate::dtos::ReminderResultDTO;
use serde::{Deserialize, Serialize};

pub mod send_reminders {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    pub struct APIResponse {
        pub success: bool,
        pub processed: usize,
        pub results: Vec<ReminderResultDTO>,
    }

    impl APIResponse {
        pub fn new(results: Vec<ReminderResultDTO>) -> Self {
            Self {
                success: true,
                processed: results.len(),
                results,
            }
        }
    }

    /// Body of the 500 response when the due reminders could not be fetched
    #[derive(Debug, Deserialize, Serialize)]
    pub struct APIErrorResponse {
        pub success: bool,
        pub error: String,
    }

    impl APIErrorResponse {
        pub fn new(error: String) -> Self {
            Self {
                success: false,
                error,
            }
        }
    }
}

pub mod cron_send_reminders {
    use super::*;

    pub type APIResponse = super::send_reminders::APIResponse;

    #[derive(Debug, Deserialize, Serialize)]
    pub struct APIErrorResponse {
        pub error: String,
    }
}
