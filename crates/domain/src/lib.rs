mod appointment;
mod notification;
mod reminder;
mod shared;
mod user;

pub use appointment::Appointment;
pub use notification::{Notification, NotificationKind, REMINDER_NOTIFICATION_TITLE};
pub use reminder::{Reminder, ReminderKind};
pub use shared::entity::{Entity, InvalidIDError, ID};
pub use user::User;
