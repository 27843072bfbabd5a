//! Profiles for the forms formkit ships with.

mod donation;
mod signin;
mod ticket;

pub use donation::{DonationForm, FREQUENCIES};
pub use signin::{SignInForm, is_checked};
pub use ticket::{ATTACHMENT_MAX_BYTES, CATEGORIES, PRIORITIES, TicketForm};
