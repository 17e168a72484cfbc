mod contact_email;
mod contact_message;
mod contact_name;
mod contact_subject;
mod new_contact;

pub use contact_email::ContactEmail;
pub use contact_message::{utf16_len, ContactMessage, MIN_MESSAGE_LENGTH};
pub use contact_name::ContactName;
pub use contact_subject::ContactSubject;
pub use new_contact::{NewContact, ValidationError};
