mod file;
mod message;
pub mod smtp;

pub use file::FileTransport;
pub use smtp::{SmtpSecurity, SmtpSettings, SmtpTransport};

pub(crate) use message::build_message;
