// Email delivery capability
// The transport itself (SMTP relay, provider API) lives outside this service;
// the auth flows only depend on the EmailSender trait.

mod sender;

pub use sender::{EmailSender, LogEmailSender};
