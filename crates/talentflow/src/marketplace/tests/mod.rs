mod accounts;
mod common;
mod notifications;
