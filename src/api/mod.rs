pub mod ticket;

pub use self::ticket::{LineItem, Payment, TicketRequest};
